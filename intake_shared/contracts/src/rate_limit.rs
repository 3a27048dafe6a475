use std::{future::Future, time::Duration};

use intake_models::client::ClientIdentifier;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait RateLimitService: Send + Sync + 'static {
    /// Counts a request of the given client against its current window and
    /// decides whether the request may proceed.
    ///
    /// Rejected requests are not counted.
    fn check(
        &self,
        client: &ClientIdentifier,
    ) -> impl Future<Output = anyhow::Result<RateLimitDecision>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// The request is allowed. `remaining` more requests are allowed in the
    /// current window.
    Allowed { remaining: u32 },
    /// The client has exhausted its window, which ends after `retry_after`.
    Limited { retry_after: Duration },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

#[cfg(feature = "mock")]
impl MockRateLimitService {
    pub fn with_check(mut self, client: ClientIdentifier, result: RateLimitDecision) -> Self {
        self.expect_check()
            .once()
            .with(mockall::predicate::eq(client))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_check_error(mut self, client: ClientIdentifier) -> Self {
        self.expect_check()
            .once()
            .with(mockall::predicate::eq(client))
            .return_once(|_| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!(
                    "rate limit store is unavailable"
                ))))
            });
        self
    }
}
