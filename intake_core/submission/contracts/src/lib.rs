use std::{future::Future, time::Duration};

use intake_core_notification_contracts::NotificationReport;
use intake_models::{
    client::ClientIdentifier,
    intake::{IntakeDraft, IntakeSubmission},
    validate::ValidationErrors,
};
use thiserror::Error;

pub const SUCCESS_MESSAGE: &str = "Thank you! Your information has been sent to our team.";

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SubmissionService: Send + Sync + 'static {
    /// Accepts an intake form submitted by `client`.
    ///
    /// The client is checked against the rate limit before the draft is
    /// validated. Notifications are only sent for valid submissions, and
    /// their delivery does not affect the result.
    fn submit(
        &self,
        client: &ClientIdentifier,
        draft: IntakeDraft,
    ) -> impl Future<Output = Result<SubmitIntakeOutcome, SubmitIntakeError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitIntakeOutcome {
    pub submission: IntakeSubmission,
    pub notifications: NotificationReport,
}

#[derive(Debug, Error)]
pub enum SubmitIntakeError {
    #[error("Too many submissions. Please wait a moment before trying again.")]
    RateLimited { retry_after: Duration },
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockSubmissionService {
    pub fn with_submit(
        mut self,
        client: ClientIdentifier,
        draft: IntakeDraft,
        result: Result<SubmitIntakeOutcome, SubmitIntakeError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(
                mockall::predicate::eq(client),
                mockall::predicate::eq(draft),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(result)));
        self
    }
}
