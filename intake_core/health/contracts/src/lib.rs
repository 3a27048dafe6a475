use std::future::Future;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait HealthService: Send + Sync + 'static {
    /// Returns the health of the backing services. Results are cached for a
    /// short time.
    fn get_status(&self) -> impl Future<Output = HealthStatus> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthStatus {
    pub cache: bool,
    pub email: bool,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.cache && self.email
    }
}

#[cfg(feature = "mock")]
impl MockHealthService {
    pub fn with_get_status(mut self, result: HealthStatus) -> Self {
        self.expect_get_status()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }
}
