use chrono::{DateTime, Utc};
use intake_di::Build;
use intake_shared_contracts::time::TimeService;
use intake_utils::trace_instrument;

#[derive(Debug, Clone, Copy, Build)]
pub struct TimeServiceImpl;

impl TimeService for TimeServiceImpl {
    #[trace_instrument(skip(self))]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
