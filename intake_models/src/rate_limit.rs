use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// The number of requests a client made in the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitRecord {
    pub count: u32,
    pub window_start: DateTime<Utc>,
}

impl RateLimitRecord {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            count: 1,
            window_start: now,
        }
    }

    pub fn window_end(&self, window: TimeDelta) -> DateTime<Utc> {
        self.window_start + window
    }

    /// A window has expired once the current time is strictly after its end.
    pub fn is_expired(&self, now: DateTime<Utc>, window: TimeDelta) -> bool {
        now > self.window_end(window)
    }
}
