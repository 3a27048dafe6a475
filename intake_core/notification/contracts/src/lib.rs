use std::future::Future;

use intake_models::intake::IntakeSubmission;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait NotificationService: Send + Sync + 'static {
    /// Sends the acknowledgement to the submitter and the lead alert to the
    /// internal recipient.
    ///
    /// Both messages are sent concurrently. Failures are logged and reported,
    /// but never returned as errors.
    fn notify(
        &self,
        submission: &IntakeSubmission,
    ) -> impl Future<Output = NotificationReport> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationReport {
    pub acknowledgement: DeliveryStatus,
    pub lead_alert: DeliveryStatus,
}

impl NotificationReport {
    pub fn all_delivered(&self) -> bool {
        self.acknowledgement.is_delivered() && self.lead_alert.is_delivered()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    /// The mail server did not accept the message.
    Rejected,
    /// The message could not be rendered or sent.
    Failed,
    TimedOut,
}

impl DeliveryStatus {
    pub fn is_delivered(self) -> bool {
        self == Self::Delivered
    }
}

#[cfg(feature = "mock")]
impl MockNotificationService {
    pub fn with_notify(mut self, submission: IntakeSubmission, result: NotificationReport) -> Self {
        self.expect_notify()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
