use std::{future::Future, sync::Arc, time::Duration};

use anyhow::anyhow;
use intake_core_notification_contracts::{DeliveryStatus, NotificationReport, NotificationService};
use intake_di::Build;
use intake_email_contracts::template::TemplateEmailService;
use intake_models::{
    email_address::{EmailAddress, EmailAddressWithName},
    intake::IntakeSubmission,
};
use intake_shared_contracts::time::TimeService;
use intake_templates_contracts::{AcknowledgementTemplate, LeadAlertTemplate};
use intake_utils::trace_instrument;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Build)]
pub struct NotificationServiceImpl<Time, TemplateEmail> {
    time: Time,
    template_email: TemplateEmail,
    config: NotificationServiceConfig,
}

#[derive(Debug, Clone)]
pub struct NotificationServiceConfig {
    pub alert_recipient: Arc<EmailAddressWithName>,
    pub send_timeout: Duration,
}

#[derive(Debug, Clone, Copy)]
enum Notification {
    Acknowledgement,
    LeadAlert,
}

impl Notification {
    fn as_str(self) -> &'static str {
        match self {
            Self::Acknowledgement => "acknowledgement",
            Self::LeadAlert => "lead_alert",
        }
    }
}

impl<Time, TemplateEmail> NotificationService for NotificationServiceImpl<Time, TemplateEmail>
where
    Time: TimeService,
    TemplateEmail: TemplateEmailService,
{
    #[trace_instrument(skip_all)]
    async fn notify(&self, submission: &IntakeSubmission) -> NotificationReport {
        let received_at = self.time.now();

        let submitter = submission
            .business_email
            .parse::<EmailAddress>()
            .ok()
            .map(|email| email.with_name(submission.full_name.to_string()));
        if submitter.is_none() {
            warn!("Submitter email address cannot be used as a recipient");
        }
        let reply_to = submitter.clone();

        let acknowledgement_data = AcknowledgementTemplate::new(submission);
        let lead_alert_data = LeadAlertTemplate::new(submission, received_at);

        let acknowledgement = async {
            let recipient = submitter.ok_or_else(|| anyhow!("No deliverable submitter address"))?;
            self.template_email
                .send_acknowledgement_email(recipient, &acknowledgement_data)
                .await
        };
        let lead_alert = self.template_email.send_lead_alert_email(
            (*self.config.alert_recipient).clone(),
            reply_to,
            &lead_alert_data,
        );

        let (acknowledgement, lead_alert) = tokio::join!(
            self.deliver(Notification::Acknowledgement, acknowledgement),
            self.deliver(Notification::LeadAlert, lead_alert),
        );

        info!(?acknowledgement, ?lead_alert, "Notifications dispatched");

        NotificationReport {
            acknowledgement,
            lead_alert,
        }
    }
}

impl<Time, TemplateEmail> NotificationServiceImpl<Time, TemplateEmail> {
    async fn deliver(
        &self,
        notification: Notification,
        send: impl Future<Output = anyhow::Result<bool>>,
    ) -> DeliveryStatus {
        let notification = notification.as_str();
        match tokio::time::timeout(self.config.send_timeout, send).await {
            Ok(Ok(true)) => DeliveryStatus::Delivered,
            Ok(Ok(false)) => {
                warn!(notification, "Notification was rejected by the mail server");
                DeliveryStatus::Rejected
            }
            Ok(Err(err)) => {
                error!(notification, "Failed to send notification: {err}");
                DeliveryStatus::Failed
            }
            Err(_) => {
                error!(
                    notification,
                    timeout = ?self.config.send_timeout,
                    "Sending notification timed out"
                );
                DeliveryStatus::TimedOut
            }
        }
    }
}
