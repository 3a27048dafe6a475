use std::future::Future;

use intake_models::email_address::EmailAddressWithName;
use intake_templates_contracts::{AcknowledgementTemplate, LeadAlertTemplate};

pub const ACKNOWLEDGEMENT_SUBJECT: &str = "Thank you for your interest in FRAQTIV";

pub fn lead_alert_subject(company_name: &str) -> String {
    format!("New Intake Form Submission - {company_name}")
}

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateEmailService: Send + Sync + 'static {
    /// Sends the confirmation to the person who submitted the intake form.
    fn send_acknowledgement_email(
        &self,
        recipient: EmailAddressWithName,
        data: &AcknowledgementTemplate,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;

    /// Sends the new lead notification to the internal recipient. Replies go
    /// to `reply_to`, usually the submitter.
    fn send_lead_alert_email(
        &self,
        recipient: EmailAddressWithName,
        reply_to: Option<EmailAddressWithName>,
        data: &LeadAlertTemplate,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;
}

#[cfg(feature = "mock")]
impl MockTemplateEmailService {
    pub fn with_send_acknowledgement_email(
        mut self,
        recipient: EmailAddressWithName,
        data: AcknowledgementTemplate,
        result: bool,
    ) -> Self {
        self.expect_send_acknowledgement_email()
            .once()
            .with(
                mockall::predicate::eq(recipient),
                mockall::predicate::eq(data),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_send_lead_alert_email(
        mut self,
        recipient: EmailAddressWithName,
        reply_to: Option<EmailAddressWithName>,
        data: LeadAlertTemplate,
        result: bool,
    ) -> Self {
        self.expect_send_lead_alert_email()
            .once()
            .with(
                mockall::predicate::eq(recipient),
                mockall::predicate::eq(reply_to),
                mockall::predicate::eq(data),
            )
            .return_once(move |_, _, _| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
