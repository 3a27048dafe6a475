use intake_di::Build;
use intake_email_contracts::{
    template::{lead_alert_subject, TemplateEmailService, ACKNOWLEDGEMENT_SUBJECT},
    ContentType, Email, EmailService,
};
use intake_models::email_address::EmailAddressWithName;
use intake_templates_contracts::{
    AcknowledgementTemplate, LeadAlertTemplate, Template, TemplateService,
};

#[derive(Debug, Clone, Build)]
pub struct TemplateEmailServiceImpl<Email, Template> {
    email: Email,
    template: Template,
}

impl<EmailS, Template> TemplateEmailService for TemplateEmailServiceImpl<EmailS, Template>
where
    EmailS: EmailService,
    Template: TemplateService,
{
    async fn send_acknowledgement_email(
        &self,
        recipient: EmailAddressWithName,
        data: &AcknowledgementTemplate,
    ) -> anyhow::Result<bool> {
        self.send_email(recipient, None, data, ACKNOWLEDGEMENT_SUBJECT)
            .await
    }

    async fn send_lead_alert_email(
        &self,
        recipient: EmailAddressWithName,
        reply_to: Option<EmailAddressWithName>,
        data: &LeadAlertTemplate,
    ) -> anyhow::Result<bool> {
        self.send_email(
            recipient,
            reply_to,
            data,
            lead_alert_subject(&data.company_name),
        )
        .await
    }
}

impl<EmailS, TemplateS> TemplateEmailServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_email<T: Template + 'static>(
        &self,
        recipient: EmailAddressWithName,
        reply_to: Option<EmailAddressWithName>,
        data: &T,
        subject: impl Into<String>,
    ) -> anyhow::Result<bool> {
        self.email
            .send(Email {
                recipient,
                subject: subject.into(),
                body: self.template.render(data)?,
                content_type: ContentType::Html,
                reply_to,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use intake_demo::{JOHN_DOE, NOW};
    use intake_email_contracts::MockEmailService;
    use intake_templates_contracts::MockTemplateService;

    use super::*;

    #[tokio::test]
    async fn acknowledgement() {
        // Arrange
        let data = AcknowledgementTemplate::new(&JOHN_DOE);
        let recipient = "John Doe <john@example.com>"
            .parse::<EmailAddressWithName>()
            .unwrap();

        let template = MockTemplateService::new().with_render(data.clone(), "<p>ack</p>".into());
        let email = MockEmailService::new().with_send(
            Email {
                recipient: recipient.clone(),
                subject: "Thank you for your interest in FRAQTIV".into(),
                body: "<p>ack</p>".into(),
                content_type: ContentType::Html,
                reply_to: None,
            },
            true,
        );

        let sut = TemplateEmailServiceImpl { email, template };

        // Act
        let result = sut.send_acknowledgement_email(recipient, &data).await;

        // Assert
        assert!(result.unwrap());
    }

    #[tokio::test]
    async fn lead_alert() {
        // Arrange
        let data = LeadAlertTemplate::new(&JOHN_DOE, *NOW);
        let recipient = "leads@example.com"
            .parse::<EmailAddressWithName>()
            .unwrap();
        let reply_to = "John Doe <john@example.com>"
            .parse::<EmailAddressWithName>()
            .unwrap();

        let template = MockTemplateService::new().with_render(data.clone(), "<p>alert</p>".into());
        let email = MockEmailService::new().with_send(
            Email {
                recipient: recipient.clone(),
                subject: "New Intake Form Submission - Acme Corp".into(),
                body: "<p>alert</p>".into(),
                content_type: ContentType::Html,
                reply_to: Some(reply_to.clone()),
            },
            false,
        );

        let sut = TemplateEmailServiceImpl { email, template };

        // Act
        let result = sut
            .send_lead_alert_email(recipient, Some(reply_to), &data)
            .await;

        // Assert
        assert!(!result.unwrap());
    }

    #[tokio::test]
    async fn render_error() {
        // Arrange
        let data = AcknowledgementTemplate::new(&JOHN_DOE);
        let template = MockTemplateService::new().with_render_error(data.clone());
        let email = MockEmailService::new();

        let sut = TemplateEmailServiceImpl { email, template };

        // Act
        let result = sut
            .send_acknowledgement_email("john@example.com".parse().unwrap(), &data)
            .await;

        // Assert
        assert!(result.is_err());
    }
}
