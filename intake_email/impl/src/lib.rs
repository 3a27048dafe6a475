use anyhow::{anyhow, Context};
use intake_email_contracts::{ContentType, Email, EmailService};
use intake_models::email_address::EmailAddressWithName;
use intake_utils::{trace_instrument, Apply};
use lettre::{
    message::{header, MessageBuilder},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{info, warn};

pub mod template;

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddressWithName,
    transport: Transport,
}

#[derive(Debug, Clone)]
enum Transport {
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    /// No smtp server is configured. If `simulate_delivery` is set, emails
    /// are reported as delivered without being sent.
    Disabled { simulate_delivery: bool },
}

impl EmailServiceImpl {
    pub fn smtp(url: &str, from: EmailAddressWithName) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)
            .context("Failed to parse smtp url")?
            .build();

        Ok(Self {
            from,
            transport: Transport::Smtp(transport),
        })
    }

    pub fn disabled(from: EmailAddressWithName, simulate_delivery: bool) -> Self {
        Self {
            from,
            transport: Transport::Disabled { simulate_delivery },
        }
    }
}

impl EmailService for EmailServiceImpl {
    #[trace_instrument(skip_all)]
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let transport = match &self.transport {
            Transport::Smtp(transport) => transport,
            &Transport::Disabled { simulate_delivery } => {
                let recipient = email.recipient.as_email_address().masked();
                if simulate_delivery {
                    info!(%recipient, "Email delivery is disabled, simulating delivery");
                } else {
                    warn!(%recipient, "Email delivery is disabled, dropping email");
                }
                return Ok(simulate_delivery);
            }
        };

        let message = Message::builder()
            .from(self.from.0.clone())
            .to(email.recipient.0)
            .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
            .subject(email.subject)
            .header(match email.content_type {
                ContentType::Text => header::ContentType::TEXT_PLAIN,
                ContentType::Html => header::ContentType::TEXT_HTML,
            })
            .body(email.body)
            .context("Failed to build email")?;

        transport
            .send(message)
            .await
            .map(|response| response.is_positive())
            .context("Failed to deliver email")
    }

    #[trace_instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        match &self.transport {
            Transport::Smtp(transport) => transport
                .test_connection()
                .await
                .context("Failed to connect to smtp server")?
                .then_some(())
                .ok_or_else(|| anyhow!("Failed to ping smtp server")),
            Transport::Disabled {
                simulate_delivery: true,
            } => Ok(()),
            Transport::Disabled {
                simulate_delivery: false,
            } => Err(anyhow!("Email delivery is disabled")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> Email {
        Email {
            recipient: "john@example.com".parse().unwrap(),
            subject: "The Subject".into(),
            body: "Hello World!".into(),
            content_type: ContentType::Text,
            reply_to: None,
        }
    }

    #[tokio::test]
    async fn disabled_simulates_delivery() {
        // Arrange
        let from = "FRAQTIV Team <team@example.com>".parse().unwrap();
        let sut = EmailServiceImpl::disabled(from, true);

        // Act
        let sent = sut.send(email()).await;
        let ping = sut.ping().await;

        // Assert
        assert!(sent.unwrap());
        ping.unwrap();
    }

    #[tokio::test]
    async fn disabled_drops_email() {
        // Arrange
        let from = "FRAQTIV Team <team@example.com>".parse().unwrap();
        let sut = EmailServiceImpl::disabled(from, false);

        // Act
        let sent = sut.send(email()).await;
        let ping = sut.ping().await;

        // Assert
        assert!(!sent.unwrap());
        assert!(ping.is_err());
    }

    #[test]
    fn invalid_smtp_url() {
        let result = EmailServiceImpl::smtp("not a url", "team@example.com".parse().unwrap());
        assert!(result.is_err());
    }
}
