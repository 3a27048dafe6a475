use anyhow::Context;
use intake_config::Config;
use intake_email_impl::EmailServiceImpl;
use tracing::warn;

/// Create the email service for the configured smtp server.
///
/// Without an smtp url, delivery is disabled. Outside of production, disabled
/// delivery is reported as successful.
pub fn connect(config: &Config) -> anyhow::Result<EmailServiceImpl> {
    let from = config.email.from.clone();
    match &config.email.smtp_url {
        Some(url) => EmailServiceImpl::smtp(url, from).context("Failed to connect to SMTP server"),
        None => {
            let simulate_delivery = !config.environment.is_production();
            warn!(simulate_delivery, "No smtp url configured, email delivery is disabled");
            Ok(EmailServiceImpl::disabled(from, simulate_delivery))
        }
    }
}
