//! These tests need an smtp4dev instance. The smtp url is taken from the
//! config files listed in `INTAKE_CONFIG`, the smtp4dev web api from
//! `SMTP4DEV_URL`.

use std::time::{Duration, Instant};

use anyhow::Context;
use intake_demo::{ALERT_RECIPIENT, JANE_ROE, JOHN_DOE, NOW};
use intake_di::{provider, Provide};
use intake_email_contracts::{template::TemplateEmailService, EmailService};
use intake_email_impl::{template::TemplateEmailServiceImpl, EmailServiceImpl};
use intake_models::email_address::EmailAddressWithName;
use intake_templates_contracts::{AcknowledgementTemplate, LeadAlertTemplate};
use intake_templates_impl::TemplateServiceImpl;
use serde::Deserialize;
use url::Url;
use uuid::Uuid;

type Sut = TemplateEmailServiceImpl<EmailServiceImpl, TemplateServiceImpl>;

provider! {
    TestProvider {
        email: EmailServiceImpl,
    }
}

#[tokio::test]
#[ignore = "requires smtp4dev"]
async fn acknowledgement() {
    let client = setup().await;
    let recipient = "John Doe <john@example.com>"
        .parse::<EmailAddressWithName>()
        .unwrap();

    let sent = client
        .sut
        .send_acknowledgement_email(recipient, &AcknowledgementTemplate::new(&JOHN_DOE))
        .await
        .unwrap();

    assert!(sent);

    let mail = client.wait_for_mail().await;
    assert_eq!(mail.from, AsRef::<str>::as_ref(&client.from.0.email));
    assert_eq!(mail.to, "john@example.com");
    assert_eq!(mail.subject, "Thank you for your interest in FRAQTIV");

    let details = client.fetch_email_details(mail.id).await;
    assert!(!details.plain_text);
    assert!(details.header("Reply-To").is_none());

    let html = client.fetch_email_html(mail.id).await;
    assert!(html.contains("Dear John Doe,"));
    assert!(html.contains("Acme Corp"));
    assert!(html.contains("Legacy IT, Messy Ops"));
}

#[tokio::test]
#[ignore = "requires smtp4dev"]
async fn lead_alert() {
    let client = setup().await;
    let reply_to = "Jane Roe <jane.roe@example.co.uk>"
        .parse::<EmailAddressWithName>()
        .unwrap();

    let sent = client
        .sut
        .send_lead_alert_email(
            ALERT_RECIPIENT.clone().into(),
            Some(reply_to),
            &LeadAlertTemplate::new(&JANE_ROE, *NOW),
        )
        .await
        .unwrap();

    assert!(sent);

    let mail = client.wait_for_mail().await;
    assert_eq!(mail.to, ALERT_RECIPIENT.as_str());
    assert_eq!(
        mail.subject,
        "New Intake Form Submission - Roe & Daughters <Holdings>"
    );

    let details = client.fetch_email_details(mail.id).await;
    let reply_to = details.header("Reply-To").unwrap();
    assert!(reply_to.contains("jane.roe@example.co.uk"));

    let html = client.fetch_email_html(mail.id).await;
    assert!(html.contains("Roe &amp; Daughters &lt;Holdings&gt;"));
    assert!(html.contains("Call Jane"));
}

#[tokio::test]
#[ignore = "requires smtp4dev"]
async fn ping() {
    setup().await.email.ping().await.unwrap();
}

struct TestClient {
    sut: Sut,
    email: EmailServiceImpl,
    from: EmailAddressWithName,
    smtp4dev_url: Url,
}

impl TestClient {
    async fn reset(&self) {
        reqwest::Client::new()
            .delete(self.smtp4dev_url.join("api/Messages/*").unwrap())
            .send()
            .await
            .unwrap()
            .error_for_status()
            .unwrap();
    }

    async fn wait_for_mail(&self) -> EmailSummary {
        let now = Instant::now();
        while now.elapsed() < Duration::from_secs(2) {
            let mut mailbox = self.get::<PaginationResponse<_>>("api/Messages").await;
            if let Some(mail) = mailbox.results.pop() {
                return mail;
            }
        }
        panic!("No email received");
    }

    async fn fetch_email_details(&self, id: Uuid) -> EmailDetails {
        self.get(&format!("api/Messages/{id}")).await
    }

    async fn fetch_email_html(&self, id: Uuid) -> String {
        reqwest::Client::new()
            .get(self.smtp4dev_url.join(&format!("api/Messages/{id}/html")).unwrap())
            .send()
            .await
            .unwrap()
            .error_for_status()
            .unwrap()
            .text()
            .await
            .unwrap()
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> T {
        reqwest::Client::new()
            .get(self.smtp4dev_url.join(path).unwrap())
            .send()
            .await
            .unwrap()
            .error_for_status()
            .unwrap()
            .json()
            .await
            .unwrap()
    }
}

async fn setup() -> TestClient {
    let config = intake_config::load().unwrap();
    let smtp_url = config
        .email
        .smtp_url
        .context("email.smtp_url must be set to run these tests")
        .unwrap();

    let email = EmailServiceImpl::smtp(&smtp_url, config.email.from.clone()).unwrap();
    let mut provider = TestProvider {
        _cache: Default::default(),
        email: email.clone(),
    };
    let sut: Sut = provider.provide();

    let smtp4dev_url = std::env::var("SMTP4DEV_URL")
        .context("Failed to read SMTP4DEV_URL environment variable")
        .unwrap()
        .parse()
        .context("Failed to parse SMTP4DEV_URL environment variable")
        .unwrap();

    let client = TestClient {
        sut,
        email,
        from: config.email.from,
        smtp4dev_url,
    };

    client.reset().await;

    client
}

#[derive(Debug, Deserialize)]
struct PaginationResponse<T> {
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct EmailSummary {
    id: Uuid,
    from: String,
    to: String,
    subject: String,
}

#[derive(Debug, Deserialize)]
struct EmailDetails {
    headers: Vec<EmailHeader>,
    #[serde(rename = "hasPlainTextBody")]
    plain_text: bool,
}

impl EmailDetails {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|header| header.name == name)
            .map(|header| header.value.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct EmailHeader {
    name: String,
    value: String,
}
