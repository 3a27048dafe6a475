use std::sync::LazyLock;

use chrono::{DateTime, TimeZone, Utc};
use intake_models::{
    client::ClientIdentifier,
    email_address::EmailAddress,
    intake::{IntakeDraft, IntakeSubmission, OTHER},
    validate::{validate_submission, EmailPolicy},
};

pub static NOW: LazyLock<DateTime<Utc>> =
    LazyLock::new(|| Utc.with_ymd_and_hms(2025, 3, 14, 13, 37, 42).unwrap());

pub static CLIENT: LazyLock<ClientIdentifier> =
    LazyLock::new(|| ClientIdentifier::new("203.0.113.7"));

pub static ALERT_RECIPIENT: LazyLock<EmailAddress> =
    LazyLock::new(|| "leads@example.com".parse().unwrap());

pub static JOHN_DOE_DRAFT: LazyLock<IntakeDraft> = LazyLock::new(|| IntakeDraft {
    full_name: "John Doe".into(),
    business_email: "john@example.com".into(),
    phone_number: "555-123-4567".into(),
    company_name: "Acme Corp".into(),
    industry: "SaaS".into(),
    custom_industry: None,
    revenue_range: "$5–10M".into(),
    exit_timeline: "6–12 months".into(),
    pain_points: vec!["Legacy IT".into(), "Messy Ops".into()],
    custom_pain_point: None,
    additional_notes: Some("Test submission".into()),
});

pub static JOHN_DOE: LazyLock<IntakeSubmission> = LazyLock::new(|| sanitized(&JOHN_DOE_DRAFT));

/// A lead with a custom industry, a custom pain point and an urgent exit.
pub static JANE_ROE_DRAFT: LazyLock<IntakeDraft> = LazyLock::new(|| IntakeDraft {
    full_name: "Jane Roe".into(),
    business_email: "Jane.Roe@Example.co.uk".into(),
    phone_number: "+44 7700 123456".into(),
    company_name: "Roe & Daughters <Holdings>".into(),
    industry: OTHER.into(),
    custom_industry: Some("Retail".into()),
    revenue_range: ">$50M".into(),
    exit_timeline: "<6 months".into(),
    pain_points: vec![
        "Legacy IT".into(),
        "Pricing Clarity".into(),
        "Cost Bloat".into(),
        OTHER.into(),
    ],
    custom_pain_point: Some("Key person risk".into()),
    additional_notes: None,
});

pub static JANE_ROE: LazyLock<IntakeSubmission> = LazyLock::new(|| sanitized(&JANE_ROE_DRAFT));

fn sanitized(draft: &IntakeDraft) -> IntakeSubmission {
    validate_submission(draft, EmailPolicy::Shape).unwrap()
}
