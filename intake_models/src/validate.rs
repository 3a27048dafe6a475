use thiserror::Error;

use crate::{
    intake::{
        BusinessEmail, Choice, CompanyName, FreeText, IntakeDraft, IntakeField, IntakeSubmission,
        PersonName, PhoneNumber,
    },
    sanitize::{has_recognized_tld, sanitize_email, sanitize_selection, sanitize_text},
    step::IntakeStep,
};

/// Which checks are applied to the business email.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmailPolicy {
    /// Only the `local@domain.tld` shape and the length are checked.
    #[default]
    Shape,
    /// Additionally the top level domain must be a recognized one.
    RecognizedTld,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FieldError {
    #[error("Full name is required")]
    FullNameRequired,
    #[error("Full name must be at least 2 characters long")]
    FullNameTooShort,
    #[error("Business email is required")]
    BusinessEmailRequired,
    #[error("Please provide a valid business email address")]
    BusinessEmailInvalid,
    #[error("Please enter an email with a recognized domain extension")]
    BusinessEmailUnrecognizedDomain,
    #[error("Phone number is required")]
    PhoneNumberRequired,
    #[error("Please provide a valid phone number")]
    PhoneNumberInvalid,
    #[error("Company name is required")]
    CompanyNameRequired,
    #[error("Company name must be at least 2 characters long")]
    CompanyNameTooShort,
    #[error("Please select an industry")]
    IndustryRequired,
    #[error("Please specify your industry")]
    CustomIndustryRequired,
    #[error("Please select a revenue range")]
    RevenueRangeRequired,
    #[error("Please select an exit timeline")]
    ExitTimelineRequired,
    #[error("Please select at least one pain point")]
    PainPointsRequired,
    #[error("Please specify a particular pain point")]
    CustomPainPointRequired,
}

impl FieldError {
    pub fn field(self) -> IntakeField {
        match self {
            Self::FullNameRequired | Self::FullNameTooShort => IntakeField::FullName,
            Self::BusinessEmailRequired
            | Self::BusinessEmailInvalid
            | Self::BusinessEmailUnrecognizedDomain => IntakeField::BusinessEmail,
            Self::PhoneNumberRequired | Self::PhoneNumberInvalid => IntakeField::PhoneNumber,
            Self::CompanyNameRequired | Self::CompanyNameTooShort => IntakeField::CompanyName,
            Self::IndustryRequired => IntakeField::Industry,
            Self::CustomIndustryRequired => IntakeField::CustomIndustry,
            Self::RevenueRangeRequired => IntakeField::RevenueRange,
            Self::ExitTimelineRequired => IntakeField::ExitTimeline,
            Self::PainPointsRequired => IntakeField::PainPoints,
            Self::CustomPainPointRequired => IntakeField::CustomPainPoint,
        }
    }
}

/// A non-empty list of field errors in step order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{first}")]
pub struct ValidationErrors {
    first: FieldError,
    rest: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn from_errors(errors: impl IntoIterator<Item = FieldError>) -> Option<Self> {
        let mut errors = errors.into_iter();
        errors.next().map(|first| Self {
            first,
            rest: errors.collect(),
        })
    }

    pub fn first(&self) -> FieldError {
        self.first
    }

    pub fn iter(&self) -> impl Iterator<Item = FieldError> + '_ {
        std::iter::once(self.first).chain(self.rest.iter().copied())
    }

    pub fn contains(&self, error: FieldError) -> bool {
        self.iter().any(|e| e == error)
    }

    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(first: FieldError) -> Self {
        Self {
            first,
            rest: Vec::new(),
        }
    }
}

/// Validates a single field of the draft.
///
/// Conditional fields are only checked if their condition holds, so
/// [`IntakeField::CustomIndustry`] is always valid unless the industry is
/// `Other`.
pub fn validate_field(
    field: IntakeField,
    draft: &IntakeDraft,
    policy: EmailPolicy,
) -> Result<(), FieldError> {
    match field {
        IntakeField::FullName => parse_full_name(&draft.full_name).map(drop),
        IntakeField::BusinessEmail => {
            let email = parse_business_email(&draft.business_email)?;
            match policy {
                EmailPolicy::RecognizedTld if !has_recognized_tld(&email) => {
                    Err(FieldError::BusinessEmailUnrecognizedDomain)
                }
                _ => Ok(()),
            }
        }
        IntakeField::PhoneNumber => parse_phone_number(&draft.phone_number).map(drop),
        IntakeField::CompanyName => parse_company_name(&draft.company_name).map(drop),
        IntakeField::Industry => parse_choice(&draft.industry, FieldError::IndustryRequired).map(drop),
        IntakeField::CustomIndustry => parse_custom_industry(draft).map(drop),
        IntakeField::RevenueRange => {
            parse_choice(&draft.revenue_range, FieldError::RevenueRangeRequired).map(drop)
        }
        IntakeField::ExitTimeline => {
            parse_choice(&draft.exit_timeline, FieldError::ExitTimelineRequired).map(drop)
        }
        IntakeField::PainPoints => parse_pain_points(&draft.pain_points).map(drop),
        IntakeField::CustomPainPoint => parse_custom_pain_point(draft).map(drop),
        IntakeField::AdditionalNotes => Ok(()),
    }
}

/// Validates all fields the given step requires and returns the failures in
/// field order.
pub fn validate_step(step: IntakeStep, draft: &IntakeDraft, policy: EmailPolicy) -> Vec<FieldError> {
    step.required_fields(draft)
        .into_iter()
        .filter_map(|field| validate_field(field, draft, policy).err())
        .collect()
}

/// Validates the whole draft and returns the sanitized submission.
///
/// All steps are checked and every failure is collected. A submission is only
/// produced if there is no failure at all.
pub fn validate_submission(
    draft: &IntakeDraft,
    policy: EmailPolicy,
) -> Result<IntakeSubmission, ValidationErrors> {
    let errors = IntakeStep::ALL
        .into_iter()
        .flat_map(|step| validate_step(step, draft, policy));
    if let Some(errors) = ValidationErrors::from_errors(errors) {
        return Err(errors);
    }

    build_submission(draft).map_err(Into::into)
}

fn build_submission(draft: &IntakeDraft) -> Result<IntakeSubmission, FieldError> {
    Ok(IntakeSubmission {
        full_name: parse_full_name(&draft.full_name)?,
        business_email: parse_business_email(&draft.business_email)?,
        phone_number: parse_phone_number(&draft.phone_number)?,
        company_name: parse_company_name(&draft.company_name)?,
        industry: parse_choice(&draft.industry, FieldError::IndustryRequired)?,
        custom_industry: parse_custom_industry(draft)?,
        revenue_range: parse_choice(&draft.revenue_range, FieldError::RevenueRangeRequired)?,
        exit_timeline: parse_choice(&draft.exit_timeline, FieldError::ExitTimelineRequired)?,
        pain_points: parse_pain_points(&draft.pain_points)?,
        custom_pain_point: parse_custom_pain_point(draft)?,
        additional_notes: parse_optional_text(draft.additional_notes.as_deref()),
    })
}

fn parse_full_name(raw: &str) -> Result<PersonName, FieldError> {
    let sanitized = sanitize_text(raw.into());
    if sanitized.is_empty() {
        return Err(FieldError::FullNameRequired);
    }
    PersonName::try_new(sanitized).map_err(|_| FieldError::FullNameTooShort)
}

fn parse_company_name(raw: &str) -> Result<CompanyName, FieldError> {
    let sanitized = sanitize_text(raw.into());
    if sanitized.is_empty() {
        return Err(FieldError::CompanyNameRequired);
    }
    CompanyName::try_new(sanitized).map_err(|_| FieldError::CompanyNameTooShort)
}

fn parse_business_email(raw: &str) -> Result<BusinessEmail, FieldError> {
    let sanitized = sanitize_email(raw.into());
    if sanitized.is_empty() {
        return Err(FieldError::BusinessEmailRequired);
    }
    BusinessEmail::try_new(sanitized).map_err(|_| FieldError::BusinessEmailInvalid)
}

fn parse_phone_number(raw: &str) -> Result<PhoneNumber, FieldError> {
    let sanitized = sanitize_text(raw.into());
    if sanitized.is_empty() {
        return Err(FieldError::PhoneNumberRequired);
    }
    PhoneNumber::try_new(sanitized).map_err(|_| FieldError::PhoneNumberInvalid)
}

fn parse_choice(raw: &str, missing: FieldError) -> Result<Choice, FieldError> {
    Choice::try_new(String::from(raw)).map_err(|_| missing)
}

fn parse_pain_points(raw: &[String]) -> Result<Vec<Choice>, FieldError> {
    let pain_points = sanitize_selection(raw)
        .into_iter()
        .filter_map(|p| Choice::try_new(p).ok())
        .collect::<Vec<_>>();
    if pain_points.is_empty() {
        return Err(FieldError::PainPointsRequired);
    }
    Ok(pain_points)
}

fn parse_custom_industry(draft: &IntakeDraft) -> Result<Option<FreeText>, FieldError> {
    if !draft.industry_is_other() {
        return Ok(None);
    }
    parse_optional_text(draft.custom_industry.as_deref())
        .map(Some)
        .ok_or(FieldError::CustomIndustryRequired)
}

fn parse_custom_pain_point(draft: &IntakeDraft) -> Result<Option<FreeText>, FieldError> {
    if !draft.pain_points_include_other() {
        return Ok(None);
    }
    parse_optional_text(draft.custom_pain_point.as_deref())
        .map(Some)
        .ok_or(FieldError::CustomPainPointRequired)
}

fn parse_optional_text(raw: Option<&str>) -> Option<FreeText> {
    raw.and_then(|raw| FreeText::try_new(String::from(raw)).ok())
}

#[cfg(test)]
mod tests {
    use intake_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::intake::OTHER;

    fn john_doe() -> IntakeDraft {
        IntakeDraft {
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
        }
    }

    #[test]
    fn john_doe_is_valid() {
        // Arrange
        let draft = IntakeDraft {
            business_email: "John@Example.com".into(),
            ..john_doe()
        };

        // Act
        let result = validate_submission(&draft, EmailPolicy::Shape);

        // Assert
        let submission = result.unwrap();
        assert_eq!(submission.to_draft(), john_doe());
        assert_eq!(submission.business_email.as_str(), "john@example.com");
    }

    #[test]
    fn minimal_lead() {
        // Arrange
        let draft = IntakeDraft {
            full_name: "John Doe".into(),
            business_email: "john@example.com".into(),
            phone_number: "+1 555 123 4567".into(),
            company_name: "Test Co".into(),
            industry: "IT Services".into(),
            custom_industry: None,
            revenue_range: "$5–10M".into(),
            exit_timeline: "12–24 months".into(),
            pain_points: vec!["Legacy IT".into()],
            custom_pain_point: None,
            additional_notes: None,
        };

        // Act
        let result = validate_submission(&draft, EmailPolicy::Shape);
        let other_industry = validate_submission(
            &IntakeDraft {
                industry: OTHER.into(),
                custom_industry: Some(String::new()),
                ..draft.clone()
            },
            EmailPolicy::Shape,
        );

        // Assert
        let submission = result.unwrap();
        assert_eq!(submission.to_draft(), draft);
        assert_eq!(submission.business_email.as_str(), "john@example.com");
        assert_eq!(submission.phone_number.as_str(), "+1 555 123 4567");

        let errors = other_industry.unwrap_err();
        assert_eq!(errors.iter().collect::<Vec<_>>(), [FieldError::CustomIndustryRequired]);
        assert!(errors.to_string().contains("specify your industry"));
    }

    #[test]
    fn missing_required_field_is_invalid() {
        let required = [
            IntakeField::FullName,
            IntakeField::BusinessEmail,
            IntakeField::PhoneNumber,
            IntakeField::CompanyName,
            IntakeField::Industry,
            IntakeField::RevenueRange,
            IntakeField::ExitTimeline,
            IntakeField::PainPoints,
        ];
        for field in required {
            // Arrange
            let mut draft = john_doe();
            match field {
                IntakeField::PainPoints => draft.pain_points.clear(),
                _ => draft.set_text(field, String::new()),
            }

            // Act
            let result = validate_submission(&draft, EmailPolicy::Shape);

            // Assert
            let errors = result.unwrap_err();
            assert_eq!(errors.first().field(), field);
            assert_eq!(errors.len(), 1);
        }
    }

    #[test]
    fn empty_draft_collects_all_errors_in_step_order() {
        let errors = validate_submission(&IntakeDraft::default(), EmailPolicy::Shape).unwrap_err();
        assert_eq!(
            errors.iter().collect::<Vec<_>>(),
            [
                FieldError::FullNameRequired,
                FieldError::BusinessEmailRequired,
                FieldError::PhoneNumberRequired,
                FieldError::CompanyNameRequired,
                FieldError::IndustryRequired,
                FieldError::RevenueRangeRequired,
                FieldError::ExitTimelineRequired,
                FieldError::PainPointsRequired,
            ]
        );
        assert_eq!(errors.first(), FieldError::FullNameRequired);
    }

    #[test]
    fn other_industry_requires_custom_industry() {
        for custom_industry in [None, Some(""), Some("   "), Some("<script>x</script>")] {
            let draft = IntakeDraft {
                industry: OTHER.into(),
                custom_industry: custom_industry.map(Into::into),
                ..john_doe()
            };
            let errors = validate_submission(&draft, EmailPolicy::Shape).unwrap_err();
            assert_eq!(errors.first(), FieldError::CustomIndustryRequired);
            assert_eq!(errors.to_string(), "Please specify your industry");
        }

        let draft = IntakeDraft {
            industry: OTHER.into(),
            custom_industry: Some(" Retail ".into()),
            ..john_doe()
        };
        let submission = validate_submission(&draft, EmailPolicy::Shape).unwrap();
        assert_eq!(submission.industry_label(), "Other - Retail");
    }

    #[test]
    fn custom_industry_is_dropped_for_other_industries() {
        let draft = IntakeDraft {
            custom_industry: Some("Retail".into()),
            ..john_doe()
        };
        let submission = validate_submission(&draft, EmailPolicy::Shape).unwrap();
        assert_eq!(submission.custom_industry, None);
    }

    #[test]
    fn other_pain_point_requires_custom_pain_point() {
        let mut draft = john_doe();
        draft.pain_points.push(OTHER.into());
        let errors = validate_submission(&draft, EmailPolicy::Shape).unwrap_err();
        assert_eq!(errors.first(), FieldError::CustomPainPointRequired);

        draft.custom_pain_point = Some("Churn".into());
        let submission = validate_submission(&draft, EmailPolicy::Shape).unwrap();
        assert_eq!(
            submission.pain_points_label(),
            "Legacy IT, Messy Ops, Other (Churn)"
        );
    }

    #[test]
    fn pain_points_are_deduplicated() {
        let draft = IntakeDraft {
            pain_points: vec!["Legacy IT".into(), " Legacy IT".into(), "Cost Bloat".into()],
            ..john_doe()
        };
        let submission = validate_submission(&draft, EmailPolicy::Shape).unwrap();
        assert_eq!(submission.pain_points_label(), "Legacy IT, Cost Bloat");
    }

    #[test]
    fn script_only_pain_points_are_missing() {
        let draft = IntakeDraft {
            pain_points: vec!["<script>alert(1)</script>".into()],
            ..john_doe()
        };
        let errors = validate_submission(&draft, EmailPolicy::Shape).unwrap_err();
        assert_eq!(errors.first(), FieldError::PainPointsRequired);
    }

    #[test]
    fn empty_optional_fields_are_absent() {
        let draft = IntakeDraft {
            additional_notes: Some("  ".into()),
            ..john_doe()
        };
        let submission = validate_submission(&draft, EmailPolicy::Shape).unwrap();
        assert_eq!(submission.additional_notes, None);
    }

    #[test]
    fn short_names() {
        let draft = IntakeDraft {
            full_name: " J ".into(),
            company_name: "A".into(),
            ..john_doe()
        };
        let errors = validate_submission(&draft, EmailPolicy::Shape).unwrap_err();
        assert_eq!(
            errors.iter().collect::<Vec<_>>(),
            [FieldError::FullNameTooShort, FieldError::CompanyNameTooShort]
        );
        assert_eq!(
            errors.to_string(),
            "Full name must be at least 2 characters long"
        );
    }

    #[test]
    fn email_policy() {
        let draft = IntakeDraft {
            business_email: "john@example.invalid".into(),
            ..john_doe()
        };

        assert_eq!(
            validate_field(IntakeField::BusinessEmail, &draft, EmailPolicy::Shape),
            Ok(())
        );
        assert_eq!(
            validate_field(IntakeField::BusinessEmail, &draft, EmailPolicy::RecognizedTld),
            Err(FieldError::BusinessEmailUnrecognizedDomain)
        );
        assert_matches!(
            validate_submission(&draft, EmailPolicy::RecognizedTld),
            Err(e) if e.first() == FieldError::BusinessEmailUnrecognizedDomain
        );

        let draft = IntakeDraft {
            business_email: "not-an-email".into(),
            ..john_doe()
        };
        assert_eq!(
            validate_field(IntakeField::BusinessEmail, &draft, EmailPolicy::Shape),
            Err(FieldError::BusinessEmailInvalid)
        );
    }

    #[test]
    fn invalid_phone() {
        let draft = IntakeDraft {
            phone_number: "12-34".into(),
            ..john_doe()
        };
        assert_eq!(
            validate_step(IntakeStep::PhoneNumber, &draft, EmailPolicy::Shape),
            [FieldError::PhoneNumberInvalid]
        );
    }

    #[test]
    fn sanitized_submission_validates_to_itself() {
        let draft = IntakeDraft {
            full_name: "  <script>alert('x')</script>John Doe ".into(),
            business_email: " JOHN@EXAMPLE.COM".into(),
            company_name: format!("Acme {}", "x".repeat(2000)),
            industry: OTHER.into(),
            custom_industry: Some(" Retail<script></script> ".into()),
            ..john_doe()
        };
        let once = validate_submission(&draft, EmailPolicy::Shape).unwrap();
        let twice = validate_submission(&once.to_draft(), EmailPolicy::Shape).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once.full_name.as_str(), "John Doe");
        assert_eq!(once.company_name.chars().count(), 1000);
    }

    #[test]
    fn field_errors_point_to_their_field() {
        let draft = IntakeDraft {
            industry: OTHER.into(),
            ..Default::default()
        };
        let errors = validate_step(IntakeStep::Industry, &draft, EmailPolicy::Shape);
        assert_eq!(errors, [FieldError::CustomIndustryRequired]);
        assert_eq!(errors[0].field(), IntakeField::CustomIndustry);
    }
}
