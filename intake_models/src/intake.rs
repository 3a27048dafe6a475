use nutype::nutype;
use serde::{Deserialize, Serialize};

use crate::sanitize::{sanitize_selection, sanitize_text};

/// Value of the choice that requires a custom specification.
pub const OTHER: &str = "Other";

pub const INDUSTRY_OPTIONS: &[&str] = &[
    "IT Services",
    "SaaS",
    "Healthcare",
    "Fintech",
    "Manufacturing",
    OTHER,
];

pub const REVENUE_RANGE_OPTIONS: &[&str] = &["<$5M", "$5–10M", "$10–25M", "$25–50M", ">$50M"];

pub const EXIT_TIMELINE_OPTIONS: &[&str] = &[
    "<6 months",
    "6–12 months",
    "12–24 months",
    ">24 months",
    "Exploring",
];

pub const PAIN_POINT_OPTIONS: &[&str] = &[
    "Legacy IT",
    "Messy Ops",
    "Pricing Clarity",
    "Revenue Concentration",
    "Cost Bloat",
    OTHER,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntakeField {
    FullName,
    BusinessEmail,
    PhoneNumber,
    CompanyName,
    Industry,
    CustomIndustry,
    RevenueRange,
    ExitTimeline,
    PainPoints,
    CustomPainPoint,
    AdditionalNotes,
}

impl IntakeField {
    pub const ALL: [Self; 11] = [
        Self::FullName,
        Self::BusinessEmail,
        Self::PhoneNumber,
        Self::CompanyName,
        Self::Industry,
        Self::CustomIndustry,
        Self::RevenueRange,
        Self::ExitTimeline,
        Self::PainPoints,
        Self::CustomPainPoint,
        Self::AdditionalNotes,
    ];

    /// The name of the field in the json payload.
    pub fn name(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::BusinessEmail => "businessEmail",
            Self::PhoneNumber => "phoneNumber",
            Self::CompanyName => "companyName",
            Self::Industry => "industry",
            Self::CustomIndustry => "customIndustry",
            Self::RevenueRange => "revenueRange",
            Self::ExitTimeline => "exitTimeline",
            Self::PainPoints => "painPoints",
            Self::CustomPainPoint => "customPainPoint",
            Self::AdditionalNotes => "additionalNotes",
        }
    }

    /// Known options of single and multi choice fields.
    pub fn options(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Industry => Some(INDUSTRY_OPTIONS),
            Self::RevenueRange => Some(REVENUE_RANGE_OPTIONS),
            Self::ExitTimeline => Some(EXIT_TIMELINE_OPTIONS),
            Self::PainPoints => Some(PAIN_POINT_OPTIONS),
            _ => None,
        }
    }

    pub fn is_text(self) -> bool {
        self.options().is_none()
    }
}

impl std::fmt::Display for IntakeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.name().fmt(f)
    }
}

/// The raw and mutable state of an intake form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntakeDraft {
    pub full_name: String,
    pub business_email: String,
    pub phone_number: String,
    pub company_name: String,
    pub industry: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_industry: Option<String>,
    pub revenue_range: String,
    pub exit_timeline: String,
    pub pain_points: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_pain_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl IntakeDraft {
    /// Returns the raw value of a text or single choice field.
    ///
    /// Returns [`None`] for [`IntakeField::PainPoints`].
    pub fn text(&self, field: IntakeField) -> Option<&str> {
        Some(match field {
            IntakeField::FullName => self.full_name.as_str(),
            IntakeField::BusinessEmail => self.business_email.as_str(),
            IntakeField::PhoneNumber => self.phone_number.as_str(),
            IntakeField::CompanyName => self.company_name.as_str(),
            IntakeField::Industry => self.industry.as_str(),
            IntakeField::CustomIndustry => self.custom_industry.as_deref().unwrap_or_default(),
            IntakeField::RevenueRange => self.revenue_range.as_str(),
            IntakeField::ExitTimeline => self.exit_timeline.as_str(),
            IntakeField::PainPoints => return None,
            IntakeField::CustomPainPoint => self.custom_pain_point.as_deref().unwrap_or_default(),
            IntakeField::AdditionalNotes => self.additional_notes.as_deref().unwrap_or_default(),
        })
    }

    /// Overwrites the raw value of a text or single choice field.
    ///
    /// Setting [`IntakeField::PainPoints`] replaces the selection with the
    /// given value.
    pub fn set_text(&mut self, field: IntakeField, value: String) {
        let slot = match field {
            IntakeField::FullName => &mut self.full_name,
            IntakeField::BusinessEmail => &mut self.business_email,
            IntakeField::PhoneNumber => &mut self.phone_number,
            IntakeField::CompanyName => &mut self.company_name,
            IntakeField::Industry => &mut self.industry,
            IntakeField::RevenueRange => &mut self.revenue_range,
            IntakeField::ExitTimeline => &mut self.exit_timeline,
            IntakeField::CustomIndustry => {
                self.custom_industry = Some(value);
                return;
            }
            IntakeField::CustomPainPoint => {
                self.custom_pain_point = Some(value);
                return;
            }
            IntakeField::AdditionalNotes => {
                self.additional_notes = Some(value);
                return;
            }
            IntakeField::PainPoints => {
                self.pain_points = vec![value];
                return;
            }
        };
        *slot = value;
    }

    /// Selects the pain point if it is not selected yet, otherwise deselects
    /// it. Returns whether the pain point is selected afterwards.
    pub fn toggle_pain_point(&mut self, pain_point: &str) -> bool {
        match self.pain_points.iter().position(|p| p == pain_point) {
            Some(idx) => {
                self.pain_points.remove(idx);
                false
            }
            None => {
                self.pain_points.push(pain_point.to_owned());
                true
            }
        }
    }

    pub fn industry_is_other(&self) -> bool {
        sanitize_text(self.industry.clone()) == OTHER
    }

    pub fn pain_points_include_other(&self) -> bool {
        sanitize_selection(&self.pain_points)
            .iter()
            .any(|p| p == OTHER)
    }
}

/// A sanitized and validated intake submission.
///
/// Values of this type can only be obtained through
/// [`validate_submission`](crate::validate::validate_submission).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeSubmission {
    pub full_name: PersonName,
    pub business_email: BusinessEmail,
    pub phone_number: PhoneNumber,
    pub company_name: CompanyName,
    pub industry: Choice,
    pub custom_industry: Option<FreeText>,
    pub revenue_range: Choice,
    pub exit_timeline: Choice,
    pub pain_points: Vec<Choice>,
    pub custom_pain_point: Option<FreeText>,
    pub additional_notes: Option<FreeText>,
}

impl IntakeSubmission {
    pub fn first_name(&self) -> &str {
        self.full_name
            .split_whitespace()
            .next()
            .unwrap_or(self.full_name.as_str())
    }

    /// The industry including the custom specification, e.g. `Other - Retail`.
    pub fn industry_label(&self) -> String {
        match &self.custom_industry {
            Some(custom) => format!("{} - {}", *self.industry, **custom),
            None => self.industry.to_string(),
        }
    }

    /// All selected pain points joined by `, `, with the custom pain point
    /// appended in parentheses.
    pub fn pain_points_label(&self) -> String {
        let pain_points = self
            .pain_points
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        match &self.custom_pain_point {
            Some(custom) => format!("{pain_points} ({})", **custom),
            None => pain_points,
        }
    }

    /// Converts the submission back into a draft.
    pub fn to_draft(&self) -> IntakeDraft {
        IntakeDraft {
            full_name: self.full_name.to_string(),
            business_email: self.business_email.to_string(),
            phone_number: self.phone_number.to_string(),
            company_name: self.company_name.to_string(),
            industry: self.industry.to_string(),
            custom_industry: self.custom_industry.as_ref().map(|x| x.to_string()),
            revenue_range: self.revenue_range.to_string(),
            exit_timeline: self.exit_timeline.to_string(),
            pain_points: self.pain_points.iter().map(|x| x.to_string()).collect(),
            custom_pain_point: self.custom_pain_point.as_ref().map(|x| x.to_string()),
            additional_notes: self.additional_notes.as_ref().map(|x| x.to_string()),
        }
    }
}

#[nutype(
    sanitize(with = |s| crate::sanitize::sanitize_text(s)),
    validate(len_char_min = 2),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize)
)]
pub struct PersonName(String);

#[nutype(
    sanitize(with = |s| crate::sanitize::sanitize_text(s)),
    validate(len_char_min = 2),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize)
)]
pub struct CompanyName(String);

#[nutype(
    sanitize(with = |s| crate::sanitize::sanitize_email(s)),
    validate(predicate = |s| crate::sanitize::is_valid_email_shape(s)),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize)
)]
pub struct BusinessEmail(String);

#[nutype(
    sanitize(with = |s| crate::sanitize::sanitize_text(s)),
    validate(predicate = |s| crate::sanitize::is_valid_phone(s)),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize)
)]
pub struct PhoneNumber(String);

/// A selected option of a single or multi choice field.
#[nutype(
    sanitize(with = |s| crate::sanitize::sanitize_text(s)),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize)
)]
pub struct Choice(String);

#[nutype(
    sanitize(with = |s| crate::sanitize::sanitize_text(s)),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize)
)]
pub struct FreeText(String);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn draft_deserializes_camel_case_with_missing_fields() {
        let draft = serde_json::from_str::<IntakeDraft>(
            r#"{"fullName": "John Doe", "painPoints": ["Legacy IT"], "customIndustry": null}"#,
        )
        .unwrap();

        assert_eq!(
            draft,
            IntakeDraft {
                full_name: "John Doe".into(),
                pain_points: vec!["Legacy IT".into()],
                ..Default::default()
            }
        );
    }

    #[test]
    fn toggle_pain_point() {
        let mut draft = IntakeDraft::default();
        assert!(draft.toggle_pain_point("Legacy IT"));
        assert!(draft.toggle_pain_point(OTHER));
        assert!(draft.pain_points_include_other());
        assert!(!draft.toggle_pain_point(OTHER));
        assert_eq!(draft.pain_points, ["Legacy IT"]);
        assert!(!draft.pain_points_include_other());
    }

    #[test]
    fn set_text() {
        let mut draft = IntakeDraft::default();
        for field in IntakeField::ALL {
            draft.set_text(field, format!("value of {field}"));
        }
        for field in IntakeField::ALL.into_iter().filter(|&f| f != IntakeField::PainPoints) {
            assert_eq!(draft.text(field), Some(format!("value of {field}").as_str()));
        }
        assert_eq!(draft.text(IntakeField::PainPoints), None);
        assert_eq!(draft.pain_points, ["value of painPoints"]);
    }

    #[test]
    fn industry_is_other_ignores_whitespace() {
        let draft = IntakeDraft {
            industry: " Other ".into(),
            ..Default::default()
        };
        assert!(draft.industry_is_other());
    }

    #[test]
    fn newtypes_sanitize() {
        assert_eq!(
            PersonName::try_new(String::from("  <script>x</script>John Doe "))
                .unwrap()
                .into_inner(),
            "John Doe"
        );
        assert_eq!(
            BusinessEmail::try_new(String::from("John@Example.com"))
                .unwrap()
                .into_inner(),
            "john@example.com"
        );
        assert!(PersonName::try_new(String::from(" J ")).is_err());
        assert!(Choice::try_new(String::from("   ")).is_err());
        assert!(PhoneNumber::try_new(String::from("12")).is_err());
    }

    #[test]
    fn options() {
        assert_eq!(IntakeField::Industry.options(), Some(INDUSTRY_OPTIONS));
        assert!(IntakeField::FullName.is_text());
        assert!(!IntakeField::PainPoints.is_text());
    }
}
