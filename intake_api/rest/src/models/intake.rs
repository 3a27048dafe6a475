use intake_models::intake::IntakeDraft;
use serde::Deserialize;

/// Intake form as submitted by the browser.
///
/// Missing fields are accepted here so that they are reported by the
/// submission validator instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiIntakeSubmission {
    pub full_name: Option<String>,
    pub business_email: Option<String>,
    pub phone_number: Option<String>,
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub custom_industry: Option<String>,
    pub revenue_range: Option<String>,
    pub exit_timeline: Option<String>,
    pub pain_points: Option<Vec<String>>,
    pub custom_pain_point: Option<String>,
    pub additional_notes: Option<String>,
}

impl From<ApiIntakeSubmission> for IntakeDraft {
    fn from(value: ApiIntakeSubmission) -> Self {
        Self {
            full_name: value.full_name.unwrap_or_default(),
            business_email: value.business_email.unwrap_or_default(),
            phone_number: value.phone_number.unwrap_or_default(),
            company_name: value.company_name.unwrap_or_default(),
            industry: value.industry.unwrap_or_default(),
            custom_industry: value.custom_industry,
            revenue_range: value.revenue_range.unwrap_or_default(),
            exit_timeline: value.exit_timeline.unwrap_or_default(),
            pain_points: value.pain_points.unwrap_or_default(),
            custom_pain_point: value.custom_pain_point,
            additional_notes: value.additional_notes,
        }
    }
}
