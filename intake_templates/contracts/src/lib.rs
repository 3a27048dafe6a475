use chrono::{DateTime, Utc};
use intake_models::{intake::IntakeSubmission, lead::LeadAssessment};
use serde::Serialize;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateService: Send + Sync + 'static {
    /// Render the given template.
    ///
    /// Every interpolated value is html escaped.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String>;
}

#[cfg(feature = "mock")]
impl MockTemplateService {
    pub fn with_render<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
        result: String,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Ok(result));
        self
    }

    pub fn with_render_error<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Err(anyhow::anyhow!("failed to render template")));
        self
    }
}

pub trait Template: Serialize {
    /// The name of the template. Names ending in `.html` enable escaping.
    const NAME: &'static str;
    const TEMPLATE: &'static str;
}

pub const BASE_TEMPLATE_NAME: &str = "base.html";
pub const BASE_TEMPLATE: &str = include_str!("../templates/base.html");

macro_rules! templates {
    ($( $ident:ident ( $path:literal ), )* ) => {
        $(
            impl Template for $ident {
                const NAME: &'static str = $path;
                const TEMPLATE: &'static str = include_str!(concat!("../templates/", $path));
            }
        )*

        pub const TEMPLATES: &[(&str, &str)] = &[
            $( ($ident::NAME, $ident::TEMPLATE) ),*
        ];
    };
}

templates! {
    AcknowledgementTemplate("acknowledgement.html"),
    LeadAlertTemplate("lead_alert.html"),
}

/// Confirmation sent to the person who submitted the intake form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcknowledgementTemplate {
    pub full_name: String,
    pub company_name: String,
    pub phone_number: String,
    pub industry: String,
    pub revenue_range: String,
    pub exit_timeline: String,
    pub pain_points: String,
    pub additional_notes: Option<String>,
}

impl AcknowledgementTemplate {
    pub fn new(submission: &IntakeSubmission) -> Self {
        Self {
            full_name: submission.full_name.to_string(),
            company_name: submission.company_name.to_string(),
            phone_number: submission.phone_number.to_string(),
            industry: submission.industry_label(),
            revenue_range: submission.revenue_range.to_string(),
            exit_timeline: submission.exit_timeline.to_string(),
            pain_points: submission.pain_points_label(),
            additional_notes: submission.additional_notes.as_ref().map(|x| x.to_string()),
        }
    }
}

/// Notification about a new lead, sent to the internal recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadAlertTemplate {
    pub full_name: String,
    pub first_name: String,
    pub business_email: String,
    pub phone_number: String,
    pub company_name: String,
    pub industry: String,
    pub revenue_range: String,
    pub exit_timeline: String,
    pub pain_points: String,
    pub additional_notes: Option<String>,
    pub received_at: String,
    pub revenue_size: String,
    pub exit_urgency: String,
    pub pain_severity: String,
    pub response_time: String,
}

impl LeadAlertTemplate {
    pub fn new(submission: &IntakeSubmission, received_at: DateTime<Utc>) -> Self {
        let assessment = LeadAssessment::assess(submission);
        Self {
            full_name: submission.full_name.to_string(),
            first_name: submission.first_name().into(),
            business_email: submission.business_email.to_string(),
            phone_number: submission.phone_number.to_string(),
            company_name: submission.company_name.to_string(),
            industry: submission.industry_label(),
            revenue_range: submission.revenue_range.to_string(),
            exit_timeline: submission.exit_timeline.to_string(),
            pain_points: submission.pain_points_label(),
            additional_notes: submission.additional_notes.as_ref().map(|x| x.to_string()),
            received_at: received_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            revenue_size: assessment.revenue_size.label().into(),
            exit_urgency: assessment.exit_urgency.label().into(),
            pain_severity: assessment.pain_severity.label().into(),
            response_time: assessment.response_time.label().into(),
        }
    }
}
