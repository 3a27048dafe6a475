use crate::intake::{IntakeDraft, IntakeField};

/// The steps of the intake wizard in the order they are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntakeStep {
    FullName,
    BusinessEmail,
    PhoneNumber,
    CompanyName,
    Industry,
    RevenueRange,
    ExitTimeline,
    PainPoints,
    AdditionalNotes,
}

/// Fields a step requires, plus fields that are only required under a
/// condition on the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRule {
    pub required: &'static [IntakeField],
    pub conditional: Option<ConditionalRule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionalRule {
    pub condition: Condition,
    pub required: &'static [IntakeField],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    IndustryIsOther,
    PainPointsIncludeOther,
}

impl Condition {
    pub fn holds(self, draft: &IntakeDraft) -> bool {
        match self {
            Self::IndustryIsOther => draft.industry_is_other(),
            Self::PainPointsIncludeOther => draft.pain_points_include_other(),
        }
    }
}

impl IntakeStep {
    pub const ALL: [Self; 9] = [
        Self::FullName,
        Self::BusinessEmail,
        Self::PhoneNumber,
        Self::CompanyName,
        Self::Industry,
        Self::RevenueRange,
        Self::ExitTimeline,
        Self::PainPoints,
        Self::AdditionalNotes,
    ];
    pub const COUNT: usize = Self::ALL.len();
    pub const FIRST: Self = Self::FullName;
    pub const LAST: Self = Self::AdditionalNotes;

    /// The 1-based position of this step.
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn from_number(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx))
            .copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::FullName => "What's your full name?",
            Self::BusinessEmail => "What's your business email?",
            Self::PhoneNumber => "What's your phone number?",
            Self::CompanyName => "What's your company name?",
            Self::Industry => "What industry are you in?",
            Self::RevenueRange => "What's your annual revenue range?",
            Self::ExitTimeline => "What's your exit timeline?",
            Self::PainPoints => "What are your main pain points?",
            Self::AdditionalNotes => "Anything else we should know?",
        }
    }

    /// The field that receives focus when the step is entered.
    pub fn primary_field(self) -> IntakeField {
        match self {
            Self::FullName => IntakeField::FullName,
            Self::BusinessEmail => IntakeField::BusinessEmail,
            Self::PhoneNumber => IntakeField::PhoneNumber,
            Self::CompanyName => IntakeField::CompanyName,
            Self::Industry => IntakeField::Industry,
            Self::RevenueRange => IntakeField::RevenueRange,
            Self::ExitTimeline => IntakeField::ExitTimeline,
            Self::PainPoints => IntakeField::PainPoints,
            Self::AdditionalNotes => IntakeField::AdditionalNotes,
        }
    }

    pub fn rule(self) -> StepRule {
        use IntakeField as F;

        let (required, conditional): (&'static [_], _) = match self {
            Self::FullName => (&[F::FullName], None),
            Self::BusinessEmail => (&[F::BusinessEmail], None),
            Self::PhoneNumber => (&[F::PhoneNumber], None),
            Self::CompanyName => (&[F::CompanyName], None),
            Self::Industry => (
                &[F::Industry],
                Some(ConditionalRule {
                    condition: Condition::IndustryIsOther,
                    required: &[F::CustomIndustry],
                }),
            ),
            Self::RevenueRange => (&[F::RevenueRange], None),
            Self::ExitTimeline => (&[F::ExitTimeline], None),
            Self::PainPoints => (
                &[F::PainPoints],
                Some(ConditionalRule {
                    condition: Condition::PainPointsIncludeOther,
                    required: &[F::CustomPainPoint],
                }),
            ),
            Self::AdditionalNotes => (&[], None),
        };

        StepRule {
            required,
            conditional,
        }
    }

    /// Returns the fields that must be valid before leaving this step, given
    /// the current draft.
    pub fn required_fields(self, draft: &IntakeDraft) -> Vec<IntakeField> {
        let rule = self.rule();
        let mut fields = rule.required.to_vec();
        if let Some(conditional) = rule.conditional.filter(|c| c.condition.holds(draft)) {
            fields.extend_from_slice(conditional.required);
        }
        fields
    }

    /// Returns the step a field is collected on.
    pub fn of_field(field: IntakeField) -> Self {
        match field {
            IntakeField::FullName => Self::FullName,
            IntakeField::BusinessEmail => Self::BusinessEmail,
            IntakeField::PhoneNumber => Self::PhoneNumber,
            IntakeField::CompanyName => Self::CompanyName,
            IntakeField::Industry | IntakeField::CustomIndustry => Self::Industry,
            IntakeField::RevenueRange => Self::RevenueRange,
            IntakeField::ExitTimeline => Self::ExitTimeline,
            IntakeField::PainPoints | IntakeField::CustomPainPoint => Self::PainPoints,
            IntakeField::AdditionalNotes => Self::AdditionalNotes,
        }
    }
}
