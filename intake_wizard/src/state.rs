use std::collections::BTreeMap;

use intake_models::{
    intake::{IntakeDraft, IntakeField},
    step::IntakeStep,
    validate::{validate_field, validate_step, validate_submission, EmailPolicy, FieldError},
};

use crate::phone::{format_phone, PhoneRegion};

/// The client applies the stricter email policy so that typos in the domain
/// are caught before submission.
const EMAIL_POLICY: EmailPolicy = EmailPolicy::RecognizedTld;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    step: IntakeStep,
    phase: WizardPhase,
    draft: IntakeDraft,
    errors: BTreeMap<IntakeField, FieldError>,
    phone_region: PhoneRegion,
    submit_error: Option<String>,
    success_message: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WizardPhase {
    #[default]
    Editing,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    /// Sets the value of a text or single choice field.
    Edit { field: IntakeField, value: String },
    TogglePainPoint(String),
    /// A field lost the focus and is validated on its own.
    Blur(IntakeField),
    SetPhoneRegion(PhoneRegion),
    Next,
    Back,
    /// The Enter key was pressed inside the form.
    Enter,
    Submit,
    SubmissionSucceeded { message: String },
    SubmissionFailed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEffect {
    Focus(FocusTarget),
    ScrollIntoView(IntakeStep),
    /// Send the draft to the server.
    Submit(IntakeDraft),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Field(IntakeField),
    /// The first selectable option of a choice field.
    Option {
        field: IntakeField,
        value: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub step: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent(self) -> u8 {
        ((self.step * 100) as f64 / self.total as f64).round() as u8
    }

    pub fn label(self) -> String {
        format!("Step {} of {}", self.step, self.total)
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new(IntakeDraft::default())
    }
}

impl WizardState {
    /// Starts the wizard at the first step with the given draft.
    pub fn new(draft: IntakeDraft) -> Self {
        Self {
            step: IntakeStep::FIRST,
            phase: WizardPhase::Editing,
            draft,
            errors: BTreeMap::new(),
            phone_region: PhoneRegion::Auto,
            submit_error: None,
            success_message: None,
        }
    }

    pub fn step(&self) -> IntakeStep {
        self.step
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn draft(&self) -> &IntakeDraft {
        &self.draft
    }

    pub fn error(&self, field: IntakeField) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn errors(&self) -> impl Iterator<Item = FieldError> + '_ {
        self.errors.values().copied()
    }

    pub fn phone_region(&self) -> PhoneRegion {
        self.phone_region
    }

    /// The message of the last failed submission.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            step: self.step.number(),
            total: IntakeStep::COUNT,
        }
    }

    pub fn can_submit(&self) -> bool {
        self.step.is_last() && self.phase == WizardPhase::Editing
    }

    /// Applies `action` and returns the effects the user interface has to
    /// perform.
    pub fn apply(&mut self, action: WizardAction) -> Vec<WizardEffect> {
        match action {
            WizardAction::Edit { field, value } => self.edit(field, value),
            WizardAction::TogglePainPoint(pain_point) => self.toggle_pain_point(&pain_point),
            WizardAction::Blur(field) => self.blur(field),
            WizardAction::SetPhoneRegion(region) => self.set_phone_region(region),
            WizardAction::Next => self.next(),
            WizardAction::Back => self.back(),
            WizardAction::Enter if self.step.is_last() => Vec::new(),
            WizardAction::Enter => self.next(),
            WizardAction::Submit => self.submit(),
            WizardAction::SubmissionSucceeded { message } => self.submission_succeeded(message),
            WizardAction::SubmissionFailed { message } => self.submission_failed(message),
        }
    }

    fn is_editing(&self) -> bool {
        self.phase == WizardPhase::Editing
    }

    fn edit(&mut self, field: IntakeField, value: String) -> Vec<WizardEffect> {
        if !self.is_editing() || field == IntakeField::PainPoints {
            return Vec::new();
        }

        let value = match field {
            IntakeField::PhoneNumber => format_phone(&value, self.phone_region),
            _ => value,
        };
        self.draft.set_text(field, value);
        self.errors.remove(&field);

        Vec::new()
    }

    fn toggle_pain_point(&mut self, pain_point: &str) -> Vec<WizardEffect> {
        if !self.is_editing() {
            return Vec::new();
        }

        self.draft.toggle_pain_point(pain_point);
        self.errors.remove(&IntakeField::PainPoints);
        if !self.draft.pain_points_include_other() {
            self.errors.remove(&IntakeField::CustomPainPoint);
        }

        Vec::new()
    }

    fn blur(&mut self, field: IntakeField) -> Vec<WizardEffect> {
        if !self.is_editing() {
            return Vec::new();
        }

        match validate_field(field, &self.draft, EMAIL_POLICY) {
            Ok(()) => self.errors.remove(&field),
            Err(error) => self.errors.insert(field, error),
        };

        Vec::new()
    }

    fn set_phone_region(&mut self, region: PhoneRegion) -> Vec<WizardEffect> {
        if !self.is_editing() {
            return Vec::new();
        }

        self.phone_region = region;
        self.draft.phone_number = format_phone(&self.draft.phone_number, region);

        Vec::new()
    }

    fn next(&mut self) -> Vec<WizardEffect> {
        if !self.is_editing() {
            return Vec::new();
        }
        let Some(next) = self.step.next() else {
            return Vec::new();
        };

        let errors = validate_step(self.step, &self.draft, EMAIL_POLICY);
        if !errors.is_empty() {
            self.set_errors(errors);
            return Vec::new();
        }

        self.enter(next)
    }

    fn back(&mut self) -> Vec<WizardEffect> {
        if !self.is_editing() {
            return Vec::new();
        }
        let Some(previous) = self.step.previous() else {
            return Vec::new();
        };

        self.enter(previous)
    }

    fn submit(&mut self) -> Vec<WizardEffect> {
        if !self.can_submit() {
            return Vec::new();
        }

        match validate_submission(&self.draft, EMAIL_POLICY) {
            Ok(_) => {
                self.phase = WizardPhase::Submitting;
                self.submit_error = None;
                vec![WizardEffect::Submit(self.draft.clone())]
            }
            Err(errors) => {
                let step = IntakeStep::of_field(errors.first().field());
                let effects = self.enter(step);
                self.set_errors(
                    errors
                        .iter()
                        .filter(|error| IntakeStep::of_field(error.field()) == step),
                );
                effects
            }
        }
    }

    fn submission_succeeded(&mut self, message: String) -> Vec<WizardEffect> {
        if self.phase != WizardPhase::Submitting {
            return Vec::new();
        }

        self.phase = WizardPhase::Submitted;
        self.success_message = Some(message);

        Vec::new()
    }

    fn submission_failed(&mut self, message: String) -> Vec<WizardEffect> {
        if self.phase != WizardPhase::Submitting {
            return Vec::new();
        }

        self.phase = WizardPhase::Editing;
        self.submit_error = Some(message);

        Vec::new()
    }

    fn enter(&mut self, step: IntakeStep) -> Vec<WizardEffect> {
        self.step = step;
        self.errors.clear();

        let mut effects = vec![WizardEffect::ScrollIntoView(step)];
        if !step.is_last() {
            effects.push(WizardEffect::Focus(focus_target(step)));
        }
        effects
    }

    fn set_errors(&mut self, errors: impl IntoIterator<Item = FieldError>) {
        for error in errors {
            self.errors.entry(error.field()).or_insert(error);
        }
    }
}

fn focus_target(step: IntakeStep) -> FocusTarget {
    let field = step.primary_field();
    match field.options().and_then(|options| options.first()) {
        Some(value) => FocusTarget::Option { field, value },
        None => FocusTarget::Field(field),
    }
}
