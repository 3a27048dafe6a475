//! Client side of the intake form.
//!
//! [`WizardState`] is a pure state machine driven by [`WizardAction`]s. The
//! [`WizardEffect`]s it returns describe what the user interface has to do,
//! e.g. moving the focus. [`WizardController`] additionally performs the
//! submission through an [`IntakeApi`].

pub use api::{HttpIntakeApi, IntakeApi, SubmitError, GENERIC_ERROR_MESSAGE};
pub use controller::WizardController;
pub use phone::{format_phone, PhoneRegion};
pub use state::{FocusTarget, Progress, WizardAction, WizardEffect, WizardPhase, WizardState};

#[cfg(any(test, feature = "mock"))]
pub use api::MockIntakeApi;

mod api;
mod controller;
mod phone;
mod state;
