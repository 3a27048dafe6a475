use crate::{
    api::IntakeApi,
    state::{WizardAction, WizardEffect, WizardState},
};

/// Drives a [`WizardState`] and performs its submissions.
#[derive(Debug)]
pub struct WizardController<Api> {
    state: WizardState,
    api: Api,
}

impl<Api: IntakeApi> WizardController<Api> {
    pub fn new(api: Api) -> Self {
        Self::with_state(api, WizardState::default())
    }

    pub fn with_state(api: Api, state: WizardState) -> Self {
        Self { state, api }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Applies `action` to the state.
    ///
    /// Submissions are sent right away and their result is applied before
    /// returning. All other effects are returned to the caller.
    pub async fn dispatch(&mut self, action: WizardAction) -> Vec<WizardEffect> {
        let mut effects = Vec::new();
        for effect in self.state.apply(action) {
            let WizardEffect::Submit(draft) = effect else {
                effects.push(effect);
                continue;
            };

            let outcome = match self.api.submit(&draft).await {
                Ok(message) => WizardAction::SubmissionSucceeded { message },
                Err(err) => WizardAction::SubmissionFailed {
                    message: err.user_message(),
                },
            };
            effects.extend(self.state.apply(outcome));
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use intake_demo::JOHN_DOE_DRAFT;
    use intake_models::step::IntakeStep;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;

    use super::*;
    use crate::{
        api::{MockIntakeApi, SubmitError, GENERIC_ERROR_MESSAGE},
        state::WizardPhase,
    };

    async fn at_last_step(api: MockIntakeApi) -> WizardController<MockIntakeApi> {
        let mut sut = WizardController::with_state(api, WizardState::new(JOHN_DOE_DRAFT.clone()));
        while !sut.state().step().is_last() {
            sut.dispatch(WizardAction::Enter).await;
        }
        sut
    }

    #[tokio::test]
    async fn submit_ok() {
        // Arrange
        let mut api = MockIntakeApi::new();
        api.expect_submit()
            .once()
            .with(mockall::predicate::eq(JOHN_DOE_DRAFT.clone()))
            .return_once(|_| Box::pin(std::future::ready(Ok("Thank you!".into()))));
        let mut sut = at_last_step(api).await;

        // Act
        let effects = sut.dispatch(WizardAction::Submit).await;

        // Assert
        assert_eq!(effects, []);
        assert_eq!(sut.state().phase(), WizardPhase::Submitted);
        assert_eq!(sut.state().success_message(), Some("Thank you!"));
    }

    #[tokio::test]
    async fn submit_rejected() {
        // Arrange
        let mut api = MockIntakeApi::new();
        api.expect_submit().once().return_once(|_| {
            Box::pin(std::future::ready(Err(SubmitError::Rejected {
                status: StatusCode::TOO_MANY_REQUESTS,
                message: Some("Too many submissions.".into()),
            })))
        });
        let mut sut = at_last_step(api).await;

        // Act
        sut.dispatch(WizardAction::Submit).await;

        // Assert
        assert_eq!(sut.state().phase(), WizardPhase::Editing);
        assert_eq!(sut.state().step(), IntakeStep::AdditionalNotes);
        assert_eq!(sut.state().submit_error(), Some("Too many submissions."));
        assert_eq!(*sut.state().draft(), *JOHN_DOE_DRAFT);
    }

    #[tokio::test]
    async fn submit_rejected_without_message() {
        // Arrange
        let mut api = MockIntakeApi::new();
        api.expect_submit().once().return_once(|_| {
            Box::pin(std::future::ready(Err(SubmitError::Rejected {
                status: StatusCode::BAD_GATEWAY,
                message: None,
            })))
        });
        let mut sut = at_last_step(api).await;

        // Act
        sut.dispatch(WizardAction::Submit).await;

        // Assert
        assert_eq!(sut.state().submit_error(), Some(GENERIC_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn enter_on_last_step_does_not_submit() {
        // Arrange
        let mut sut = at_last_step(MockIntakeApi::new()).await;

        // Act
        let effects = sut.dispatch(WizardAction::Enter).await;

        // Assert
        assert_eq!(effects, []);
        assert_eq!(sut.state().phase(), WizardPhase::Editing);
    }
}
