use intake_core_notification_contracts::NotificationService;
use intake_core_submission_contracts::{SubmissionService, SubmitIntakeError, SubmitIntakeOutcome};
use intake_di::Build;
use intake_models::{
    client::ClientIdentifier,
    intake::IntakeDraft,
    validate::{validate_submission, EmailPolicy},
};
use intake_shared_contracts::rate_limit::{RateLimitDecision, RateLimitService};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Build)]
pub struct SubmissionServiceImpl<RateLimit, Notification> {
    rate_limit: RateLimit,
    notification: Notification,
}

impl<RateLimit, Notification> SubmissionService for SubmissionServiceImpl<RateLimit, Notification>
where
    RateLimit: RateLimitService,
    Notification: NotificationService,
{
    // The outcome carries the submission, so it must not be recorded.
    #[tracing::instrument(skip_all)]
    async fn submit(
        &self,
        client: &ClientIdentifier,
        draft: IntakeDraft,
    ) -> Result<SubmitIntakeOutcome, SubmitIntakeError> {
        match self.rate_limit.check(client).await? {
            RateLimitDecision::Allowed { remaining } => {
                debug!(remaining, "Rate limit check passed");
            }
            RateLimitDecision::Limited { retry_after } => {
                warn!(%client, ?retry_after, "Rejected intake submission due to rate limit");
                return Err(SubmitIntakeError::RateLimited { retry_after });
            }
        }

        let submission =
            validate_submission(&draft, EmailPolicy::Shape).inspect_err(|errors| {
                info!(
                    errors = errors.len(),
                    first = %errors.first().field(),
                    "Rejected invalid intake submission"
                )
            })?;

        let notifications = self.notification.notify(&submission).await;
        info!(
            all_delivered = notifications.all_delivered(),
            "Accepted intake submission"
        );

        Ok(SubmitIntakeOutcome {
            submission,
            notifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use intake_core_notification_contracts::{
        DeliveryStatus, MockNotificationService, NotificationReport,
    };
    use intake_demo::{CLIENT, JANE_ROE, JANE_ROE_DRAFT, JOHN_DOE, JOHN_DOE_DRAFT};
    use intake_models::{
        intake::{IntakeField, OTHER},
        validate::FieldError,
    };
    use intake_shared_contracts::rate_limit::MockRateLimitService;
    use intake_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    const DELIVERED: NotificationReport = NotificationReport {
        acknowledgement: DeliveryStatus::Delivered,
        lead_alert: DeliveryStatus::Delivered,
    };

    #[tokio::test]
    async fn ok() {
        // Arrange
        let rate_limit = MockRateLimitService::new()
            .with_check(CLIENT.clone(), RateLimitDecision::Allowed { remaining: 2 });
        let notification = MockNotificationService::new().with_notify(JOHN_DOE.clone(), DELIVERED);

        let sut = SubmissionServiceImpl {
            rate_limit,
            notification,
        };

        // Act
        let result = sut.submit(&CLIENT, JOHN_DOE_DRAFT.clone()).await;

        // Assert
        let outcome = result.unwrap();
        assert_eq!(
            outcome,
            SubmitIntakeOutcome {
                submission: JOHN_DOE.clone(),
                notifications: DELIVERED,
            }
        );
        assert_eq!(*outcome.submission.business_email, "john@example.com");
    }

    #[tokio::test]
    async fn ok_sanitized() {
        // Arrange
        let draft = IntakeDraft {
            full_name: "  John Doe<script>alert('x')</script>  ".into(),
            business_email: "John@Example.com".into(),
            ..JOHN_DOE_DRAFT.clone()
        };

        let rate_limit = MockRateLimitService::new()
            .with_check(CLIENT.clone(), RateLimitDecision::Allowed { remaining: 0 });
        let notification = MockNotificationService::new().with_notify(JOHN_DOE.clone(), DELIVERED);

        let sut = SubmissionServiceImpl {
            rate_limit,
            notification,
        };

        // Act
        let result = sut.submit(&CLIENT, draft).await;

        // Assert
        assert_eq!(result.unwrap().submission, *JOHN_DOE);
    }

    #[tokio::test]
    async fn notification_failures_are_absorbed() {
        // Arrange
        let report = NotificationReport {
            acknowledgement: DeliveryStatus::Failed,
            lead_alert: DeliveryStatus::TimedOut,
        };

        let rate_limit = MockRateLimitService::new()
            .with_check(CLIENT.clone(), RateLimitDecision::Allowed { remaining: 1 });
        let notification = MockNotificationService::new().with_notify(JANE_ROE.clone(), report);

        let sut = SubmissionServiceImpl {
            rate_limit,
            notification,
        };

        // Act
        let result = sut.submit(&CLIENT, JANE_ROE_DRAFT.clone()).await;

        // Assert
        assert_eq!(
            result.unwrap(),
            SubmitIntakeOutcome {
                submission: JANE_ROE.clone(),
                notifications: report,
            }
        );
    }

    #[tokio::test]
    async fn rate_limited() {
        // Arrange
        let rate_limit = MockRateLimitService::new().with_check(
            CLIENT.clone(),
            RateLimitDecision::Limited {
                retry_after: Duration::from_secs(42),
            },
        );
        let notification = MockNotificationService::new();

        let sut = SubmissionServiceImpl {
            rate_limit,
            notification,
        };

        // Act
        let result = sut.submit(&CLIENT, JOHN_DOE_DRAFT.clone()).await;

        // Assert
        assert_matches!(
            result,
            Err(SubmitIntakeError::RateLimited { retry_after }) if *retry_after == Duration::from_secs(42)
        );
    }

    #[tokio::test]
    async fn rate_limited_before_validation() {
        // Arrange
        let rate_limit = MockRateLimitService::new().with_check(
            CLIENT.clone(),
            RateLimitDecision::Limited {
                retry_after: Duration::from_secs(1),
            },
        );
        let notification = MockNotificationService::new();

        let sut = SubmissionServiceImpl {
            rate_limit,
            notification,
        };

        // Act
        let result = sut.submit(&CLIENT, IntakeDraft::default()).await;

        // Assert
        assert_matches!(result, Err(SubmitIntakeError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn missing_custom_industry() {
        // Arrange
        let draft = IntakeDraft {
            industry: OTHER.into(),
            custom_industry: Some("".into()),
            ..JOHN_DOE_DRAFT.clone()
        };

        let rate_limit = MockRateLimitService::new()
            .with_check(CLIENT.clone(), RateLimitDecision::Allowed { remaining: 2 });
        let notification = MockNotificationService::new();

        let sut = SubmissionServiceImpl {
            rate_limit,
            notification,
        };

        // Act
        let result = sut.submit(&CLIENT, draft).await;

        // Assert
        let Err(SubmitIntakeError::Invalid(errors)) = result else {
            panic!("expected validation errors, got {result:?}");
        };
        assert_eq!(errors.first(), FieldError::CustomIndustryRequired);
        assert_eq!(errors.first().field(), IntakeField::CustomIndustry);
        assert!(errors.to_string().to_lowercase().contains("industry"));
    }

    #[tokio::test]
    async fn empty_draft() {
        // Arrange
        let rate_limit = MockRateLimitService::new()
            .with_check(CLIENT.clone(), RateLimitDecision::Allowed { remaining: 2 });
        let notification = MockNotificationService::new();

        let sut = SubmissionServiceImpl {
            rate_limit,
            notification,
        };

        // Act
        let result = sut.submit(&CLIENT, IntakeDraft::default()).await;

        // Assert
        assert_matches!(
            result,
            Err(SubmitIntakeError::Invalid(errors)) if errors.first() == FieldError::FullNameRequired
        );
    }

    #[tokio::test]
    async fn rate_limit_error() {
        // Arrange
        let rate_limit = MockRateLimitService::new().with_check_error(CLIENT.clone());
        let notification = MockNotificationService::new();

        let sut = SubmissionServiceImpl {
            rate_limit,
            notification,
        };

        // Act
        let result = sut.submit(&CLIENT, JOHN_DOE_DRAFT.clone()).await;

        // Assert
        assert_matches!(result, Err(SubmitIntakeError::Other(_)));
    }
}
