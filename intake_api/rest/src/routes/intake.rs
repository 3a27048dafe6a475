use std::{sync::Arc, time::Duration};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing, Extension, Json, Router,
};
use intake_core_submission_contracts::{SubmissionService, SubmitIntakeError, SUCCESS_MESSAGE};
use intake_models::client::ClientIdentifier;
use tracing::debug;

use super::{error, internal_server_error};
use crate::models::{intake::ApiIntakeSubmission, ApiResponse};

pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

pub fn router(service: Arc<impl SubmissionService>) -> Router<()> {
    Router::new()
        .route(
            "/api/submit-intake",
            routing::post(submit)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl SubmissionService>>,
    Extension(client): Extension<ClientIdentifier>,
    body: Result<Json<ApiIntakeSubmission>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            debug!(status = %rejection.status(), "rejected unparseable request body");
            return error(StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE);
        }
    };

    match service.submit(&client, body.into()).await {
        Ok(_) => Json(ApiResponse::success(SUCCESS_MESSAGE)).into_response(),
        Err(err @ SubmitIntakeError::RateLimited { retry_after }) => (
            [(header::RETRY_AFTER, retry_after_secs(retry_after).to_string())],
            error(StatusCode::TOO_MANY_REQUESTS, err.to_string()),
        )
            .into_response(),
        Err(err @ SubmitIntakeError::Invalid(_)) => {
            error(StatusCode::BAD_REQUEST, err.to_string())
        }
        Err(SubmitIntakeError::Other(err)) => internal_server_error(err),
    }
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> Response {
    error(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE)
}

/// Rounds up to whole seconds, as required by the `Retry-After` header.
fn retry_after_secs(retry_after: Duration) -> u64 {
    let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
    secs.max(1)
}
