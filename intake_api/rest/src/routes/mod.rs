use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiResponse;

pub mod health;
pub mod intake;

pub const INTERNAL_ERROR_MESSAGE: &str =
    "There was an error submitting your information. Please try again.";

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err}");
    error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
}

fn error(code: StatusCode, message: impl Into<String>) -> Response {
    (code, Json(ApiResponse::failure(message))).into_response()
}
