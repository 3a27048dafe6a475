use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use intake_core_health_contracts::{HealthService, HealthStatus};
use serde::Serialize;

pub fn router(service: Arc<impl HealthService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

#[derive(Serialize)]
struct HealthResponse {
    http: bool,
    cache: bool,
    email: bool,
}

async fn health(service: State<Arc<impl HealthService>>) -> Response {
    let status = service.get_status().await;
    let HealthStatus { cache, email } = status;

    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let response = HealthResponse {
        http: true,
        cache,
        email,
    };

    (code, Json(response)).into_response()
}
