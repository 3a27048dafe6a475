use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use axum::{http::HeaderValue, Router};
use intake_core_health_contracts::HealthService;
use intake_core_submission_contracts::SubmissionService;
use intake_di::Build;
use intake_utils::Apply;
use tokio::net::TcpListener;
use tracing::info;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Health, Submission> {
    health: Health,
    submission: Submission,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    /// The only origin allowed to call the api from a browser. Any origin is
    /// allowed if this is [`None`].
    pub allowed_origin: Option<HeaderValue>,
    /// Whether `X-Forwarded-For` and `X-Real-IP` identify the client. Only
    /// enable this behind a reverse proxy that sets these headers.
    pub trust_forwarded_headers: bool,
}

impl<Health, Submission> RestServer<Health, Submission>
where
    Health: HealthService,
    Submission: SubmissionService,
{
    pub fn new(health: Health, submission: Submission, config: RestServerConfig) -> Self {
        Self {
            health,
            submission,
            config,
        }
    }

    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;
        self.serve_listener(listener).await
    }

    pub async fn serve_listener(self, listener: TcpListener) -> anyhow::Result<()> {
        info!("Listening on {}", listener.local_addr()?);
        let router = self.router();
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let Self {
            health,
            submission,
            config,
        } = self;

        Router::new()
            .merge(routes::health::router(health.into()))
            .merge(routes::intake::router(submission.into()))
            .apply(middlewares::trace::add)
            .apply(middlewares::client_ip::add(config.trust_forwarded_headers))
            .apply(middlewares::panic_handler::add)
            .apply(middlewares::request_id::add)
            .apply(middlewares::cors::add(config.allowed_origin))
    }
}
