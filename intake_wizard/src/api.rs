use std::future::Future;

use intake_models::intake::IntakeDraft;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

pub const GENERIC_ERROR_MESSAGE: &str =
    "There was an error submitting your information. Please try again.";

const SUBMIT_INTAKE_PATH: &str = "api/submit-intake";

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait IntakeApi: Send + Sync + 'static {
    /// Submits the draft and returns the confirmation message of the server.
    fn submit(&self, draft: &IntakeDraft) -> impl Future<Output = Result<String, SubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum SubmitError {
    /// The server responded with a non-success status.
    #[error("{}", .message.as_deref().unwrap_or(GENERIC_ERROR_MESSAGE))]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("{}", GENERIC_ERROR_MESSAGE)]
    Network(#[from] reqwest::Error),
}

impl SubmitError {
    /// The message to show next to the submit button.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct HttpIntakeApi {
    client: reqwest::Client,
    endpoint: Url,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
}

impl HttpIntakeApi {
    /// Creates a client for the backend at `base_url`, e.g.
    /// `https://fraqtiv.com/`.
    pub fn new(base_url: &Url) -> Result<Self, url::ParseError> {
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: base_url.join(SUBMIT_INTAKE_PATH)?,
        })
    }
}

impl IntakeApi for HttpIntakeApi {
    async fn submit(&self, draft: &IntakeDraft) -> Result<String, SubmitError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(draft)
            .send()
            .await
            .inspect_err(|err| warn!("Failed to reach intake endpoint: {err}"))?;

        let status = response.status();
        // A body that is not the expected json is treated like a missing message.
        let body = response.json::<ApiResponse>().await.ok();
        debug!(%status, "Received intake response");

        match body {
            Some(ApiResponse {
                success: true,
                message,
            }) if status.is_success() => Ok(message.unwrap_or_default()),
            body => Err(SubmitError::Rejected {
                status,
                message: body.and_then(|body| body.message).filter(|m| !m.is_empty()),
            }),
        }
    }
}
