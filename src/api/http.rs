//! HTTP implementation of [`Backend`].

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use ureq::Agent;
use ureq::http::Response;

use super::types::{ErrorDetail, ExecutionRequest, ExecutionResult};
use super::{ApiError, Backend, MODELS_PATH};
use crate::error::APPLICATION_FALLBACK;
use crate::model::Model;

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    models: Option<Vec<Model>>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

/// Talks to the aggregator endpoints over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    agent: Agent,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend rooted at `base_url` (for example `http://localhost:3000`).
    ///
    /// `timeout` bounds each whole request; `None` waits indefinitely.
    #[must_use]
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let config = ureq::config::Config::builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build();

        Self {
            agent: config.new_agent(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL requests are sent to, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn user_agent() -> String {
        format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}

impl Backend for HttpBackend {
    fn list_models(&self) -> Result<Vec<Model>, ApiError> {
        let url = self.url(MODELS_PATH);
        debug!(%url, "Fetching model catalog");

        let response = self
            .agent
            .get(url.as_str())
            .header("User-Agent", Self::user_agent())
            .call()
            .map_err(|err| {
                warn!(%url, error = %err, "Catalog request failed");
                ApiError::transport(err)
            })?;

        let catalog: CatalogResponse = decode(response)?;
        let models = catalog.models.unwrap_or_default();
        debug!(count = models.len(), "Fetched model catalog");
        Ok(models)
    }

    fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult, ApiError> {
        let url = self.url(request.path());
        debug!(
            %url,
            mode = %request.mode(),
            models = request.model_count(),
            "Dispatching execution request"
        );

        let builder = self
            .agent
            .post(url.as_str())
            .header("User-Agent", Self::user_agent());
        let sent = match request {
            ExecutionRequest::Single(body) => builder.send_json(body),
            ExecutionRequest::Multi(body) => builder.send_json(body),
        };
        let response = sent.map_err(|err| {
            warn!(%url, error = %err, "Execution request failed");
            ApiError::transport(err)
        })?;

        match request {
            ExecutionRequest::Single(_) => decode(response).map(ExecutionResult::Single),
            ExecutionRequest::Multi(_) => decode(response).map(ExecutionResult::Multi),
        }
    }
}

/// Read a response body as JSON.
///
/// The body is parsed before the status is inspected, so a failure response
/// that is not JSON surfaces as a transport error.
fn decode<T: DeserializeOwned>(response: Response<ureq::Body>) -> Result<T, ApiError> {
    let status = response.status();
    let body = response
        .into_body()
        .read_to_string()
        .map_err(ApiError::transport)?;

    if status.is_success() {
        return serde_json::from_str(&body).map_err(|err| {
            warn!(status = status.as_u16(), error = %err, "Malformed success payload");
            ApiError::transport(err)
        });
    }

    let envelope: ErrorEnvelope = serde_json::from_str(&body).map_err(ApiError::transport)?;
    let message = envelope
        .error
        .and_then(|detail| detail.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| APPLICATION_FALLBACK.to_string());

    warn!(status = status.as_u16(), %message, "Endpoint reported failure");
    Err(ApiError::Application {
        status: status.as_u16(),
        message,
    })
}
