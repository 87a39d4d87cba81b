//! Backend collaborator boundary
//!
//! The orchestrator talks to three JSON endpoints: the model catalog and the
//! single/multi execution endpoints. [`Backend`] is the seam; [`HttpBackend`]
//! is the real implementation over HTTP.

mod http;
mod types;

pub use http::HttpBackend;
pub use types::{
    ErrorDetail, ExecutionRequest, ExecutionResult, MultiRequest, MultiResult, ResultStatus,
    SingleRequest, SingleResult, Usage,
};

use crate::error::TRANSPORT_FALLBACK;
use crate::model::Model;
use thiserror::Error;

/// Catalog endpoint.
pub const MODELS_PATH: &str = "/api/models";
/// Single-model execution endpoint.
pub const SINGLE_PATH: &str = "/api/models/single";
/// Multi-model execution endpoint.
pub const MULTI_PATH: &str = "/api/models/multi";

/// Failure reported by a backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The endpoint responded with a non-success status.
    #[error("{message}")]
    Application {
        /// HTTP status code
        status: u16,
        /// Message from the response's `error.message`, or a fallback
        message: String,
    },
    /// Network failure or an unreadable response body.
    #[error("{0}")]
    Transport(String),
}

impl ApiError {
    /// Build a transport error from any displayable failure, falling back to
    /// a generic message when the failure renders as an empty string.
    pub fn transport(err: impl std::fmt::Display) -> Self {
        let message = err.to_string();
        if message.trim().is_empty() {
            Self::Transport(TRANSPORT_FALLBACK.to_string())
        } else {
            Self::Transport(message)
        }
    }
}

/// The endpoints the orchestrator depends on.
///
/// Each method performs exactly one request.
pub trait Backend {
    /// Fetch the model catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    fn list_models(&self) -> Result<Vec<Model>, ApiError>;

    /// Run an execution request against the endpoint matching its mode.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Application`] for non-success responses and
    /// [`ApiError::Transport`] for everything that prevents a response from
    /// being read.
    fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult, ApiError>;
}

impl<B: Backend + ?Sized> Backend for &B {
    fn list_models(&self) -> Result<Vec<Model>, ApiError> {
        (**self).list_models()
    }

    fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult, ApiError> {
        (**self).execute(request)
    }
}
