//! Error taxonomy for execution
//!
//! Every variant's `Display` output is the exact message shown to the user in
//! the orchestrator's error slot.

use thiserror::Error;

use crate::api::ApiError;

/// Shown when the catalog cannot be fetched.
pub const CATALOG_LOAD_FAILED: &str = "Failed to load available models";

/// Shown when an endpoint fails without an embedded error message.
pub const APPLICATION_FALLBACK: &str = "API request failed";

/// Shown when a transport failure carries no message of its own.
pub const TRANSPORT_FALLBACK: &str = "An error occurred during execution";

/// A request that cannot be submitted. Raised before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The prompt text is empty or whitespace-only.
    #[error("Please enter a prompt")]
    EmptyPrompt,
    /// No model is selected.
    #[error("Please select at least one model")]
    NoModelSelected,
}

/// Why an execution did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// Rejected locally; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The endpoint answered with a non-success status.
    #[error("{message}")]
    Application {
        /// HTTP status code
        status: u16,
        /// Message extracted from the response, or the generic fallback
        message: String,
    },

    /// The request never produced a usable response (network, I/O, or JSON).
    #[error("{0}")]
    Transport(String),

    /// Another execution is still outstanding.
    #[error("An execution is already in progress")]
    InFlight,
}

impl From<ApiError> for ExecutionError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Application { status, message } => Self::Application { status, message },
            ApiError::Transport(message) => Self::Transport(message),
        }
    }
}
