//! Wire types for the execution endpoints.

use serde::{Deserialize, Serialize};

use super::{MULTI_PATH, SINGLE_PATH};
use crate::model::ExecutionMode;

/// Body of `POST /api/models/single`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleRequest {
    /// Model identifier
    pub model: String,
    /// Trimmed prompt text
    pub prompt: String,
    /// Image reference, omitted when blank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Audio reference, omitted when blank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

/// Body of `POST /api/models/multi`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiRequest {
    /// Model identifiers, in selection order
    pub models: Vec<String>,
    /// Trimmed prompt text
    pub prompt: String,
    /// Image reference, omitted when blank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Audio reference, omitted when blank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

/// A request ready to be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionRequest {
    /// Single-model request
    Single(SingleRequest),
    /// Multi-model request
    Multi(MultiRequest),
}

impl ExecutionRequest {
    /// Mode this request was built for.
    #[must_use]
    pub const fn mode(&self) -> ExecutionMode {
        match self {
            Self::Single(_) => ExecutionMode::Single,
            Self::Multi(_) => ExecutionMode::Multi,
        }
    }

    /// Endpoint path the request is sent to.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Single(_) => SINGLE_PATH,
            Self::Multi(_) => MULTI_PATH,
        }
    }

    /// Number of models the request targets.
    #[must_use]
    pub fn model_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi(request) => request.models.len(),
        }
    }
}

/// Per-model outcome reported by the backend.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    /// The model produced a response.
    #[default]
    Success,
    /// The model call failed.
    Error,
}

/// Structured error description embedded in responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Machine-readable code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Token accounting for one model call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u64>,
    /// Tokens in the completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u64>,
    /// Total tokens billed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
}

/// One model's answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleResult {
    /// Model that produced this result
    #[serde(default)]
    pub model: String,
    /// Model output text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    /// Whether this model's call succeeded
    #[serde(default)]
    pub status: ResultStatus,
    /// Failure details when `status` is `error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
    /// Wall-clock latency of the model call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    /// Token usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl SingleResult {
    /// Whether this model's call succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ResultStatus::Success
    }

    /// Error message for a failed call, if the backend supplied one.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().and_then(|e| e.message.as_deref())
    }
}

/// Answers from every model in a multi execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiResult {
    /// Per-model results, in the order the backend returned them
    #[serde(default)]
    pub results: Vec<SingleResult>,
    /// Wall-clock latency of the whole fan-out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_latency_ms: Option<u64>,
}

impl MultiResult {
    /// Number of models that succeeded.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Number of models that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

/// Outcome of a completed execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExecutionResult {
    /// Result from the single endpoint
    Single(SingleResult),
    /// Result from the multi endpoint
    Multi(MultiResult),
}

impl ExecutionResult {
    /// Mode that produced this result.
    #[must_use]
    pub const fn mode(&self) -> ExecutionMode {
        match self {
            Self::Single(_) => ExecutionMode::Single,
            Self::Multi(_) => ExecutionMode::Multi,
        }
    }
}
