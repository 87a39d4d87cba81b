//! Model Aggregator - run one prompt against one or many AI models
//!
//! The crate is built around an execution orchestrator: a small state
//! machine that owns the selected mode, the model catalog, the current
//! selection and prompt, and the outcome of the most recent execution. The
//! HTTP endpoints that actually invoke models sit behind the [`api::Backend`]
//! trait.

pub mod api;
pub mod command;
pub mod config;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod paths;
pub mod report;

pub use api::{Backend, ExecutionRequest, ExecutionResult, HttpBackend};
pub use command::{Command, SLASH_COMMANDS, SlashCommand, parse_line};
pub use config::Config;
pub use error::{ExecutionError, ValidationError};
pub use model::{ExecutionMode, Model, PromptField, PromptPayload};
pub use orchestrator::{Intent, Orchestrator, OrchestratorState, Phase};
