//! Inputs to the state machine and the effects it asks for.

use crate::api::{ApiError, ExecutionRequest, ExecutionResult};
use crate::model::{ExecutionMode, Model, PromptField};

/// Something that happened: a user action or a collaborator response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Switch between single and multi execution.
    SetMode(ExecutionMode),
    /// Replace the selected model identifiers.
    SetSelection(Vec<String>),
    /// Edit one field of the prompt payload.
    SetPrompt(PromptField, String),
    /// Ask for the catalog to be (re)fetched.
    LoadCatalog,
    /// The catalog request settled.
    CatalogLoaded(Result<Vec<Model>, ApiError>),
    /// Submit the current prompt to the current selection.
    Execute,
    /// The execution request settled.
    Settled(Result<ExecutionResult, ApiError>),
}

/// Work the driver must perform on behalf of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the model catalog.
    FetchCatalog,
    /// Send an execution request.
    Dispatch(ExecutionRequest),
}

/// Coarse execution phase, for presentation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing outstanding; Execute may be invoked.
    #[default]
    Idle,
    /// A request has been dispatched and has not settled.
    InFlight,
}
