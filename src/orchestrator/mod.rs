//! Execution orchestration
//!
//! [`OrchestratorState`] is a pure state machine: intents go in, effects come
//! out. [`Orchestrator`] pairs it with a [`Backend`] and runs those effects,
//! feeding each response back in as another intent.
//!
//! One execute cycle moves through
//! `Idle -> Validating -> (Idle with error) | InFlight -> Idle with result or error`.

mod intent;
mod state;


pub use intent::{Effect, Intent, Phase};
pub use state::{OrchestratorState, ReferenceWarning};

use tracing::{debug, warn};

use crate::api::{ApiError, Backend, ExecutionResult};
use crate::error::{ExecutionError, TRANSPORT_FALLBACK};
use crate::model::{ExecutionMode, Model, PromptField};

/// Drives an [`OrchestratorState`] against a backend.
#[derive(Debug)]
pub struct Orchestrator<B> {
    state: OrchestratorState,
    backend: B,
}

impl<B: Backend> Orchestrator<B> {
    /// Create an orchestrator in single mode with an empty catalog.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_mode(backend, ExecutionMode::default())
    }

    /// Create an orchestrator starting in `mode`.
    #[must_use]
    pub fn with_mode(backend: B, mode: ExecutionMode) -> Self {
        Self {
            state: OrchestratorState::new(mode),
            backend,
        }
    }

    /// Read-only view of the current state.
    #[must_use]
    pub const fn state(&self) -> &OrchestratorState {
        &self.state
    }

    /// The backend requests are sent to.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Apply an intent, then run every effect it produces until the state
    /// machine is settled.
    pub fn dispatch(&mut self, intent: Intent) {
        let mut pending = self.state.apply(intent);
        while let Some(effect) = pending {
            pending = self.run(effect);
        }
    }

    fn run(&mut self, effect: Effect) -> Option<Effect> {
        match effect {
            Effect::FetchCatalog => {
                let result = self.backend.list_models();
                self.state.apply(Intent::CatalogLoaded(result))
            }
            Effect::Dispatch(request) => {
                debug!(path = request.path(), "Running dispatch effect");
                let guard = SettleGuard::new(&mut self.state);
                let result = self.backend.execute(&request);
                guard.settle(result)
            }
        }
    }

    /// Fetch the catalog, replacing the previous one.
    ///
    /// On failure the catalog is left empty and the error slot holds a fixed
    /// message.
    pub fn load_catalog(&mut self) -> &[Model] {
        self.dispatch(Intent::LoadCatalog);
        self.state.catalog()
    }

    /// Switch mode. Always clears the selection and the last outcome.
    pub fn set_mode(&mut self, mode: ExecutionMode) {
        self.dispatch(Intent::SetMode(mode));
    }

    /// Replace the selection. Always clears the last outcome.
    pub fn set_selection<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dispatch(Intent::SetSelection(
            ids.into_iter().map(Into::into).collect(),
        ));
    }

    /// Edit one prompt field. The last outcome is left as is.
    pub fn set_prompt(&mut self, field: PromptField, value: impl Into<String>) {
        self.dispatch(Intent::SetPrompt(field, value.into()));
    }

    /// Run one execute cycle: validate, dispatch exactly one request, and
    /// record its outcome.
    ///
    /// # Errors
    ///
    /// Returns the same failure that is recorded in the state's error slot,
    /// or [`ExecutionError::InFlight`] if a request is already outstanding.
    pub fn execute(&mut self) -> Result<&ExecutionResult, ExecutionError> {
        let request = self.state.begin_execute()?;
        let guard = SettleGuard::new(&mut self.state);
        let result = self.backend.execute(&request);
        let failure = result.as_ref().err().cloned();
        guard.settle(result);

        if let Some(err) = failure {
            return Err(err.into());
        }
        self.state
            .result()
            .ok_or_else(|| ExecutionError::Transport(TRANSPORT_FALLBACK.to_string()))
    }
}

/// Holds the state while a request is outstanding and settles it on drop, so
/// an unwinding backend call still leaves the in-flight phase.
struct SettleGuard<'a> {
    state: &'a mut OrchestratorState,
    settled: bool,
}

impl<'a> SettleGuard<'a> {
    const fn new(state: &'a mut OrchestratorState) -> Self {
        Self {
            state,
            settled: false,
        }
    }

    fn settle(mut self, result: Result<ExecutionResult, ApiError>) -> Option<Effect> {
        self.settled = true;
        self.state.apply(Intent::Settled(result))
    }
}

impl Drop for SettleGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("Backend call unwound before settling");
            self.state
                .settle(Err(ApiError::Transport(TRANSPORT_FALLBACK.to_string())));
        }
    }
}
