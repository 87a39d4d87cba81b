//! Orchestrator state and its transition function.

use tracing::{debug, info, warn};

use super::intent::{Effect, Intent, Phase};
use crate::api::{ApiError, ExecutionRequest, ExecutionResult, MultiRequest, SingleRequest};
use crate::error::{CATALOG_LOAD_FAILED, ExecutionError, ValidationError};
use crate::model::{ExecutionMode, Modality, Model, PromptPayload};

/// Outcome of the most recent execution. Holding one excludes the other.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    Result(ExecutionResult),
    Error(String),
}

/// A selected model that cannot take one of the attached references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceWarning {
    /// Model identifier
    pub model_id: String,
    /// Reference kind the model does not declare
    pub modality: Modality,
}

/// Everything the orchestrator knows.
///
/// Mutated only through [`OrchestratorState::apply`] and the methods it
/// delegates to, so the reset rules (mode or selection change clears the
/// outcome) cannot be bypassed by callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrchestratorState {
    mode: ExecutionMode,
    catalog: Vec<Model>,
    selection: Vec<String>,
    prompt: PromptPayload,
    in_flight: bool,
    outcome: Option<Outcome>,
}

impl OrchestratorState {
    /// Create an idle state in the given mode.
    #[must_use]
    pub fn new(mode: ExecutionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Apply an intent and return the effect the driver should run, if any.
    pub fn apply(&mut self, intent: Intent) -> Option<Effect> {
        match intent {
            Intent::SetMode(mode) => {
                self.set_mode(mode);
                None
            }
            Intent::SetSelection(ids) => {
                self.set_selection(ids);
                None
            }
            Intent::SetPrompt(field, value) => {
                self.prompt.set(field, value);
                None
            }
            Intent::LoadCatalog => Some(Effect::FetchCatalog),
            Intent::CatalogLoaded(result) => {
                self.catalog_loaded(result);
                None
            }
            Intent::Execute => self.begin_execute().ok().map(Effect::Dispatch),
            Intent::Settled(result) => {
                self.settle(result);
                None
            }
        }
    }

    fn set_mode(&mut self, mode: ExecutionMode) {
        debug!(old_mode = %self.mode, new_mode = %mode, "Changing execution mode");
        self.mode = mode;
        self.selection.clear();
        self.outcome = None;
    }

    fn set_selection(&mut self, ids: Vec<String>) {
        let mut selection: Vec<String> = Vec::with_capacity(ids.len());
        for id in ids {
            if !selection.contains(&id) {
                selection.push(id);
            }
        }
        if !self.mode.allows_multiple() {
            selection.truncate(1);
        }

        debug!(mode = %self.mode, count = selection.len(), "Selection changed");
        self.selection = selection;
        self.outcome = None;
    }

    fn catalog_loaded(&mut self, result: Result<Vec<Model>, ApiError>) {
        match result {
            Ok(models) => {
                info!(count = models.len(), "Model catalog loaded");
                self.catalog = models;
                if self.catalog_error().is_some() {
                    self.outcome = None;
                }

                let before = self.selection.len();
                let catalog = &self.catalog;
                self.selection
                    .retain(|id| catalog.iter().any(|model| &model.id == id));
                if self.selection.len() != before {
                    debug!(
                        dropped = before - self.selection.len(),
                        "Dropped selected models missing from catalog"
                    );
                    self.outcome = None;
                }
            }
            Err(err) => {
                warn!(error = %err, "Failed to fetch models");
                self.catalog.clear();
                self.selection.clear();
                self.outcome = Some(Outcome::Error(CATALOG_LOAD_FAILED.to_string()));
            }
        }
    }

    /// Validate the current state and, if submittable, enter the in-flight
    /// phase and return the request to dispatch.
    ///
    /// Validation failures are recorded in the error slot.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::InFlight`] without touching state when a
    /// request is already outstanding, or [`ExecutionError::Validation`] when
    /// the prompt is blank or nothing is selected.
    pub fn begin_execute(&mut self) -> Result<ExecutionRequest, ExecutionError> {
        if self.in_flight {
            warn!("Execute requested while a request is in flight");
            return Err(ExecutionError::InFlight);
        }

        let request = match self.build_request() {
            Ok(request) => request,
            Err(err) => {
                debug!(error = %err, "Execute rejected");
                self.outcome = Some(Outcome::Error(err.to_string()));
                return Err(err.into());
            }
        };

        info!(
            mode = %request.mode(),
            models = request.model_count(),
            "Execution started"
        );
        self.in_flight = true;
        self.outcome = None;
        Ok(request)
    }

    fn build_request(&self) -> Result<ExecutionRequest, ValidationError> {
        let prompt = self
            .prompt
            .trimmed_text()
            .ok_or(ValidationError::EmptyPrompt)?
            .to_string();
        let first = self
            .selection
            .first()
            .ok_or(ValidationError::NoModelSelected)?;
        let image_url = self.prompt.image_reference().map(str::to_string);
        let audio_url = self.prompt.audio_reference().map(str::to_string);

        Ok(match self.mode {
            ExecutionMode::Single => ExecutionRequest::Single(SingleRequest {
                model: first.clone(),
                prompt,
                image_url,
                audio_url,
            }),
            ExecutionMode::Multi => ExecutionRequest::Multi(MultiRequest {
                models: self.selection.clone(),
                prompt,
                image_url,
                audio_url,
            }),
        })
    }

    /// Record the outcome of a dispatched request and return to idle.
    ///
    /// A later settlement overwrites an earlier one.
    pub fn settle(&mut self, result: Result<ExecutionResult, ApiError>) {
        self.in_flight = false;
        self.outcome = Some(match result {
            Ok(result) => {
                info!(mode = %result.mode(), "Execution succeeded");
                Outcome::Result(result)
            }
            Err(err) => {
                warn!(error = %err, "Execution failed");
                Outcome::Error(err.to_string())
            }
        });
    }

    /// Current execution mode.
    #[must_use]
    pub const fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Models from the last successful catalog fetch.
    #[must_use]
    pub fn catalog(&self) -> &[Model] {
        &self.catalog
    }

    /// Selected model identifiers, in selection order.
    #[must_use]
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    /// The prompt as currently edited.
    #[must_use]
    pub const fn prompt(&self) -> &PromptPayload {
        &self.prompt
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub const fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Coarse execution phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        if self.in_flight {
            Phase::InFlight
        } else {
            Phase::Idle
        }
    }

    /// Result of the most recent successful execution.
    #[must_use]
    pub const fn result(&self) -> Option<&ExecutionResult> {
        match &self.outcome {
            Some(Outcome::Result(result)) => Some(result),
            _ => None,
        }
    }

    /// Message describing the most recent failure.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Some(Outcome::Error(message)) => Some(message.as_str()),
            _ => None,
        }
    }

    /// The error slot, but only when it holds a catalog load failure.
    #[must_use]
    pub fn catalog_error(&self) -> Option<&str> {
        self.error().filter(|message| *message == CATALOG_LOAD_FAILED)
    }

    /// Whether the execute affordance should be enabled.
    #[must_use]
    pub fn can_execute(&self) -> bool {
        !self.in_flight && !self.selection.is_empty() && self.prompt.trimmed_text().is_some()
    }

    /// Catalog entries for the selection, in selection order.
    ///
    /// Identifiers missing from the catalog are skipped.
    #[must_use]
    pub fn selected_models(&self) -> Vec<&Model> {
        self.selection
            .iter()
            .filter_map(|id| self.catalog.iter().find(|model| &model.id == id))
            .collect()
    }

    /// Selected models whose declared modalities do not cover the attached
    /// image or audio reference. Advisory only.
    #[must_use]
    pub fn unsupported_references(&self) -> Vec<ReferenceWarning> {
        let attached: Vec<Modality> = [
            self.prompt.image_reference().map(|_| Modality::Image),
            self.prompt.audio_reference().map(|_| Modality::Audio),
        ]
        .into_iter()
        .flatten()
        .collect();

        let mut warnings = Vec::new();
        for model in self.selected_models() {
            for modality in &attached {
                if !model.supports(*modality) {
                    warnings.push(ReferenceWarning {
                        model_id: model.id.clone(),
                        modality: *modality,
                    });
                }
            }
        }
        warnings
    }
}

