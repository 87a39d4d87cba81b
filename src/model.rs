//! Catalog entries, execution modes, and the prompt payload

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of input a model can accept alongside the prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    /// Plain prompt text.
    Text,
    /// An image reference (`image_url`).
    Image,
    /// An audio reference (`audio_url`).
    Audio,
}

impl Modality {
    /// Lowercase label used by the catalog's `input_modalities` list.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A model advertised by `GET /api/models`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    /// Unique model identifier, sent back verbatim in execution requests.
    pub id: String,

    /// Human-readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Provider that serves the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// Short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Declared input modalities (`text`, `image`, `audio`).
    ///
    /// An empty list means the catalog did not say.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_modalities: Vec<String>,
}

impl Model {
    /// Create a catalog entry with only an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            provider: None,
            description: None,
            input_modalities: Vec::new(),
        }
    }

    /// Name to show for this model, falling back to its identifier.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Whether the model accepts the given modality.
    ///
    /// Text is always accepted. Models without declared modalities are
    /// assumed to accept everything.
    #[must_use]
    pub fn supports(&self, modality: Modality) -> bool {
        modality == Modality::Text
            || self.input_modalities.is_empty()
            || self
                .input_modalities
                .iter()
                .any(|m| m.eq_ignore_ascii_case(modality.label()))
    }
}

/// Whether a prompt goes to one model or to a set of models.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Exactly one selected model, sent to the single-execution endpoint.
    #[default]
    Single,
    /// Any number of selected models, sent to the multi-execution endpoint.
    Multi,
}

impl ExecutionMode {
    /// All modes, in display order.
    pub const ALL: &'static [Self] = &[Self::Single, Self::Multi];

    /// Lowercase label shown in the UI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multi => "multi",
        }
    }

    /// Whether more than one model may be selected in this mode.
    #[must_use]
    pub const fn allows_multiple(self) -> bool {
        matches!(self, Self::Multi)
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string is not a known [`ExecutionMode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown execution mode '{0}' (expected 'single' or 'multi')")]
pub struct ParseModeError(pub String);

impl FromStr for ExecutionMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseModeError(s.to_string()))
    }
}

/// Which part of the prompt payload an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptField {
    /// The prompt text itself.
    Text,
    /// The optional image reference.
    ImageUrl,
    /// The optional audio reference.
    AudioUrl,
}

/// The prompt as the user is editing it.
///
/// Fields hold raw input; trimming happens when a request is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptPayload {
    /// Prompt text
    pub text: String,
    /// Image reference, empty when unset
    pub image_url: String,
    /// Audio reference, empty when unset
    pub audio_url: String,
}

impl PromptPayload {
    /// Replace one field with a new raw value.
    pub fn set(&mut self, field: PromptField, value: String) {
        match field {
            PromptField::Text => self.text = value,
            PromptField::ImageUrl => self.image_url = value,
            PromptField::AudioUrl => self.audio_url = value,
        }
    }

    /// Trimmed prompt text, or `None` when it is blank.
    #[must_use]
    pub fn trimmed_text(&self) -> Option<&str> {
        non_blank(&self.text)
    }

    /// Trimmed image reference, or `None` when it is blank.
    #[must_use]
    pub fn image_reference(&self) -> Option<&str> {
        non_blank(&self.image_url)
    }

    /// Trimmed audio reference, or `None` when it is blank.
    #[must_use]
    pub fn audio_reference(&self) -> Option<&str> {
        non_blank(&self.audio_url)
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
