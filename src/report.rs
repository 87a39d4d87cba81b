//! Plain-text summaries of catalog, results, and orchestrator state.

use crate::api::{ExecutionResult, SingleResult};
use crate::model::Model;
use crate::orchestrator::{OrchestratorState, Phase};

/// One line per model; selected models are marked with `*`.
#[must_use]
pub fn catalog(models: &[Model], selection: &[String]) -> String {
    if models.is_empty() {
        return "No models available".to_string();
    }

    models
        .iter()
        .map(|model| {
            let marker = if selection.contains(&model.id) { '*' } else { ' ' };
            let mut line = format!("{marker} {}", model.id);
            if let Some(name) = &model.name {
                line.push_str(&format!("  {name}"));
            }
            if let Some(provider) = &model.provider {
                line.push_str(&format!(" ({provider})"));
            }
            if !model.input_modalities.is_empty() {
                line.push_str(&format!(" [{}]", model.input_modalities.join(", ")));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn model_block(result: &SingleResult) -> String {
    let mut header = format!("== {} [{}]", result.model, status_label(result));
    if let Some(latency) = result.latency_ms {
        header.push_str(&format!(" {latency}ms"));
    }
    if let Some(total) = result.usage.and_then(|usage| usage.total_tokens) {
        header.push_str(&format!(" {total} tokens"));
    }

    let body = if result.is_success() {
        result.response.as_deref().unwrap_or("").to_string()
    } else {
        result
            .error_message()
            .unwrap_or("model call failed")
            .to_string()
    };
    format!("{header}\n{body}")
}

const fn status_label(result: &SingleResult) -> &'static str {
    match result.status {
        crate::api::ResultStatus::Success => "ok",
        crate::api::ResultStatus::Error => "error",
    }
}

/// Human-readable rendering of an execution result.
#[must_use]
pub fn result(result: &ExecutionResult) -> String {
    match result {
        ExecutionResult::Single(single) => model_block(single),
        ExecutionResult::Multi(multi) => {
            let mut summary = format!(
                "{} succeeded, {} failed",
                multi.succeeded(),
                multi.failed()
            );
            if let Some(total) = multi.total_latency_ms {
                summary.push_str(&format!(" in {total}ms"));
            }
            let blocks: Vec<String> = multi.results.iter().map(model_block).collect();
            if blocks.is_empty() {
                summary
            } else {
                format!("{summary}\n\n{}", blocks.join("\n\n"))
            }
        }
    }
}

/// One line per selected model that does not declare the modality of an
/// attached reference.
#[must_use]
pub fn reference_warnings(state: &OrchestratorState) -> Vec<String> {
    state
        .unsupported_references()
        .iter()
        .map(|warning| {
            format!(
                "{} does not declare {} input",
                warning.model_id, warning.modality
            )
        })
        .collect()
}

/// Multi-line snapshot of the orchestrator state.
#[must_use]
pub fn status(state: &OrchestratorState) -> String {
    let prompt = state.prompt();
    let selection = if state.selection().is_empty() {
        "(none)".to_string()
    } else {
        state.selection().join(", ")
    };
    let phase = match state.phase() {
        Phase::Idle => "idle",
        Phase::InFlight => "in flight",
    };

    let mut lines = vec![
        format!("mode:      {}", state.mode()),
        format!("catalog:   {} models", state.catalog().len()),
        format!("selection: {selection}"),
        format!("prompt:    {}", prompt.trimmed_text().unwrap_or("(empty)")),
    ];
    if let Some(image) = prompt.image_reference() {
        lines.push(format!("image:     {image}"));
    }
    if let Some(audio) = prompt.audio_reference() {
        lines.push(format!("audio:     {audio}"));
    }
    lines.push(format!("phase:     {phase}"));
    for warning in reference_warnings(state) {
        lines.push(format!("warning:   {warning}"));
    }
    if let Some(error) = state.error() {
        lines.push(format!("error:     {error}"));
    } else if state.result().is_some() {
        lines.push("result:    available".to_string());
    }
    lines.join("\n")
}
