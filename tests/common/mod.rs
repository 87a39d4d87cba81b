//! Common test utilities shared across integration tests

use model_aggregator::{ExecutionMode, HttpBackend, Orchestrator, PromptField};
use std::time::Duration;

/// Catalog body served by [`mock_catalog`].
pub const CATALOG_BODY: &str = r#"{"models":[
    {"id":"gpt-x","name":"GPT X","provider":"openai","input_modalities":["text","image"]},
    {"id":"claude-y","name":"Claude Y","provider":"anthropic"},
    {"id":"whisper-z","input_modalities":["audio"]}
]}"#;

/// Orchestrator pointed at a mock server.
pub fn orchestrator(
    server: &mockito::ServerGuard,
    mode: ExecutionMode,
) -> Orchestrator<HttpBackend> {
    let backend = HttpBackend::new(&server.url(), Some(Duration::from_secs(5)));
    Orchestrator::with_mode(backend, mode)
}

/// Register the catalog endpoint on `server`.
pub fn mock_catalog(server: &mut mockito::ServerGuard) -> mockito::Mock {
    server
        .mock("GET", "/api/models")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CATALOG_BODY)
        .create()
}

/// Load the catalog, select `ids`, and set the prompt text.
pub fn prepare(orchestrator: &mut Orchestrator<HttpBackend>, ids: &[&str], prompt: &str) {
    orchestrator.load_catalog();
    orchestrator.set_selection(ids.iter().copied());
    orchestrator.set_prompt(PromptField::Text, prompt);
}
