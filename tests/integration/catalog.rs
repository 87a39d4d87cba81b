//! Catalog loading through the HTTP backend

use crate::common::{mock_catalog, orchestrator};
use model_aggregator::error::CATALOG_LOAD_FAILED;
use model_aggregator::{ExecutionMode, PromptField, report};

#[test]
fn test_catalog_loaded_on_startup() {
    let mut server = mockito::Server::new();
    let mock = mock_catalog(&mut server);
    let mut orchestrator = orchestrator(&server, ExecutionMode::Single);

    let ids: Vec<String> = orchestrator
        .load_catalog()
        .iter()
        .map(|m| m.id.clone())
        .collect();
    mock.assert();

    assert_eq!(ids, vec!["gpt-x", "claude-y", "whisper-z"]);
    assert!(orchestrator.state().error().is_none());
}

#[test]
fn test_catalog_failure_blocks_execution() {
    let mut server = mockito::Server::new();
    let catalog = server
        .mock("GET", "/api/models")
        .with_status(500)
        .with_body(r#"{"error":{"message":"db down"}}"#)
        .create();
    let execute = server
        .mock("POST", mockito::Matcher::Any)
        .expect(0)
        .create();
    let mut orchestrator = orchestrator(&server, ExecutionMode::Multi);

    assert!(orchestrator.load_catalog().is_empty());
    assert_eq!(orchestrator.state().error(), Some(CATALOG_LOAD_FAILED));

    orchestrator.set_prompt(PromptField::Text, "hello");
    assert!(!orchestrator.state().can_execute());
    assert!(orchestrator.execute().is_err());

    catalog.assert();
    execute.assert();
}

#[test]
fn test_catalog_refresh_prunes_selection() {
    let mut server = mockito::Server::new();
    let first = mock_catalog(&mut server);
    let mut orchestrator = orchestrator(&server, ExecutionMode::Multi);
    orchestrator.load_catalog();
    orchestrator.set_selection(["gpt-x", "whisper-z"]);
    first.assert();
    first.remove();

    let second = server
        .mock("GET", "/api/models")
        .with_status(200)
        .with_body(r#"{"models":[{"id":"gpt-x"}]}"#)
        .create();
    orchestrator.load_catalog();
    second.assert();

    assert_eq!(orchestrator.state().selection(), ["gpt-x".to_string()]);
}

#[test]
fn test_loaded_catalog_flags_unsupported_image() {
    let mut server = mockito::Server::new();
    let catalog = server
        .mock("GET", "/api/models")
        .with_status(200)
        .with_body(r#"{"models":[{"id":"t","input_modalities":["text"]}]}"#)
        .create();
    let mut orchestrator = orchestrator(&server, ExecutionMode::Single);

    orchestrator.load_catalog();
    orchestrator.set_selection(["t"]);
    orchestrator.set_prompt(PromptField::ImageUrl, "http://img");
    catalog.assert();

    assert_eq!(
        report::reference_warnings(orchestrator.state()),
        vec!["t does not declare image input".to_string()]
    );
}

#[test]
fn test_null_models_field_is_empty_catalog() {
    let mut server = mockito::Server::new();
    let catalog = server
        .mock("GET", "/api/models")
        .with_status(200)
        .with_body(r#"{"models":null}"#)
        .create();
    let mut orchestrator = orchestrator(&server, ExecutionMode::Single);

    assert!(orchestrator.load_catalog().is_empty());
    catalog.assert();

    assert_eq!(orchestrator.state().error(), None);
}
