//! Execute cycles end to end: request shape, endpoint routing, and outcomes

use crate::common::{mock_catalog, orchestrator, prepare};
use mockito::Matcher;
use model_aggregator::{ExecutionError, ExecutionMode, ExecutionResult, PromptField};
use serde_json::json;

#[test]
fn test_single_request_body_is_minimal() {
    let mut server = mockito::Server::new();
    let _catalog = mock_catalog(&mut server);
    let mock = server
        .mock("POST", "/api/models/single")
        .match_header("content-type", Matcher::Regex("application/json".to_string()))
        .match_body(Matcher::Json(json!({"model": "gpt-x", "prompt": "hello"})))
        .with_status(200)
        .with_body(r#"{"model":"gpt-x","response":"Hi!","status":"success","latency_ms":12}"#)
        .create();

    let mut orchestrator = orchestrator(&server, ExecutionMode::Single);
    prepare(&mut orchestrator, &["gpt-x"], "  hello  ");
    orchestrator.set_prompt(PromptField::ImageUrl, "   ");

    let result = orchestrator.execute().cloned();
    mock.assert();

    assert!(matches!(result, Ok(ExecutionResult::Single(_))));
    if let Ok(ExecutionResult::Single(single)) = result {
        assert_eq!(single.response.as_deref(), Some("Hi!"));
        assert_eq!(single.latency_ms, Some(12));
    }
    assert!(!orchestrator.state().in_flight());
    assert!(orchestrator.state().error().is_none());
}

#[test]
fn test_multi_request_carries_selection_and_image() {
    let mut server = mockito::Server::new();
    let _catalog = mock_catalog(&mut server);
    let mock = server
        .mock("POST", "/api/models/multi")
        .match_body(Matcher::Json(json!({
            "models": ["gpt-x", "claude-y"],
            "prompt": "hi",
            "image_url": "http://img"
        })))
        .with_status(200)
        .with_body(
            r#"{"results":[
                {"model":"gpt-x","response":"a picture of a cat","status":"success"},
                {"model":"claude-y","status":"error","error":{"message":"image too large"}}
            ],"total_latency_ms":800}"#,
        )
        .create();

    let mut orchestrator = orchestrator(&server, ExecutionMode::Multi);
    prepare(&mut orchestrator, &["gpt-x", "claude-y"], "hi");
    orchestrator.set_prompt(PromptField::ImageUrl, "http://img");

    let result = orchestrator.execute().cloned();
    mock.assert();

    assert!(matches!(result, Ok(ExecutionResult::Multi(_))));
    if let Ok(ExecutionResult::Multi(multi)) = result {
        assert_eq!(multi.results.len(), 2);
        assert_eq!(multi.succeeded(), 1);
        assert_eq!(multi.results[1].error_message(), Some("image too large"));
    }
}

#[test]
fn test_server_error_message_surfaces() {
    let mut server = mockito::Server::new();
    let _catalog = mock_catalog(&mut server);
    let mock = server
        .mock("POST", "/api/models/single")
        .with_status(500)
        .with_body(r#"{"error":{"message":"boom"}}"#)
        .create();

    let mut orchestrator = orchestrator(&server, ExecutionMode::Single);
    prepare(&mut orchestrator, &["gpt-x"], "hello");

    let result = orchestrator.execute();
    assert_eq!(
        result,
        Err(ExecutionError::Application {
            status: 500,
            message: "boom".to_string()
        })
    );
    mock.assert();

    let state = orchestrator.state();
    assert_eq!(state.error(), Some("boom"));
    assert!(state.result().is_none());
    assert!(!state.in_flight());
}

#[test]
fn test_validation_failures_send_nothing() {
    let mut server = mockito::Server::new();
    let _catalog = mock_catalog(&mut server);
    let never = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create();

    let mut orchestrator = orchestrator(&server, ExecutionMode::Multi);
    prepare(&mut orchestrator, &[], "hello");
    assert!(orchestrator.execute().is_err());
    assert_eq!(
        orchestrator.state().error(),
        Some("Please select at least one model")
    );

    orchestrator.set_selection(["gpt-x"]);
    orchestrator.set_prompt(PromptField::Text, " \t ");
    assert!(orchestrator.execute().is_err());
    assert_eq!(orchestrator.state().error(), Some("Please enter a prompt"));

    never.assert();
}

#[test]
fn test_second_cycle_replaces_first() {
    let mut server = mockito::Server::new();
    let _catalog = mock_catalog(&mut server);
    let first = server
        .mock("POST", "/api/models/single")
        .match_body(Matcher::PartialJson(json!({"prompt": "first"})))
        .with_status(200)
        .with_body(r#"{"model":"gpt-x","response":"one","latency_ms":5}"#)
        .create();
    let second = server
        .mock("POST", "/api/models/single")
        .match_body(Matcher::PartialJson(json!({"prompt": "second"})))
        .with_status(200)
        .with_body(r#"{"model":"gpt-x","response":"two"}"#)
        .create();

    let mut orchestrator = orchestrator(&server, ExecutionMode::Single);
    prepare(&mut orchestrator, &["gpt-x"], "first");
    assert!(orchestrator.execute().is_ok());

    orchestrator.set_prompt(PromptField::Text, "second");
    // Editing the prompt keeps the previous result visible.
    assert!(orchestrator.state().result().is_some());
    assert!(orchestrator.execute().is_ok());

    first.assert();
    second.assert();
    let result = orchestrator.state().result();
    assert!(matches!(result, Some(ExecutionResult::Single(_))));
    if let Some(ExecutionResult::Single(single)) = result {
        assert_eq!(single.response.as_deref(), Some("two"));
        assert_eq!(single.latency_ms, None);
    }
}

#[test]
fn test_mode_switch_clears_result() {
    let mut server = mockito::Server::new();
    let _catalog = mock_catalog(&mut server);
    let _single = server
        .mock("POST", "/api/models/single")
        .with_status(200)
        .with_body(r#"{"model":"gpt-x","response":"ok"}"#)
        .create();

    let mut orchestrator = orchestrator(&server, ExecutionMode::Single);
    prepare(&mut orchestrator, &["gpt-x"], "hello");
    assert!(orchestrator.execute().is_ok());

    orchestrator.set_mode(ExecutionMode::Multi);

    let state = orchestrator.state();
    assert!(state.result().is_none());
    assert!(state.selection().is_empty());
    assert_eq!(state.prompt().text, "hello");
}
