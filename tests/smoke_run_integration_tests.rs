//! End-to-End Tests for the Smoke-Test Run
//!
//! UNIT UNDER TEST: SmokeRunner::run_against_server
//!
//! BUSINESS RESPONSIBILITY:
//!   - Build the plain and streaming chat models from configuration
//!   - Run all four scenarios against a real HTTP endpoint
//!   - Keep going when the server fails, and finish with the completion line
//!   - Treat an unusable configuration as fatal before any scenario runs
//!
//! TEST COVERAGE:
//!   - Echo server: every scenario prints "ok" and no errors appear
//!   - Failing server: four inline errors and one completion line
//!   - Wire-level conversation history on the second multi-turn request
//!   - Invalid base URL

mod common;

use common::*;
use llm_server_smoke::{LlmError, LlmResult, RunSummary, ServerConfig, SmokeRunner};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn run_against(config: ServerConfig) -> (String, LlmResult<RunSummary>) {
    let mut runner = SmokeRunner::new(config, Vec::new());
    let result = runner.run_against_server().await;
    let output = String::from_utf8(runner.into_inner()).unwrap();
    (output, result)
}

#[tokio::test]
async fn test_echo_server_passes_every_scenario() {
    // Arrange
    let server = MockServer::start().await;
    mount_echo_server(&server, "ok", &["o", "k"]).await;

    // Act
    let (output, result) = run_against(config_for(&server)).await;

    // Assert
    let summary = result.expect("run should start");
    assert_eq!(summary.passed(), 4);

    let reply_lines: Vec<&str> = output
        .lines()
        .filter(|l| l.starts_with("Response:") || l.starts_with("Assistant:"))
        .collect();
    assert_eq!(
        reply_lines,
        vec!["Response: ok", "Response: ok", "Assistant: ok", "Assistant: ok"]
    );
    assert!(output.contains("Streaming response: ok\n"));
    assert!(!output.contains("Error:"));
    assert_eq!(output.matches("All LangChain tests completed!").count(), 1);
    assert!(output.starts_with(&format!(
        "Testing VS Code LLM Server with LangChain...\nBase URL: {}/v1\n\n",
        server.uri()
    )));
}

#[tokio::test]
async fn test_failing_server_reports_each_scenario_and_completes() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    // Act
    let (output, result) = run_against(config_for(&server)).await;

    // Assert
    let summary = result.expect("scenario failures are not fatal");
    assert_eq!(summary.failed(), 4);
    // The streaming error lands on the "Streaming response: " line
    assert_eq!(
        output.matches("Error: Request failed: API error 503").count(),
        4
    );
    assert!(output.contains("Streaming response: Error: Request failed: API error 503"));
    assert!(output.ends_with("All LangChain tests completed!\n"));
}

#[tokio::test]
async fn test_second_turn_carries_history_on_the_wire() {
    // Arrange
    let server = MockServer::start().await;
    mount_echo_server(&server, "ok", &["ok"]).await;

    // Act
    run_against(config_for(&server)).await.1.unwrap();

    // Assert
    let bodies = received_bodies(&server).await;
    // Scenario 1, scenario 2 (stream), scenario 3, then two turns of scenario 4
    assert_eq!(bodies.len(), 5);
    assert_eq!(
        bodies[4]["messages"],
        json!([
            {"role": "system", "content": "You are a helpful assistant."},
            {"role": "user", "content": "My name is Alice."},
            {"role": "assistant", "content": "ok"},
            {"role": "user", "content": "What is my name?"}
        ])
    );
}

#[tokio::test]
async fn test_invalid_base_url_is_fatal() {
    let config = ServerConfig {
        api_key: "test-key".to_string(),
        base_url: "localhost:3000/v1".to_string(),
    };

    let (output, result) = run_against(config).await;

    assert!(matches!(result, Err(LlmError::ConfigurationError { .. })));
    assert!(output.contains("Base URL: localhost:3000/v1"));
    assert!(!output.contains("=== Test 1"));
    assert!(!output.contains("All LangChain tests completed!"));
}
