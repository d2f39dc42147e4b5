//! Test helper utilities for llm-server-smoke integration tests
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use llm_server_smoke::ServerConfig;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Configuration pointing at a mock server, base URL including `/v1`
pub fn config_for(server: &MockServer) -> ServerConfig {
    ServerConfig {
        api_key: "test-key".to_string(),
        base_url: format!("{}/v1", server.uri()),
    }
}

/// Non-streaming chat completion body
pub fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "gpt-4",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 1, "total_tokens": 11}
    })
}

/// Server-sent event stream carrying one chunk per fragment, then `[DONE]`
pub fn sse_body(fragments: &[&str]) -> String {
    let mut body = String::new();
    body.push_str(&sse_event(
        &json!({"choices": [{"index": 0, "delta": {"role": "assistant"}}]}).to_string(),
    ));
    for fragment in fragments {
        body.push_str(&sse_event(
            &json!({"choices": [{"index": 0, "delta": {"content": fragment}}]}).to_string(),
        ));
    }
    body.push_str(&sse_event(
        &json!({"choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}]}).to_string(),
    ));
    body.push_str(&sse_event("[DONE]"));
    body
}

pub fn sse_event(data: &str) -> String {
    format!("data: {data}\n\n")
}

pub fn sse_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/event-stream")
}

/// Answer streaming requests with `fragments` and everything else with `reply`
///
/// The streaming mock is mounted first so it wins for `"stream": true` bodies.
pub async fn mount_echo_server(server: &MockServer, reply: &str, fragments: &[&str]) {
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(body_partial_json(json!({"stream": true})))
        .respond_with(sse_response(sse_body(fragments)))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(reply)))
        .mount(server)
        .await;
}

/// JSON bodies of every request the server received
pub async fn received_bodies(server: &MockServer) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r: &Request| r.body_json::<serde_json::Value>().expect("JSON request body"))
        .collect()
}
