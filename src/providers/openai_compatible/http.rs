//! HTTP client functionality for OpenAI-compatible servers

use super::types::{OpenAIRequest, OpenAIResponse, OpenAIStreamChunk};
use crate::core_types::provider::FragmentStream;
use crate::error::{LlmError, LlmResult};
use crate::logging::{log_debug, log_error};
use eventsource_stream::Eventsource;
use futures_util::{future, stream, StreamExt};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

/// Payload that marks the end of a server-sent event stream
pub const DONE_MARKER: &str = "[DONE]";

/// Shared HTTP client for OpenAI-compatible servers
///
/// No request timeout is configured; a hung server blocks the caller.
#[derive(Debug, Clone, Default)]
pub struct OpenAICompatibleClient {
    client: reqwest::Client,
}

impl OpenAICompatibleClient {
    /// Create a new OpenAI-compatible HTTP client
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Chat completion endpoint below a base URL such as `http://host/v1`
    pub fn completions_url(base_url: &str) -> String {
        format!("{}/chat/completions", base_url.trim_end_matches('/'))
    }

    /// Build JSON and bearer authentication headers
    pub fn build_auth_headers(api_key: &str) -> LlmResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                LlmError::configuration_error(format!("Invalid API key format: {e}"))
            })?,
        );

        Ok(headers)
    }

    /// Execute a blocking chat completion request
    pub async fn execute_chat_request(
        &self,
        url: &str,
        headers: &HeaderMap,
        request: &OpenAIRequest,
    ) -> LlmResult<OpenAIResponse> {
        let response = self.send(url, headers, request).await?;
        parse_success_response(response).await
    }

    /// Execute a streaming chat completion request
    ///
    /// The returned stream yields non-empty delta contents in arrival order and
    /// ends at `[DONE]` or at the end of the body. A server that ignores the
    /// `stream` flag and answers with plain JSON yields its reply as a single
    /// fragment.
    pub async fn execute_stream_request(
        &self,
        url: &str,
        headers: &HeaderMap,
        request: &OpenAIRequest,
    ) -> LlmResult<FragmentStream> {
        let response = self.send(url, headers, request).await?;

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));

        if is_json {
            log_debug!(url = %url, "Server answered streaming request with a JSON body");
            let content = first_choice_content(parse_success_response(response).await?)?;
            return Ok(Box::pin(stream::once(future::ready(Ok(content)))));
        }

        let fragments = response
            .bytes_stream()
            .eventsource()
            .take_while(|event| {
                future::ready(!matches!(event, Ok(event) if event.data.trim() == DONE_MARKER))
            })
            .filter_map(|event| async move {
                match event {
                    Ok(event) => parse_stream_event(&event.data).transpose(),
                    Err(e) => Some(Err(LlmError::stream_failed(format!(
                        "Event stream error: {e}"
                    )))),
                }
            });

        Ok(Box::pin(fragments))
    }

    /// Send a request and turn non-success statuses into errors
    async fn send(
        &self,
        url: &str,
        headers: &HeaderMap,
        request: &OpenAIRequest,
    ) -> LlmResult<reqwest::Response> {
        log_debug!(
            url = %url,
            model = %request.model,
            message_count = request.messages.len(),
            stream = request.stream.unwrap_or(false),
            "Sending OpenAI-compatible request"
        );

        let response = self
            .client
            .post(url)
            .headers(headers.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                log_error!(
                    url = %url,
                    error = %e,
                    "HTTP request failed"
                );
                LlmError::request_failed(format!("Request failed: {e}"), Some(Box::new(e)))
            })?;

        if !response.status().is_success() {
            return Err(handle_error_response(response).await);
        }

        Ok(response)
    }
}

/// Extract the reply text of the first choice
pub fn first_choice_content(response: OpenAIResponse) -> LlmResult<String> {
    if let Some(usage) = &response.usage {
        log_debug!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            "Token usage"
        );
    }

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::response_parsing_error("No choices in response"))?;

    Ok(choice.message.content.unwrap_or_default())
}

/// Decode one event payload into an optional text fragment
pub fn parse_stream_event(data: &str) -> LlmResult<Option<String>> {
    if data.trim().is_empty() {
        return Ok(None);
    }

    let chunk: OpenAIStreamChunk = serde_json::from_str(data).map_err(|e| {
        log_error!(
            error = %e,
            data = %data,
            "Failed to parse stream chunk"
        );
        LlmError::response_parsing_error(format!("Invalid stream chunk: {e}"))
    })?;

    if let Some(error) = chunk.error {
        let message = error
            .message
            .unwrap_or_else(|| "server reported an error".to_string());
        return Err(LlmError::stream_failed(message));
    }

    Ok(chunk.into_fragment())
}

/// Handle non-success HTTP responses
async fn handle_error_response(response: reqwest::Response) -> LlmError {
    let status = response.status();
    let headers = response.headers().clone();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    log_error!(
        status = %status,
        error_text = %error_text,
        "API error response"
    );

    match status.as_u16() {
        401 => {
            if let Ok(error_json) = serde_json::from_str::<serde_json::Value>(&error_text) {
                if let Some(message) = error_json
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                {
                    return LlmError::authentication_failed(message);
                }
            }
            LlmError::authentication_failed("Invalid API key or authentication failed")
        }
        429 => {
            let retry_after_seconds = headers
                .get("retry-after")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);

            LlmError::rate_limit_exceeded(retry_after_seconds)
        }
        _ => LlmError::request_failed(format!("API error {status}: {error_text}"), None),
    }
}

/// Parse successful HTTP response into OpenAIResponse
async fn parse_success_response(response: reqwest::Response) -> LlmResult<OpenAIResponse> {
    let raw_body = response.text().await.map_err(|e| {
        log_error!(
            error = %e,
            "Failed to read response body"
        );
        LlmError::response_parsing_error(format!("Failed to read response: {e}"))
    })?;

    serde_json::from_str(&raw_body).map_err(|e| {
        log_error!(
            error = %e,
            raw_body = %raw_body,
            "Failed to parse response"
        );
        LlmError::response_parsing_error(format!("Invalid response: {e}"))
    })
}
