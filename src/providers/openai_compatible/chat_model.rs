//! Chat model handle for OpenAI-compatible servers

use super::http::{first_choice_content, OpenAICompatibleClient};
use super::types::{OpenAIMessage, OpenAIRequest};
use crate::config::{ChatModelSettings, ServerConfig};
use crate::core_types::messages::ChatMessage;
use crate::core_types::provider::{ChatProvider, FragmentStream};
use crate::error::LlmResult;
use crate::logging::log_debug;
use futures_util::StreamExt;
use reqwest::header::HeaderMap;
use std::time::Instant;

const PROVIDER_NAME: &str = "openai_compatible";

/// Chat model bound to one server, model name and temperature
///
/// A streaming handle (`settings.streaming`) also streams under
/// [`ChatProvider::invoke`] and joins the fragments into one reply.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleChatModel {
    http_client: OpenAICompatibleClient,
    headers: HeaderMap,
    url: String,
    config: ServerConfig,
    settings: ChatModelSettings,
}

impl OpenAICompatibleChatModel {
    /// Create a new chat model handle
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigurationError`](crate::LlmError::ConfigurationError) if:
    /// - The base URL is empty or not http(s)
    /// - The model name is empty
    /// - The API key cannot be sent as a header value
    pub fn new(config: ServerConfig, settings: ChatModelSettings) -> LlmResult<Self> {
        config.validate()?;
        settings.validate()?;

        let headers = OpenAICompatibleClient::build_auth_headers(&config.api_key)?;
        let url = OpenAICompatibleClient::completions_url(&config.base_url);

        log_debug!(
            provider = PROVIDER_NAME,
            url = %url,
            model = %settings.model,
            temperature = settings.temperature,
            streaming = settings.streaming,
            "Chat model initialized"
        );

        Ok(Self {
            http_client: OpenAICompatibleClient::new(),
            headers,
            url,
            config,
            settings,
        })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn settings(&self) -> &ChatModelSettings {
        &self.settings
    }

    fn create_request(&self, messages: &[ChatMessage], stream: bool) -> OpenAIRequest {
        OpenAIRequest {
            model: self.settings.model.clone(),
            messages: messages.iter().map(OpenAIMessage::from).collect(),
            temperature: Some(self.settings.temperature),
            stream: stream.then_some(true),
        }
    }

    async fn collect_stream(&self, messages: &[ChatMessage]) -> LlmResult<String> {
        let mut fragments = self.stream(messages).await?;
        let mut content = String::new();
        while let Some(fragment) = fragments.next().await {
            content.push_str(&fragment?);
        }
        Ok(content)
    }
}

#[async_trait::async_trait]
impl ChatProvider for OpenAICompatibleChatModel {
    async fn invoke(&self, messages: &[ChatMessage]) -> LlmResult<ChatMessage> {
        let start_time = Instant::now();

        let content = if self.settings.streaming {
            self.collect_stream(messages).await?
        } else {
            let request = self.create_request(messages, false);
            let response = self
                .http_client
                .execute_chat_request(&self.url, &self.headers, &request)
                .await?;
            first_choice_content(response)?
        };

        log_debug!(
            provider = self.provider_name(),
            duration_ms = start_time.elapsed().as_millis() as u64,
            content_len = content.len(),
            "Chat completion finished"
        );

        Ok(ChatMessage::assistant(content))
    }

    async fn stream(&self, messages: &[ChatMessage]) -> LlmResult<FragmentStream> {
        log_debug!(
            provider = self.provider_name(),
            message_count = messages.len(),
            "Opening chat completion stream"
        );
        let request = self.create_request(messages, true);
        self.http_client
            .execute_stream_request(&self.url, &self.headers, &request)
            .await
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
