//! Provider trait for chat-model backends
//!
//! The smoke-test runner only talks to [`ChatProvider`], so the HTTP client
//! can be swapped for a scripted provider in tests.

use crate::core_types::messages::ChatMessage;
use crate::error::LlmResult;
use futures_util::Stream;
use std::pin::Pin;

/// Lazy, single-pass sequence of response text fragments
///
/// Fragments arrive in server order. The stream ends after the last fragment
/// and cannot be restarted.
pub type FragmentStream = Pin<Box<dyn Stream<Item = LlmResult<String>> + Send>>;

/// A chat-completion backend
#[async_trait::async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send the whole conversation and wait for the assistant reply
    async fn invoke(&self, messages: &[ChatMessage]) -> LlmResult<ChatMessage>;

    /// Send the whole conversation and receive the reply incrementally
    async fn stream(&self, messages: &[ChatMessage]) -> LlmResult<FragmentStream>;

    /// Short name used in log fields
    fn provider_name(&self) -> &'static str;
}
