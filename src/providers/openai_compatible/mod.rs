//! OpenAI-compatible chat-completion client
//!
//! - `types` - Wire structures for requests, responses and stream chunks
//! - `http` - Request execution, status mapping and SSE decoding
//! - `chat_model` - The [`ChatProvider`](crate::ChatProvider) implementation

pub mod chat_model;
pub mod http;
pub mod types;

#[cfg(test)]
mod tests;

pub use chat_model::OpenAICompatibleChatModel;
pub use http::OpenAICompatibleClient;
pub use types::*;
