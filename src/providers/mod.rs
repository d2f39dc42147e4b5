//! Chat-model provider implementations
//!
//! - **openai_compatible**: client for servers that speak the OpenAI
//!   chat-completion API, including local servers behind a custom base URL

pub mod openai_compatible;

pub use openai_compatible::OpenAICompatibleChatModel;
