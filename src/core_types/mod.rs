//! Core types shared by the client and the runner
//!
//! ## Organization
//! - `messages` - Role-tagged messages and conversations
//! - `provider` - The `ChatProvider` trait and fragment streams

pub mod messages;
pub mod provider;

pub use messages::{ChatMessage, Conversation, MessageRole};
pub use provider::{ChatProvider, FragmentStream};
