//! # llm-server-smoke
//!
//! Manual smoke test for local LLM servers that expose the OpenAI
//! chat-completion API.
//!
//! The crate ships a small OpenAI-compatible chat client and a runner that
//! exercises it with four fixed scenarios: a single completion, a streamed
//! completion, a question, and a two-turn conversation. Each scenario prints
//! its reply or its error; one failure never stops the others.
//!
//! ## Example
//!
//! ```rust,no_run
//! use llm_server_smoke::{ServerConfig, SmokeRunner};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::from_env();
//! let mut runner = SmokeRunner::new(config, std::io::stdout());
//! let summary = runner.run_against_server().await?;
//! println!("{} of 4 scenarios passed", summary.passed());
//! # Ok(())
//! # }
//! ```

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

pub mod core_types;

pub mod logging;

pub mod config;
pub mod error;
pub mod providers;
pub mod runner;

#[cfg(test)]
pub mod tests;

pub use config::{ChatModelSettings, ServerConfig};
pub use core_types::{ChatMessage, ChatProvider, Conversation, FragmentStream, MessageRole};
pub use error::{LlmError, LlmResult};
pub use providers::OpenAICompatibleChatModel;
pub use runner::{RunSummary, Scenario, ScenarioOutcome, SmokeRunner};
