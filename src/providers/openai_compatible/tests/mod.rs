//! Unit tests for the OpenAI-compatible client
//!
//! HTTP round trips live in `tests/chat_model_integration_tests.rs`; these
//! cover the pure conversion and decoding helpers.
