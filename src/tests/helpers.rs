//! Test helper utilities for llm-server-smoke tests
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

#![allow(dead_code)]

use crate::core_types::messages::ChatMessage;
use crate::core_types::provider::{ChatProvider, FragmentStream};
use crate::error::{LlmError, LlmResult};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Provider that answers from a script and records every conversation it receives
///
/// Clones share the same script and history.
#[derive(Clone)]
pub struct ScriptedProvider {
    default_reply: String,
    replies: Arc<Mutex<VecDeque<LlmResult<String>>>>,
    fragments: Arc<Mutex<Option<Vec<LlmResult<String>>>>>,
    received: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl ScriptedProvider {
    /// Answer every request with `reply`; streams yield it as one fragment
    pub fn echo(reply: &str) -> Self {
        Self {
            default_reply: reply.to_string(),
            replies: Arc::new(Mutex::new(VecDeque::new())),
            fragments: Arc::new(Mutex::new(None)),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue results for successive `invoke` calls; once drained, the default reply is used
    pub fn with_replies(self, replies: Vec<LlmResult<String>>) -> Self {
        self.replies.lock().unwrap().extend(replies);
        self
    }

    /// Items yielded by the next `stream` call
    pub fn with_fragments(self, fragments: Vec<LlmResult<String>>) -> Self {
        *self.fragments.lock().unwrap() = Some(fragments);
        self
    }

    /// Conversations passed to `invoke` and `stream`, in call order
    pub fn received(&self) -> Vec<Vec<ChatMessage>> {
        self.received.lock().unwrap().clone()
    }

    pub fn boxed(&self) -> Box<dyn ChatProvider> {
        Box::new(self.clone())
    }
}

#[async_trait::async_trait]
impl ChatProvider for ScriptedProvider {
    async fn invoke(&self, messages: &[ChatMessage]) -> LlmResult<ChatMessage> {
        self.received.lock().unwrap().push(messages.to_vec());
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(result) => result.map(ChatMessage::assistant),
            None => Ok(ChatMessage::assistant(self.default_reply.clone())),
        }
    }

    async fn stream(&self, messages: &[ChatMessage]) -> LlmResult<FragmentStream> {
        self.received.lock().unwrap().push(messages.to_vec());
        let items = self
            .fragments
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| vec![Ok(self.default_reply.clone())]);
        Ok(Box::pin(futures_util::stream::iter(items)))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

/// Shorthand for a transport failure
pub fn connection_refused() -> LlmError {
    LlmError::request_failed("connection refused", None)
}

/// Writer that snapshots its contents at every flush
#[derive(Debug, Default)]
pub struct FlushRecordingWriter {
    pub buffer: Vec<u8>,
    pub snapshots: Vec<String>,
}

impl FlushRecordingWriter {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer).into_owned()
    }
}

impl Write for FlushRecordingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.snapshots.push(self.contents());
        Ok(())
    }
}

/// Writer whose every operation fails
#[derive(Debug, Default)]
pub struct BrokenPipeWriter;

impl Write for BrokenPipeWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"))
    }
}
