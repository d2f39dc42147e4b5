//! Smoke-test runner
//!
//! Runs the four fixed scenarios in order against a [`ChatProvider`] and
//! writes a human-readable transcript. A failing scenario is reported inline
//! as `Error: <message>` and the run moves on; nothing is returned to the
//! caller as an error once the scenarios have started.

use crate::config::{ChatModelSettings, ServerConfig};
use crate::core_types::messages::{ChatMessage, Conversation};
use crate::core_types::provider::ChatProvider;
use crate::error::{ErrorSeverity, LlmError, LlmResult};
use crate::logging::{log_error, log_info, log_warn};
use crate::providers::OpenAICompatibleChatModel;
use futures_util::StreamExt;
use std::io::Write;

pub const HELPFUL_ASSISTANT_PROMPT: &str = "You are a helpful assistant.";
pub const PROGRAMMING_EXPERT_PROMPT: &str = "You are a programming expert.";
pub const GREETING_QUESTION: &str = "Say hello in one sentence";
pub const COUNTING_QUESTION: &str = "Count from 1 to 5";
pub const JAVASCRIPT_QUESTION: &str = "What is the difference between const and let in JavaScript?";
pub const INTRODUCTION: &str = "My name is Alice.";
pub const NAME_QUESTION: &str = "What is my name?";

pub const COMPLETION_LINE: &str = "All LangChain tests completed!";

/// The four scenarios, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    SimpleCompletion,
    StreamingCompletion,
    QuestionAnswering,
    MultipleTurns,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::SimpleCompletion,
        Scenario::StreamingCompletion,
        Scenario::QuestionAnswering,
        Scenario::MultipleTurns,
    ];

    /// 1-based position shown in the section header
    pub fn number(&self) -> u8 {
        match self {
            Scenario::SimpleCompletion => 1,
            Scenario::StreamingCompletion => 2,
            Scenario::QuestionAnswering => 3,
            Scenario::MultipleTurns => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Scenario::SimpleCompletion => "Simple Completion",
            Scenario::StreamingCompletion => "Streaming Completion",
            Scenario::QuestionAnswering => "Question Answering",
            Scenario::MultipleTurns => "Multiple Turns",
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Test {}: {}", self.number(), self.title())
    }
}

/// Result of one scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    /// Rendered error, `None` when the scenario completed
    pub error: Option<String>,
}

impl ScenarioOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcomes of a full run, in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub outcomes: Vec<ScenarioOutcome>,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }
}

/// Writes the smoke-test transcript to `out`
#[derive(Debug)]
pub struct SmokeRunner<W: Write> {
    config: ServerConfig,
    out: W,
}

impl<W: Write> SmokeRunner<W> {
    pub fn new(config: ServerConfig, out: W) -> Self {
        Self { config, out }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Build the chat models from the configuration and run every scenario
    ///
    /// # Errors
    ///
    /// Returns the construction error of the plain chat model. That failure
    /// happens before any scenario starts and is treated as fatal. Failures
    /// building the streaming model are reported inside scenario 2.
    pub async fn run_against_server(&mut self) -> LlmResult<RunSummary> {
        self.write_preamble();

        let model =
            OpenAICompatibleChatModel::new(self.config.clone(), ChatModelSettings::default())?;
        let config = self.config.clone();

        let summary = self
            .run_scenarios(&model, move || {
                let streaming =
                    OpenAICompatibleChatModel::new(config, ChatModelSettings::streaming())?;
                Ok(Box::new(streaming) as Box<dyn ChatProvider>)
            })
            .await;

        Ok(summary)
    }

    /// Write the preamble and run every scenario against `model`
    ///
    /// `connect_streaming` is called inside scenario 2 to build the
    /// streaming handle.
    pub async fn run<F>(&mut self, model: &dyn ChatProvider, connect_streaming: F) -> RunSummary
    where
        F: FnOnce() -> LlmResult<Box<dyn ChatProvider>>,
    {
        self.write_preamble();
        self.run_scenarios(model, connect_streaming).await
    }

    async fn run_scenarios<F>(
        &mut self,
        model: &dyn ChatProvider,
        connect_streaming: F,
    ) -> RunSummary
    where
        F: FnOnce() -> LlmResult<Box<dyn ChatProvider>>,
    {
        let mut summary = RunSummary::default();

        let result = self.simple_completion(model).await;
        summary.outcomes.push(self.record(Scenario::SimpleCompletion, result));

        let result = self.streaming_completion(connect_streaming).await;
        summary.outcomes.push(self.record(Scenario::StreamingCompletion, result));

        let result = self.question_answering(model).await;
        summary.outcomes.push(self.record(Scenario::QuestionAnswering, result));

        let result = self.multiple_turns(model).await;
        summary.outcomes.push(self.record(Scenario::MultipleTurns, result));

        self.write_lines(&[COMPLETION_LINE]);

        log_info!(
            provider = model.provider_name(),
            passed = summary.passed(),
            failed = summary.failed(),
            "Smoke test run finished"
        );

        summary
    }

    async fn simple_completion(&mut self, model: &dyn ChatProvider) -> LlmResult<()> {
        self.write_header(Scenario::SimpleCompletion)?;

        let messages = vec![
            ChatMessage::system(HELPFUL_ASSISTANT_PROMPT),
            ChatMessage::human(GREETING_QUESTION),
        ];
        let response = model.invoke(&messages).await?;

        writeln!(self.out, "Response: {}", response.content)?;
        writeln!(self.out)?;
        Ok(())
    }

    async fn streaming_completion<F>(&mut self, connect_streaming: F) -> LlmResult<()>
    where
        F: FnOnce() -> LlmResult<Box<dyn ChatProvider>>,
    {
        self.write_header(Scenario::StreamingCompletion)?;

        let model = connect_streaming()?;
        let messages = vec![ChatMessage::human(COUNTING_QUESTION)];

        write!(self.out, "Streaming response: ")?;
        self.out.flush()?;

        let mut fragments = model.stream(&messages).await?;
        while let Some(fragment) = fragments.next().await {
            write!(self.out, "{}", fragment?)?;
            self.out.flush()?;
        }

        writeln!(self.out)?;
        writeln!(self.out)?;
        Ok(())
    }

    async fn question_answering(&mut self, model: &dyn ChatProvider) -> LlmResult<()> {
        self.write_header(Scenario::QuestionAnswering)?;

        let messages = vec![
            ChatMessage::system(PROGRAMMING_EXPERT_PROMPT),
            ChatMessage::human(JAVASCRIPT_QUESTION),
        ];
        let response = model.invoke(&messages).await?;

        writeln!(self.out, "Response: {}", response.content)?;
        writeln!(self.out)?;
        Ok(())
    }

    async fn multiple_turns(&mut self, model: &dyn ChatProvider) -> LlmResult<()> {
        self.write_header(Scenario::MultipleTurns)?;

        let mut conversation: Conversation = vec![
            ChatMessage::system(HELPFUL_ASSISTANT_PROMPT),
            ChatMessage::human(INTRODUCTION),
        ];

        let first = model.invoke(&conversation).await?;
        writeln!(self.out, "Assistant: {}", first.content)?;

        conversation.push(first);
        conversation.push(ChatMessage::human(NAME_QUESTION));

        let second = model.invoke(&conversation).await?;
        writeln!(self.out, "Assistant: {}", second.content)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn write_header(&mut self, scenario: Scenario) -> std::io::Result<()> {
        writeln!(self.out, "=== {scenario} ===")
    }

    fn write_preamble(&mut self) {
        let base_url = format!("Base URL: {}", self.config.base_url);
        self.write_lines(&[
            "Testing VS Code LLM Server with LangChain...",
            base_url.as_str(),
            "",
        ]);
    }

    /// Write lines outside any scenario; failures are only logged
    fn write_lines(&mut self, lines: &[&str]) {
        let result = lines
            .iter()
            .try_for_each(|line| writeln!(self.out, "{line}"))
            .and_then(|()| self.out.flush());

        if let Err(e) = result {
            log_warn!(error = %e, "Failed to write smoke test output");
        }
    }

    fn record(&mut self, scenario: Scenario, result: LlmResult<()>) -> ScenarioOutcome {
        let error = match result {
            Ok(()) => None,
            Err(e) => {
                self.report_error(scenario, &e);
                Some(e.to_string())
            }
        };

        ScenarioOutcome { scenario, error }
    }

    fn report_error(&mut self, scenario: Scenario, error: &LlmError) {
        match error.severity() {
            ErrorSeverity::Error => log_error!(
                scenario = %scenario,
                category = ?error.category(),
                error = %error,
                "Scenario failed"
            ),
            ErrorSeverity::Warning => log_warn!(
                scenario = %scenario,
                category = ?error.category(),
                error = %error,
                "Scenario failed"
            ),
        }

        let error_line = format!("Error: {error}");
        self.write_lines(&[error_line.as_str(), ""]);
    }
}
