//! Smoke test for a local OpenAI-compatible LLM server
//!
//! ```bash
//! export VSCODE_LLM_SERVER_API_KEY=test-key
//! export VSCODE_LLM_SERVER_URL=http://localhost:3000/v1
//! cargo run
//! ```

use llm_server_smoke::logging::init_stderr_subscriber;
use llm_server_smoke::{ServerConfig, SmokeRunner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_stderr_subscriber();

    let config = ServerConfig::from_env();
    let mut runner = SmokeRunner::new(config, std::io::stdout());

    // Only a failure to build the chat client ends the process early;
    // scenario failures are already reported in the transcript.
    runner.run_against_server().await?;

    Ok(())
}
