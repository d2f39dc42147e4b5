//! Error types for chat-completion requests and smoke-test output.
//!
//! [`LlmError`] covers every failure a scenario can hit:
//! - Configuration errors (empty base URL, unusable API key)
//! - Request failures (network issues, non-2xx statuses)
//! - Authentication and rate-limit responses
//! - Malformed response bodies and broken event streams
//! - Console write failures
//!
//! # Example
//!
//! ```rust
//! use llm_server_smoke::{error::ErrorCategory, LlmError};
//!
//! let err = LlmError::rate_limit_exceeded(30);
//! assert_eq!(err.category(), ErrorCategory::Transient);
//! assert_eq!(err.to_string(), "Rate limit exceeded, retry after 30s");
//! ```

use crate::logging::{log_error, log_warn};
use thiserror::Error;

// ============================================================================
// Error categorization types
// ============================================================================

/// High-level categorization of errors for routing and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The server or the network had an issue.
    External,

    /// The local process failed (console output, for example).
    Internal,

    /// The caller supplied something unusable (config, credentials).
    Client,

    /// Temporary failures such as rate limiting.
    Transient,
}

/// Severity level used when logging scenario failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Action failed but the run can continue.
    Error,

    /// Unexpected but recoverable situation.
    Warning,
}

// ============================================================================
// LLM Error types
// ============================================================================

/// Convenient result type for chat-model operations.
pub type LlmResult<T> = std::result::Result<T, LlmError>;

/// Errors that can occur while talking to the server or printing results.
///
/// Use the constructor methods, which log the error at creation:
///
/// ```rust
/// use llm_server_smoke::LlmError;
///
/// let err = LlmError::configuration_error("Base URL is required");
/// assert!(err.to_string().contains("Base URL is required"));
/// ```
///
/// | Variant | Category |
/// |---------|----------|
/// | `ConfigurationError` | Client |
/// | `RequestFailed` | External |
/// | `ResponseParsingError` | External |
/// | `RateLimitExceeded` | Transient |
/// | `AuthenticationFailed` | Client |
/// | `StreamFailed` | External |
/// | `OutputFailed` | Internal |
#[derive(Error, Debug)]
pub enum LlmError {
    /// Client configuration is invalid or incomplete.
    #[error("Provider configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The HTTP request failed or the server answered with an error status.
    #[error("Request failed: {message}")]
    RequestFailed {
        /// Description of the failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The server answered, but the body could not be understood.
    #[error("Response parsing failed: {message}")]
    ResponseParsingError {
        /// Details about the parsing failure.
        message: String,
    },

    /// The server is throttling requests.
    #[error("Rate limit exceeded, retry after {retry_after_seconds}s")]
    RateLimitExceeded {
        /// Wait time advertised by the server.
        retry_after_seconds: u64,
    },

    /// The server rejected the API key.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// Details about the authentication failure.
        message: String,
    },

    /// The event stream broke while fragments were being read.
    #[error("Stream failed: {message}")]
    StreamFailed {
        /// Details about the stream failure.
        message: String,
    },

    /// Writing the transcript failed.
    #[error("Output failed: {source}")]
    OutputFailed {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl LlmError {
    /// Get the error category for routing and reporting.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError { .. } => ErrorCategory::Client,
            Self::RequestFailed { .. } => ErrorCategory::External,
            Self::ResponseParsingError { .. } => ErrorCategory::External,
            Self::RateLimitExceeded { .. } => ErrorCategory::Transient,
            Self::AuthenticationFailed { .. } => ErrorCategory::Client,
            Self::StreamFailed { .. } => ErrorCategory::External,
            Self::OutputFailed { .. } => ErrorCategory::Internal,
        }
    }

    /// Get the error severity for logging.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ResponseParsingError { .. } | Self::RateLimitExceeded { .. } => {
                ErrorSeverity::Warning
            }
            _ => ErrorSeverity::Error,
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "Chat model configuration validation failed"
        );
        Self::ConfigurationError { message }
    }

    pub fn request_failed(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_type = "request_failed",
            message = %message,
            has_source = source.is_some(),
            "Chat completion request failed"
        );
        Self::RequestFailed { message, source }
    }

    pub fn response_parsing_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "response_parsing_error",
            message = %message,
            "Chat completion response format invalid"
        );
        Self::ResponseParsingError { message }
    }

    pub fn rate_limit_exceeded(retry_after_seconds: u64) -> Self {
        log_warn!(
            error_type = "rate_limit_exceeded",
            retry_after_seconds = retry_after_seconds,
            "Server rate limit exceeded"
        );
        Self::RateLimitExceeded {
            retry_after_seconds,
        }
    }

    pub fn authentication_failed(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "authentication_failed",
            message = %message,
            "Server authentication failed"
        );
        Self::AuthenticationFailed { message }
    }

    pub fn stream_failed(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "stream_failed",
            message = %message,
            "Streaming response interrupted"
        );
        Self::StreamFailed { message }
    }
}
