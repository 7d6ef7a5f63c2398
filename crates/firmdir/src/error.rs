//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use firmdir_core::CoreError;

/// Exit codes per the CLI contract.
pub mod exit_code {
    #[allow(dead_code)]
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const VALIDATION: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the directory backend at {url}")]
    #[diagnostic(
        code(firmdir::connection_failed),
        help(
            "Check that the backend is running and accessible.\n\
             URL: {url}\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Backend request timed out after {timeout_secs}s")]
    #[diagnostic(
        code(firmdir::timeout),
        help("Raise --timeout or check the backend's health.")
    )]
    Timeout { timeout_secs: u64 },

    // ── Form ─────────────────────────────────────────────────────────
    #[error("Validation failed:\n{}", .fields.join("\n"))]
    #[diagnostic(
        code(firmdir::validation),
        help("Fix the listed fields and retry.")
    )]
    Validation { fields: Vec<String> },

    // ── Backend ──────────────────────────────────────────────────────
    #[error("Not found: {what}")]
    #[diagnostic(code(firmdir::not_found))]
    NotFound { what: String },

    #[error("Backend error: {message}")]
    #[diagnostic(code(firmdir::backend))]
    Api { message: String },

    // ── Configuration & input ────────────────────────────────────────
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(firmdir::config),
        help("Run `firmdir config init` to write a fresh config file.")
    )]
    Config { message: String },

    #[error("Interactive prompt failed: {reason}")]
    #[diagnostic(code(firmdir::prompt))]
    Prompt { reason: String },

    // ── Plumbing ─────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CliError {
    /// Stable process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } => exit_code::VALIDATION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Config { .. } | Self::Prompt { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Translate a core error by reference (the fetch layer hands out
    /// `Arc<CoreError>`, so ownership isn't available).
    pub fn from_core(err: &CoreError) -> Self {
        match err {
            CoreError::Cancelled => Self::Internal("request cancelled".into()),
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed {
                url: url.clone(),
                reason: reason.clone(),
            },
            CoreError::Timeout { timeout_secs } => Self::Timeout {
                timeout_secs: *timeout_secs,
            },
            CoreError::Validation { fields } => Self::Validation {
                fields: fields
                    .iter()
                    .map(|(field, message)| format!("{field}: {message}"))
                    .collect(),
            },
            CoreError::Api {
                status: Some(404), ..
            } => Self::NotFound {
                what: "requested resource".into(),
            },
            CoreError::Api { message, .. } => Self::Api {
                message: message.clone(),
            },
            CoreError::Config { message } => Self::Config {
                message: message.clone(),
            },
            CoreError::Internal(message) => Self::Internal(message.clone()),
        }
    }
}

impl From<firmdir_config::ConfigError> for CliError {
    fn from(err: firmdir_config::ConfigError) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}
