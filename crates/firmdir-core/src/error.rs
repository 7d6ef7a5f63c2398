// ── Core error types ──
//
// User-facing errors from firmdir-core. These are NOT API-specific --
// consumers never see raw reqwest failures or JSON parse errors directly.
// The `From<firmdir_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use std::collections::BTreeMap;

use thiserror::Error;

/// Unified error type for the core crate.
///
/// [`CoreError::Cancelled`] is the one variant the request lifecycle
/// controller treats specially: it marks a cooperatively-aborted
/// invocation and is never stored in observable request state.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The operation was aborted through its cancellation token.
    #[error("Operation cancelled")]
    Cancelled,

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Backend request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {}", fields_summary(.fields))]
    Validation {
        /// First validation message per offending field.
        fields: BTreeMap<String, String>,
    },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Backend error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` for the cooperative-cancellation marker.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Per-field validation messages, if this is a validation failure.
    pub fn validation_fields(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Validation { fields } => Some(fields),
            _ => None,
        }
    }
}

fn fields_summary(fields: &BTreeMap<String, String>) -> String {
    fields
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<firmdir_api::Error> for CoreError {
    fn from(err: firmdir_api::Error) -> Self {
        match err {
            firmdir_api::Error::Cancelled => CoreError::Cancelled,
            firmdir_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            firmdir_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            firmdir_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            firmdir_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            firmdir_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
