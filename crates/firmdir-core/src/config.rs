// Connection settings for the directory backend.

use std::time::Duration;

use url::Url;

/// TLS verification mode (core-level mirror of the api crate's TlsMode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsVerification {
    /// Use the system certificate store.
    #[default]
    System,
    /// Accept any certificate (self-hosted backends).
    DangerAcceptInvalid,
}

/// Everything needed to talk to a directory backend.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Backend base URL (e.g. `http://localhost:4000`).
    pub base_url: Url,

    /// Per-request timeout.
    pub timeout: Duration,

    pub tls: TlsVerification,
}

impl DirectoryConfig {
    /// Config with default timeout and TLS settings.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(30),
            tls: TlsVerification::default(),
        }
    }
}
