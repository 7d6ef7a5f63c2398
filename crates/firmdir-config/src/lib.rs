//! Shared configuration for the firmdir CLI.
//!
//! TOML config file merged with `FIRMDIR_`-prefixed environment
//! variables, plus translation to `firmdir_core::DirectoryConfig`.
//! The backend URL is validated here so a bad environment fails fast
//! with per-field messages instead of surfacing as a request error.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use firmdir_core::{DirectoryConfig, TlsVerification};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Backend connection settings.
    #[serde(default)]
    pub backend: Backend,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,
}

/// Directory backend settings.
#[derive(Debug, Deserialize, Serialize)]
pub struct Backend {
    /// Backend base URL (e.g. "http://localhost:4000").
    pub url: String,

    /// Accept self-signed TLS certificates.
    #[serde(default)]
    pub insecure: bool,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            insecure: false,
        }
    }
}

fn default_backend_url() -> String {
    "http://localhost:4000".into()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "firmdir", "firmdir").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("firmdir");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load Config from an explicit path + environment (test seam).
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("FIRMDIR_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(path)
}

// ── Translation to core config ──────────────────────────────────────

impl Config {
    /// Validate and translate into a `DirectoryConfig`.
    ///
    /// The backend URL must parse and use an http(s) scheme; failures
    /// name the offending field so a misconfigured environment reads
    /// like a form error, not a transport error.
    pub fn to_directory_config(&self) -> Result<DirectoryConfig, ConfigError> {
        let url = parse_backend_url(&self.backend.url)?;
        Ok(DirectoryConfig {
            base_url: url,
            timeout: Duration::from_secs(self.defaults.timeout),
            tls: if self.backend.insecure {
                TlsVerification::DangerAcceptInvalid
            } else {
                TlsVerification::System
            },
        })
    }
}

/// Parse and validate a backend base URL.
pub fn parse_backend_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::Validation {
        field: "backend.url".into(),
        reason: format!("{e} (code: invalid_url)"),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "backend.url".into(),
            reason: format!("unsupported scheme {:?} (code: invalid_url)", url.scheme()),
        });
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = Config::default();
        assert_eq!(cfg.backend.url, "http://localhost:4000");
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.defaults.timeout, 30);
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[backend]\nurl = \"https://directory.example.com\"\n\n[defaults]\ntimeout = 5\n",
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.backend.url, "https://directory.example.com");
        assert_eq!(cfg.defaults.timeout, 5);
        assert_eq!(cfg.defaults.output, "table");
    }

    #[test]
    fn directory_config_roundtrip() {
        let cfg = Config::default();
        let dc = cfg.to_directory_config().unwrap();
        assert_eq!(dc.base_url.as_str(), "http://localhost:4000/");
        assert_eq!(dc.timeout, Duration::from_secs(30));
        assert_eq!(dc.tls, TlsVerification::System);
    }

    #[test]
    fn insecure_flag_relaxes_tls() {
        let cfg = Config {
            backend: Backend {
                url: "https://10.0.0.2".into(),
                insecure: true,
            },
            defaults: Defaults::default(),
        };
        let dc = cfg.to_directory_config().unwrap();
        assert_eq!(dc.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn invalid_url_names_the_field() {
        let err = parse_backend_url("not a url").unwrap_err();
        match err {
            ConfigError::Validation { field, reason } => {
                assert_eq!(field, "backend.url");
                assert!(reason.contains("invalid_url"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = parse_backend_url("ftp://example.com").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }
}
