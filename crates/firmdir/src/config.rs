//! Bridges the config file and global CLI flags into runtime settings.

use firmdir_config::Config;
use firmdir_core::DirectoryConfig;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Resolve backend connection settings: config file + env, then CLI
/// flag overrides on top.
pub fn resolve_directory_config(global: &GlobalOpts) -> Result<DirectoryConfig, CliError> {
    let mut cfg = firmdir_config::load_config_or_default();

    if let Some(url) = &global.backend_url {
        cfg.backend.url.clone_from(url);
    }
    if global.insecure {
        cfg.backend.insecure = true;
    }
    if let Some(timeout) = global.timeout {
        cfg.defaults.timeout = timeout;
    }

    cfg.to_directory_config().map_err(CliError::from)
}

/// Resolve the output format: flag, then config default, then table.
pub fn resolve_output(global: &GlobalOpts, cfg: &Config) -> OutputFormat {
    if let Some(format) = global.output {
        return format;
    }
    match cfg.defaults.output.as_str() {
        "json" => OutputFormat::Json,
        "json-compact" => OutputFormat::JsonCompact,
        "yaml" => OutputFormat::Yaml,
        "plain" => OutputFormat::Plain,
        _ => OutputFormat::Table,
    }
}
