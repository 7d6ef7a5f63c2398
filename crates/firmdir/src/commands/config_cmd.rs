//! Config subcommand handlers.

use dialoguer::{Input, Select};

use firmdir_config::{Backend, Config, Defaults};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Prompt {
        reason: e.to_string(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = firmdir_config::load_config_or_default();
            let toml_str = toml::to_string_pretty(&cfg).map_err(|e| CliError::Config {
                message: format!("failed to serialize config: {e}"),
            })?;
            output::print_output(&toml_str, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(
                &firmdir_config::config_path().display().to_string(),
                global.quiet,
            );
            Ok(())
        }

        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            eprintln!("firmdir — configuration wizard");
            eprintln!(
                "   Config path: {}\n",
                firmdir_config::config_path().display()
            );

            let url: String = Input::new()
                .with_prompt("Backend base URL")
                .default("http://localhost:4000".into())
                .validate_with(|raw: &String| {
                    firmdir_config::parse_backend_url(raw)
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(prompt_err)?;

            let timeout: u64 = Input::new()
                .with_prompt("Request timeout (seconds)")
                .default(30)
                .interact_text()
                .map_err(prompt_err)?;

            let output_choices = &["table", "json", "json-compact", "yaml", "plain"];
            let output_selection = Select::new()
                .with_prompt("Default output format")
                .items(output_choices)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let cfg = Config {
                backend: Backend {
                    url,
                    insecure: false,
                },
                defaults: Defaults {
                    output: (*output_choices
                        .get(output_selection)
                        .unwrap_or(&"table"))
                    .to_owned(),
                    timeout,
                    ..Defaults::default()
                },
            };

            let path = firmdir_config::save_config(&cfg)?;
            eprintln!("\nWrote {}", path.display());
            Ok(())
        }
    }
}
