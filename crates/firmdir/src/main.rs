mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use firmdir_core::Directory;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a backend
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::About => {
            commands::about::handle(&cli.global);
            Ok(())
        }

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "firmdir", &mut std::io::stdout());
            Ok(())
        }

        // Company commands talk to the backend
        Command::Companies(args) => {
            let file_cfg = firmdir_config::load_config_or_default();
            let format = config::resolve_output(&cli.global, &file_cfg);
            let dir_cfg = config::resolve_directory_config(&cli.global)?;

            tracing::debug!(backend = %dir_cfg.base_url, "dispatching company command");
            let directory = Directory::new(&dir_cfg).map_err(|e| CliError::from_core(&e))?;
            commands::companies::handle(directory, args, &cli.global, format).await
        }
    }
}
