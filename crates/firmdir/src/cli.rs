//! Clap derive structures for the `firmdir` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// firmdir -- company directory from the command line
#[derive(Debug, Parser)]
#[command(
    name = "firmdir",
    version,
    about = "Browse and grow a company directory from the command line",
    long_about = "A small client for a company-directory backend.\n\n\
        Lists registered companies, registers new ones through a validated\n\
        form, and keeps exactly one request in flight per view — a newer\n\
        request always cancels and supersedes the previous one.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend base URL (overrides config)
    #[arg(long, short = 'b', env = "FIRMDIR_BACKEND_URL", global = true)]
    pub backend_url: Option<String>,

    /// Output format (defaults to config, then table)
    #[arg(long, short = 'o', env = "FIRMDIR_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "FIRMDIR_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (defaults to config, then 30)
    #[arg(long, env = "FIRMDIR_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse and register companies
    Companies(CompaniesArgs),

    /// What this tool is and where the data lives
    About,

    /// Inspect or scaffold the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct CompaniesArgs {
    #[command(subcommand)]
    pub command: CompaniesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CompaniesCommand {
    /// List all registered companies
    List,

    /// Register a new company (prompts for missing fields)
    Add(AddArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Company name (at least 2 characters)
    #[arg(long)]
    pub name: Option<String>,

    /// Company ITIN (number)
    #[arg(long)]
    pub itin: Option<u64>,

    /// Phone (number)
    #[arg(long)]
    pub phone: Option<u64>,

    /// Country (at least 2 characters)
    #[arg(long)]
    pub country: Option<String>,

    /// Contact email
    #[arg(long)]
    pub email: Option<String>,

    /// Don't show the directory after a successful registration
    #[arg(long)]
    pub no_list: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Print the config file path
    Path,

    /// Interactive wizard that writes a fresh config file
    Init,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
