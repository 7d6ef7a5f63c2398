//! Company command handlers.
//!
//! The handlers here are the "views": they trigger loads through the
//! [`Directory`] facade and render the observable {status, data, error}
//! triple. The spinner loop subscribes to the fetch stream and reacts to
//! state transitions rather than guessing at request progress.

use std::sync::Arc;

use dialoguer::Input;
use owo_colors::OwoColorize;
use tabled::Tabled;

use firmdir_core::{Company, Directory, FetchOutcome, NewCompany};

use crate::cli::{AddArgs, CompaniesArgs, CompaniesCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CompanyRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ITIN")]
    itin: u64,
    #[tabled(rename = "Phone")]
    phone: u64,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Email")]
    email: String,
}

impl From<&Company> for CompanyRow {
    fn from(c: &Company) -> Self {
        Self {
            name: c.name.clone(),
            itin: c.itin,
            phone: c.phone,
            country: c.country.clone(),
            email: c.email.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    directory: Directory,
    args: CompaniesArgs,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    let directory = Arc::new(directory);
    match args.command {
        CompaniesCommand::List => {
            let companies = load_companies(&directory, global).await?;
            render_companies(&companies, global, format);
            Ok(())
        }
        CompaniesCommand::Add(add) => handle_add(&directory, add, global, format).await,
    }
}

/// Load the directory listing while mirroring its request state.
///
/// The load runs as its own task; this function subscribes to the
/// companies fetch stream and keeps the spinner in step with the
/// observed status until a terminal transition lands.
async fn load_companies(
    directory: &Arc<Directory>,
    global: &GlobalOpts,
) -> Result<Arc<Vec<Company>>, CliError> {
    let mut stream = directory.companies();
    let spinner = output::spinner(global.quiet, "Loading companies...");

    let mut loader = tokio::spawn({
        let directory = Arc::clone(directory);
        async move { directory.load_companies().await }
    });

    let outcome = loop {
        tokio::select! {
            res = &mut loader => {
                break res.map_err(|e| CliError::Internal(format!("load task failed: {e}")))?;
            }
            Some(state) = stream.changed() => {
                if state.status.is_loading() {
                    spinner.set_message("Loading companies...");
                }
            }
        }
    };
    spinner.finish_and_clear();

    match outcome {
        FetchOutcome::Ok(companies) => Ok(companies),
        FetchOutcome::Failed(err) => Err(CliError::from_core(&err)),
        FetchOutcome::Cancelled => Err(CliError::Internal("listing request cancelled".into())),
    }
}

fn render_companies(companies: &[Company], global: &GlobalOpts, format: OutputFormat) {
    if companies.is_empty() && matches!(format, OutputFormat::Table | OutputFormat::Plain) {
        output::print_output("No companies found.", global.quiet);
        return;
    }

    let out = output::render_list(
        format,
        companies,
        |c| CompanyRow::from(c),
        |c| c.id.clone(),
    );
    output::print_output(&out, global.quiet);
}

// ── Add ─────────────────────────────────────────────────────────────

async fn handle_add(
    directory: &Arc<Directory>,
    add: AddArgs,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    let no_list = add.no_list;
    let input = gather_input(add)?;

    let spinner = output::spinner(global.quiet, "Registering company...");
    let outcome = directory.create_company(input).await;
    spinner.finish_and_clear();

    match outcome {
        FetchOutcome::Ok(_) => {
            if !global.quiet {
                if output::should_color(global.color) {
                    eprintln!("{}", "Company registered".green());
                } else {
                    eprintln!("Company registered");
                }
            }
            // A successful registration lands on the directory view; a
            // failed one stays put.
            if !no_list {
                let companies = load_companies(directory, global).await?;
                render_companies(&companies, global, format);
            }
            Ok(())
        }
        FetchOutcome::Failed(err) => Err(CliError::from_core(&err)),
        FetchOutcome::Cancelled => Ok(()),
    }
}

/// Assemble the form input from flags, prompting for whatever is missing.
fn gather_input(add: AddArgs) -> Result<NewCompany, CliError> {
    let prompt_err = |e: dialoguer::Error| CliError::Prompt {
        reason: e.to_string(),
    };

    let name = match add.name {
        Some(v) => v,
        None => Input::new()
            .with_prompt("Company name")
            .interact_text()
            .map_err(prompt_err)?,
    };
    let itin = match add.itin {
        Some(v) => v,
        None => Input::new()
            .with_prompt("Company ITIN (number)")
            .interact_text()
            .map_err(prompt_err)?,
    };
    let phone = match add.phone {
        Some(v) => v,
        None => Input::new()
            .with_prompt("Phone (number)")
            .interact_text()
            .map_err(prompt_err)?,
    };
    let country = match add.country {
        Some(v) => v,
        None => Input::new()
            .with_prompt("Country")
            .interact_text()
            .map_err(prompt_err)?,
    };
    let email = match add.email {
        Some(v) => v,
        None => Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(prompt_err)?,
    };

    Ok(NewCompany {
        name,
        itin,
        phone,
        country,
        email,
    })
}
