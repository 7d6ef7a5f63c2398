//! About command — the static "about" view.

use owo_colors::OwoColorize;

use crate::cli::GlobalOpts;
use crate::output;

const ABOUT_TEXT: &str = "\
firmdir is a small client for a company-directory backend. It lists\n\
registered companies and registers new ones through a validated form.\n\
Every view keeps at most one request in flight: triggering a fresh load\n\
cancels the previous one, and only the newest request may publish its\n\
result.";

pub fn handle(global: &GlobalOpts) {
    if global.quiet {
        return;
    }

    if output::should_color(global.color) {
        println!("{}", "About firmdir".bold());
    } else {
        println!("About firmdir");
    }
    println!();
    println!("{ABOUT_TEXT}");
    println!();

    let cfg = firmdir_config::load_config_or_default();
    println!("Backend: {}", cfg.backend.url);
    println!("Config:  {}", firmdir_config::config_path().display());
}
