//! termsetup Runtime
//!
//! Entry point for the terminal environment provisioner. Builds the
//! real host and prompter, assembles the step catalog, and runs the
//! pipeline once. Exit code 0 means the run completed (skips and one
//! interactive decline included); any step failure exits 1.

use clap::Parser;
use colored::Colorize;

use termsetup::config::SetupConfig;
use termsetup::host::LocalHost;
use termsetup::pipeline::Provisioner;
use termsetup::prompts::TerminalPrompter;
use termsetup::steps::catalog;
use termsetup::types::{ProvisionError, RunSummary, StepStatus};

const VERSION: &str = "0.1.0";

/// termsetup -- first-run terminal environment setup
#[derive(Parser, Debug)]
#[command(
    name = "termsetup",
    version = VERSION,
    about = "One-shot terminal environment setup: packages, zsh theme, font, editor config"
)]
struct Cli {}

/// Print the per-step summary after a completed run.
fn show_summary(summary: &RunSummary) {
    println!();
    println!("{}", "  Setup complete.".green());
    for report in &summary.reports {
        let tag = match report.status {
            StepStatus::Applied => "installed".green(),
            StepStatus::AlreadySatisfied => "already present".dimmed(),
            StepStatus::Declined => "kept existing".yellow(),
        };
        println!("  {:<24} {}", report.name, tag);
    }
    println!();
    println!(
        "{}",
        "  Restart the terminal or run `zsh` to pick up the new shell.".dimmed()
    );
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let _cli = Cli::parse();

    let host = LocalHost::new();
    let prompter = TerminalPrompter;
    let config = SetupConfig::from_host(&host);
    let steps = catalog(&config);

    println!("{}", "  termsetup: provisioning terminal environment\n".white());

    let provisioner = Provisioner::new(&host, &prompter, steps);
    match provisioner.run().await {
        Ok(summary) => {
            show_summary(&summary);
        }
        Err(e) => {
            // Diagnostics go to stdout alongside the step progress.
            println!("{}", e.to_string().red());
            let ProvisionError::StepFailed { source, .. } = &e;
            println!("{}", format!("  caused by: {:#}", source).dimmed());
            std::process::exit(1);
        }
    }
}
