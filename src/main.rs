//! envstrap - interactive installer
//!
//! Bootstraps a Python virtual environment for a pinned release of a
//! machine-learning application: finds an interpreter, detects the platform,
//! installs the matching dependencies and hands over to the application's own
//! configuration script.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod error;
mod installer;
mod manifest;
mod platform;
mod prompt;
mod python;
mod rootdir;
mod runner;
mod templates;
mod ui;

use cli::{Cli, Commands};
use error::InstallerError;
use prompt::{Prompter, TerminalPrompter};

fn init_logging(verbose: bool) {
    let default = if verbose { "envstrap=debug" } else { "envstrap=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Errors that end the run without waiting for a keypress
fn exits_immediately(err: &InstallerError) -> bool {
    matches!(
        err,
        InstallerError::InstallCancelled
            | InstallerError::UnsupportedOs { .. }
            | InstallerError::UnsupportedArch { .. }
    )
}

/// Whether to keep the terminal open so the diagnostic can be read
fn should_hold(err: &InstallerError) -> bool {
    !exits_immediately(err) && prompt::is_interactive()
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        None => commands::install::run(cli::InstallArgs::default()),
        Some(Commands::Install(args)) => commands::install::run(args),
        Some(Commands::Version) => commands::version::run(),
        Some(Commands::Completions(args)) => commands::completions::run(&args),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "exiting with error");
        let hold = should_hold(&e);
        eprintln!("{:?}", miette::Report::new(e));
        if hold {
            let _ = TerminalPrompter.pause("Press any key to exit");
        }
        std::process::exit(1);
    }
}
