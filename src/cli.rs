//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// envstrap - interactive application installer
///
/// Creates a Python virtual environment in a directory of your choice and
/// installs a pinned application release into it.
#[derive(Parser, Debug)]
#[command(
    name = "envstrap",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Interactive installer for a Python-based ML application",
    long_about = "envstrap finds a suitable Python interpreter, detects your platform and GPU, \
                  creates a virtual environment in a root directory you choose, installs the \
                  matching dependencies and the pinned application release, and runs the \
                  application's configuration script.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  envstrap\n    \
                  envstrap install --dry-run\n    \
                  envstrap install --source ./installer"
)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive installation (default)
    Install(InstallArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the install command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                   Install interactively:\n    envstrap install\n\n\
                   Show the commands that would run:\n    envstrap install --dry-run\n\n\
                   Use installer assets from another directory:\n    envstrap install --source /path/to/installer")]
pub struct InstallArgs {
    /// Directory containing templates/ and environments-and-requirements/
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Print delegated commands instead of running them
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    envstrap completions --shell bash > ~/.bash_completion.d/envstrap\n\n\
                  Generate zsh completions:\n    envstrap completions --shell zsh > ~/.zfunc/_envstrap")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
