//! Install command implementation
//!
//! Wires the real terminal, process runner and platform probe into the
//! [`Installer`] and reports the outcome.

use crate::cli::InstallArgs;
use crate::config::InstallerConfig;
use crate::error::Result;
use crate::installer::{InstallReport, Installer};
use crate::platform::SystemProbe;
use crate::prompt::TerminalPrompter;
use crate::runner::{DryRunRunner, Runner, SystemRunner};
use crate::ui;

/// Run the interactive installation
pub fn run(args: InstallArgs) -> Result<()> {
    let config = InstallerConfig::load(args.source)?;
    tracing::info!(source = %config.source_dir.display(), dry_run = args.dry_run, "starting install");

    let runner: &dyn Runner = if args.dry_run {
        &DryRunRunner
    } else {
        &SystemRunner
    };
    let prompter = TerminalPrompter;
    let probe = SystemProbe::default();

    ui::banner(&[
        "envstrap installer",
        "",
        "This installer creates a self-contained Python environment and installs",
        "the application and its dependencies into a directory you choose.",
        "Several gigabytes of packages will be downloaded.",
    ]);
    if args.dry_run {
        ui::warn("dry run: external commands will be printed, not executed");
    }

    let report = Installer::new(&config, runner, &prompter, &probe).run()?;
    print_summary(&report);
    Ok(())
}

fn print_summary(report: &InstallReport) {
    let root = report.root.path.display();
    ui::success("Installation complete.");
    ui::info(&format!("Root directory: {root}"));
    ui::info(&format!("Platform: {}", report.platform));
    ui::info(&format!("Dependencies: {}", report.manifest.file_name()));
    ui::info(&format!("Python: {}", report.interpreter.path.display()));
    eprintln!();
    ui::info(&format!("To start the application, run: {root}/invoke.sh"));
    ui::info(&format!("To update it later, run: {root}/update.sh"));
}
