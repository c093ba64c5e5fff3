//! User-facing console output
//!
//! Progress text for the person running the installer. Diagnostics for
//! developers go through `tracing` instead.

use console::Style;

/// Announce the start of an installation step
pub fn step(title: &str) {
    eprintln!();
    eprintln!(
        "{} {}",
        Style::new().bold().green().apply_to("==>"),
        Style::new().bold().apply_to(title)
    );
}

/// Plain informational line
pub fn info(message: &str) {
    eprintln!("    {message}");
}

/// Line describing something that went wrong but is recoverable
pub fn warn(message: &str) {
    eprintln!("{} {message}", Style::new().bold().yellow().apply_to("warning:"));
}

/// Command that would have run in dry-run mode
pub fn dry_run(command: &str) {
    eprintln!(
        "    {} {}",
        Style::new().cyan().apply_to("[DRY RUN]"),
        Style::new().dim().apply_to(command)
    );
}

/// Final success banner
pub fn success(message: &str) {
    eprintln!();
    eprintln!("{}", Style::new().bold().green().apply_to(message));
}

/// Multi-line guidance shown before the installer starts
pub fn banner(lines: &[&str]) {
    let heading = Style::new().bold().cyan();
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            eprintln!("{}", heading.apply_to(line));
        } else {
            eprintln!("{line}");
        }
    }
}
