//! Version command implementation

use crate::config::InstallerConfig;
use crate::error::Result;

/// Run version command
pub fn run() -> Result<()> {
    let defaults = InstallerConfig::with_source_dir(".");

    println!("envstrap {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", rustc_version());
    println!("  Profile: {}", build_profile());
    println!();
    println!("Installs:");
    println!("  Release: {}", defaults.archive_url);
    println!("  Minimum Python: {}", defaults.minimum_python);

    Ok(())
}

fn rustc_version() -> &'static str {
    env!("CARGO_PKG_RUST_VERSION")
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
