//! Command implementations for the envstrap CLI

pub mod completions;
pub mod install;
pub mod version;
