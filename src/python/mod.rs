//! Python interpreter handling: version gating and discovery

pub mod discovery;
pub mod version;

pub use discovery::{Interpreter, discover};
pub use version::Version;
