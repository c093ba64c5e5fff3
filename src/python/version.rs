//! Dotted version strings and their numeric encoding
//!
//! A version `a.b.c.d` is encoded as `a×10⁹ + b×10⁶ + c×10³ + d`, so comparing
//! two encodings compares the versions component by component as long as no
//! component reaches 1000.

use std::fmt;
use std::str::FromStr;

use crate::error::InstallerError;

const COMPONENT_WEIGHTS: [u64; 4] = [1_000_000_000, 1_000_000, 1_000, 1];

/// A parsed version with up to four numeric components
#[derive(Debug, Clone, Copy)]
pub struct Version {
    components: [u64; 4],
    len: usize,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            components: [major, minor, patch, 0],
            len: 3,
        }
    }

    /// Numeric encoding used for ordering
    pub fn encode(&self) -> u64 {
        self.components
            .iter()
            .zip(COMPONENT_WEIGHTS)
            .map(|(c, w)| c * w)
            .sum()
    }

    pub fn at_least(&self, minimum: &Version) -> bool {
        self.encode() >= minimum.encode()
    }

    /// Extract the version from an interpreter banner such as `Python 3.10.12`
    pub fn from_banner(banner: &str) -> Option<Self> {
        banner
            .split_whitespace()
            .skip_while(|word| !word.eq_ignore_ascii_case("python"))
            .nth(1)
            .and_then(|word| word.parse().ok())
    }
}

/// Leading decimal digits of a component, e.g. `0rc1` -> `0`
fn leading_number(component: &str) -> Option<u64> {
    let end = component
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(component.len());
    component[..end].parse().ok()
}

impl FromStr for Version {
    type Err = InstallerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InstallerError::InvalidVersion {
            input: s.to_string(),
        };

        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.is_empty() || parts.len() > COMPONENT_WEIGHTS.len() {
            return Err(invalid());
        }

        let mut components = [0u64; 4];
        for (slot, part) in components.iter_mut().zip(&parts) {
            let value = leading_number(part).ok_or_else(invalid)?;
            if value >= 1000 {
                return Err(invalid());
            }
            *slot = value;
        }

        Ok(Self {
            components,
            len: parts.len(),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown: Vec<String> = self.components[..self.len]
            .iter()
            .map(ToString::to_string)
            .collect();
        write!(f, "{}", shown.join("."))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.encode() == other.encode()
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.encode().cmp(&other.encode())
    }
}
