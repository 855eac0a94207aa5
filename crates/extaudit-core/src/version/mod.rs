//! Dotted-numeric version ordering.
//!
//! Versions are sequences of non-negative integers separated by dots. Two
//! versions of different length compare as if the shorter one were padded
//! with trailing zeros, so `1.2` and `1.2.0` are equal.
//!
//! # Example
//!
//! ```
//! use std::cmp::Ordering;
//! use extaudit_core::version::{compare, normalize, Version};
//!
//! assert_eq!(compare("2.0", "1.9.9").unwrap(), Ordering::Greater);
//! assert_eq!(compare("1.2", "1.2.0").unwrap(), Ordering::Equal);
//!
//! let v: Version = normalize("1.2.3_1").parse().unwrap();
//! assert_eq!(v.to_string(), "1.2.3.1");
//! ```

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::VersionError;

/// A parsed dotted-numeric version.
#[derive(Debug, Clone)]
pub struct Version {
    components: Vec<u64>,
}

impl Version {
    /// Returns the numeric components, most significant first.
    pub fn components(&self) -> &[u64] {
        &self.components
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(VersionError::InvalidVersionFormat(s.to_string()));
        }
        let components = s
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(VersionError::InvalidVersionFormat(s.to_string()));
                }
                part.parse::<u64>()
                    .map_err(|_| VersionError::InvalidVersionFormat(s.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { components })
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for component in &self.components {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", component)?;
            first = false;
        }
        Ok(())
    }
}

/// Compares two dotted-numeric version strings.
///
/// Fails with [`VersionError::InvalidVersionFormat`] if either side is empty
/// or has a non-numeric component.
pub fn compare(a: &str, b: &str) -> Result<Ordering, VersionError> {
    let a: Version = a.parse()?;
    let b: Version = b.parse()?;
    Ok(a.cmp(&b))
}

/// Maps the underscore qualifier separator of a version directory name to a dot.
///
/// `1.2.3_1` becomes `1.2.3.1`.
pub fn normalize(raw: &str) -> String {
    raw.replace('_', ".")
}
