//! Latest installed version selection.

use serde::Serialize;

use crate::error::SelectError;
use crate::version::{normalize, Version};

/// One version directory of an installed extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionEntry {
    /// Directory name as found on disk (e.g. `1.2.3_0`).
    pub raw_directory_name: String,
    /// Dotted form used for comparison and reporting (e.g. `1.2.3.0`).
    pub normalized_version: String,
}

impl VersionEntry {
    /// Creates an entry from a raw directory name.
    pub fn new(raw_directory_name: impl Into<String>) -> Self {
        let raw_directory_name = raw_directory_name.into();
        let normalized_version = normalize(&raw_directory_name);
        Self {
            raw_directory_name,
            normalized_version,
        }
    }

    /// Parses the normalized version.
    pub fn version(&self) -> Result<Version, SelectError> {
        Ok(self.normalized_version.parse()?)
    }
}

/// Picks the highest version directory.
///
/// The first entry seeds the running maximum; later entries replace it only
/// when strictly greater, so the first of two equal versions wins.
pub fn select_latest(version_dirs: &[String]) -> Result<VersionEntry, SelectError> {
    let (first, rest) = version_dirs
        .split_first()
        .ok_or(SelectError::NoVersionFound)?;

    let mut best = VersionEntry::new(first.as_str());
    let mut best_version = best.version()?;

    for raw in rest {
        let candidate = VersionEntry::new(raw.as_str());
        let version = candidate.version()?;
        if version > best_version {
            best = candidate;
            best_version = version;
        }
    }

    Ok(best)
}
