//! Enabled/disabled state lookup in the profile preference stores.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::reader::{KeyPath, StructuredReader};

/// Whether an extension is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionStatus {
    Enabled,
    Disabled,
    Unknown,
}

impl ExtensionStatus {
    /// Maps a stored `state` value: `0` is disabled, `1` is enabled.
    pub fn from_state(state: Option<&str>) -> Self {
        match state.map(str::trim) {
            Some("0") => ExtensionStatus::Disabled,
            Some("1") => ExtensionStatus::Enabled,
            _ => ExtensionStatus::Unknown,
        }
    }

    /// Returns the string used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtensionStatus::Enabled => "enabled",
            ExtensionStatus::Disabled => "disabled",
            ExtensionStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ExtensionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The primary and fallback preference files of a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceStores {
    pub primary: PathBuf,
    pub secondary: PathBuf,
}

impl PreferenceStores {
    pub fn new(primary: impl Into<PathBuf>, secondary: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }
}

/// Key path of an extension's state inside a preference store.
pub fn state_key(extension_id: &str) -> KeyPath {
    KeyPath::from_segments(["extensions", "settings", extension_id, "state"])
}

/// Resolves the enabled state, trying the primary store and then the secondary.
pub fn resolve_status(
    extension_id: &str,
    stores: &PreferenceStores,
    reader: &dyn StructuredReader,
) -> ExtensionStatus {
    let key = state_key(extension_id);
    let state = read_state(&stores.primary, &key, reader)
        .or_else(|| read_state(&stores.secondary, &key, reader));
    ExtensionStatus::from_state(state.as_deref())
}

fn read_state(path: &Path, key: &KeyPath, reader: &dyn StructuredReader) -> Option<String> {
    match reader.get_value(path, key) {
        Ok(value) => value,
        Err(e) if e.is_not_found() => None,
        Err(e) => {
            tracing::debug!("ignoring unreadable preference store: {}", e);
            None
        }
    }
}
