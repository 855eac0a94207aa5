//! Test fixture utilities for creating synthetic browser profiles.

use extaudit_core::ProfileLayout;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A test fixture representing a browser installation and one profile.
///
/// The layout is `<root>/Microsoft Edge.app` for the app bundle and
/// `<root>/Default` for the profile directory.
pub struct ProfileFixture {
    pub root: TempDir,
    layout: ProfileLayout,
    primary: RefCell<Value>,
    secondary: RefCell<Value>,
}

impl ProfileFixture {
    /// Create a profile with an empty extensions directory.
    pub fn new() -> Self {
        let fixture = Self::without_extensions_dir();
        fs::create_dir_all(&fixture.layout.extensions_dir)
            .expect("Failed to create extensions dir");
        fixture
    }

    /// Create a profile whose extensions directory does not exist.
    pub fn without_extensions_dir() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let layout = ProfileLayout::for_profile_dir(
            root.path().join("Microsoft Edge.app"),
            root.path().join("Default"),
        );
        fs::create_dir_all(&layout.profile_dir).expect("Failed to create profile dir");
        Self {
            root,
            layout,
            primary: RefCell::new(json!({})),
            secondary: RefCell::new(json!({})),
        }
    }

    /// Get the fixture root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Get the profile layout.
    pub fn layout(&self) -> ProfileLayout {
        self.layout.clone()
    }

    /// Create an extension directory with no version subdirectories.
    pub fn add_extension_dir(&self, id: &str) -> PathBuf {
        let dir = self.layout.extension_dir(id);
        fs::create_dir_all(&dir).expect("Failed to create extension dir");
        dir
    }

    /// Create an empty version directory for an extension.
    pub fn add_version_dir(&self, id: &str, version: &str) -> PathBuf {
        let dir = self.add_extension_dir(id).join(version);
        fs::create_dir_all(&dir).expect("Failed to create version dir");
        dir
    }

    /// Write a raw manifest into a version directory.
    pub fn write_manifest(&self, id: &str, version: &str, manifest: &Value) -> PathBuf {
        let dir = self.add_version_dir(id, version);
        let path = dir.join("manifest.json");
        fs::write(&path, manifest.to_string()).expect("Failed to write manifest");
        path
    }

    /// Add an extension version with a plain display name.
    pub fn add_extension(&self, id: &str, version: &str, name: &str) -> &Self {
        self.write_manifest(id, version, &json!({ "name": name, "version": version }));
        self
    }

    /// Add an extension version whose name is resolved through a locale.
    ///
    /// # Arguments
    /// * `label` - Message label referenced as `__MSG_<label>__`
    /// * `locale` - The manifest's `default_locale`
    /// * `message` - The localized display name
    pub fn add_localized_extension(
        &self,
        id: &str,
        version: &str,
        label: &str,
        locale: &str,
        message: &str,
    ) -> &Self {
        self.write_manifest(
            id,
            version,
            &json!({
                "name": format!("__MSG_{}__", label),
                "default_locale": locale,
            }),
        );
        let locale_dir = self
            .layout
            .extension_dir(id)
            .join(version)
            .join("_locales")
            .join(locale);
        fs::create_dir_all(&locale_dir).expect("Failed to create locale dir");
        let mut messages = serde_json::Map::new();
        messages.insert(label.to_string(), json!({ "message": message }));
        fs::write(
            locale_dir.join("messages.json"),
            Value::Object(messages).to_string(),
        )
        .expect("Failed to write messages");
        self
    }

    /// Record an extension state in the primary preference store.
    pub fn set_state(&self, id: &str, state: i64) -> &Self {
        Self::record_state(&self.primary, &self.layout.preferences.primary, id, state);
        self
    }

    /// Record an extension state in the secondary preference store.
    pub fn set_secondary_state(&self, id: &str, state: i64) -> &Self {
        Self::record_state(
            &self.secondary,
            &self.layout.preferences.secondary,
            id,
            state,
        );
        self
    }

    fn record_state(store: &RefCell<Value>, path: &Path, id: &str, state: i64) {
        let mut doc = store.borrow_mut();
        doc["extensions"]["settings"][id] = json!({ "state": state });
        fs::write(path, doc.to_string()).expect("Failed to write preferences");
    }
}

impl Default for ProfileFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_writes_manifest_and_preferences() {
        let fixture = ProfileFixture::new();
        fixture
            .add_extension("aapocclcgogkmnckokdopfmhonfmgoek", "0.10_0", "Slides")
            .set_state("aapocclcgogkmnckokdopfmhonfmgoek", 1);

        let layout = fixture.layout();
        assert!(layout
            .extension_dir("aapocclcgogkmnckokdopfmhonfmgoek")
            .join("0.10_0")
            .join("manifest.json")
            .is_file());
        let prefs: Value =
            serde_json::from_str(&fs::read_to_string(&layout.preferences.primary).unwrap())
                .unwrap();
        assert_eq!(
            prefs["extensions"]["settings"]["aapocclcgogkmnckokdopfmhonfmgoek"]["state"],
            1
        );
        assert!(!layout.preferences.secondary.exists());
    }
}
