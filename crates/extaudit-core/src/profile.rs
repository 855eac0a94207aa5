//! Filesystem layout of a browser installation and user profile.

use std::path::{Path, PathBuf};

use crate::status::PreferenceStores;

/// Default browser application bundle.
pub const DEFAULT_APP_BUNDLE: &str = "/Applications/Microsoft Edge.app";

/// Default user data directory, relative to the home directory.
pub const DEFAULT_USER_DATA_DIR: &str = "Library/Application Support/Microsoft Edge";

/// Default profile directory name.
pub const DEFAULT_PROFILE: &str = "Default";

/// Primary preference store file name.
pub const PREFERENCES_FILE: &str = "Preferences";

/// Secondary preference store file name.
pub const SECURE_PREFERENCES_FILE: &str = "Secure Preferences";

/// Extensions directory name inside a profile.
pub const EXTENSIONS_DIR: &str = "Extensions";

/// Paths inspected for one browser profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLayout {
    /// Browser `.app` bundle.
    pub app_bundle: PathBuf,
    /// Profile directory (e.g. `.../Microsoft Edge/Default`).
    pub profile_dir: PathBuf,
    /// Directory holding one subdirectory per extension ID.
    pub extensions_dir: PathBuf,
    /// Preference stores holding extension state.
    pub preferences: PreferenceStores,
}

impl ProfileLayout {
    /// Builds the standard layout of a profile directory.
    pub fn for_profile_dir(app_bundle: impl Into<PathBuf>, profile_dir: impl Into<PathBuf>) -> Self {
        let profile_dir = profile_dir.into();
        Self {
            app_bundle: app_bundle.into(),
            extensions_dir: profile_dir.join(EXTENSIONS_DIR),
            preferences: PreferenceStores::new(
                profile_dir.join(PREFERENCES_FILE),
                profile_dir.join(SECURE_PREFERENCES_FILE),
            ),
            profile_dir,
        }
    }

    /// Builds the default layout for a home directory and profile name.
    pub fn default_for_home(home: &Path, profile: &str) -> Self {
        Self::for_profile_dir(
            DEFAULT_APP_BUNDLE,
            home.join(DEFAULT_USER_DATA_DIR).join(profile),
        )
    }

    /// Overrides the extensions directory.
    pub fn with_extensions_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.extensions_dir = dir.into();
        self
    }

    /// `Contents/Info.plist` of the app bundle.
    pub fn info_plist(&self) -> PathBuf {
        self.app_bundle.join("Contents").join("Info.plist")
    }

    /// Directory of one extension.
    pub fn extension_dir(&self, extension_id: &str) -> PathBuf {
        self.extensions_dir.join(extension_id)
    }
}
