//! Error and diagnostic types for extension inventory.

use std::path::PathBuf;
use thiserror::Error;

/// Stable codes for non-fatal, per-run or per-extension diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    // Version errors (D001-D002)
    /// D001: No version directory found for an extension
    NoVersionFound,
    /// D002: A version directory name is not a dotted numeric version
    InvalidVersion,

    // Manifest errors (D010-D014)
    /// D010: manifest.json could not be read or parsed
    ManifestUnreadable,
    /// D011: manifest `name` field absent or empty
    NameFieldMissing,
    /// D012: manifest `default_locale` absent for a localized name
    LocaleFieldMissing,
    /// D013: locale message lookup yielded nothing
    LocalizedNameMissing,
    /// D014: `default_locale` is not a plain locale tag
    InvalidLocale,

    // Status errors (D020)
    /// D020: Enabled/disabled state could not be determined
    UnknownStatus,

    // Run-level (D030)
    /// D030: No extension directories were discovered
    NoExtensionsFound,
}

impl DiagnosticCode {
    /// Returns the diagnostic code string (e.g., "D001").
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticCode::NoVersionFound => "D001",
            DiagnosticCode::InvalidVersion => "D002",
            DiagnosticCode::ManifestUnreadable => "D010",
            DiagnosticCode::NameFieldMissing => "D011",
            DiagnosticCode::LocaleFieldMissing => "D012",
            DiagnosticCode::LocalizedNameMissing => "D013",
            DiagnosticCode::InvalidLocale => "D014",
            DiagnosticCode::UnknownStatus => "D020",
            DiagnosticCode::NoExtensionsFound => "D030",
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A non-fatal diagnostic recorded while the scan continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The diagnostic code.
    pub code: DiagnosticCode,
    /// Human-readable message.
    pub message: String,
    /// Extension the diagnostic is scoped to, if any.
    pub extension_id: Option<String>,
}

impl Diagnostic {
    /// Creates a run-level diagnostic.
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            extension_id: None,
        }
    }

    /// Creates a diagnostic scoped to one extension.
    pub fn for_extension(
        code: DiagnosticCode,
        extension_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            extension_id: Some(extension_id.into()),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref id) = self.extension_id {
            write!(f, "{}: {} (extension {})", self.code, self.message, id)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Malformed version string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// Empty string, empty component or non-numeric component.
    #[error("invalid version format: '{0}'")]
    InvalidVersionFormat(String),
}

/// Fatal errors from the directory scanner.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The directory to list does not exist.
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The directory exists but could not be listed.
    #[error("failed to list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-extension failure from the latest-version selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// No version directories to choose from.
    #[error("no version directory found")]
    NoVersionFound,

    /// A version directory name did not parse.
    #[error(transparent)]
    InvalidVersion(#[from] VersionError),
}

impl SelectError {
    /// Returns the diagnostic code for this error.
    pub fn diagnostic_code(&self) -> DiagnosticCode {
        match self {
            SelectError::NoVersionFound => DiagnosticCode::NoVersionFound,
            SelectError::InvalidVersion(_) => DiagnosticCode::InvalidVersion,
        }
    }
}

/// Per-extension failure while resolving a display name.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest (or locale file) could not be read.
    #[error(transparent)]
    Unreadable(#[from] ReadError),

    /// The `name` field is absent or empty.
    #[error("manifest {} has no name field", .0.display())]
    NameFieldMissing(PathBuf),

    /// A localized name was found but the manifest has no `default_locale`.
    #[error("manifest {} has a localized name but no default_locale", .0.display())]
    LocaleFieldMissing(PathBuf),

    /// `default_locale` would not name a directory under `_locales`.
    #[error("manifest {} has an invalid default_locale '{locale}'", path.display())]
    InvalidLocale { path: PathBuf, locale: String },

    /// The locale message file does not define the referenced label.
    #[error("message '{label}' not found for locale '{locale}'")]
    LocalizedNameMissing { label: String, locale: String },
}

impl ManifestError {
    /// Returns the diagnostic code for this error.
    pub fn diagnostic_code(&self) -> DiagnosticCode {
        match self {
            ManifestError::Unreadable(_) => DiagnosticCode::ManifestUnreadable,
            ManifestError::NameFieldMissing(_) => DiagnosticCode::NameFieldMissing,
            ManifestError::LocaleFieldMissing(_) => DiagnosticCode::LocaleFieldMissing,
            ManifestError::InvalidLocale { .. } => DiagnosticCode::InvalidLocale,
            ManifestError::LocalizedNameMissing { .. } => DiagnosticCode::LocalizedNameMissing,
        }
    }
}

/// Failure reading a structured (JSON or property list) file.
#[derive(Debug, Error)]
pub enum ReadError {
    /// File could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not valid JSON.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The property list converter could not be located or failed.
    #[error("failed to convert {}: {message}", path.display())]
    Convert { path: PathBuf, message: String },
}

impl ReadError {
    /// Returns true when the underlying file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ReadError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
