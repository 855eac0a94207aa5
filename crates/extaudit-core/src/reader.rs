//! Structured file readers.
//!
//! A [`StructuredReader`] loads a file as a JSON value and answers
//! `get_value(path, key_path)` lookups with the scalar found at that path.
//! [`JsonReader`] parses JSON directly; [`PlistReader`] converts property
//! lists with the system `plutil` utility and then applies the same lookup.

use serde_json::Value;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::ReadError;

/// Search path used to locate OS utilities.
pub const SYSTEM_SEARCH_PATH: &str = "/usr/bin:/bin:/usr/sbin:/sbin";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A path of object keys into a structured document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Parses a dotted key path such as `extensions.settings`.
    pub fn parse(dotted: &str) -> Self {
        Self {
            segments: dotted.split('.').map(str::to_string).collect(),
        }
    }

    /// Builds a key path from individual segments.
    ///
    /// Use this when a segment may itself contain a dot.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the key segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Walks `document` along this path.
    pub fn lookup<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(document, |node, key| node.as_object()?.get(key))
    }

    /// Walks `document` along this path and renders the scalar found there.
    ///
    /// Empty strings, nulls, arrays and objects count as absent.
    pub fn lookup_string(&self, document: &Value) -> Option<String> {
        self.lookup(document).and_then(scalar_to_string)
    }
}

impl std::fmt::Display for KeyPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Reads structured files and extracts values by key path.
pub trait StructuredReader {
    /// Loads the whole document.
    fn read_document(&self, path: &Path) -> Result<Value, ReadError>;

    /// Returns the scalar at `key` in the file at `path`, if any.
    fn get_value(&self, path: &Path, key: &KeyPath) -> Result<Option<String>, ReadError> {
        let document = self.read_document(path)?;
        Ok(key.lookup_string(&document))
    }
}

/// Reader for JSON files (manifests, locale messages, preference stores).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReader;

impl StructuredReader for JsonReader {
    fn read_document(&self, path: &Path) -> Result<Value, ReadError> {
        let bytes = fs::read(path).map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);
        serde_json::from_slice(bytes).map_err(|source| ReadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Reader for property lists, backed by `plutil -convert json`.
#[derive(Debug, Clone)]
pub struct PlistReader {
    search_path: OsString,
}

impl PlistReader {
    /// Creates a reader that locates `plutil` on the given search path.
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: search_path.into(),
        }
    }

    fn plutil(&self, path: &Path) -> Result<PathBuf, ReadError> {
        which::which_in("plutil", Some(&self.search_path), "/").map_err(|e| ReadError::Convert {
            path: path.to_path_buf(),
            message: format!("plutil not found: {}", e),
        })
    }
}

impl Default for PlistReader {
    fn default() -> Self {
        Self::with_search_path(SYSTEM_SEARCH_PATH)
    }
}

impl StructuredReader for PlistReader {
    fn read_document(&self, path: &Path) -> Result<Value, ReadError> {
        // Surface a missing file as an I/O error rather than a converter failure.
        fs::metadata(path).map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let plutil = self.plutil(path)?;
        let output = Command::new(&plutil)
            .args(["-convert", "json", "-o", "-"])
            .arg(path)
            .output()
            .map_err(|e| ReadError::Convert {
                path: path.to_path_buf(),
                message: format!("failed to run {}: {}", plutil.display(), e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("plutil exited with {}", output.status)
            } else {
                stderr
            };
            return Err(ReadError::Convert {
                path: path.to_path_buf(),
                message,
            });
        }

        serde_json::from_slice(&output.stdout).map_err(|source| ReadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
