//! Extension and version directory listing.
//!
//! Both listings look exactly one directory level deep and never follow
//! symlinks out of the profile.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use walkdir::WalkDir;

use crate::error::ScanError;

/// Length of a browser extension identifier.
pub const EXTENSION_ID_LEN: usize = 32;

fn version_dir_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]+(\.[0-9]+)*(_[0-9]+)?$").expect("version directory pattern is valid")
    })
}

/// Returns true if `name` is a well-formed extension identifier.
pub fn is_extension_id(name: &str) -> bool {
    name.len() == EXTENSION_ID_LEN && name.bytes().all(|b| b.is_ascii_lowercase())
}

/// Returns true if `name` looks like a version directory (`1.2.3` or `1.2.3_0`).
pub fn is_version_directory_name(name: &str) -> bool {
    version_dir_pattern().is_match(name)
}

/// Lists extension IDs directly under the extensions root, sorted.
///
/// Fails with [`ScanError::DirectoryNotFound`] if `root` does not exist.
pub fn list_extension_ids(root: &Path) -> Result<Vec<String>, ScanError> {
    list_child_dirs(root, is_extension_id)
}

/// Lists version directory names for one extension, sorted by raw name.
pub fn list_version_directories(extension_root: &Path) -> Result<Vec<String>, ScanError> {
    list_child_dirs(extension_root, is_version_directory_name)
}

fn list_child_dirs(root: &Path, accept: impl Fn(&str) -> bool) -> Result<Vec<String>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::DirectoryNotFound(root.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            ScanError::Io {
                path,
                source: e.into(),
            }
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if accept(name) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}
