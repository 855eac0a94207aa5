//! Display name resolution from extension manifests.
//!
//! A manifest `name` is either the display name itself or a locale
//! indirection marker `__MSG_<label>__`, in which case the name comes from
//! `_locales/<default_locale>/messages.json` under `<label>.message`.

use regex::Regex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::ManifestError;
use crate::reader::{KeyPath, StructuredReader};

/// Manifest file name inside a version directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Directory holding per-locale message files.
pub const LOCALES_DIR: &str = "_locales";

/// Message file name inside a locale directory.
pub const MESSAGES_FILE: &str = "messages.json";

fn message_marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^__MSG_(.+)__$").expect("valid regex"))
}

fn locale_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"))
}

/// Returns true for a locale tag that is a single path segment (`en`, `pt_BR`, `es_419`).
pub fn is_valid_locale(locale: &str) -> bool {
    locale_pattern().is_match(locale)
}

/// Returns the label of a `__MSG_<label>__` marker, or `None` for a plain name.
pub fn message_label(name: &str) -> Option<&str> {
    message_marker_pattern()
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Path of the messages file for `locale` under a version directory.
pub fn messages_path(version_dir: &Path, locale: &str) -> PathBuf {
    version_dir.join(LOCALES_DIR).join(locale).join(MESSAGES_FILE)
}

/// Resolves the display name of the extension version in `version_dir`.
pub fn resolve_display_name(
    version_dir: &Path,
    reader: &dyn StructuredReader,
) -> Result<String, ManifestError> {
    let manifest_path = version_dir.join(MANIFEST_FILE);
    let manifest = reader.read_document(&manifest_path)?;

    let name = KeyPath::parse("name")
        .lookup_string(&manifest)
        .ok_or_else(|| ManifestError::NameFieldMissing(manifest_path.clone()))?;

    let Some(label) = message_label(&name) else {
        return Ok(name);
    };

    let locale = KeyPath::parse("default_locale")
        .lookup_string(&manifest)
        .ok_or_else(|| ManifestError::LocaleFieldMissing(manifest_path.clone()))?;
    if !is_valid_locale(&locale) {
        return Err(ManifestError::InvalidLocale {
            path: manifest_path,
            locale,
        });
    }

    let messages = reader.read_document(&messages_path(version_dir, &locale))?;
    lookup_message(&messages, label).ok_or_else(|| ManifestError::LocalizedNameMissing {
        label: label.to_string(),
        locale,
    })
}

/// Finds `<label>.message`, falling back to an ASCII case-insensitive label match.
fn lookup_message(messages: &Value, label: &str) -> Option<String> {
    let message_key = KeyPath::from_segments([label, "message"]);
    if let Some(message) = message_key.lookup_string(messages) {
        return Some(message);
    }

    let (_, entry) = messages
        .as_object()?
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(label))?;
    KeyPath::parse("message").lookup_string(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReadError;
    use crate::reader::JsonReader;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn write_manifest(dir: &Path, body: &str) {
        fs::write(dir.join(MANIFEST_FILE), body).unwrap();
    }

    fn write_messages(dir: &Path, locale: &str, body: &str) {
        let path = messages_path(dir, locale);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    #[test]
    fn test_message_label() {
        assert_eq!(message_label("__MSG_extName__"), Some("extName"));
        assert_eq!(message_label("__MSG_app_name__"), Some("app_name"));
        assert_eq!(message_label("MyPlugin"), None);
        assert_eq!(message_label("__MSG___"), None);
        assert_eq!(message_label("prefix __MSG_x__"), None);
    }

    #[test]
    fn test_plain_name() {
        let tmp = tempfile::tempdir().unwrap();
        write_manifest(tmp.path(), r#"{"name": "MyPlugin", "version": "1.0"}"#);

        let name = resolve_display_name(tmp.path(), &JsonReader).unwrap();
        assert_eq!(name, "MyPlugin");
    }

    #[test]
    fn test_localized_name() {
        let tmp = tempfile::tempdir().unwrap();
        write_manifest(
            tmp.path(),
            r#"{"name": "__MSG_extName__", "default_locale": "en"}"#,
        );
        write_messages(
            tmp.path(),
            "en",
            r#"{"extName": {"message": "My Plugin", "description": "name"}}"#,
        );

        let name = resolve_display_name(tmp.path(), &JsonReader).unwrap();
        assert_eq!(name, "My Plugin");
    }

    #[test]
    fn test_localized_name_case_insensitive_label() {
        let tmp = tempfile::tempdir().unwrap();
        write_manifest(
            tmp.path(),
            r#"{"name": "__MSG_APPNAME__", "default_locale": "en_US"}"#,
        );
        write_messages(tmp.path(), "en_US", r#"{"appName": {"message": "Docs"}}"#);

        let name = resolve_display_name(tmp.path(), &JsonReader).unwrap();
        assert_eq!(name, "Docs");
    }

    #[test]
    fn test_name_field_missing() {
        let tmp = tempfile::tempdir().unwrap();
        write_manifest(tmp.path(), r#"{"version": "1.0"}"#);
        let err = resolve_display_name(tmp.path(), &JsonReader).unwrap_err();
        assert!(matches!(err, ManifestError::NameFieldMissing(_)));

        write_manifest(tmp.path(), r#"{"name": ""}"#);
        let err = resolve_display_name(tmp.path(), &JsonReader).unwrap_err();
        assert!(matches!(err, ManifestError::NameFieldMissing(_)));
    }

    #[test]
    fn test_locale_field_missing() {
        let tmp = tempfile::tempdir().unwrap();
        write_manifest(tmp.path(), r#"{"name": "__MSG_extName__"}"#);

        let err = resolve_display_name(tmp.path(), &JsonReader).unwrap_err();
        assert!(matches!(err, ManifestError::LocaleFieldMissing(_)));
    }

    #[test]
    fn test_locale_outside_version_dir_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let version_dir = tmp.path().join("1.0_0");
        fs::create_dir_all(&version_dir).unwrap();
        // A messages file reachable only by escaping the version directory.
        write_messages(tmp.path(), "en", r#"{"extName": {"message": "Escaped"}}"#);

        for locale in ["../../_locales/en", "en/../en", "..", "en\\x", ""] {
            write_manifest(
                &version_dir,
                &serde_json::json!({"name": "__MSG_extName__", "default_locale": locale})
                    .to_string(),
            );
            let err = resolve_display_name(&version_dir, &JsonReader).unwrap_err();
            assert!(
                matches!(
                    err,
                    ManifestError::InvalidLocale { .. } | ManifestError::LocaleFieldMissing(_)
                ),
                "locale {:?} gave {}",
                locale,
                err
            );
        }
    }

    #[test]
    fn test_is_valid_locale() {
        for ok in ["en", "en_US", "pt_BR", "es_419", "zh-TW"] {
            assert!(is_valid_locale(ok), "{}", ok);
        }
        for bad in ["", "..", "../en", "en/US", "en\\US", "en US"] {
            assert!(!is_valid_locale(bad), "{}", bad);
        }
    }

    #[test]
    fn test_localized_name_missing() {
        let tmp = tempfile::tempdir().unwrap();
        write_manifest(
            tmp.path(),
            r#"{"name": "__MSG_extName__", "default_locale": "en"}"#,
        );
        write_messages(tmp.path(), "en", r#"{"other": {"message": "x"}}"#);

        let err = resolve_display_name(tmp.path(), &JsonReader).unwrap_err();
        match err {
            ManifestError::LocalizedNameMissing { label, locale } => {
                assert_eq!(label, "extName");
                assert_eq!(locale, "en");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_messages_file_is_unreadable() {
        let tmp = tempfile::tempdir().unwrap();
        write_manifest(
            tmp.path(),
            r#"{"name": "__MSG_extName__", "default_locale": "fr"}"#,
        );

        let err = resolve_display_name(tmp.path(), &JsonReader).unwrap_err();
        assert!(matches!(err, ManifestError::Unreadable(ref e) if e.is_not_found()));
    }

    #[test]
    fn test_missing_manifest_is_unreadable() {
        let tmp = tempfile::tempdir().unwrap();
        let err = resolve_display_name(tmp.path(), &JsonReader).unwrap_err();
        assert!(matches!(err, ManifestError::Unreadable(ReadError::Io { .. })));
    }
}
