//! Output protocol: typed named fields in a JSON envelope.
//!
//! The envelope carries `schema_version`, `kind`, `generated_at_unix_ms`,
//! the typed `outputs` map and the run's non-fatal `diagnostics`. Object
//! keys are sorted recursively so the document is stable across runs.

use extaudit_core::{Diagnostic, Report};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

pub const SCHEMA_VERSION: u32 = 1;

/// Envelope kind for inventory documents.
pub const KIND_EXTENSION_INVENTORY: &str = "extension_inventory";

/// Output field holding the number of discovered extensions.
pub const FIELD_EXTENSION_COUNT: &str = "extension_count";

/// Output field holding the formatted extension lines.
pub const FIELD_EXTENSION_NAMES: &str = "extension_names";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to encode JSON: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write to stdout: {0}")]
    Stdout(#[source] std::io::Error),
}

/// A typed output field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum OutputValue {
    Uint32(u32),
    StringList(Vec<String>),
}

/// Named output fields, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputFields(BTreeMap<String, OutputValue>);

impl OutputFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: OutputValue) {
        self.0.insert(name.into(), value);
    }

    /// Builds the inventory fields from a report.
    pub fn from_report(report: &Report) -> Self {
        let mut fields = Self::new();
        fields.insert(FIELD_EXTENSION_COUNT, OutputValue::Uint32(report.count));
        fields.insert(
            FIELD_EXTENSION_NAMES,
            OutputValue::StringList(report.names.clone()),
        );
        fields
    }
}

/// A diagnostic as it appears in the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonDiagnostic {
    /// Stable code (e.g., "D001")
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_id: Option<String>,
}

impl From<&Diagnostic> for JsonDiagnostic {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            code: diagnostic.code.code().to_string(),
            message: diagnostic.message.clone(),
            extension_id: diagnostic.extension_id.clone(),
        }
    }
}

fn now_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn sort_value(value: &mut Value) {
    match value {
        Value::Array(items) => items.iter_mut().for_each(sort_value),
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (key, mut val) in entries {
                sort_value(&mut val);
                sorted.insert(key, val);
            }
            *map = sorted;
        }
        _ => {}
    }
}

/// Builds the envelope value with a caller-supplied timestamp.
pub fn envelope_value_at(
    kind: &str,
    fields: &OutputFields,
    diagnostics: &[JsonDiagnostic],
    generated_at_unix_ms: u64,
) -> Result<Value, OutputError> {
    let mut value = serde_json::json!({
        "schema_version": SCHEMA_VERSION,
        "kind": kind,
        "generated_at_unix_ms": generated_at_unix_ms,
        "outputs": serde_json::to_value(fields)?,
        "diagnostics": serde_json::to_value(diagnostics)?,
    });
    sort_value(&mut value);
    Ok(value)
}

/// Renders the inventory envelope for a report.
pub fn render_report(report: &Report) -> Result<String, OutputError> {
    let diagnostics: Vec<JsonDiagnostic> = report.diagnostics.iter().map(Into::into).collect();
    let value = envelope_value_at(
        KIND_EXTENSION_INVENTORY,
        &OutputFields::from_report(report),
        &diagnostics,
        now_unix_ms(),
    )?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Where output fields are delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputChannel {
    Stdout,
    File(PathBuf),
}

impl OutputChannel {
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => OutputChannel::File(path),
            None => OutputChannel::Stdout,
        }
    }

    /// Writes a rendered document to the channel, followed by a newline.
    pub fn emit(&self, text: &str) -> Result<(), OutputError> {
        match self {
            OutputChannel::Stdout => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", text).map_err(OutputError::Stdout)?;
                stdout.flush().map_err(OutputError::Stdout)
            }
            OutputChannel::File(path) => write_file(path, text),
        }
    }
}

fn write_file(path: &Path, text: &str) -> Result<(), OutputError> {
    std::fs::write(path, format!("{}\n", text)).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use extaudit_core::DiagnosticCode;
    use pretty_assertions::assert_eq;

    fn report(count: u32, names: &[&str], diagnostics: Vec<Diagnostic>) -> Report {
        Report {
            count,
            names: names.iter().map(|s| s.to_string()).collect(),
            records: Vec::new(),
            diagnostics,
        }
    }

    #[test]
    fn test_output_value_serialization() {
        assert_eq!(
            serde_json::to_value(OutputValue::Uint32(3)).unwrap(),
            serde_json::json!({"type": "uint32", "value": 3})
        );
        assert_eq!(
            serde_json::to_value(OutputValue::StringList(vec!["-".into()])).unwrap(),
            serde_json::json!({"type": "string_list", "value": ["-"]})
        );
    }

    #[test]
    fn test_envelope_shape() {
        let report = report(
            2,
            &["Slides 0.10.0; disabled"],
            vec![Diagnostic::for_extension(
                DiagnosticCode::NoVersionFound,
                "aapocclcgogkmnckokdopfmhonfmgoek",
                "no version directories",
            )],
        );
        let diagnostics: Vec<JsonDiagnostic> =
            report.diagnostics.iter().map(Into::into).collect();
        let value = envelope_value_at(
            KIND_EXTENSION_INVENTORY,
            &OutputFields::from_report(&report),
            &diagnostics,
            1_700_000_000_000,
        )
        .unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "diagnostics": [{
                    "code": "D001",
                    "extension_id": "aapocclcgogkmnckokdopfmhonfmgoek",
                    "message": "no version directories"
                }],
                "generated_at_unix_ms": 1_700_000_000_000u64,
                "kind": "extension_inventory",
                "outputs": {
                    "extension_count": {"type": "uint32", "value": 2},
                    "extension_names": {"type": "string_list", "value": ["Slides 0.10.0; disabled"]}
                },
                "schema_version": 1
            })
        );
    }

    #[test]
    fn test_rendered_keys_are_sorted() {
        let text = render_report(&report(0, &["-"], Vec::new())).unwrap();
        let positions: Vec<usize> = [
            "\"diagnostics\"",
            "\"generated_at_unix_ms\"",
            "\"kind\"",
            "\"outputs\"",
            "\"schema_version\"",
        ]
        .iter()
        .map(|key| text.find(key).unwrap())
        .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_emit_to_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.json");
        let channel = OutputChannel::from_option(Some(path.clone()));
        channel.emit("{}").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}\n");
    }

    #[test]
    fn test_emit_to_missing_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let channel = OutputChannel::File(tmp.path().join("missing").join("out.json"));
        let err = channel.emit("{}").unwrap_err();
        assert!(matches!(err, OutputError::Write { .. }));
        assert!(err.to_string().contains("out.json"));
    }

    #[test]
    fn test_from_option_defaults_to_stdout() {
        assert_eq!(OutputChannel::from_option(None), OutputChannel::Stdout);
    }
}
