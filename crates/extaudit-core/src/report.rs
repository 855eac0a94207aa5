//! Report assembly.
//!
//! Per-extension outcomes are folded into one immutable [`Report`]. The
//! count covers every discovered extension, while `names` only holds
//! extensions whose details resolved, so `count` can exceed `names.len()`.

use serde::Serialize;

use crate::error::{Diagnostic, DiagnosticCode};
use crate::select::VersionEntry;
use crate::status::ExtensionStatus;

/// Placeholder entry reported when no extension names are available.
pub const EMPTY_PLACEHOLDER: &str = "-";

/// A fully resolved extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionRecord {
    /// 32-character extension identifier.
    pub id: String,
    /// All version directories found on disk, in scan order.
    pub version_directories: Vec<VersionEntry>,
    /// The latest version directory.
    pub selected_version: VersionEntry,
    /// Display name from the manifest (locale resolved).
    pub display_name: String,
    /// Enabled state from the preference stores.
    pub status: ExtensionStatus,
}

impl ExtensionRecord {
    /// Formats the report line: `<name> <version>; <status>`.
    pub fn report_line(&self) -> String {
        format!(
            "{} {}; {}",
            self.display_name, self.selected_version.normalized_version, self.status
        )
    }
}

/// Result of inspecting one discovered extension directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionOutcome {
    /// Name, version and enabled state all resolved.
    Reported(ExtensionRecord),
    /// Details could not be resolved; the extension is counted but not listed.
    Failed(Diagnostic),
}

/// Aggregated inventory of one browser profile.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    /// Number of discovered extension directories.
    pub count: u32,
    /// One formatted line per successfully resolved extension, or `["-"]`.
    pub names: Vec<String>,
    /// Successfully resolved extensions.
    pub records: Vec<ExtensionRecord>,
    /// Non-fatal diagnostics in the order they were produced.
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    /// Folds per-extension outcomes into a report.
    pub fn assemble<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = ExtensionOutcome>,
    {
        let mut report = outcomes
            .into_iter()
            .fold(Report::default(), |mut acc, outcome| {
                acc.count = acc.count.saturating_add(1);
                match outcome {
                    ExtensionOutcome::Reported(record) => {
                        acc.names.push(record.report_line());
                        acc.records.push(record);
                    }
                    ExtensionOutcome::Failed(diagnostic) => acc.diagnostics.push(diagnostic),
                }
                acc
            });

        if report.count == 0 {
            report.diagnostics.push(Diagnostic::new(
                DiagnosticCode::NoExtensionsFound,
                "no extensions found",
            ));
        }
        if report.names.is_empty() {
            report.names.push(EMPTY_PLACEHOLDER.to_string());
        }
        report
    }

    /// Returns true if any extension was counted but not listed.
    pub fn has_unreported(&self) -> bool {
        self.records.len() < self.count as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(id: &str, name: &str, version: &str, status: ExtensionStatus) -> ExtensionRecord {
        let entry = VersionEntry::new(version);
        ExtensionRecord {
            id: id.to_string(),
            version_directories: vec![entry.clone()],
            selected_version: entry,
            display_name: name.to_string(),
            status,
        }
    }

    #[test]
    fn test_report_line_format() {
        let r = record("a", "My Plugin", "1.2.3_0", ExtensionStatus::Enabled);
        assert_eq!(r.report_line(), "My Plugin 1.2.3.0; enabled");
    }

    #[test]
    fn test_assemble_counts_discovered_not_reported() {
        let failed = Diagnostic::for_extension(DiagnosticCode::NoVersionFound, "c", "no version");
        let report = Report::assemble(vec![
            ExtensionOutcome::Reported(record("a", "Alpha", "1.0", ExtensionStatus::Enabled)),
            ExtensionOutcome::Reported(record("b", "Beta", "2.1_3", ExtensionStatus::Disabled)),
            ExtensionOutcome::Failed(failed.clone()),
        ]);

        assert_eq!(report.count, 3);
        assert_eq!(
            report.names,
            vec!["Alpha 1.0; enabled".to_string(), "Beta 2.1.3; disabled".to_string()]
        );
        assert_eq!(report.diagnostics, vec![failed]);
        assert!(report.has_unreported());
    }

    #[test]
    fn test_assemble_empty() {
        let report = Report::assemble(Vec::new());
        assert_eq!(report.count, 0);
        assert_eq!(report.names, vec![EMPTY_PLACEHOLDER.to_string()]);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].code, DiagnosticCode::NoExtensionsFound);
        assert!(!report.has_unreported());
    }

    #[test]
    fn test_assemble_all_failed_uses_placeholder() {
        let report = Report::assemble(vec![ExtensionOutcome::Failed(Diagnostic::for_extension(
            DiagnosticCode::NameFieldMissing,
            "a",
            "no name",
        ))]);
        assert_eq!(report.count, 1);
        assert_eq!(report.names, vec![EMPTY_PLACEHOLDER.to_string()]);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.has_unreported());
    }

    #[test]
    fn test_assemble_omits_unknown_status() {
        let unknown = Diagnostic::for_extension(DiagnosticCode::UnknownStatus, "a", "state");
        let report = Report::assemble(vec![
            ExtensionOutcome::Failed(unknown.clone()),
            ExtensionOutcome::Reported(record("b", "Beta", "1.0", ExtensionStatus::Enabled)),
        ]);
        assert_eq!(report.count, 2);
        assert_eq!(report.names, vec!["Beta 1.0; enabled".to_string()]);
        assert_eq!(report.diagnostics, vec![unknown]);
    }
}
