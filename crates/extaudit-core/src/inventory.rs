//! Single-pass inventory of a browser profile.

use crate::error::{Diagnostic, DiagnosticCode, ScanError};
use crate::manifest::resolve_display_name;
use crate::profile::ProfileLayout;
use crate::reader::StructuredReader;
use crate::report::{ExtensionOutcome, ExtensionRecord, Report};
use crate::scan::{list_extension_ids, list_version_directories};
use crate::select::{select_latest, VersionEntry};
use crate::status::{resolve_status, ExtensionStatus};

/// Scans the profile's extensions directory and assembles a report.
///
/// A missing extensions directory is fatal. Every other failure is scoped
/// to one extension and recorded as a diagnostic.
pub fn collect(layout: &ProfileLayout, reader: &dyn StructuredReader) -> Result<Report, ScanError> {
    let ids = list_extension_ids(&layout.extensions_dir)?;
    tracing::info!(
        "found {} extension directories in {}",
        ids.len(),
        layout.extensions_dir.display()
    );

    let report = Report::assemble(ids.iter().map(|id| inspect_extension(layout, id, reader)));

    for diagnostic in &report.diagnostics {
        tracing::warn!("{}", diagnostic);
    }
    Ok(report)
}

/// Resolves version, display name and status of one extension.
pub fn inspect_extension(
    layout: &ProfileLayout,
    extension_id: &str,
    reader: &dyn StructuredReader,
) -> ExtensionOutcome {
    let extension_dir = layout.extension_dir(extension_id);

    let raw_versions = match list_version_directories(&extension_dir) {
        Ok(versions) => versions,
        Err(e) => {
            return ExtensionOutcome::Failed(Diagnostic::for_extension(
                DiagnosticCode::NoVersionFound,
                extension_id,
                e.to_string(),
            ))
        }
    };

    let selected_version = match select_latest(&raw_versions) {
        Ok(entry) => entry,
        Err(e) => {
            return ExtensionOutcome::Failed(Diagnostic::for_extension(
                e.diagnostic_code(),
                extension_id,
                format!("{} in {}", e, extension_dir.display()),
            ))
        }
    };

    let version_dir = extension_dir.join(&selected_version.raw_directory_name);
    let display_name = match resolve_display_name(&version_dir, reader) {
        Ok(name) => name,
        Err(e) => {
            return ExtensionOutcome::Failed(Diagnostic::for_extension(
                e.diagnostic_code(),
                extension_id,
                e.to_string(),
            ))
        }
    };

    let status = resolve_status(extension_id, &layout.preferences, reader);
    if status == ExtensionStatus::Unknown {
        return ExtensionOutcome::Failed(Diagnostic::for_extension(
            DiagnosticCode::UnknownStatus,
            extension_id,
            "enabled state not found in either preference store",
        ));
    }

    ExtensionOutcome::Reported(ExtensionRecord {
        id: extension_id.to_string(),
        version_directories: raw_versions.iter().map(VersionEntry::new).collect(),
        selected_version,
        display_name,
        status,
    })
}
