//! extaudit Core Library
//!
//! This crate inventories the extensions installed in a Chromium-family
//! browser profile: it lists extension directories, picks the latest
//! installed version of each, resolves display names (including
//! `__MSG_<label>__` locale indirection) and looks up enabled state in the
//! profile's preference stores.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use extaudit_core::{collect, JsonReader, ProfileLayout};
//!
//! let layout = ProfileLayout::default_for_home(Path::new("/Users/alex"), "Default");
//! let report = collect(&layout, &JsonReader).unwrap();
//! println!("{} extensions", report.count);
//! for line in &report.names {
//!     println!("  {}", line);
//! }
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and diagnostic types
//! - [`version`]: Dotted-numeric version ordering
//! - [`reader`]: JSON and property list field extraction
//! - [`scan`]: Extension and version directory listing
//! - [`select`]: Latest version selection
//! - [`manifest`]: Display name and locale resolution
//! - [`status`]: Enabled/disabled lookup
//! - [`report`]: Report assembly
//! - [`profile`]: Browser profile filesystem layout
//! - [`inventory`]: The single scan pass tying the above together

pub mod error;
pub mod inventory;
pub mod manifest;
pub mod profile;
pub mod reader;
pub mod report;
pub mod scan;
pub mod select;
pub mod status;
pub mod version;

// Re-export commonly used types at the crate root
pub use error::{
    Diagnostic, DiagnosticCode, ManifestError, ReadError, ScanError, SelectError, VersionError,
};
pub use inventory::{collect, inspect_extension};
pub use manifest::resolve_display_name;
pub use profile::ProfileLayout;
pub use reader::{JsonReader, KeyPath, PlistReader, StructuredReader};
pub use report::{ExtensionOutcome, ExtensionRecord, Report, EMPTY_PLACEHOLDER};
pub use scan::{list_extension_ids, list_version_directories};
pub use select::{select_latest, VersionEntry};
pub use status::{resolve_status, ExtensionStatus, PreferenceStores};
pub use version::{compare, normalize, Version};
