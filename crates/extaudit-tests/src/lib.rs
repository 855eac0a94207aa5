//! extaudit End-to-End Test Infrastructure
//!
//! This crate builds synthetic browser profiles on disk and runs the
//! inventory and output flows against them:
//!
//! - Inventory: profile tree -> report (count, names, diagnostics)
//! - Output: report -> JSON envelope on the output channel
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p extaudit-tests
//! ```
//!
//! ## Fixtures
//!
//! ```rust,ignore
//! use extaudit_tests::fixtures::ProfileFixture;
//!
//! let fixture = ProfileFixture::new();
//! fixture
//!     .add_extension("ghbmnnjooekpmoecnnnilnnbdlolhkhi", "1.73.1_0", "Docs")
//!     .set_state("ghbmnnjooekpmoecnnnilnnbdlolhkhi", 1);
//! let report = extaudit_core::collect(&fixture.layout(), &extaudit_core::JsonReader).unwrap();
//! ```

pub mod fixtures;
