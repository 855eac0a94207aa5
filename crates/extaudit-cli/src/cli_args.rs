//! CLI argument definitions for the extaudit command-line interface.
//!
//! All `#[derive(Parser)]`, `#[derive(Args)]` and `#[derive(Subcommand)]`
//! types are defined here, keeping `main.rs` focused on dispatch logic.
//! Every option can also be supplied through an `EXTAUDIT_*` environment
//! variable so the tool runs unmodified when the host passes no arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::preconditions::{DEFAULT_MIN_BROWSER_VERSION, DEFAULT_MIN_OS_VERSION};
use extaudit_core::profile::{DEFAULT_APP_BUNDLE, DEFAULT_PROFILE};

/// extaudit - Browser extension inventory for endpoint agents
#[derive(Debug, Parser)]
#[command(name = "extaudit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Output channel file (default: stdout)
    #[arg(short, long, global = true, env = "EXTAUDIT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Defaults to `collect` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the browser and its profile live, and the minimum versions required.
#[derive(Debug, Clone, Args)]
pub struct ProfileArgs {
    /// Home directory used to derive the profile path (default: current user's home)
    #[arg(long, global = true, env = "EXTAUDIT_HOME")]
    pub home: Option<PathBuf>,

    /// Browser profile directory name under the user data directory
    #[arg(long, global = true, env = "EXTAUDIT_PROFILE", default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// Full path of the profile directory (overrides --home and --profile)
    #[arg(long, global = true, env = "EXTAUDIT_PROFILE_DIR")]
    pub profile_dir: Option<PathBuf>,

    /// Extensions directory (default: <profile-dir>/Extensions)
    #[arg(long, global = true, env = "EXTAUDIT_EXTENSIONS_DIR")]
    pub extensions_dir: Option<PathBuf>,

    /// Browser application bundle
    #[arg(long, global = true, env = "EXTAUDIT_APP", default_value = DEFAULT_APP_BUNDLE)]
    pub app: PathBuf,

    /// Minimum supported macOS version
    #[arg(long, global = true, env = "EXTAUDIT_MIN_OS_VERSION", default_value = DEFAULT_MIN_OS_VERSION)]
    pub min_os_version: String,

    /// Minimum supported browser version
    #[arg(long, global = true, env = "EXTAUDIT_MIN_BROWSER_VERSION", default_value = DEFAULT_MIN_BROWSER_VERSION)]
    pub min_browser_version: String,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Collect the extension inventory and write it to the output channel
    Collect,

    /// Check host preconditions without collecting
    Doctor {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}
