//! Host preconditions checked before collecting.
//!
//! Checks run in a fixed order (OS version, privilege level, browser
//! presence and version) and the first failure aborts the run.

use extaudit_core::{KeyPath, ProfileLayout, StructuredReader, Version};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Property list holding the host OS version.
pub const SYSTEM_VERSION_PLIST: &str = "/System/Library/CoreServices/SystemVersion.plist";

/// Default minimum macOS version.
pub const DEFAULT_MIN_OS_VERSION: &str = "10.13";

/// Default minimum browser version.
pub const DEFAULT_MIN_BROWSER_VERSION: &str = "65";

/// A failed precondition. Each variant is fatal for the run.
#[derive(Debug, Error)]
pub enum PreconditionError {
    #[error("unsupported macOS version {found} (minimum {minimum})")]
    UnsupportedOs { found: Version, minimum: Version },

    #[error("malformed macOS version '{0}'")]
    MalformedOsVersion(String),

    #[error("could not read the macOS version: {0}")]
    OsVersionUnreadable(String),

    #[error("running with elevated privileges is not supported; run as the logged-in user")]
    ElevatedPrivileges,

    #[error("browser not installed at {}", .0.display())]
    BrowserNotInstalled(PathBuf),

    #[error("could not read the browser version: {0}")]
    BrowserVersionUnreadable(String),

    #[error("browser version {found} is below the minimum {minimum}")]
    BrowserVersionTooOld { found: Version, minimum: Version },
}

/// Minimum versions the host must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirements {
    pub min_os_version: Version,
    pub min_browser_version: Version,
}

/// Facts established by a successful precondition pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFacts {
    pub os_version: Version,
    pub browser_version: Version,
}

/// Runs every precondition in order.
pub fn check_all(
    layout: &ProfileLayout,
    requirements: &Requirements,
    plist: &dyn StructuredReader,
) -> Result<HostFacts, PreconditionError> {
    let os_version = check_os_version(
        &read_os_version(plist, Path::new(SYSTEM_VERSION_PLIST))?,
        &requirements.min_os_version,
    )?;
    tracing::debug!("macOS version {}", os_version);

    check_not_elevated(current_user_is_root())?;

    let browser_version = check_browser_version(
        read_browser_version(layout, plist)?.as_deref(),
        &requirements.min_browser_version,
    )?;
    tracing::debug!("browser version {}", browser_version);

    Ok(HostFacts {
        os_version,
        browser_version,
    })
}

/// Reads `ProductVersion` from the system version property list.
pub fn read_os_version(
    plist: &dyn StructuredReader,
    path: &Path,
) -> Result<String, PreconditionError> {
    plist
        .get_value(path, &KeyPath::parse("ProductVersion"))
        .map_err(|e| PreconditionError::OsVersionUnreadable(e.to_string()))?
        .ok_or_else(|| {
            PreconditionError::OsVersionUnreadable(format!(
                "ProductVersion missing from {}",
                path.display()
            ))
        })
}

/// Validates the OS version string against the minimum.
pub fn check_os_version(found: &str, minimum: &Version) -> Result<Version, PreconditionError> {
    let version: Version = found
        .trim()
        .parse()
        .map_err(|_| PreconditionError::MalformedOsVersion(found.to_string()))?;
    if &version < minimum {
        return Err(PreconditionError::UnsupportedOs {
            found: version,
            minimum: minimum.clone(),
        });
    }
    Ok(version)
}

/// Fails when the effective user is root.
pub fn check_not_elevated(is_root: bool) -> Result<(), PreconditionError> {
    if is_root {
        Err(PreconditionError::ElevatedPrivileges)
    } else {
        Ok(())
    }
}

/// Returns true when the process runs with an effective UID of 0.
#[cfg(unix)]
pub fn current_user_is_root() -> bool {
    nix::unistd::geteuid().is_root()
}

#[cfg(not(unix))]
pub fn current_user_is_root() -> bool {
    false
}

/// Reads `CFBundleShortVersionString` from the browser bundle.
///
/// Returns `Ok(None)` when the bundle exists but carries no version.
pub fn read_browser_version(
    layout: &ProfileLayout,
    plist: &dyn StructuredReader,
) -> Result<Option<String>, PreconditionError> {
    if !layout.app_bundle.is_dir() {
        return Err(PreconditionError::BrowserNotInstalled(
            layout.app_bundle.clone(),
        ));
    }
    plist
        .get_value(
            &layout.info_plist(),
            &KeyPath::parse("CFBundleShortVersionString"),
        )
        .map_err(|e| PreconditionError::BrowserVersionUnreadable(e.to_string()))
}

/// Validates the browser version against the minimum.
pub fn check_browser_version(
    found: Option<&str>,
    minimum: &Version,
) -> Result<Version, PreconditionError> {
    let found = found.ok_or_else(|| {
        PreconditionError::BrowserVersionUnreadable("CFBundleShortVersionString missing".into())
    })?;
    let version: Version = found
        .trim()
        .parse()
        .map_err(|e| PreconditionError::BrowserVersionUnreadable(format!("{}", e)))?;
    if &version < minimum {
        return Err(PreconditionError::BrowserVersionTooOld {
            found: version,
            minimum: minimum.clone(),
        });
    }
    Ok(version)
}
