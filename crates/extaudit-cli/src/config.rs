//! Resolution of command-line options into a profile layout and requirements.

use anyhow::{Context, Result};
use extaudit_core::{ProfileLayout, Version};
use std::path::PathBuf;

use crate::cli_args::ProfileArgs;
use crate::preconditions::Requirements;

impl ProfileArgs {
    /// Builds the profile layout, deriving the profile directory from the
    /// home directory unless one was given explicitly.
    pub fn layout(&self) -> Result<ProfileLayout> {
        let profile_dir = match &self.profile_dir {
            Some(dir) => dir.clone(),
            None => {
                let home = self.home_dir()?;
                ProfileLayout::default_for_home(&home, &self.profile).profile_dir
            }
        };

        let mut layout = ProfileLayout::for_profile_dir(&self.app, profile_dir);
        if let Some(dir) = &self.extensions_dir {
            layout = layout.with_extensions_dir(dir);
        }
        Ok(layout)
    }

    /// Parses the minimum OS and browser versions.
    pub fn requirements(&self) -> Result<Requirements> {
        Ok(Requirements {
            min_os_version: parse_minimum(&self.min_os_version, "--min-os-version")?,
            min_browser_version: parse_minimum(
                &self.min_browser_version,
                "--min-browser-version",
            )?,
        })
    }

    fn home_dir(&self) -> Result<PathBuf> {
        match &self.home {
            Some(home) => Ok(home.clone()),
            None => dirs::home_dir().context("could not determine the home directory"),
        }
    }
}

fn parse_minimum(value: &str, flag: &str) -> Result<Version> {
    value
        .parse()
        .with_context(|| format!("invalid {} value '{}'", flag, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli_args::Cli;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn args(extra: &[&str]) -> ProfileArgs {
        let mut argv = vec!["extaudit"];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv).unwrap().profile
    }

    #[test]
    fn test_layout_from_home_and_profile() {
        let layout = args(&["--home", "/Users/alex", "--profile", "Profile 3"])
            .layout()
            .unwrap();
        assert_eq!(
            layout.profile_dir,
            PathBuf::from("/Users/alex/Library/Application Support/Microsoft Edge/Profile 3")
        );
        assert_eq!(
            layout.app_bundle,
            PathBuf::from("/Applications/Microsoft Edge.app")
        );
    }

    #[test]
    fn test_layout_from_explicit_dirs() {
        let layout = args(&[
            "--profile-dir",
            "/data/profile",
            "--extensions-dir",
            "/data/ext",
            "--app",
            "/Applications/Chromium.app",
        ])
        .layout()
        .unwrap();
        assert_eq!(layout.profile_dir, PathBuf::from("/data/profile"));
        assert_eq!(layout.extensions_dir, PathBuf::from("/data/ext"));
        assert_eq!(
            layout.preferences.primary,
            PathBuf::from("/data/profile/Preferences")
        );
        assert_eq!(layout.app_bundle, PathBuf::from("/Applications/Chromium.app"));
    }

    #[test]
    fn test_requirements_parse() {
        let req = args(&["--min-os-version", "11.0", "--min-browser-version", "90"])
            .requirements()
            .unwrap();
        assert_eq!(req.min_os_version.to_string(), "11.0");
        assert_eq!(req.min_browser_version.to_string(), "90");
    }

    #[test]
    fn test_requirements_reject_malformed() {
        let err = args(&["--min-browser-version", "latest"])
            .requirements()
            .unwrap_err();
        assert!(err.to_string().contains("--min-browser-version"));
    }
}
