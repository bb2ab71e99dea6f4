//! Store location resolution.
//!
//! The credential store lives in the platform configuration directory:
//!
//! - `~/.config/warrant/<profile>.json` on Linux
//! - `~/Library/Application Support/warrant/<profile>.json` on macOS
//! - `%APPDATA%/warrant/<profile>.json` on Windows
//!
//! `WARRANT_STORE_DIR` overrides the directory (absolute path required).

use std::path::PathBuf;

use crate::error::{StoreError, StoreResult};

/// Profile used by the CLI.
pub const DEFAULT_PROFILE: &str = "warrant-cli";

/// Environment variable overriding the store directory.
const STORE_DIR_VAR: &str = "WARRANT_STORE_DIR";

/// A profile-scoped locator for the credential store file.
#[derive(Debug, Clone)]
pub struct StoreConf {
    profile: String,
    root: Option<PathBuf>,
}

impl StoreConf {
    /// Locator for a named profile in the default location.
    #[must_use]
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            root: None,
        }
    }

    /// Locator for the CLI's fixed profile.
    #[must_use]
    pub fn default_profile() -> Self {
        Self::new(DEFAULT_PROFILE)
    }

    /// Locator rooted at an explicit directory (useful for testing).
    #[must_use]
    pub fn with_root(profile: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            profile: profile.into(),
            root: Some(root.into()),
        }
    }

    /// The profile name.
    #[must_use]
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Resolve the store file path.
    ///
    /// Precedence: explicit root, then `WARRANT_STORE_DIR`, then the
    /// platform configuration directory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OverrideNotAbsolute`] if the environment
    /// override is relative, or [`StoreError::NoConfigDir`] if the
    /// platform has no configuration directory.
    pub fn path(&self) -> StoreResult<PathBuf> {
        let file = format!("{}.json", self.profile);

        if let Some(root) = &self.root {
            return Ok(root.join(file));
        }

        if let Ok(custom) = std::env::var(STORE_DIR_VAR) {
            let dir = PathBuf::from(custom);
            if !dir.is_absolute() {
                return Err(StoreError::OverrideNotAbsolute);
            }
            return Ok(dir.join(file));
        }

        let dirs = directories::ProjectDirs::from("", "", "warrant")
            .ok_or(StoreError::NoConfigDir)?;
        Ok(dirs.config_dir().join(file))
    }
}
