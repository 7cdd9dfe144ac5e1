//! Unified path management for headspace configuration files.
//!
//! All headspace configuration and recovery data lives under the platform
//! config directory (e.g. `~/.config/headspace/` on Linux).
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/headspace/
//! ├── config.toml            # Client configuration
//! └── pending_drafts.json    # Unsent respond drafts, keyed by agent id
//! ```

use std::path::PathBuf;

use headspace_core::HeadspaceError;

/// Unified path management for headspace.
pub struct HeadspacePaths;

impl HeadspacePaths {
    /// Returns the headspace configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/headspace/`)
    /// - `Err(HeadspaceError::Config)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, HeadspaceError> {
        dirs::config_dir()
            .map(|dir| dir.join("headspace"))
            .ok_or_else(|| HeadspaceError::config("Cannot find config directory"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, HeadspaceError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the pending-drafts file.
    pub fn pending_file() -> Result<PathBuf, HeadspaceError> {
        Ok(Self::config_dir()?.join("pending_drafts.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_config_dir() {
        let dir = HeadspacePaths::config_dir().unwrap();
        assert!(HeadspacePaths::config_file().unwrap().starts_with(&dir));
        assert!(HeadspacePaths::pending_file().unwrap().starts_with(&dir));
    }
}
