//! Path management for balances-report
//!
//! ## Path Resolution Order
//!
//! 1. `BALANCES_CONFIG_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/balances-report` or `~/.config/balances-report`
//! 3. Windows: `%APPDATA%\balances-report`

use std::path::PathBuf;

use crate::error::BalancesError;

/// Manages the paths used by balances-report
#[derive(Debug, Clone)]
pub struct BalancesPaths {
    base_dir: PathBuf,
}

impl BalancesPaths {
    /// Create a new BalancesPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, BalancesError> {
        let base_dir = if let Ok(custom) = std::env::var("BALANCES_CONFIG_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create BalancesPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the book settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), BalancesError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BalancesError::Io(format!("Failed to create config directory: {}", e)))
    }
}

/// Resolve the default config directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, BalancesError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                BalancesError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("balances-report"))
}

/// Resolve the default config directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, BalancesError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| BalancesError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("balances-report"))
}
