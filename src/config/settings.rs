//! Display settings of the owning book
//!
//! The ledger context supplies locale formatting for reports: decimal
//! separator, fraction digits, date pattern and time zone. These settings
//! only affect rendering, never arithmetic.

use serde::{Deserialize, Serialize};

use super::paths::BalancesPaths;
use crate::error::BalancesError;

/// Decimal separator preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecimalSeparator {
    /// `1,234.56` (default)
    #[default]
    Dot,
    /// `1.234,56`
    Comma,
}

impl DecimalSeparator {
    /// The character separating the fraction digits
    pub fn decimal_char(&self) -> char {
        match self {
            Self::Dot => '.',
            Self::Comma => ',',
        }
    }

    /// The character grouping thousands
    pub fn grouping_char(&self) -> char {
        match self {
            Self::Dot => ',',
            Self::Comma => '.',
        }
    }
}

/// Formatting settings of a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSettings {
    #[serde(default)]
    pub decimal_separator: DecimalSeparator,

    /// Number of fraction digits shown for amounts
    #[serde(default = "default_fraction_digits")]
    pub fraction_digits: u32,

    /// Date pattern (strftime format); periodicity default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_pattern: Option<String>,

    /// IANA time zone name of the book
    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    /// Offset from UTC in minutes
    #[serde(default)]
    pub time_zone_offset: i32,
}

fn default_fraction_digits() -> u32 {
    2
}

fn default_time_zone() -> String {
    "UTC".to_string()
}

impl Default for BookSettings {
    fn default() -> Self {
        Self {
            decimal_separator: DecimalSeparator::default(),
            fraction_digits: default_fraction_digits(),
            date_pattern: None,
            time_zone: default_time_zone(),
            time_zone_offset: 0,
        }
    }
}

impl BookSettings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_default(paths: &BalancesPaths) -> Result<Self, BalancesError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BalancesError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: BookSettings = serde_json::from_str(&contents).map_err(|e| {
            BalancesError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        tracing::debug!(path = %settings_path.display(), "loaded book settings");
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BalancesPaths) -> Result<(), BalancesError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            BalancesError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| BalancesError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
