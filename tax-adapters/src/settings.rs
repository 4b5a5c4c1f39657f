//! Optional TOML settings file for the starting deduction values.
//!
//! ```toml
//! personal_deduction = 70000
//! k_receipt_ceiling = 40000
//! ```
//!
//! Values go through the same validated updates as the admin adapter, so a
//! settings file cannot configure a personal deduction below 10,000.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{DeductionSettings, DeductionSettingsError};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] DeductionSettingsError),
}

/// Deduction values read from a settings file. Absent keys keep the
/// current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    pub personal_deduction: Option<Decimal>,
    pub k_receipt_ceiling: Option<Decimal>,
}

impl SettingsFile {
    pub fn from_toml(input: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded settings file");
        Self::from_toml(&contents)
    }

    /// Applies the configured values to `settings`.
    pub fn apply(
        &self,
        settings: &DeductionSettings,
    ) -> Result<(), SettingsError> {
        if let Some(amount) = self.personal_deduction {
            settings.set_personal_deduction(amount)?;
        }
        if let Some(amount) = self.k_receipt_ceiling {
            settings.set_k_receipt_ceiling(amount)?;
        }
        Ok(())
    }
}
