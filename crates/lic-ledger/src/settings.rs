//! # Settings
//!
//! Aggregates the lifecycle, pricing, and ledger configuration into one
//! YAML document:
//!
//! ```yaml
//! lifecycle:
//!   warning_window_days: 30
//! pricing:
//!   base_currency: NOK
//! ledger:
//!   enforcement: strict
//!   high_priority_savings: "1000.00"
//! ```
//!
//! Every section and field is optional. [`Settings::from_env`] reads the
//! file named by `LICLEDGER_CONFIG` and falls back to defaults when the
//! variable is unset.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lic_pricing::PricingConfig;
use lic_state::{LifecycleConfig, LifecycleConfigError};

use crate::config::{LedgerConfig, LedgerConfigError};

/// Environment variable naming the settings file.
pub const CONFIG_ENV: &str = "LICLEDGER_CONFIG";

/// Errors loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings file does not exist.
    #[error("settings file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The settings file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML for these settings.
    #[error("invalid settings document: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Lifecycle thresholds are inconsistent.
    #[error("invalid lifecycle settings: {0}")]
    Lifecycle(#[from] LifecycleConfigError),

    /// Ledger thresholds are inconsistent.
    #[error("invalid ledger settings: {0}")]
    Ledger(#[from] LedgerConfigError),
}

/// All configurable thresholds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub lifecycle: LifecycleConfig,
    pub pricing: PricingConfig,
    pub ledger: LedgerConfig,
}

impl Settings {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Err(SettingsError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_yaml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            base_currency = %settings.pricing.base_currency,
            enforcement = ?settings.ledger.enforcement,
            "settings loaded"
        );
        Ok(settings)
    }

    /// Load from the file named by `LICLEDGER_CONFIG`, or defaults.
    pub fn from_env() -> Result<Self, SettingsError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                tracing::info!("{CONFIG_ENV} not set, using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.lifecycle.validate()?;
        self.ledger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CapacityEnforcement;
    use lic_core::{Amount, Currency};
    use std::io::Write;

    #[test]
    fn empty_document_is_default() {
        let settings = Settings::from_yaml_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_sections() {
        let yaml = r#"
lifecycle:
  warning_window_days: 14
pricing:
  base_currency: EUR
ledger:
  enforcement: strict
  max_recommendations: 3
  high_priority_savings: "250.50"
"#;
        let settings = Settings::from_yaml_str(yaml).unwrap();
        assert_eq!(settings.lifecycle.warning_window_days, 14);
        assert_eq!(settings.lifecycle.urgency_critical_days, 7);
        assert_eq!(settings.pricing.base_currency, Currency::Eur);
        assert_eq!(settings.ledger.enforcement, CapacityEnforcement::Strict);
        assert_eq!(settings.ledger.max_recommendations, 3);
        assert_eq!(settings.ledger.high_priority_savings, Amount::from_minor(25_050));
        assert_eq!(settings.ledger.optimization_threshold_pct, 70.0);
    }

    #[test]
    fn invalid_thresholds_rejected() {
        let err = Settings::from_yaml_str("lifecycle:\n  urgency_critical_days: 60\n").unwrap_err();
        assert!(matches!(err, SettingsError::Lifecycle(_)));

        let err = Settings::from_yaml_str("ledger:\n  underutilized_threshold_pct: -5\n").unwrap_err();
        assert!(matches!(err, SettingsError::Ledger(_)));
    }

    #[test]
    fn malformed_yaml_rejected() {
        let err = Settings::from_yaml_str("ledger: [not, a, map]").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("licledger.yaml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"ledger:\n  serialize_allocations: true\n").unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert!(settings.ledger.serialize_allocations);
    }

    #[test]
    fn missing_file_reported() {
        let err = Settings::from_file(Path::new("/nonexistent/licledger.yaml")).unwrap_err();
        match err {
            SettingsError::NotFound { path } => {
                assert!(path.to_string_lossy().contains("nonexistent"));
            }
            other => panic!("expected NotFound, got: {other}"),
        }
    }
}
