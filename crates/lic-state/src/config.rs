//! Lifecycle thresholds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Day thresholds for status and urgency classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// An instance ending within this many days (inclusive) is WARNING.
    pub warning_window_days: i64,
    /// Urgency is `critical` at or below this many days remaining.
    pub urgency_critical_days: i64,
    /// Urgency is `warning` at or below this many days remaining.
    pub urgency_warning_days: i64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            warning_window_days: 30,
            urgency_critical_days: 7,
            urgency_warning_days: 30,
        }
    }
}

/// Inconsistent lifecycle thresholds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleConfigError {
    /// A threshold was negative.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: i64,
    },

    /// The critical tier would be wider than the warning tier.
    #[error("urgency_critical_days ({critical}) must not exceed urgency_warning_days ({warning})")]
    CriticalExceedsWarning {
        /// Configured critical threshold.
        critical: i64,
        /// Configured warning threshold.
        warning: i64,
    },
}

impl LifecycleConfig {
    /// Check the thresholds are usable together.
    pub fn validate(&self) -> Result<(), LifecycleConfigError> {
        for (field, value) in [
            ("warning_window_days", self.warning_window_days),
            ("urgency_critical_days", self.urgency_critical_days),
            ("urgency_warning_days", self.urgency_warning_days),
        ] {
            if value < 0 {
                return Err(LifecycleConfigError::Negative { field, value });
            }
        }
        if self.urgency_critical_days > self.urgency_warning_days {
            return Err(LifecycleConfigError::CriticalExceedsWarning {
                critical: self.urgency_critical_days,
                warning: self.urgency_warning_days,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = LifecycleConfig::default();
        assert_eq!(cfg.warning_window_days, 30);
        assert_eq!(cfg.urgency_critical_days, 7);
        assert_eq!(cfg.urgency_warning_days, 30);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_negative() {
        let cfg = LifecycleConfig {
            warning_window_days: -1,
            ..LifecycleConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(LifecycleConfigError::Negative { field: "warning_window_days", .. })
        ));
    }

    #[test]
    fn rejects_inverted_urgency_tiers() {
        let cfg = LifecycleConfig {
            urgency_critical_days: 40,
            ..LifecycleConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(LifecycleConfigError::CriticalExceedsWarning { critical: 40, warning: 30 })
        ));
    }

    #[test]
    fn partial_document_fills_defaults() {
        let cfg: LifecycleConfig = serde_json::from_str(r#"{"warning_window_days": 14}"#).unwrap();
        assert_eq!(cfg.warning_window_days, 14);
        assert_eq!(cfg.urgency_critical_days, 7);
    }
}
