//! # Ledger Configuration
//!
//! Capacity enforcement and reporting thresholds. Every field has a
//! default, so a partial document only overrides what it names.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lic_core::Amount;

/// What allocation does when a license has no free slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityEnforcement {
    /// Allocate anyway and log the overallocation.
    #[default]
    Lenient,
    /// Reject with a capacity violation.
    Strict,
}

/// Lower bounds (inclusive, percent) of the utilization bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilizationBands {
    pub excellent: f64,
    pub good: f64,
    pub moderate: f64,
}

impl Default for UtilizationBands {
    fn default() -> Self {
        Self {
            excellent: 90.0,
            good: 70.0,
            moderate: 50.0,
        }
    }
}

/// Lower bounds (inclusive, percent) of the waste bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WasteBands {
    pub critical: f64,
    pub high: f64,
    pub moderate: f64,
}

impl Default for WasteBands {
    fn default() -> Self {
        Self {
            critical: 80.0,
            high: 50.0,
            moderate: 30.0,
        }
    }
}

/// Ledger behaviour and reporting thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Capacity check applied by `allocate`.
    pub enforcement: CapacityEnforcement,
    /// Serialize allocate/release per license so the capacity check and
    /// the insert cannot interleave with another allocation.
    pub serialize_allocations: bool,
    /// Reject allocations that carry no assignment target.
    pub require_assignment: bool,
    /// Below this utilization percentage a license with free slots is
    /// classified as underutilized.
    pub underutilized_threshold_pct: f64,
    /// Below this utilization percentage a license is a candidate for an
    /// optimization recommendation.
    pub optimization_threshold_pct: f64,
    /// Maximum number of recommendations returned.
    pub max_recommendations: usize,
    /// Savings strictly above this amount make a recommendation high priority.
    pub high_priority_savings: Amount,
    pub utilization_bands: UtilizationBands,
    pub waste_bands: WasteBands,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            enforcement: CapacityEnforcement::Lenient,
            serialize_allocations: false,
            require_assignment: false,
            underutilized_threshold_pct: 50.0,
            optimization_threshold_pct: 70.0,
            max_recommendations: 10,
            high_priority_savings: Amount::from_minor(100_000),
            utilization_bands: UtilizationBands::default(),
            waste_bands: WasteBands::default(),
        }
    }
}

/// Inconsistent ledger thresholds.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerConfigError {
    /// A percentage fell outside `0..=100`.
    #[error("{field} must be between 0 and 100, got {value}")]
    PercentOutOfRange {
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Band bounds must strictly descend from the top band down.
    #[error("{bands} band thresholds must be strictly descending")]
    BandsNotDescending {
        /// Which band set.
        bands: &'static str,
    },

    /// The savings threshold was negative.
    #[error("high_priority_savings must not be negative, got {0}")]
    NegativeSavings(Amount),
}

impl LedgerConfig {
    /// Check the thresholds are usable together.
    pub fn validate(&self) -> Result<(), LedgerConfigError> {
        let u = &self.utilization_bands;
        let w = &self.waste_bands;
        for (field, value) in [
            ("underutilized_threshold_pct", self.underutilized_threshold_pct),
            ("optimization_threshold_pct", self.optimization_threshold_pct),
            ("utilization_bands.excellent", u.excellent),
            ("utilization_bands.good", u.good),
            ("utilization_bands.moderate", u.moderate),
            ("waste_bands.critical", w.critical),
            ("waste_bands.high", w.high),
            ("waste_bands.moderate", w.moderate),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(LedgerConfigError::PercentOutOfRange { field, value });
            }
        }
        if !(u.excellent > u.good && u.good > u.moderate) {
            return Err(LedgerConfigError::BandsNotDescending { bands: "utilization" });
        }
        if !(w.critical > w.high && w.high > w.moderate) {
            return Err(LedgerConfigError::BandsNotDescending { bands: "waste" });
        }
        if self.high_priority_savings < Amount::ZERO {
            return Err(LedgerConfigError::NegativeSavings(self.high_priority_savings));
        }
        Ok(())
    }
}
