//! # Utilization
//!
//! Derived slot metrics for one license and the classifications reporting
//! builds on them.
//!
//! ## Design
//!
//! All metrics read the stored `total_licenses` and `consumed_licenses`.
//! Overallocation is a reportable condition, not an error: [`available`]
//! goes negative and [`utilization_percentage`] goes above 100 rather than
//! being clamped.

use serde::{Deserialize, Serialize};

use lic_core::{License, LicenseId};

use crate::config::{LedgerConfig, UtilizationBands, WasteBands};

/// Free slots. Negative when overallocated.
pub fn available(license: &License) -> i64 {
    i64::from(license.total_licenses) - i64::from(license.consumed_licenses)
}

/// Consumed slots as a percentage of total. Zero when total is zero.
pub fn utilization_percentage(license: &License) -> f64 {
    if license.total_licenses == 0 {
        return 0.0;
    }
    f64::from(license.consumed_licenses) / f64::from(license.total_licenses) * 100.0
}

/// Unused slots as a percentage of total. Zero when total is zero or when
/// the license is overallocated.
pub fn waste_percentage(license: &License) -> f64 {
    if license.total_licenses == 0 {
        return 0.0;
    }
    (available(license).max(0) as f64) / f64::from(license.total_licenses) * 100.0
}

/// Whether at least one slot is free.
pub fn can_allocate(license: &License) -> bool {
    available(license) > 0
}

// ─── Allocation State ───────────────────────────────────────────────

/// Where a license stands against its capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AllocationState {
    /// More instances than slots.
    Overallocated {
        /// Instances over capacity.
        excess: u32,
    },
    /// Every slot is taken. A zero-slot license with no instances is full.
    Full,
    /// Free slots, utilization below the underutilized threshold.
    Underutilized {
        /// Free slots.
        free: u32,
    },
    /// Free slots, utilization at or above the underutilized threshold.
    Available {
        /// Free slots.
        free: u32,
    },
}

impl AllocationState {
    /// Classify a license.
    pub fn of(license: &License, underutilized_threshold_pct: f64) -> Self {
        let total = license.total_licenses;
        let consumed = license.consumed_licenses;
        if consumed > total {
            return Self::Overallocated {
                excess: consumed - total,
            };
        }
        let free = total - consumed;
        if free == 0 {
            Self::Full
        } else if utilization_percentage(license) < underutilized_threshold_pct {
            Self::Underutilized { free }
        } else {
            Self::Available { free }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overallocated { .. } => "overallocated",
            Self::Full => "full",
            Self::Underutilized { .. } => "underutilized",
            Self::Available { .. } => "available",
        }
    }
}

impl std::fmt::Display for AllocationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Bands ──────────────────────────────────────────────────────────

/// Utilization quality. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationBand {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl UtilizationBand {
    /// Band for a utilization percentage.
    pub fn classify(pct: f64, bands: &UtilizationBands) -> Self {
        if pct >= bands.excellent {
            Self::Excellent
        } else if pct >= bands.good {
            Self::Good
        } else if pct >= bands.moderate {
            Self::Moderate
        } else {
            Self::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Poor => "poor",
        }
    }
}

impl std::fmt::Display for UtilizationBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Waste severity. Higher is worse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WasteBand {
    Critical,
    High,
    Moderate,
    Low,
}

impl WasteBand {
    /// Band for a waste percentage.
    pub fn classify(pct: f64, bands: &WasteBands) -> Self {
        if pct >= bands.critical {
            Self::Critical
        } else if pct >= bands.high {
            Self::High
        } else if pct >= bands.moderate {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Moderate => "moderate",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for WasteBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Snapshot ───────────────────────────────────────────────────────

/// Per-license utilization summary for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationSnapshot {
    pub license: LicenseId,
    pub name: String,
    pub total: u32,
    pub consumed: u32,
    pub available: i64,
    pub utilization_pct: f64,
    pub waste_pct: f64,
    pub band: UtilizationBand,
    pub waste: WasteBand,
    pub state: AllocationState,
}

impl UtilizationSnapshot {
    /// Summarize a license under the given thresholds.
    pub fn of(license: &License, config: &LedgerConfig) -> Self {
        let utilization_pct = utilization_percentage(license);
        let waste_pct = waste_percentage(license);
        Self {
            license: license.id,
            name: license.name().to_string(),
            total: license.total_licenses,
            consumed: license.consumed_licenses,
            available: available(license),
            utilization_pct,
            waste_pct,
            band: UtilizationBand::classify(utilization_pct, &config.utilization_bands),
            waste: WasteBand::classify(waste_pct, &config.waste_bands),
            state: AllocationState::of(license, config.underutilized_threshold_pct),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lic_core::{Amount, AssignmentKind, Currency, LicenseKey, TenantId, VendorId};

    fn license(total: u32, consumed: u32) -> License {
        let mut lic = License::new(
            LicenseKey::new("Office", VendorId(1), TenantId(1)).unwrap(),
            AssignmentKind::Contact,
            Amount::from_minor(10_000),
            Currency::Nok,
            total,
        );
        lic.consumed_licenses = consumed;
        lic
    }

    #[test]
    fn zero_total_is_zero_percent() {
        let lic = license(0, 0);
        assert_eq!(utilization_percentage(&lic), 0.0);
        assert_eq!(waste_percentage(&lic), 0.0);
        assert_eq!(available(&lic), 0);
        assert!(!can_allocate(&lic));

        let stray = license(0, 3);
        assert_eq!(utilization_percentage(&stray), 0.0);
        assert_eq!(available(&stray), -3);
    }

    #[test]
    fn overallocation_is_not_clamped() {
        let lic = license(4, 6);
        assert_eq!(available(&lic), -2);
        assert_eq!(utilization_percentage(&lic), 150.0);
        assert_eq!(waste_percentage(&lic), 0.0);
        assert!(!can_allocate(&lic));
    }

    #[test]
    fn plain_ratio() {
        let lic = license(8, 2);
        assert_eq!(available(&lic), 6);
        assert_eq!(utilization_percentage(&lic), 25.0);
        assert_eq!(waste_percentage(&lic), 75.0);
        assert!(can_allocate(&lic));
    }

    #[test]
    fn allocation_states() {
        assert_eq!(AllocationState::of(&license(4, 6), 50.0), AllocationState::Overallocated { excess: 2 });
        assert_eq!(AllocationState::of(&license(5, 5), 50.0), AllocationState::Full);
        assert_eq!(AllocationState::of(&license(0, 0), 50.0), AllocationState::Full);
        assert_eq!(AllocationState::of(&license(10, 4), 50.0), AllocationState::Underutilized { free: 6 });
        assert_eq!(AllocationState::of(&license(10, 5), 50.0), AllocationState::Available { free: 5 });
    }

    #[test]
    fn utilization_band_edges() {
        let b = UtilizationBands::default();
        assert_eq!(UtilizationBand::classify(90.0, &b), UtilizationBand::Excellent);
        assert_eq!(UtilizationBand::classify(150.0, &b), UtilizationBand::Excellent);
        assert_eq!(UtilizationBand::classify(89.9, &b), UtilizationBand::Good);
        assert_eq!(UtilizationBand::classify(70.0, &b), UtilizationBand::Good);
        assert_eq!(UtilizationBand::classify(50.0, &b), UtilizationBand::Moderate);
        assert_eq!(UtilizationBand::classify(49.9, &b), UtilizationBand::Poor);
    }

    #[test]
    fn waste_band_edges() {
        let b = WasteBands::default();
        assert_eq!(WasteBand::classify(80.0, &b), WasteBand::Critical);
        assert_eq!(WasteBand::classify(50.0, &b), WasteBand::High);
        assert_eq!(WasteBand::classify(30.0, &b), WasteBand::Moderate);
        assert_eq!(WasteBand::classify(29.9, &b), WasteBand::Low);
    }

    #[test]
    fn snapshot_combines_metrics() {
        let snap = UtilizationSnapshot::of(&license(10, 9), &LedgerConfig::default());
        assert_eq!(snap.available, 1);
        assert_eq!(snap.utilization_pct, 90.0);
        assert_eq!(snap.band, UtilizationBand::Excellent);
        assert_eq!(snap.waste, WasteBand::Low);
        assert_eq!(snap.state, AllocationState::Available { free: 1 });
        assert_eq!(snap.name, "Office");
    }

    #[test]
    fn state_serializes_with_tag() {
        let json = serde_json::to_value(AllocationState::Overallocated { excess: 2 }).unwrap();
        assert_eq!(json, serde_json::json!({"state": "overallocated", "excess": 2}));
    }

    proptest::proptest! {
        #[test]
        fn state_agrees_with_available(total in 0u32..500, consumed in 0u32..700, threshold in 0.0f64..100.0) {
            let lic = license(total, consumed);
            let free = available(&lic);
            proptest::prop_assert_eq!(can_allocate(&lic), free > 0);
            match AllocationState::of(&lic, threshold) {
                AllocationState::Overallocated { excess } => {
                    proptest::prop_assert_eq!(-i64::from(excess), free);
                }
                AllocationState::Full => proptest::prop_assert_eq!(free, 0),
                AllocationState::Underutilized { free: f } | AllocationState::Available { free: f } => {
                    proptest::prop_assert_eq!(i64::from(f), free);
                    proptest::prop_assert!(f > 0);
                }
            }
        }
    }
}
