//! # Optimization Recommendations
//!
//! Suggests shrinking licenses that carry many unused slots.
//!
//! A license qualifies when it has at least one slot and its utilization
//! is below `optimization_threshold_pct`. Candidates are ranked by total
//! slots, largest first, and the list is capped at `max_recommendations`.
//! The recommended total keeps two slots or ten percent of headroom over
//! current consumption, whichever is larger. A license whose recommended
//! total would not be below its current total is never recommended.

use serde::{Deserialize, Serialize};

use lic_core::{Amount, Currency, License, LicenseId};

use crate::config::LedgerConfig;
use crate::utilization::{available, utilization_percentage};

/// How urgently a recommendation should be acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationPriority {
    High,
    Medium,
}

/// A suggestion to reduce a license's slot count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationRecommendation {
    pub license: LicenseId,
    pub name: String,
    pub current_total: u32,
    pub current_used: u32,
    pub recommended_total: u32,
    /// Unused slots times the unit price, in `currency`.
    pub potential_savings: Amount,
    pub currency: Currency,
    pub priority: RecommendationPriority,
}

impl OptimizationRecommendation {
    /// One-line operator summary.
    pub fn description(&self) -> String {
        format!(
            "Reduce {} from {} to {} licenses",
            self.name, self.current_total, self.recommended_total
        )
    }
}

/// Slot count to shrink to: `max(consumed + 2, ⌊consumed × 1.1⌋)`.
pub fn recommended_total(consumed: u32) -> u32 {
    let headroom = u32::try_from(u64::from(consumed) * 11 / 10).unwrap_or(u32::MAX);
    consumed.saturating_add(2).max(headroom)
}

/// Build the recommendation list for a set of licenses.
pub fn recommendations(licenses: &[License], config: &LedgerConfig) -> Vec<OptimizationRecommendation> {
    let mut candidates: Vec<&License> = licenses
        .iter()
        .filter(|lic| lic.total_licenses > 0)
        .filter(|lic| utilization_percentage(lic) < config.optimization_threshold_pct)
        .filter(|lic| recommended_total(lic.consumed_licenses) < lic.total_licenses)
        .collect();
    candidates.sort_by(|a, b| {
        b.total_licenses
            .cmp(&a.total_licenses)
            .then_with(|| a.name().cmp(b.name()))
    });

    candidates
        .into_iter()
        .take(config.max_recommendations)
        .map(|lic| {
            let unused = available(lic).max(0);
            let potential_savings = lic.price.saturating_mul(unused);
            let priority = if potential_savings > config.high_priority_savings {
                RecommendationPriority::High
            } else {
                RecommendationPriority::Medium
            };
            OptimizationRecommendation {
                license: lic.id,
                name: lic.name().to_string(),
                current_total: lic.total_licenses,
                current_used: lic.consumed_licenses,
                recommended_total: recommended_total(lic.consumed_licenses),
                potential_savings,
                currency: lic.currency,
                priority,
            }
        })
        .collect()
}
