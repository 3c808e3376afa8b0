//! # Billing Cycles
//!
//! How often a license is billed. Recurring cycles map to a number of
//! months per billing period; one-time and custom purchases have no fixed
//! period and therefore no monthly equivalent.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::LicError;

/// How frequently a license is billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingCycle {
    /// Billed every month.
    #[default]
    Monthly,
    /// Billed every three months.
    Quarterly,
    /// Billed every twelve months.
    Yearly,
    /// Bought once; no recurring charge.
    OneTime,
    /// Billed on a negotiated schedule the ledger does not model.
    Custom,
}

impl BillingCycle {
    /// Number of months a single charge covers, or `None` when the cycle
    /// is not recurring on a fixed period.
    pub fn months_per_period(&self) -> Option<i64> {
        match self {
            Self::Monthly => Some(1),
            Self::Quarterly => Some(3),
            Self::Yearly => Some(12),
            Self::OneTime | Self::Custom => None,
        }
    }

    /// Whether the cycle contributes to recurring cost totals.
    pub fn is_recurring(&self) -> bool {
        self.months_per_period().is_some()
    }

    /// Wire name of this cycle.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
            Self::OneTime => "one_time",
            Self::Custom => "custom",
        }
    }
}

impl std::fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingCycle {
    type Err = LicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            "one_time" => Ok(Self::OneTime),
            "custom" => Ok(Self::Custom),
            other => Err(LicError::Validation(format!("unknown billing cycle {other:?}"))),
        }
    }
}
