//! # Renewal Urgency
//!
//! Reporting buckets for how soon an instance needs renewing. This scale
//! is independent of [`InstanceStatus`](crate::InstanceStatus): it has a
//! `critical` tier and a separate bucket for instances with no end date.

use serde::{Deserialize, Serialize};

/// How urgently an instance needs renewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenewalUrgency {
    /// End date already passed.
    Expired,
    /// Ends within the critical window.
    Critical,
    /// Ends within the warning window.
    Warning,
    /// Ends later than the warning window.
    Active,
    /// No end date.
    NoExpiry,
}

impl RenewalUrgency {
    /// Wire name of this bucket.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Active => "active",
            Self::NoExpiry => "no_expiry",
        }
    }

    /// Whether an operator should act on this instance.
    pub fn needs_attention(&self) -> bool {
        matches!(self, Self::Expired | Self::Critical | Self::Warning)
    }
}

impl std::fmt::Display for RenewalUrgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
