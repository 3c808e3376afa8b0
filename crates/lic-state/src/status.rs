//! # Instance Status
//!
//! The four derived states of a license instance.
//!
//! ```text
//!   start_date > today ─────────────────────────▶ PENDING
//!   end_date   < today ─────────────────────────▶ EXPIRED
//!   today ≤ end_date ≤ today + warning window ──▶ WARNING
//!   otherwise (including no dates) ─────────────▶ ACTIVE
//! ```
//!
//! Checks run top to bottom and the first match wins. An instance that
//! starts tomorrow but ended yesterday is PENDING.

use serde::{Deserialize, Serialize};

/// Time-based status of a license instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    /// Start date is in the future.
    Pending,
    /// In its validity window and not close to expiring.
    Active,
    /// Ends within the warning window.
    Warning,
    /// End date has passed.
    Expired,
}

impl InstanceStatus {
    /// Wire name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Warning => "warning",
            Self::Expired => "expired",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Active => "Active",
            Self::Warning => "Warning",
            Self::Expired => "Expired",
        }
    }

    /// Badge colour used by views rendering the status.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Pending => "info",
            Self::Active => "success",
            Self::Warning => "warning",
            Self::Expired => "danger",
        }
    }

    /// Whether the slot may be relied on today.
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Active | Self::Warning)
    }
}

impl std::fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
