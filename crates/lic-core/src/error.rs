//! # Error Types — Shared Error Taxonomy
//!
//! Defines the error types shared across the license ledger crates. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Validation errors ([`CapacityViolation`]) are surfaced to the caller
//!   at the point of the write attempt, with the exact overage.
//! - Data-consistency conditions ([`StaleReference`], unresolvable prices)
//!   are absorbed by the components that meet them and only logged; the
//!   types exist here so callers inspecting a report can name them.

use thiserror::Error;

use crate::assignment::AssignedObject;
use crate::identity::LicenseId;

/// Top-level error type for the license ledger.
#[derive(Error, Debug)]
pub enum LicError {
    /// A capacity rule rejected a write.
    #[error(transparent)]
    Capacity(#[from] CapacityViolation),

    /// A record referenced something that no longer exists.
    #[error(transparent)]
    Stale(#[from] StaleReference),

    /// A monetary amount could not be parsed or computed.
    #[error("amount error: {0}")]
    Amount(#[from] AmountError),

    /// A record failed field validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A write would leave a license with fewer slots than instances.
///
/// Raised in two situations:
///
/// - an edit lowers `total_licenses` below the live instance count
///   (`excess` is the number of instances that must be removed first);
/// - a strict allocation would push the instance count past
///   `total_licenses` (`excess` is the number of slots the allocation
///   would overshoot by).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "license {license} has {instance_count} instance(s) but capacity {requested_total} \
     was requested; remove {excess} instance(s) first"
)]
pub struct CapacityViolation {
    /// The license whose capacity was violated.
    pub license: LicenseId,
    /// The slot total the write asked for.
    pub requested_total: u32,
    /// Live instance count at the time of the check.
    pub instance_count: u32,
    /// How many instances over capacity the write would leave the license.
    pub excess: u32,
}

/// A record refers to something that no longer exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StaleReference {
    /// An instance's owning license is gone.
    #[error("stale reference to license {0}")]
    License(LicenseId),

    /// An instance's assigned object is gone.
    #[error("stale reference to assigned object {0}")]
    Assignment(AssignedObject),
}

/// Errors parsing or computing fixed-point amounts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// Input was empty after trimming.
    #[error("amount is empty")]
    Empty,

    /// Input was not a decimal number.
    #[error("malformed amount {0:?}")]
    Malformed(String),

    /// Input had more than two fractional digits.
    #[error("amount {0:?} has more than two decimal places")]
    TooPrecise(String),

    /// The value does not fit in `i64` minor units.
    #[error("amount overflow")]
    Overflow,
}
