//! Ledger write errors.

use thiserror::Error;

use lic_core::{AssignmentKind, CapacityViolation, InstanceId, LicenseId};

use crate::repository::RepositoryError;

/// Errors surfaced by explicit ledger writes.
///
/// Recomputation never produces [`LedgerError::UnknownLicense`]: a missing
/// license there is logged and skipped.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The write would leave the license over capacity.
    #[error(transparent)]
    Capacity(#[from] CapacityViolation),

    /// The repository failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The license named by the write does not exist.
    #[error("{0} not found")]
    UnknownLicense(LicenseId),

    /// The instance named by the write does not exist.
    #[error("{0} not found")]
    UnknownInstance(InstanceId),

    /// The instance targets an object the license cannot be assigned to.
    #[error("{license} is assigned to {expected} objects, not {actual}")]
    AssignmentKindMismatch {
        /// The license being allocated from.
        license: LicenseId,
        /// The kind the license declares.
        expected: AssignmentKind,
        /// The kind of the instance's target.
        actual: AssignmentKind,
    },

    /// The instance has no assignment target and targets are required.
    #[error("instances of {license} must be assigned to an object")]
    AssignmentRequired {
        /// The license being allocated from.
        license: LicenseId,
    },

    /// The license still has instances and cannot be removed.
    #[error("{license} still has {instances} instance(s)")]
    LicenseInUse {
        /// The license.
        license: LicenseId,
        /// Live instance count.
        instances: u32,
    },
}
