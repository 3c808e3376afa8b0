//! # Repository Seam
//!
//! The ledger reads and writes licenses and instances through
//! [`LicenseRepository`]. A relational backend implements it over its own
//! tables; [`MemoryRepository`](crate::memory::MemoryRepository) implements
//! it over in-process maps.
//!
//! ## Contract
//!
//! - `(name, vendor, tenant)` is unique across licenses. Inserting or
//!   saving a license whose key collides with another license fails with
//!   [`RepositoryError::DuplicateKey`].
//! - Instances may reference a license that does not exist. Out-of-band
//!   data does that, and the ledger is expected to cope.
//! - `consumed_licenses` is written only through
//!   [`recount_consumed`](LicenseRepository::recount_consumed) and
//!   [`set_consumed`](LicenseRepository::set_consumed).
//!   [`save_license`](LicenseRepository::save_license) keeps the stored
//!   counter.
//! - `recount_consumed` counts and stores in one step. No instance insert
//!   or delete may land between the count and the write; a relational
//!   backend runs it as a single
//!   `UPDATE ... SET consumed = (SELECT COUNT(*) ...)`.

use thiserror::Error;

use lic_core::{InstanceId, License, LicenseId, LicenseInstance, LicenseKey};

/// Errors raised by a repository backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Another license already uses this natural key.
    #[error("a license named {0} already exists")]
    DuplicateKey(LicenseKey),

    /// A license with this id already exists.
    #[error("{0} already exists")]
    DuplicateLicense(LicenseId),

    /// An instance with this id already exists.
    #[error("{0} already exists")]
    DuplicateInstance(InstanceId),

    /// The license to save does not exist.
    #[error("{0} not found")]
    LicenseNotFound(LicenseId),

    /// The backend failed.
    #[error("repository backend error: {0}")]
    Backend(String),
}

/// Counter values observed by [`LicenseRepository::recount_consumed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recount {
    /// Stored counter before the recount.
    pub previous: u32,
    /// Live instance count, now stored.
    pub consumed: u32,
    /// The license's slot total.
    pub total: u32,
}

/// Storage for licenses and their instances.
pub trait LicenseRepository: Send + Sync {
    /// Fetch one license.
    fn license(&self, id: LicenseId) -> Result<Option<License>, RepositoryError>;

    /// All licenses, in no particular order.
    fn licenses(&self) -> Result<Vec<License>, RepositoryError>;

    /// Store a new license.
    fn insert_license(&self, license: License) -> Result<(), RepositoryError>;

    /// Overwrite an existing license, keeping its stored consumed counter.
    fn save_license(&self, license: &License) -> Result<(), RepositoryError>;

    /// Delete a license, returning it if it existed.
    fn delete_license(&self, id: LicenseId) -> Result<Option<License>, RepositoryError>;

    /// Write the consumed counter. Returns `false` if the license is gone.
    fn set_consumed(&self, id: LicenseId, consumed: u32) -> Result<bool, RepositoryError>;

    /// Count the license's instances and store the count as its consumed
    /// counter, atomically. `None` if the license is gone.
    fn recount_consumed(&self, id: LicenseId) -> Result<Option<Recount>, RepositoryError>;

    /// All instances, including ones whose license is gone.
    fn instances(&self) -> Result<Vec<LicenseInstance>, RepositoryError>;

    /// Fetch one instance.
    fn instance(&self, id: InstanceId) -> Result<Option<LicenseInstance>, RepositoryError>;

    /// Instances whose owning license is `license`.
    fn instances_of(&self, license: LicenseId) -> Result<Vec<LicenseInstance>, RepositoryError>;

    /// Number of instances whose owning license is `license`.
    fn count_instances(&self, license: LicenseId) -> Result<u32, RepositoryError>;

    /// Store a new instance.
    fn insert_instance(&self, instance: LicenseInstance) -> Result<(), RepositoryError>;

    /// Delete an instance, returning it if it existed.
    fn delete_instance(&self, id: InstanceId) -> Result<Option<LicenseInstance>, RepositoryError>;
}
