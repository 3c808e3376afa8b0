//! # lic-core — Foundational Types for the License Ledger
//!
//! This crate is the leaf of the workspace DAG. It defines the records the
//! ledger, lifecycle classifier, and pricing resolver all operate on, and
//! the primitive types those records are built from.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `LicenseId`, `InstanceId`, `VendorId`,
//!    `TenantId`; you cannot pass an instance id where a license id is
//!    expected.
//!
//! 2. **Fixed-point money.** [`Amount`] stores minor units in an `i64`.
//!    Prices never pass through `f64`; only the utilization percentage
//!    (a ratio, not money) is floating point.
//!
//! 3. **Closed assignment targets.** [`AssignedObject`] is a tagged union
//!    over the five assignable kinds. There is no open-ended type+id pair
//!    to resolve at runtime.
//!
//! 4. **Records are plain data.** [`License`] and [`LicenseInstance`] carry
//!    no behaviour that needs a datastore. Derived values (status, price,
//!    utilization) are computed by the crates that own those rules.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `lic-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod assignment;
pub mod billing;
pub mod error;
pub mod identity;
pub mod model;
pub mod money;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use assignment::{AssignedObject, AssignmentDirectory, AssignmentKind, AssumePresent};
pub use billing::BillingCycle;
pub use error::{AmountError, CapacityViolation, LicError, StaleReference};
pub use identity::{InstanceId, LicenseId, TenantId, VendorId};
pub use model::{License, LicenseInstance, LicenseKey, LICENSE_NAME_MAX_LEN};
pub use money::{Amount, Currency};
pub use temporal::{days_remaining, utc_today};
