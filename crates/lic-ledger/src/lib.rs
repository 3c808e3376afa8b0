//! # lic-ledger — License Consumption Ledger
//!
//! Owns the one denormalized value in the license model,
//! `License::consumed_licenses`, and every write that can change it.
//!
//! ## Design
//!
//! - [`LicenseLedger`] works over any [`LicenseRepository`]. The
//!   relational store a deployment uses implements the trait;
//!   [`MemoryRepository`] is the in-process implementation.
//! - Callers that write instances themselves invoke
//!   [`LicenseLedger::on_instance_created`] and
//!   [`LicenseLedger::on_instance_deleted`] afterwards. Callers that want
//!   capacity checks use [`LicenseLedger::allocate`] and
//!   [`LicenseLedger::release`], which do both.
//! - Utilization metrics and classifications in [`utilization`] and
//!   [`optimization`] are pure functions of a [`License`](lic_core::License)
//!   and a [`LedgerConfig`].
//! - [`Settings`] loads the ledger, lifecycle, and pricing configuration
//!   from one YAML document.

pub mod config;
pub mod error;
pub mod ledger;
pub mod memory;
pub mod optimization;
pub mod repository;
pub mod settings;
pub mod utilization;

pub use config::{CapacityEnforcement, LedgerConfig, LedgerConfigError, UtilizationBands, WasteBands};
pub use error::LedgerError;
pub use ledger::{LicenseLedger, RecomputeOutcome, RecomputeSummary};
pub use memory::MemoryRepository;
pub use optimization::{OptimizationRecommendation, RecommendationPriority};
pub use repository::{LicenseRepository, Recount, RepositoryError};
pub use settings::{Settings, SettingsError, CONFIG_ENV};
pub use utilization::{AllocationState, UtilizationBand, UtilizationSnapshot, WasteBand};
