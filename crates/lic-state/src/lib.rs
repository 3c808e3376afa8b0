//! # lic-state — Derived Lifecycle Status for License Instances
//!
//! Classifies a license instance relative to "today". Nothing here is
//! persisted: every query recomputes from the instance's dates, so a
//! status can never go stale.
//!
//! ## Classifications
//!
//! - **Instance status** (`status.rs`): `PENDING → ACTIVE → WARNING →
//!   EXPIRED` as the calendar moves, with PENDING checked first.
//!
//! - **Renewal urgency** (`urgency.rs`): a coarser scale used by reporting
//!   (`expired`, `critical`, `warning`, `active`, `no_expiry`) with its own
//!   day thresholds. The two scales are deliberately not unified.
//!
//! - **Auto-renew** (`renewal.rs`): the instance's tri-state override
//!   resolved against the license default.
//!
//! ## Design
//!
//! Thresholds come from [`LifecycleConfig`], passed to
//! [`LifecycleClassifier::new`]. There are no module-level constants that
//! callers cannot override.

pub mod classifier;
pub mod config;
pub mod renewal;
pub mod status;
pub mod urgency;

pub use classifier::LifecycleClassifier;
pub use config::{LifecycleConfig, LifecycleConfigError};
pub use renewal::effective_auto_renew;
pub use status::InstanceStatus;
pub use urgency::RenewalUrgency;
