//! # lic-pricing — Monetary Value of License Instances
//!
//! Resolves what one license instance costs, in its own currency and in
//! the configured base currency, and normalizes recurring charges to a
//! monthly figure for rollups.
//!
//! ## Resolution Order
//!
//! 1. An explicit base-currency price on the instance is used as-is.
//! 2. Otherwise, when the effective currency already is the base currency,
//!    the effective price is used.
//! 3. Otherwise there is no conversion source. The value is zero and the
//!    condition is logged; no exchange rate is ever guessed.
//!
//! Effective price is the instance price override, else the license unit
//! price. Effective currency is the instance currency override, else the
//! license currency.

pub mod config;
pub mod normalize;
pub mod resolver;
pub mod rollup;

pub use config::PricingConfig;
pub use normalize::monthly_equivalent;
pub use resolver::{PriceResolution, PricingResolver};
pub use rollup::{license_total_cost, recurring_monthly_total, CostEntry};
