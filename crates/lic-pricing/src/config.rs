//! Pricing configuration.

use lic_core::Currency;
use serde::{Deserialize, Serialize};

/// Settings for [`PricingResolver`](crate::PricingResolver).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Currency every rollup is expressed in.
    pub base_currency: Currency,
}
