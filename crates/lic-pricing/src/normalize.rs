//! Billing-cycle normalization.

use lic_core::{Amount, BillingCycle};

/// Monthly equivalent of a per-period charge.
///
/// Monthly, quarterly, and yearly charges are divided by 1, 3, and 12
/// (rounding half away from zero to the cent). One-time and custom cycles
/// have no monthly equivalent and contribute zero.
pub fn monthly_equivalent(amount: Amount, cycle: BillingCycle) -> Amount {
    match cycle.months_per_period() {
        Some(months) => amount.div_round(months),
        None => Amount::ZERO,
    }
}
