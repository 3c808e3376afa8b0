//! # Cost Rollups
//!
//! Aggregates instance prices per license and across licenses.

use lic_core::{Amount, License, LicenseInstance};

use crate::resolver::PricingResolver;

/// A license together with its instances, as handed to rollups.
#[derive(Debug, Clone, Copy)]
pub struct CostEntry<'a> {
    /// The license.
    pub license: &'a License,
    /// Its instances.
    pub instances: &'a [LicenseInstance],
}

/// Sum of the effective prices of a license's instances.
///
/// Expressed in each instance's effective currency with no conversion, so
/// the figure is only meaningful when overrides keep to one currency.
/// Instances belonging to another license are skipped.
pub fn license_total_cost(
    resolver: &PricingResolver,
    license: &License,
    instances: &[LicenseInstance],
) -> Amount {
    instances
        .iter()
        .filter(|inst| inst.license == license.id)
        .map(|inst| resolver.effective_price(inst, license))
        .sum()
}

/// Recurring monthly cost across licenses, in the base currency.
///
/// Each instance contributes its base-currency value normalized by its
/// license's billing cycle. One-time and custom licenses contribute zero;
/// unresolvable prices contribute zero and are logged by the resolver.
pub fn recurring_monthly_total<'a, I>(resolver: &PricingResolver, entries: I) -> Amount
where
    I: IntoIterator<Item = CostEntry<'a>>,
{
    entries
        .into_iter()
        .filter(|entry| entry.license.billing_cycle.is_recurring())
        .flat_map(|entry| {
            entry
                .instances
                .iter()
                .filter(move |inst| inst.license == entry.license.id)
                .map(move |inst| resolver.instance_monthly_equivalent(inst, entry.license))
        })
        .sum()
}
