//! # Pricing Resolver
//!
//! Resolves the price of a license instance through its override chain
//! and values it in the base currency.
//!
//! Only the base-currency-required model is supported: a slot priced in
//! another currency must carry an explicit base-currency price, or it
//! values at zero. There is no conversion-rate field.

use serde::{Deserialize, Serialize};

use lic_core::{Amount, Currency, License, LicenseInstance};

use crate::config::PricingConfig;
use crate::normalize::monthly_equivalent;

/// How a base-currency value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PriceResolution {
    /// The instance carried an explicit base-currency price.
    BaseOverride {
        /// The override.
        amount: Amount,
    },
    /// The effective currency was already the base currency.
    Direct {
        /// The effective price.
        amount: Amount,
    },
    /// Non-base currency with no base-currency price. Values at zero.
    Unresolvable {
        /// The effective price that could not be converted.
        price: Amount,
        /// Its currency.
        currency: Currency,
        /// The base currency it needed converting to.
        base: Currency,
    },
}

impl PriceResolution {
    /// The base-currency value; zero when unresolvable.
    pub fn value(&self) -> Amount {
        match self {
            Self::BaseOverride { amount } | Self::Direct { amount } => *amount,
            Self::Unresolvable { .. } => Amount::ZERO,
        }
    }

    /// Whether a real value was found.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolvable { .. })
    }
}

/// Resolves effective and base-currency prices for license instances.
#[derive(Debug, Clone, Default)]
pub struct PricingResolver {
    base_currency: Currency,
}

impl PricingResolver {
    /// Create a resolver normalizing to the configured base currency.
    pub fn new(config: &PricingConfig) -> Self {
        Self {
            base_currency: config.base_currency,
        }
    }

    /// The currency rollups are expressed in.
    pub fn base_currency(&self) -> Currency {
        self.base_currency
    }

    /// Instance price override, else the license unit price.
    pub fn effective_price(&self, instance: &LicenseInstance, license: &License) -> Amount {
        instance.price_override.unwrap_or(license.price)
    }

    /// Instance currency override, else the license currency.
    pub fn effective_currency(&self, instance: &LicenseInstance, license: &License) -> Currency {
        instance.currency_override.unwrap_or(license.currency)
    }

    /// Walk the resolution chain for one instance.
    ///
    /// The unresolvable outcome is logged at `warn`; reporting carries on
    /// with a zero value.
    pub fn resolve(&self, instance: &LicenseInstance, license: &License) -> PriceResolution {
        if let Some(amount) = instance.base_price_override {
            return PriceResolution::BaseOverride { amount };
        }

        let price = self.effective_price(instance, license);
        let currency = self.effective_currency(instance, license);
        if currency == self.base_currency {
            return PriceResolution::Direct { amount: price };
        }

        tracing::warn!(
            instance = %instance.id,
            license = %license.id,
            price = %price,
            currency = %currency,
            base = %self.base_currency,
            "unresolvable price: no base-currency price for non-base-currency instance; valuing at zero"
        );
        PriceResolution::Unresolvable {
            price,
            currency,
            base: self.base_currency,
        }
    }

    /// Value of the instance in the base currency.
    pub fn base_currency_value(&self, instance: &LicenseInstance, license: &License) -> Amount {
        self.resolve(instance, license).value()
    }

    /// Monthly equivalent of the license unit price under its billing cycle.
    pub fn monthly_equivalent(&self, license: &License) -> Amount {
        monthly_equivalent(license.price, license.billing_cycle)
    }

    /// Monthly equivalent of one instance, in the base currency.
    pub fn instance_monthly_equivalent(&self, instance: &LicenseInstance, license: &License) -> Amount {
        monthly_equivalent(self.base_currency_value(instance, license), license.billing_cycle)
    }
}
