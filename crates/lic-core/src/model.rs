//! # License Records
//!
//! The two records the ledger is built around:
//!
//! - [`License`]: a purchased pool of interchangeable slots from a vendor
//!   for a tenant. `consumed_licenses` is a denormalized counter owned by
//!   the ledger; nothing else should write it.
//! - [`LicenseInstance`]: one allocated slot, optionally bound to an
//!   [`AssignedObject`], with optional price, currency, and auto-renew
//!   overrides.
//!
//! Records are plain data with builder-style setters. Derived values live
//! in `lic-state` (status), `lic-pricing` (money), and `lic-ledger`
//! (utilization).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::assignment::{AssignedObject, AssignmentKind};
use crate::billing::BillingCycle;
use crate::error::LicError;
use crate::identity::{InstanceId, LicenseId, TenantId, VendorId};
use crate::money::{Amount, Currency};

/// Maximum length of a license name.
pub const LICENSE_NAME_MAX_LEN: usize = 30;

/// The natural key of a license: `(name, vendor, tenant)` is unique.
///
/// Deserialization goes through [`LicenseKey::new`], so a stored key is
/// held to the same name rules as one built in code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLicenseKey")]
pub struct LicenseKey {
    /// Product name as sold by the vendor.
    pub name: String,
    /// Vendor the license was bought from.
    pub vendor: VendorId,
    /// Tenant the license was bought for.
    pub tenant: TenantId,
}

impl LicenseKey {
    /// Build a key, trimming the name and enforcing its length limit.
    pub fn new(name: impl Into<String>, vendor: VendorId, tenant: TenantId) -> Result<Self, LicError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(LicError::Validation("license name must not be empty".to_string()));
        }
        if name.chars().count() > LICENSE_NAME_MAX_LEN {
            return Err(LicError::Validation(format!(
                "license name must not exceed {LICENSE_NAME_MAX_LEN} characters"
            )));
        }
        Ok(Self { name, vendor, tenant })
    }
}

#[derive(Deserialize)]
struct RawLicenseKey {
    name: String,
    vendor: VendorId,
    tenant: TenantId,
}

impl TryFrom<RawLicenseKey> for LicenseKey {
    type Error = LicError;

    fn try_from(raw: RawLicenseKey) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.vendor, raw.tenant)
    }
}

impl std::fmt::Display for LicenseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.vendor, self.tenant)
    }
}

/// A purchased pool of license slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    /// Unique identifier.
    pub id: LicenseId,
    /// Natural key (name, vendor, tenant).
    pub key: LicenseKey,
    /// The kind of object this license's instances are assigned to.
    pub assignment_kind: AssignmentKind,
    /// Unit price per slot per billing period.
    pub price: Amount,
    /// Currency of `price`.
    pub currency: Currency,
    /// How often `price` is charged.
    #[serde(default)]
    pub billing_cycle: BillingCycle,
    /// Whether the license renews automatically.
    #[serde(default)]
    pub auto_renew: bool,
    /// Slots purchased.
    pub total_licenses: u32,
    /// Slots currently allocated. Maintained by the ledger.
    #[serde(default)]
    pub consumed_licenses: u32,
    /// Vendor-side identifier (SKU, subscription id, license key).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Vendor-specific data (service plans, feature flags, API limits).
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    /// Free-form operator notes.
    #[serde(default)]
    pub comments: String,
}

impl License {
    /// Create a license with no consumed slots and a monthly billing cycle.
    pub fn new(
        key: LicenseKey,
        assignment_kind: AssignmentKind,
        price: Amount,
        currency: Currency,
        total_licenses: u32,
    ) -> Self {
        Self {
            id: LicenseId::new(),
            key,
            assignment_kind,
            price,
            currency,
            billing_cycle: BillingCycle::default(),
            auto_renew: false,
            total_licenses,
            consumed_licenses: 0,
            external_id: None,
            metadata: serde_json::Map::new(),
            comments: String::new(),
        }
    }

    /// Set the billing cycle.
    pub fn with_billing_cycle(mut self, cycle: BillingCycle) -> Self {
        self.billing_cycle = cycle;
        self
    }

    /// Set the auto-renew flag.
    pub fn with_auto_renew(mut self, auto_renew: bool) -> Self {
        self.auto_renew = auto_renew;
        self
    }

    /// Set the vendor-side identifier.
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// The product name.
    pub fn name(&self) -> &str {
        &self.key.name
    }
}

impl std::fmt::Display for License {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.key.name, self.key.vendor)
    }
}

/// One allocated slot of a [`License`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseInstance {
    /// Unique identifier.
    pub id: InstanceId,
    /// Owning license.
    pub license: LicenseId,
    /// What the slot is assigned to, if anything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_object: Option<AssignedObject>,
    /// Replaces the license unit price for this slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_override: Option<Amount>,
    /// Replaces the license currency for this slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_override: Option<Currency>,
    /// Price already expressed in the base currency; wins over everything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price_override: Option<Amount>,
    /// First day the slot is in use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Last day the slot is valid. `None` means no expiry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Auto-renew override; `None` inherits from the license.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_renew: Option<bool>,
    /// Free-form operator notes.
    #[serde(default)]
    pub comments: String,
}

impl LicenseInstance {
    /// Create an unassigned instance with no overrides or dates.
    pub fn new(license: LicenseId) -> Self {
        Self {
            id: InstanceId::new(),
            license,
            assigned_object: None,
            price_override: None,
            currency_override: None,
            base_price_override: None,
            start_date: None,
            end_date: None,
            auto_renew: None,
            comments: String::new(),
        }
    }

    /// Assign the slot to an object.
    pub fn assigned_to(mut self, target: AssignedObject) -> Self {
        self.assigned_object = Some(target);
        self
    }

    /// Override the unit price.
    pub fn with_price_override(mut self, price: Amount) -> Self {
        self.price_override = Some(price);
        self
    }

    /// Override the currency.
    pub fn with_currency_override(mut self, currency: Currency) -> Self {
        self.currency_override = Some(currency);
        self
    }

    /// Supply the price in the base currency directly.
    pub fn with_base_price_override(mut self, price: Amount) -> Self {
        self.base_price_override = Some(price);
        self
    }

    /// Set the validity window.
    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Set the auto-renew override (`None` inherits).
    pub fn with_auto_renew(mut self, auto_renew: Option<bool>) -> Self {
        self.auto_renew = auto_renew;
        self
    }

    /// Whether the slot is bound to an object.
    pub fn is_assigned(&self) -> bool {
        self.assigned_object.is_some()
    }
}

impl std::fmt::Display for LicenseInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.id, self.license)
    }
}
