//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Once;

use chrono::{Duration, NaiveDate};
use tracing_subscriber::EnvFilter;

use lic_core::{Amount, AssignmentKind, Currency, License, LicenseKey, TenantId, VendorId};
use lic_ledger::{LedgerConfig, LicenseLedger, MemoryRepository};

/// Install a test-writer subscriber once per test binary.
///
/// `RUST_LOG` overrides the default `debug` filter.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// A fixed reference day.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
}

/// `today` shifted by `n` days.
pub fn day(n: i64) -> NaiveDate {
    today() + Duration::days(n)
}

pub fn amount(s: &str) -> Amount {
    Amount::parse(s).unwrap()
}

/// A NOK-priced, contact-assigned license.
pub fn license(name: &str, price: &str, total: u32) -> License {
    License::new(
        LicenseKey::new(name, VendorId(1), TenantId(1)).unwrap(),
        AssignmentKind::Contact,
        amount(price),
        Currency::Nok,
        total,
    )
}

pub fn ledger() -> LicenseLedger<MemoryRepository> {
    init_tracing();
    LicenseLedger::new(MemoryRepository::new(), LedgerConfig::default())
}

pub fn ledger_with(config: LedgerConfig) -> LicenseLedger<MemoryRepository> {
    init_tracing();
    LicenseLedger::new(MemoryRepository::new(), config)
}
