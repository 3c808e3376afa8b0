//! Auto-renew resolution.

use lic_core::{License, LicenseInstance};

/// Whether an instance renews automatically.
///
/// The instance's override wins when set; otherwise the license flag
/// applies. An instance pointing at a different license than the one
/// passed still resolves against the one passed, and is logged.
pub fn effective_auto_renew(instance: &LicenseInstance, license: &License) -> bool {
    if instance.license != license.id {
        tracing::warn!(
            instance = %instance.id,
            expected = %instance.license,
            got = %license.id,
            "auto-renew resolved against a license the instance does not belong to"
        );
    }
    instance.auto_renew.unwrap_or(license.auto_renew)
}
