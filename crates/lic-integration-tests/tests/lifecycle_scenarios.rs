//! Lifecycle status and renewal urgency across the classifier and the
//! ledger's expiry report.

mod common;

use lic_core::{AssignedObject, LicenseInstance};
use lic_state::{effective_auto_renew, InstanceStatus, LifecycleClassifier, RenewalUrgency};

use common::{day, ledger, license, today};

fn instance_ending(end: i64) -> LicenseInstance {
    LicenseInstance::new(lic_core::LicenseId::new()).with_dates(None, Some(day(end)))
}

#[test]
fn status_moves_with_end_date() {
    let c = LifecycleClassifier::default();
    assert_eq!(c.status(&instance_ending(15), today()), InstanceStatus::Warning);
    assert_eq!(c.status(&instance_ending(45), today()), InstanceStatus::Active);
    assert_eq!(c.status(&instance_ending(-1), today()), InstanceStatus::Expired);
}

#[test]
fn future_start_wins_over_past_end() {
    let c = LifecycleClassifier::default();
    let anomaly = LicenseInstance::new(lic_core::LicenseId::new()).with_dates(Some(day(1)), Some(day(-1)));
    assert_eq!(c.status(&anomaly, today()), InstanceStatus::Pending);
    assert_eq!(c.status(&anomaly, today()).css_class(), "info");
}

#[test]
fn undated_instance_is_active_and_never_expires() {
    let c = LifecycleClassifier::default();
    let inst = LicenseInstance::new(lic_core::LicenseId::new());
    assert_eq!(c.status(&inst, today()), InstanceStatus::Active);
    assert_eq!(c.renewal_urgency(inst.end_date, today()), RenewalUrgency::NoExpiry);
}

#[test]
fn urgency_uses_its_own_thresholds() {
    let c = LifecycleClassifier::default();
    let cases = [
        (-1, RenewalUrgency::Expired, InstanceStatus::Expired),
        (5, RenewalUrgency::Critical, InstanceStatus::Warning),
        (20, RenewalUrgency::Warning, InstanceStatus::Warning),
        (60, RenewalUrgency::Active, InstanceStatus::Active),
    ];
    for (offset, urgency, status) in cases {
        let inst = instance_ending(offset);
        assert_eq!(c.renewal_urgency(inst.end_date, today()), urgency, "offset {offset}");
        assert_eq!(c.status(&inst, today()), status, "offset {offset}");
    }
}

#[test]
fn auto_renew_override_and_inheritance() {
    let lic = license("Backup", "10", 5).with_auto_renew(true);
    let inherit = LicenseInstance::new(lic.id);
    let opt_out = LicenseInstance::new(lic.id).with_auto_renew(Some(false));
    assert!(effective_auto_renew(&inherit, &lic));
    assert!(!effective_auto_renew(&opt_out, &lic));
}

#[test]
fn ledger_lists_instances_expiring_soon() {
    let l = ledger();
    let lic = l.register_license(license("Office", "100", 10)).unwrap();
    let soon = l
        .allocate(LicenseInstance::new(lic.id).with_dates(None, Some(day(3))))
        .unwrap();
    let later = l
        .allocate(LicenseInstance::new(lic.id).with_dates(None, Some(day(25))))
        .unwrap();
    l.allocate(LicenseInstance::new(lic.id).with_dates(None, Some(day(90))))
        .unwrap();
    l.allocate(LicenseInstance::new(lic.id).with_dates(None, Some(day(-2))))
        .unwrap();
    l.allocate(LicenseInstance::new(lic.id)).unwrap();

    let expiring = l.expiring(30, today()).unwrap();
    let ids: Vec<_> = expiring.iter().map(|inst| inst.id).collect();
    assert_eq!(ids, vec![soon.id, later.id]);
}

#[test]
fn expired_but_still_assigned() {
    let c = LifecycleClassifier::default();
    let lic = lic_core::LicenseId::new();
    let all = vec![
        LicenseInstance::new(lic)
            .with_dates(None, Some(day(-10)))
            .assigned_to(AssignedObject::Contact(4)),
        LicenseInstance::new(lic).with_dates(None, Some(day(-10))),
    ];
    let hits = c.expired_assigned(&all, today());
    assert_eq!(hits.len(), 1);
    assert!(!c.is_available(&all[1], today()));
}
