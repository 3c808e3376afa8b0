//! # License Ledger
//!
//! Keeps `License::consumed_licenses` equal to the number of instances that
//! reference the license, and performs the writes that change that number.
//!
//! ## Design
//!
//! - **Recompute, never increment.** Every instance create or delete
//!   recounts the owning license's instances from the repository. A
//!   counter damaged by an out-of-band edit is corrected by the next
//!   mutation, and running the recompute twice changes nothing.
//! - **Missing licenses are skipped.** A recompute against a license that
//!   no longer exists logs a warning and returns
//!   [`RecomputeOutcome::SkippedMissing`]. Explicit writes (edit, allocate,
//!   release) report missing records as [`LedgerError`]s.
//! - **Capacity is checked against live instances.** Shrinking
//!   `total_licenses` below the live instance count is rejected with a
//!   [`CapacityViolation`] naming how many instances must go first.
//! - **Allocation races are tolerated by default.** Two concurrent
//!   allocations may both pass a strict capacity check; the recompute
//!   reports the resulting overallocation. Setting
//!   `serialize_allocations` takes a per-license mutex around the
//!   check-and-insert instead.

use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use lic_core::{
    Amount, AssignmentDirectory, CapacityViolation, InstanceId, License, LicenseId,
    LicenseInstance, StaleReference,
};
use lic_pricing::{recurring_monthly_total, CostEntry, PricingResolver};
use lic_state::LifecycleClassifier;

use crate::config::{CapacityEnforcement, LedgerConfig};
use crate::error::LedgerError;
use crate::optimization::{recommendations, OptimizationRecommendation};
use crate::repository::{LicenseRepository, Recount};
use crate::settings::Settings;
use crate::utilization::{self, AllocationState, UtilizationSnapshot};

/// Result of recomputing one license's consumed count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecomputeOutcome {
    /// The stored counter already matched.
    Unchanged {
        /// Live instance count.
        consumed: u32,
    },
    /// The stored counter was rewritten.
    Updated {
        /// Counter before the recompute.
        previous: u32,
        /// Live instance count.
        consumed: u32,
    },
    /// The license no longer exists.
    SkippedMissing,
}

/// Totals from a full recompute sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecomputeSummary {
    pub unchanged: usize,
    pub updated: usize,
    pub skipped: usize,
}

impl RecomputeSummary {
    fn record(&mut self, outcome: RecomputeOutcome) {
        match outcome {
            RecomputeOutcome::Unchanged { .. } => self.unchanged += 1,
            RecomputeOutcome::Updated { .. } => self.updated += 1,
            RecomputeOutcome::SkippedMissing => self.skipped += 1,
        }
    }
}

/// The consumption ledger over a [`LicenseRepository`].
pub struct LicenseLedger<R: LicenseRepository> {
    repo: R,
    config: LedgerConfig,
    classifier: LifecycleClassifier,
    pricing: PricingResolver,
    allocation_locks: DashMap<LicenseId, Arc<Mutex<()>>>,
}

impl<R: LicenseRepository> std::fmt::Debug for LicenseLedger<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LicenseLedger")
            .field("config", &self.config)
            .field("classifier", &self.classifier)
            .field("pricing", &self.pricing)
            .finish_non_exhaustive()
    }
}

impl<R: LicenseRepository> LicenseLedger<R> {
    /// Create a ledger with default lifecycle and pricing settings.
    pub fn new(repo: R, config: LedgerConfig) -> Self {
        Self {
            repo,
            config,
            classifier: LifecycleClassifier::default(),
            pricing: PricingResolver::default(),
            allocation_locks: DashMap::new(),
        }
    }

    /// Create a ledger from loaded settings.
    pub fn from_settings(repo: R, settings: &Settings) -> Self {
        Self {
            repo,
            config: settings.ledger.clone(),
            classifier: LifecycleClassifier::new(settings.lifecycle.clone()),
            pricing: PricingResolver::new(&settings.pricing),
            allocation_locks: DashMap::new(),
        }
    }

    /// The underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// The ledger thresholds.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// The lifecycle classifier reports use.
    pub fn classifier(&self) -> &LifecycleClassifier {
        &self.classifier
    }

    /// The pricing resolver reports use.
    pub fn pricing(&self) -> &PricingResolver {
        &self.pricing
    }

    // ─── Metrics ────────────────────────────────────────────────────

    /// Free slots. Negative when overallocated.
    pub fn available(&self, license: &License) -> i64 {
        utilization::available(license)
    }

    /// Consumed over total, as a percentage. Zero for a zero-slot license.
    pub fn utilization_percentage(&self, license: &License) -> f64 {
        utilization::utilization_percentage(license)
    }

    /// Whether at least one slot is free.
    pub fn can_allocate(&self, license: &License) -> bool {
        utilization::can_allocate(license)
    }

    /// Where the license stands against its capacity.
    pub fn allocation_state(&self, license: &License) -> AllocationState {
        AllocationState::of(license, self.config.underutilized_threshold_pct)
    }

    // ─── Recompute ──────────────────────────────────────────────────

    /// Recount the instances of one license and store the result.
    ///
    /// The count and the write are one repository operation, so the last
    /// recompute to run always stores the live count.
    pub fn recompute(&self, license_id: LicenseId) -> Result<RecomputeOutcome, LedgerError> {
        let Some(Recount { previous, consumed, total }) = self.repo.recount_consumed(license_id)? else {
            tracing::warn!(license = %license_id, "recompute skipped: license no longer exists");
            return Ok(RecomputeOutcome::SkippedMissing);
        };

        if consumed > total {
            tracing::warn!(license = %license_id, consumed, total, "license is overallocated");
        }
        if previous == consumed {
            tracing::debug!(license = %license_id, consumed, "consumed count unchanged");
            return Ok(RecomputeOutcome::Unchanged { consumed });
        }
        tracing::debug!(license = %license_id, previous, consumed, "consumed count recomputed");
        Ok(RecomputeOutcome::Updated { previous, consumed })
    }

    /// Call after an instance has been stored.
    pub fn on_instance_created(&self, instance: &LicenseInstance) -> Result<RecomputeOutcome, LedgerError> {
        self.recompute(instance.license)
    }

    /// Call after an instance has been deleted.
    pub fn on_instance_deleted(&self, instance: &LicenseInstance) -> Result<RecomputeOutcome, LedgerError> {
        self.recompute(instance.license)
    }

    /// Recompute every license.
    pub fn recompute_all(&self) -> Result<RecomputeSummary, LedgerError> {
        let mut summary = RecomputeSummary::default();
        for license in self.repo.licenses()? {
            summary.record(self.recompute(license.id)?);
        }
        tracing::info!(
            updated = summary.updated,
            unchanged = summary.unchanged,
            skipped = summary.skipped,
            "recompute sweep finished"
        );
        Ok(summary)
    }

    // ─── License Writes ─────────────────────────────────────────────

    /// Check that `proposed` leaves room for every live instance.
    pub fn validate_capacity(&self, proposed: &License) -> Result<(), LedgerError> {
        let instance_count = self.repo.count_instances(proposed.id)?;
        if proposed.total_licenses < instance_count {
            return Err(CapacityViolation {
                license: proposed.id,
                requested_total: proposed.total_licenses,
                instance_count,
                excess: instance_count - proposed.total_licenses,
            }
            .into());
        }
        Ok(())
    }

    /// Store a new license. Its consumed count is taken from the repository.
    pub fn register_license(&self, mut license: License) -> Result<License, LedgerError> {
        license.consumed_licenses = 0;
        self.repo.insert_license(license.clone())?;
        self.recompute(license.id)?;
        let stored = self.stored(license.id)?;
        tracing::info!(
            license = %stored.id,
            name = %stored.key,
            total = stored.total_licenses,
            consumed = stored.consumed_licenses,
            "license registered"
        );
        Ok(stored)
    }

    /// Store an edited license after checking its capacity.
    ///
    /// The consumed count in `edited` is ignored. The stored license is
    /// recomputed after the save and returned.
    pub fn update_license(&self, edited: License) -> Result<License, LedgerError> {
        let current = self.stored(edited.id)?;
        self.validate_capacity(&edited)?;

        self.repo.save_license(&edited)?;
        self.recompute(edited.id)?;
        let saved = self.stored(edited.id)?;
        if current.total_licenses != saved.total_licenses {
            tracing::info!(
                license = %saved.id,
                from = current.total_licenses,
                to = saved.total_licenses,
                consumed = saved.consumed_licenses,
                "license capacity changed"
            );
        }
        Ok(saved)
    }

    fn stored(&self, license_id: LicenseId) -> Result<License, LedgerError> {
        self.repo
            .license(license_id)?
            .ok_or(LedgerError::UnknownLicense(license_id))
    }

    /// Delete a license that no instance references.
    pub fn remove_license(&self, license_id: LicenseId) -> Result<License, LedgerError> {
        let instances = self.repo.count_instances(license_id)?;
        if instances > 0 {
            return Err(LedgerError::LicenseInUse {
                license: license_id,
                instances,
            });
        }
        let removed = self
            .repo
            .delete_license(license_id)?
            .ok_or(LedgerError::UnknownLicense(license_id))?;
        self.allocation_locks.remove(&license_id);
        tracing::info!(license = %license_id, name = %removed.key, "license removed");
        Ok(removed)
    }

    // ─── Instance Writes ────────────────────────────────────────────

    fn allocation_lock(&self, license_id: LicenseId) -> Option<Arc<Mutex<()>>> {
        self.config
            .serialize_allocations
            .then(|| Arc::clone(self.allocation_locks.entry(license_id).or_default().value()))
    }

    /// Store a new instance and recompute its license.
    ///
    /// Under strict enforcement an allocation past capacity is rejected;
    /// under lenient enforcement it is stored and logged. With
    /// `require_assignment` set, an instance without a target is rejected.
    pub fn allocate(&self, instance: LicenseInstance) -> Result<LicenseInstance, LedgerError> {
        let lock = self.allocation_lock(instance.license);
        let _guard = lock.as_ref().map(|m| m.lock());

        let license = self
            .repo
            .license(instance.license)?
            .ok_or(LedgerError::UnknownLicense(instance.license))?;

        match &instance.assigned_object {
            Some(target) if target.kind() != license.assignment_kind => {
                return Err(LedgerError::AssignmentKindMismatch {
                    license: license.id,
                    expected: license.assignment_kind,
                    actual: target.kind(),
                });
            }
            None if self.config.require_assignment => {
                return Err(LedgerError::AssignmentRequired { license: license.id });
            }
            _ => {}
        }

        let instance_count = self.repo.count_instances(license.id)?;
        let after = instance_count.saturating_add(1);
        if after > license.total_licenses {
            match self.config.enforcement {
                CapacityEnforcement::Strict => {
                    return Err(CapacityViolation {
                        license: license.id,
                        requested_total: license.total_licenses,
                        instance_count,
                        excess: after - license.total_licenses,
                    }
                    .into());
                }
                CapacityEnforcement::Lenient => {
                    tracing::warn!(
                        license = %license.id,
                        instances = after,
                        total = license.total_licenses,
                        "allocating past capacity"
                    );
                }
            }
        }

        self.repo.insert_instance(instance.clone())?;
        self.on_instance_created(&instance)?;
        tracing::info!(
            instance = %instance.id,
            license = %license.id,
            assigned = ?instance.assigned_object,
            "instance allocated"
        );
        Ok(instance)
    }

    /// Delete an instance and recompute its license.
    pub fn release(&self, instance_id: InstanceId) -> Result<LicenseInstance, LedgerError> {
        let license_id = self
            .repo
            .instance(instance_id)?
            .ok_or(LedgerError::UnknownInstance(instance_id))?
            .license;
        let lock = self.allocation_lock(license_id);
        let _guard = lock.as_ref().map(|m| m.lock());

        let removed = self
            .repo
            .delete_instance(instance_id)?
            .ok_or(LedgerError::UnknownInstance(instance_id))?;
        self.on_instance_deleted(&removed)?;
        tracing::info!(instance = %instance_id, license = %removed.license, "instance released");
        Ok(removed)
    }

    // ─── Reporting ──────────────────────────────────────────────────

    /// Utilization summary for one license.
    pub fn snapshot(&self, license_id: LicenseId) -> Result<UtilizationSnapshot, LedgerError> {
        let license = self
            .repo
            .license(license_id)?
            .ok_or(LedgerError::UnknownLicense(license_id))?;
        Ok(UtilizationSnapshot::of(&license, &self.config))
    }

    /// Utilization summaries for every license, by name.
    pub fn snapshots(&self) -> Result<Vec<UtilizationSnapshot>, LedgerError> {
        let mut snaps: Vec<UtilizationSnapshot> = self
            .repo
            .licenses()?
            .iter()
            .map(|lic| UtilizationSnapshot::of(lic, &self.config))
            .collect();
        snaps.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(snaps)
    }

    /// Licenses worth shrinking.
    pub fn recommendations(&self) -> Result<Vec<OptimizationRecommendation>, LedgerError> {
        Ok(recommendations(&self.repo.licenses()?, &self.config))
    }

    /// Recurring monthly cost of every instance, in the base currency.
    pub fn recurring_monthly_cost(&self) -> Result<Amount, LedgerError> {
        let licenses = self.repo.licenses()?;
        let instances = licenses
            .iter()
            .map(|lic| self.repo.instances_of(lic.id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(recurring_monthly_total(
            &self.pricing,
            licenses.iter().zip(&instances).map(|(license, instances)| CostEntry {
                license,
                instances,
            }),
        ))
    }

    /// Instances whose end date falls within `days_ahead` days of `today`.
    pub fn expiring(&self, days_ahead: i64, today: NaiveDate) -> Result<Vec<LicenseInstance>, LedgerError> {
        let all = self.repo.instances()?;
        let mut hits: Vec<LicenseInstance> = self
            .classifier
            .expiring_within(&all, days_ahead, today)
            .into_iter()
            .cloned()
            .collect();
        hits.sort_by_key(|inst| inst.end_date);
        Ok(hits)
    }

    /// Instances whose license or assigned object no longer exists.
    pub fn stale_references<D>(&self, directory: &D) -> Result<Vec<(InstanceId, StaleReference)>, LedgerError>
    where
        D: AssignmentDirectory + ?Sized,
    {
        let mut stale = Vec::new();
        for inst in self.repo.instances()? {
            if self.repo.license(inst.license)?.is_none() {
                stale.push((inst.id, StaleReference::License(inst.license)));
            }
            if let Some(target) = inst.assigned_object {
                if !directory.exists(&target) {
                    stale.push((inst.id, StaleReference::Assignment(target)));
                }
            }
        }
        for (instance, reference) in &stale {
            tracing::warn!(instance = %instance, reference = %reference, "stale reference");
        }
        Ok(stale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryRepository;
    use lic_core::{AssignedObject, AssignmentKind, Currency, LicenseKey, TenantId, VendorId};
    use std::collections::HashSet;

    fn license(name: &str, total: u32) -> License {
        License::new(
            LicenseKey::new(name, VendorId(1), TenantId(1)).unwrap(),
            AssignmentKind::Contact,
            Amount::from_minor(10_000),
            Currency::Nok,
            total,
        )
    }

    fn ledger() -> LicenseLedger<MemoryRepository> {
        LicenseLedger::new(MemoryRepository::new(), LedgerConfig::default())
    }

    fn strict() -> LicenseLedger<MemoryRepository> {
        LicenseLedger::new(
            MemoryRepository::new(),
            LedgerConfig {
                enforcement: CapacityEnforcement::Strict,
                serialize_allocations: true,
                ..LedgerConfig::default()
            },
        )
    }

    fn consumed(ledger: &LicenseLedger<MemoryRepository>, id: LicenseId) -> u32 {
        ledger.repository().license(id).unwrap().unwrap().consumed_licenses
    }

    #[test]
    fn allocate_and_release_track_count() {
        let l = ledger();
        let lic = l.register_license(license("Office", 5)).unwrap();
        let a = l.allocate(LicenseInstance::new(lic.id)).unwrap();
        l.allocate(LicenseInstance::new(lic.id)).unwrap();
        assert_eq!(consumed(&l, lic.id), 2);
        l.release(a.id).unwrap();
        assert_eq!(consumed(&l, lic.id), 1);
    }

    #[test]
    fn recompute_heals_out_of_band_edit() {
        let l = ledger();
        let lic = l.register_license(license("Office", 5)).unwrap();
        l.allocate(LicenseInstance::new(lic.id)).unwrap();
        l.repository().set_consumed(lic.id, 4).unwrap();

        assert_eq!(
            l.recompute(lic.id).unwrap(),
            RecomputeOutcome::Updated { previous: 4, consumed: 1 }
        );
        assert_eq!(l.recompute(lic.id).unwrap(), RecomputeOutcome::Unchanged { consumed: 1 });
    }

    #[test]
    fn recompute_skips_missing_license() {
        let l = ledger();
        let orphan = LicenseInstance::new(LicenseId::new());
        assert_eq!(l.on_instance_deleted(&orphan).unwrap(), RecomputeOutcome::SkippedMissing);
    }

    #[test]
    fn recompute_all_summarizes() {
        let l = ledger();
        let a = l.register_license(license("A", 5)).unwrap();
        let b = l.register_license(license("B", 5)).unwrap();
        l.allocate(LicenseInstance::new(a.id)).unwrap();
        l.repository().set_consumed(b.id, 3).unwrap();
        let summary = l.recompute_all().unwrap();
        assert_eq!(summary, RecomputeSummary { unchanged: 1, updated: 1, skipped: 0 });
        assert_eq!(consumed(&l, b.id), 0);
    }

    #[test]
    fn shrinking_below_instances_names_excess() {
        let l = ledger();
        let lic = l.register_license(license("Office", 5)).unwrap();
        for _ in 0..5 {
            l.allocate(LicenseInstance::new(lic.id)).unwrap();
        }
        let mut edited = l.repository().license(lic.id).unwrap().unwrap();
        edited.total_licenses = 3;
        match l.update_license(edited) {
            Err(LedgerError::Capacity(v)) => {
                assert_eq!(v.excess, 2);
                assert_eq!(v.instance_count, 5);
                assert_eq!(v.requested_total, 3);
            }
            other => panic!("expected capacity violation, got {other:?}"),
        }
        assert_eq!(l.repository().license(lic.id).unwrap().unwrap().total_licenses, 5);
    }

    #[test]
    fn update_ignores_supplied_consumed() {
        let l = ledger();
        let lic = l.register_license(license("Office", 5)).unwrap();
        l.allocate(LicenseInstance::new(lic.id)).unwrap();
        let mut edited = l.repository().license(lic.id).unwrap().unwrap();
        edited.total_licenses = 1;
        edited.consumed_licenses = 0;
        let saved = l.update_license(edited).unwrap();
        assert_eq!(saved.consumed_licenses, 1);
        assert_eq!(saved.total_licenses, 1);
    }

    #[test]
    fn update_unknown_license() {
        let l = ledger();
        assert!(matches!(
            l.update_license(license("Ghost", 1)),
            Err(LedgerError::UnknownLicense(_))
        ));
    }

    #[test]
    fn remove_refused_while_in_use() {
        let l = ledger();
        let lic = l.register_license(license("Office", 5)).unwrap();
        let inst = l.allocate(LicenseInstance::new(lic.id)).unwrap();
        assert!(matches!(
            l.remove_license(lic.id),
            Err(LedgerError::LicenseInUse { instances: 1, .. })
        ));
        l.release(inst.id).unwrap();
        assert_eq!(l.remove_license(lic.id).unwrap().id, lic.id);
        assert!(matches!(l.remove_license(lic.id), Err(LedgerError::UnknownLicense(_))));
    }

    #[test]
    fn strict_allocation_rejects_past_capacity() {
        let l = strict();
        let lic = l.register_license(license("Office", 1)).unwrap();
        l.allocate(LicenseInstance::new(lic.id)).unwrap();
        match l.allocate(LicenseInstance::new(lic.id)) {
            Err(LedgerError::Capacity(v)) => assert_eq!(v.excess, 1),
            other => panic!("expected capacity violation, got {other:?}"),
        }
        assert_eq!(consumed(&l, lic.id), 1);
    }

    #[test]
    fn lenient_allocation_overallocates() {
        let l = ledger();
        let lic = l.register_license(license("Office", 1)).unwrap();
        l.allocate(LicenseInstance::new(lic.id)).unwrap();
        l.allocate(LicenseInstance::new(lic.id)).unwrap();
        let stored = l.repository().license(lic.id).unwrap().unwrap();
        assert_eq!(l.available(&stored), -1);
        assert_eq!(l.utilization_percentage(&stored), 200.0);
        assert_eq!(l.allocation_state(&stored), AllocationState::Overallocated { excess: 1 });
    }

    #[test]
    fn allocation_checks_assignment_kind() {
        let l = ledger();
        let lic = l.register_license(license("Office", 5)).unwrap();
        let err = l
            .allocate(LicenseInstance::new(lic.id).assigned_to(AssignedObject::Device(7)))
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::AssignmentKindMismatch {
                expected: AssignmentKind::Contact,
                actual: AssignmentKind::Device,
                ..
            }
        ));
        assert!(l
            .allocate(LicenseInstance::new(lic.id).assigned_to(AssignedObject::Contact(7)))
            .is_ok());
    }

    #[test]
    fn required_assignment_rejects_unassigned() {
        let l = LicenseLedger::new(
            MemoryRepository::new(),
            LedgerConfig {
                require_assignment: true,
                ..LedgerConfig::default()
            },
        );
        let lic = l.register_license(license("Office", 5)).unwrap();
        match l.allocate(LicenseInstance::new(lic.id)) {
            Err(LedgerError::AssignmentRequired { license }) => assert_eq!(license, lic.id),
            other => panic!("expected assignment required, got {other:?}"),
        }
        assert_eq!(consumed(&l, lic.id), 0);
        l.allocate(LicenseInstance::new(lic.id).assigned_to(AssignedObject::Contact(3)))
            .unwrap();
        assert_eq!(consumed(&l, lic.id), 1);
    }

    #[test]
    fn allocate_against_unknown_license() {
        let l = ledger();
        assert!(matches!(
            l.allocate(LicenseInstance::new(LicenseId::new())),
            Err(LedgerError::UnknownLicense(_))
        ));
        assert!(matches!(l.release(InstanceId::new()), Err(LedgerError::UnknownInstance(_))));
    }

    #[test]
    fn stale_references_reported() {
        let l = ledger();
        let lic = l.register_license(license("Office", 5)).unwrap();
        let kept = l
            .allocate(LicenseInstance::new(lic.id).assigned_to(AssignedObject::Contact(1)))
            .unwrap();
        let gone = l
            .allocate(LicenseInstance::new(lic.id).assigned_to(AssignedObject::Contact(2)))
            .unwrap();
        let orphan = LicenseInstance::new(LicenseId::new());
        l.repository().insert_instance(orphan.clone()).unwrap();

        let directory: HashSet<AssignedObject> = [AssignedObject::Contact(1)].into_iter().collect();
        let stale = l.stale_references(&directory).unwrap();
        assert_eq!(stale.len(), 2);
        assert!(stale.contains(&(gone.id, StaleReference::Assignment(AssignedObject::Contact(2)))));
        assert!(stale.contains(&(orphan.id, StaleReference::License(orphan.license))));
        assert!(!stale.iter().any(|(id, _)| *id == kept.id));
    }

    #[test]
    fn concurrent_lenient_allocations_settle_on_live_count() {
        for _ in 0..50 {
            let l = Arc::new(ledger());
            let lic = l.register_license(license("Office", 100)).unwrap();
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let l = Arc::clone(&l);
                    std::thread::spawn(move || {
                        for _ in 0..4 {
                            l.allocate(LicenseInstance::new(lic.id)).unwrap();
                        }
                    })
                })
                .collect();
            for h in handles {
                h.join().unwrap();
            }
            assert_eq!(consumed(&l, lic.id), 32);
            assert_eq!(l.repository().count_instances(lic.id).unwrap(), 32);
        }
    }

    #[test]
    fn update_keeps_allocations_made_after_read() {
        let l = ledger();
        let lic = l.register_license(license("Office", 5)).unwrap();
        let mut edited = l.repository().license(lic.id).unwrap().unwrap();
        l.allocate(LicenseInstance::new(lic.id)).unwrap();
        l.allocate(LicenseInstance::new(lic.id)).unwrap();

        edited.total_licenses = 4;
        let saved = l.update_license(edited).unwrap();
        assert_eq!(saved.consumed_licenses, 2);
        assert_eq!(consumed(&l, lic.id), 2);
    }

    #[test]
    fn concurrent_strict_allocations_never_overshoot() {
        let l = Arc::new(strict());
        let lic = l.register_license(license("Office", 8)).unwrap();
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let l = Arc::clone(&l);
                std::thread::spawn(move || l.allocate(LicenseInstance::new(lic.id)).is_ok())
            })
            .collect();
        let granted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(granted, 8);
        assert_eq!(consumed(&l, lic.id), 8);
    }
}
