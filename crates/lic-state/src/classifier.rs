//! # Lifecycle Classifier
//!
//! Computes [`InstanceStatus`] and [`RenewalUrgency`] for license instances
//! against an explicit `today`, and selects instances by expiry for the
//! sweeps reporting runs.

use chrono::NaiveDate;

use lic_core::{days_remaining, LicenseInstance};

use crate::config::LifecycleConfig;
use crate::status::InstanceStatus;
use crate::urgency::RenewalUrgency;

/// Classifies license instances relative to a given day.
#[derive(Debug, Clone, Default)]
pub struct LifecycleClassifier {
    config: LifecycleConfig,
}

impl LifecycleClassifier {
    /// Create a classifier with the given thresholds.
    pub fn new(config: LifecycleConfig) -> Self {
        Self { config }
    }

    /// The thresholds in use.
    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Derived status of an instance.
    pub fn status(&self, instance: &LicenseInstance, today: NaiveDate) -> InstanceStatus {
        self.status_for(instance.start_date, instance.end_date, today)
    }

    /// Derived status from raw dates.
    ///
    /// PENDING is checked before EXPIRED, so a future start date wins even
    /// when the end date has already passed.
    pub fn status_for(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> InstanceStatus {
        if matches!(start_date, Some(start) if start > today) {
            return InstanceStatus::Pending;
        }

        if let Some(end) = end_date {
            let remaining = days_remaining(end, today);
            if remaining < 0 {
                return InstanceStatus::Expired;
            }
            if remaining <= self.config.warning_window_days {
                return InstanceStatus::Warning;
            }
        }

        InstanceStatus::Active
    }

    /// Renewal urgency bucket for an end date.
    pub fn renewal_urgency(&self, end_date: Option<NaiveDate>, today: NaiveDate) -> RenewalUrgency {
        let Some(end) = end_date else {
            return RenewalUrgency::NoExpiry;
        };
        let remaining = days_remaining(end, today);
        if remaining < 0 {
            RenewalUrgency::Expired
        } else if remaining <= self.config.urgency_critical_days {
            RenewalUrgency::Critical
        } else if remaining <= self.config.urgency_warning_days {
            RenewalUrgency::Warning
        } else {
            RenewalUrgency::Active
        }
    }

    /// Whether the slot is free to hand out: unassigned and not expired.
    pub fn is_available(&self, instance: &LicenseInstance, today: NaiveDate) -> bool {
        !instance.is_assigned() && self.status(instance, today) != InstanceStatus::Expired
    }

    /// Instances whose end date falls in `[today, today + days_ahead]`.
    pub fn expiring_within<'a, I>(
        &self,
        instances: I,
        days_ahead: i64,
        today: NaiveDate,
    ) -> Vec<&'a LicenseInstance>
    where
        I: IntoIterator<Item = &'a LicenseInstance>,
    {
        instances
            .into_iter()
            .filter(|inst| {
                inst.end_date
                    .map(|end| (0..=days_ahead).contains(&days_remaining(end, today)))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Assigned instances whose end date has passed.
    pub fn expired_assigned<'a, I>(&self, instances: I, today: NaiveDate) -> Vec<&'a LicenseInstance>
    where
        I: IntoIterator<Item = &'a LicenseInstance>,
    {
        instances
            .into_iter()
            .filter(|inst| inst.is_assigned())
            .filter(|inst| matches!(inst.end_date, Some(end) if end < today))
            .collect()
    }
}
