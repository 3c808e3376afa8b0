//! # In-Memory Repository
//!
//! Thread-safe, cloneable [`LicenseRepository`] over two maps. Clones share
//! the same underlying data.
//!
//! All operations are synchronous (`parking_lot::RwLock`); no lock is held
//! across calls into other components. `recount_consumed` is the only
//! operation that holds both maps, and it always takes the license map
//! first.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use lic_core::{InstanceId, License, LicenseId, LicenseInstance};

use crate::repository::{LicenseRepository, Recount, RepositoryError};

/// In-process license and instance storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    licenses: Arc<RwLock<HashMap<LicenseId, License>>>,
    instances: Arc<RwLock<HashMap<InstanceId, LicenseInstance>>>,
}

impl MemoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored licenses.
    pub fn license_count(&self) -> usize {
        self.licenses.read().len()
    }

    /// Number of stored instances, including ones whose license is gone.
    pub fn instance_count(&self) -> usize {
        self.instances.read().len()
    }
}

fn count_of(map: &HashMap<InstanceId, LicenseInstance>, license: LicenseId) -> Result<u32, RepositoryError> {
    let count = map.values().filter(|inst| inst.license == license).count();
    u32::try_from(count)
        .map_err(|_| RepositoryError::Backend(format!("instance count for {license} exceeds u32")))
}

fn key_taken(map: &HashMap<LicenseId, License>, license: &License) -> bool {
    map.values().any(|other| other.id != license.id && other.key == license.key)
}

impl LicenseRepository for MemoryRepository {
    fn license(&self, id: LicenseId) -> Result<Option<License>, RepositoryError> {
        Ok(self.licenses.read().get(&id).cloned())
    }

    fn licenses(&self) -> Result<Vec<License>, RepositoryError> {
        Ok(self.licenses.read().values().cloned().collect())
    }

    fn insert_license(&self, license: License) -> Result<(), RepositoryError> {
        let mut map = self.licenses.write();
        if map.contains_key(&license.id) {
            return Err(RepositoryError::DuplicateLicense(license.id));
        }
        if key_taken(&map, &license) {
            return Err(RepositoryError::DuplicateKey(license.key));
        }
        map.insert(license.id, license);
        Ok(())
    }

    fn save_license(&self, license: &License) -> Result<(), RepositoryError> {
        let mut map = self.licenses.write();
        if key_taken(&map, license) {
            return Err(RepositoryError::DuplicateKey(license.key.clone()));
        }
        let stored = map
            .get_mut(&license.id)
            .ok_or(RepositoryError::LicenseNotFound(license.id))?;
        let consumed = stored.consumed_licenses;
        *stored = license.clone();
        stored.consumed_licenses = consumed;
        Ok(())
    }

    fn delete_license(&self, id: LicenseId) -> Result<Option<License>, RepositoryError> {
        Ok(self.licenses.write().remove(&id))
    }

    fn set_consumed(&self, id: LicenseId, consumed: u32) -> Result<bool, RepositoryError> {
        Ok(match self.licenses.write().get_mut(&id) {
            Some(license) => {
                license.consumed_licenses = consumed;
                true
            }
            None => false,
        })
    }

    fn recount_consumed(&self, id: LicenseId) -> Result<Option<Recount>, RepositoryError> {
        let mut licenses = self.licenses.write();
        let Some(license) = licenses.get_mut(&id) else {
            return Ok(None);
        };
        let consumed = count_of(&self.instances.read(), id)?;
        let previous = std::mem::replace(&mut license.consumed_licenses, consumed);
        Ok(Some(Recount {
            previous,
            consumed,
            total: license.total_licenses,
        }))
    }

    fn instances(&self) -> Result<Vec<LicenseInstance>, RepositoryError> {
        Ok(self.instances.read().values().cloned().collect())
    }

    fn instance(&self, id: InstanceId) -> Result<Option<LicenseInstance>, RepositoryError> {
        Ok(self.instances.read().get(&id).cloned())
    }

    fn instances_of(&self, license: LicenseId) -> Result<Vec<LicenseInstance>, RepositoryError> {
        Ok(self
            .instances
            .read()
            .values()
            .filter(|inst| inst.license == license)
            .cloned()
            .collect())
    }

    fn count_instances(&self, license: LicenseId) -> Result<u32, RepositoryError> {
        count_of(&self.instances.read(), license)
    }

    fn insert_instance(&self, instance: LicenseInstance) -> Result<(), RepositoryError> {
        let mut map = self.instances.write();
        if map.contains_key(&instance.id) {
            return Err(RepositoryError::DuplicateInstance(instance.id));
        }
        map.insert(instance.id, instance);
        Ok(())
    }

    fn delete_instance(&self, id: InstanceId) -> Result<Option<LicenseInstance>, RepositoryError> {
        Ok(self.instances.write().remove(&id))
    }
}
