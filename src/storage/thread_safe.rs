//! Per-target read/write serialization decorator.
//!
//! Serializes concurrent access per logical target (one shell id) so reads
//! see a consistent snapshot and writes are mutually exclusive, without the
//! locking discipline leaking into the core store. Locks are created on
//! demand in a concurrent registry keyed by shell id and reclaimed once
//! uncontended. Collection-wide operations take a store-level lock instead:
//! `clear` exclusively, listing shared.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;

use super::AasRegistryStorage;
use super::DescriptorFilter;
use super::DescriptorSearchQuery;
use crate::model::ShellDescriptor;
use crate::model::SubmodelDescriptor;
use crate::pagination::CursorResult;
use crate::pagination::PaginationInfo;
use crate::Result;

/// On-demand registry of per-key read/write locks.
///
/// A lock handle lives in the map only while some caller holds or awaits it;
/// after the last holder releases, the entry is removed again so the map does
/// not grow with the key space.
#[derive(Default)]
pub(crate) struct KeyLockRegistry {
    locks: DashMap<String, Arc<RwLock<()>>>,
}

impl KeyLockRegistry {
    fn handle(
        &self,
        key: &str,
    ) -> Arc<RwLock<()>> {
        self.locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(RwLock::new(())))
            .clone()
    }

    fn reclaim(
        &self,
        key: &str,
    ) {
        // only the registry's own copy left -> nobody holds or awaits it
        self.locks.remove_if(key, |_, lock| Arc::strong_count(lock) == 1);
    }

    /// Runs `f` under the shared lock for `key`. The guard is released on
    /// every exit path; errors from `f` propagate after release.
    pub(crate) fn read<R>(
        &self,
        key: &str,
        f: impl FnOnce() -> R,
    ) -> R {
        let handle = self.handle(key);
        let result = {
            let _guard = handle.read();
            f()
        };
        drop(handle);
        self.reclaim(key);
        result
    }

    /// Runs `f` under the exclusive lock for `key`.
    pub(crate) fn write<R>(
        &self,
        key: &str,
        f: impl FnOnce() -> R,
    ) -> R {
        let handle = self.handle(key);
        let result = {
            let _guard = handle.write();
            f()
        };
        drop(handle);
        self.reclaim(key);
        result
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.locks.len()
    }
}

/// Thread-safe wrapper for an [`AasRegistryStorage`].
///
/// Within one shell id, operations observe a total order; across different
/// ids, operations run concurrently.
pub struct ThreadSafeRegistryStorage<S> {
    inner: S,
    store_lock: RwLock<()>,
    key_locks: KeyLockRegistry,
}

impl<S: AasRegistryStorage> ThreadSafeRegistryStorage<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            store_lock: RwLock::new(()),
            key_locks: KeyLockRegistry::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn active_key_locks(&self) -> usize {
        self.key_locks.len()
    }

    /// Test hook: runs `f` inside the same exclusive per-key section the
    /// write operations use.
    #[cfg(test)]
    pub(crate) fn write_locked<R>(
        &self,
        key: &str,
        f: impl FnOnce() -> R,
    ) -> R {
        let _store = self.store_lock.read();
        self.key_locks.write(key, f)
    }
}

impl<S: AasRegistryStorage> AasRegistryStorage for ThreadSafeRegistryStorage<S> {
    fn insert_shell_descriptor(
        &self,
        descriptor: ShellDescriptor,
    ) -> Result<()> {
        let _store = self.store_lock.read();
        let key = descriptor.id.clone();
        self.key_locks.write(&key, || self.inner.insert_shell_descriptor(descriptor))
    }

    fn update_shell_descriptor_by_id(
        &self,
        aas_id: &str,
        descriptor: ShellDescriptor,
    ) -> Result<()> {
        let _store = self.store_lock.read();
        self.key_locks
            .write(aas_id, || self.inner.update_shell_descriptor_by_id(aas_id, descriptor))
    }

    fn delete_shell_descriptor_by_id(
        &self,
        aas_id: &str,
    ) -> Result<()> {
        let _store = self.store_lock.read();
        self.key_locks.write(aas_id, || self.inner.delete_shell_descriptor_by_id(aas_id))
    }

    fn get_shell_descriptor_by_id(
        &self,
        aas_id: &str,
    ) -> Result<ShellDescriptor> {
        let _store = self.store_lock.read();
        self.key_locks.read(aas_id, || self.inner.get_shell_descriptor_by_id(aas_id))
    }

    fn get_all_shell_descriptors(
        &self,
        filter: Option<DescriptorFilter>,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<ShellDescriptor>>> {
        let _store = self.store_lock.read();
        self.inner.get_all_shell_descriptors(filter, pagination)
    }

    fn search_shell_descriptors(
        &self,
        query: &DescriptorSearchQuery,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<ShellDescriptor>>> {
        let _store = self.store_lock.read();
        self.inner.search_shell_descriptors(query, pagination)
    }

    fn get_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
    ) -> Result<SubmodelDescriptor> {
        let _store = self.store_lock.read();
        self.key_locks
            .read(aas_id, || self.inner.get_submodel_descriptor_through_superpath(aas_id, submodel_id))
    }

    fn get_all_submodel_descriptors_through_superpath(
        &self,
        aas_id: &str,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<SubmodelDescriptor>>> {
        let _store = self.store_lock.read();
        self.key_locks.read(aas_id, || {
            self.inner.get_all_submodel_descriptors_through_superpath(aas_id, pagination)
        })
    }

    fn post_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel: SubmodelDescriptor,
    ) -> Result<()> {
        let _store = self.store_lock.read();
        self.key_locks.write(aas_id, || {
            self.inner.post_submodel_descriptor_through_superpath(aas_id, submodel)
        })
    }

    fn put_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
        submodel: SubmodelDescriptor,
    ) -> Result<()> {
        let _store = self.store_lock.read();
        self.key_locks.write(aas_id, || {
            self.inner.put_submodel_descriptor_through_superpath(aas_id, submodel_id, submodel)
        })
    }

    fn delete_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
    ) -> Result<()> {
        let _store = self.store_lock.read();
        self.key_locks.write(aas_id, || {
            self.inner.delete_submodel_descriptor_through_superpath(aas_id, submodel_id)
        })
    }

    fn clear(&self) -> Result<Vec<String>> {
        let _store = self.store_lock.write();
        self.inner.clear()
    }
}
