//! Volatile core storage engine.
//!
//! Holds the canonical descriptor state in two ID-sorted maps: the shell
//! descriptors themselves and a nested per-shell submodel lookup kept in
//! lockstep with each shell's embedded collection. All validation happens
//! before the first map is touched, so a failing operation never leaves the
//! store partially mutated.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::debug;

use super::AasRegistryStorage;
use super::DescriptorFilter;
use super::DescriptorSearchQuery;
use crate::model::ShellDescriptor;
use crate::model::SubmodelDescriptor;
use crate::pagination::paginate;
use crate::pagination::paginate_filtered;
use crate::pagination::CursorResult;
use crate::pagination::PaginationInfo;
use crate::RegistryError;
use crate::Result;

#[derive(Default)]
struct StoreState {
    shells: BTreeMap<String, ShellDescriptor>,
    // shell id -> submodel id -> descriptor, mirrors each shell's embedded
    // submodel collection
    submodels: BTreeMap<String, BTreeMap<String, SubmodelDescriptor>>,
}

/// In-memory implementation of [`AasRegistryStorage`].
///
/// The interior lock only guards map integrity for a single call; per-target
/// operation ordering is the [`super::ThreadSafeRegistryStorage`] decorator's
/// job. Native cursors are plain descriptor ids; the transport encoding is
/// layered on by [`super::CursorEncodingStorage`].
#[derive(Default)]
pub struct InMemoryRegistryStorage {
    state: RwLock<StoreState>,
}

impl InMemoryRegistryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the nested id lookup from one incoming payload, rejecting on
    /// the first repeated submodel id. Single pass, no partial result.
    fn submodel_lookup(
        descriptor: &ShellDescriptor,
    ) -> Result<BTreeMap<String, SubmodelDescriptor>> {
        let mut lookup = BTreeMap::new();
        for submodel in &descriptor.submodel_descriptors {
            if lookup.insert(submodel.id.clone(), submodel.clone()).is_some() {
                return Err(RegistryError::DuplicateSubmodelIds(submodel.id.clone()).into());
            }
        }
        Ok(lookup)
    }
}

impl AasRegistryStorage for InMemoryRegistryStorage {
    fn insert_shell_descriptor(
        &self,
        descriptor: ShellDescriptor,
    ) -> Result<()> {
        let mut state = self.state.write();
        if state.shells.contains_key(&descriptor.id) {
            return Err(RegistryError::DuplicateIdentifier(descriptor.id).into());
        }
        let lookup = Self::submodel_lookup(&descriptor)?;

        debug!(aas_id = %descriptor.id, submodels = lookup.len(), "registering shell descriptor");
        state.submodels.insert(descriptor.id.clone(), lookup);
        state.shells.insert(descriptor.id.clone(), descriptor);
        Ok(())
    }

    fn update_shell_descriptor_by_id(
        &self,
        aas_id: &str,
        descriptor: ShellDescriptor,
    ) -> Result<()> {
        let mut state = self.state.write();
        if !state.shells.contains_key(aas_id) {
            return Err(RegistryError::ShellNotFound(aas_id.to_string()).into());
        }
        if descriptor.id != aas_id {
            return Err(RegistryError::IdentificationMismatch {
                path_id: aas_id.to_string(),
                body_id: descriptor.id,
            }
            .into());
        }
        let lookup = Self::submodel_lookup(&descriptor)?;

        state.submodels.insert(aas_id.to_string(), lookup);
        state.shells.insert(aas_id.to_string(), descriptor);
        Ok(())
    }

    fn delete_shell_descriptor_by_id(
        &self,
        aas_id: &str,
    ) -> Result<()> {
        let mut state = self.state.write();
        if state.shells.remove(aas_id).is_none() {
            return Err(RegistryError::ShellNotFound(aas_id.to_string()).into());
        }
        state.submodels.remove(aas_id);
        debug!(aas_id, "unregistered shell descriptor");
        Ok(())
    }

    fn get_shell_descriptor_by_id(
        &self,
        aas_id: &str,
    ) -> Result<ShellDescriptor> {
        let state = self.state.read();
        state
            .shells
            .get(aas_id)
            .cloned()
            .ok_or_else(|| RegistryError::ShellNotFound(aas_id.to_string()).into())
    }

    fn get_all_shell_descriptors(
        &self,
        filter: Option<DescriptorFilter>,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<ShellDescriptor>>> {
        let state = self.state.read();
        paginate_filtered(
            &state.shells,
            |descriptor| filter.as_ref().map_or(true, |f| f.matches(descriptor)),
            pagination,
        )
    }

    fn search_shell_descriptors(
        &self,
        query: &DescriptorSearchQuery,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<ShellDescriptor>>> {
        // compile the query before taking the lock, it may be rejected
        let filter = query.to_filter()?;
        let state = self.state.read();
        paginate_filtered(&state.shells, |descriptor| filter.matches(descriptor), pagination)
    }

    fn get_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
    ) -> Result<SubmodelDescriptor> {
        let state = self.state.read();
        let submodels = state
            .submodels
            .get(aas_id)
            .ok_or_else(|| RegistryError::ShellNotFound(aas_id.to_string()))?;
        submodels.get(submodel_id).cloned().ok_or_else(|| {
            RegistryError::SubmodelNotFound {
                aas_id: aas_id.to_string(),
                submodel_id: submodel_id.to_string(),
            }
            .into()
        })
    }

    fn get_all_submodel_descriptors_through_superpath(
        &self,
        aas_id: &str,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<SubmodelDescriptor>>> {
        let state = self.state.read();
        let submodels = state
            .submodels
            .get(aas_id)
            .ok_or_else(|| RegistryError::ShellNotFound(aas_id.to_string()))?;
        paginate(submodels, pagination)
    }

    fn post_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel: SubmodelDescriptor,
    ) -> Result<()> {
        let mut state = self.state.write();
        if !state.shells.contains_key(aas_id) {
            return Err(RegistryError::ShellNotFound(aas_id.to_string()).into());
        }
        let submodels = state.submodels.entry(aas_id.to_string()).or_default();
        if submodels.contains_key(&submodel.id) {
            return Err(RegistryError::DuplicateIdentifier(submodel.id).into());
        }
        submodels.insert(submodel.id.clone(), submodel.clone());

        // write the owning shell's updated state back so backends with
        // explicit write-back semantics behave uniformly
        if let Some(shell) = state.shells.get_mut(aas_id) {
            shell.submodel_descriptors.push(submodel);
        }
        Ok(())
    }

    fn put_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
        submodel: SubmodelDescriptor,
    ) -> Result<()> {
        let mut state = self.state.write();
        if !state.shells.contains_key(aas_id) {
            return Err(RegistryError::ShellNotFound(aas_id.to_string()).into());
        }
        let submodels = state.submodels.entry(aas_id.to_string()).or_default();
        if !submodels.contains_key(submodel_id) {
            return Err(RegistryError::SubmodelNotFound {
                aas_id: aas_id.to_string(),
                submodel_id: submodel_id.to_string(),
            }
            .into());
        }
        // the replacement may carry a new id; it must not collide with a
        // sibling submodel
        if submodel.id != submodel_id && submodels.contains_key(&submodel.id) {
            return Err(RegistryError::DuplicateIdentifier(submodel.id).into());
        }
        submodels.remove(submodel_id);
        submodels.insert(submodel.id.clone(), submodel.clone());

        if let Some(shell) = state.shells.get_mut(aas_id) {
            if let Some(slot) = shell
                .submodel_descriptors
                .iter_mut()
                .find(|existing| existing.id == submodel_id)
            {
                *slot = submodel;
            }
        }
        Ok(())
    }

    fn delete_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
    ) -> Result<()> {
        let mut state = self.state.write();
        if !state.shells.contains_key(aas_id) {
            return Err(RegistryError::ShellNotFound(aas_id.to_string()).into());
        }
        let removed = state
            .submodels
            .get_mut(aas_id)
            .and_then(|submodels| submodels.remove(submodel_id));
        if removed.is_none() {
            return Err(RegistryError::SubmodelNotFound {
                aas_id: aas_id.to_string(),
                submodel_id: submodel_id.to_string(),
            }
            .into());
        }

        if let Some(shell) = state.shells.get_mut(aas_id) {
            shell.submodel_descriptors.retain(|existing| existing.id != submodel_id);
        }
        Ok(())
    }

    fn clear(&self) -> Result<Vec<String>> {
        let mut state = self.state.write();
        let unregistered: Vec<String> = state.shells.keys().cloned().collect();
        state.shells.clear();
        state.submodels.clear();
        debug!(count = unregistered.len(), "cleared registry storage");
        Ok(unregistered)
    }
}
