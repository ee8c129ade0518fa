//! Deep-copy-on-access decorator (test support).
//!
//! Guarantees that no descriptor value is ever aliased between a caller and
//! the wrapped store: everything passed in and everything handed out is a
//! structural clone scoped to the single call. Swapped in for test setups
//! that probe aliasing bugs in storage implementations; the in-memory core
//! already copies on its own, durable backends may not.

use super::AasRegistryStorage;
use super::DescriptorFilter;
use super::DescriptorSearchQuery;
use crate::model::ShellDescriptor;
use crate::model::SubmodelDescriptor;
use crate::pagination::CursorResult;
use crate::pagination::PaginationInfo;
use crate::Result;

pub struct CloningRegistryStorage<S> {
    inner: S,
}

impl<S: AasRegistryStorage> CloningRegistryStorage<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: AasRegistryStorage> AasRegistryStorage for CloningRegistryStorage<S> {
    fn insert_shell_descriptor(
        &self,
        descriptor: ShellDescriptor,
    ) -> Result<()> {
        self.inner.insert_shell_descriptor(descriptor.clone())
    }

    fn update_shell_descriptor_by_id(
        &self,
        aas_id: &str,
        descriptor: ShellDescriptor,
    ) -> Result<()> {
        self.inner.update_shell_descriptor_by_id(aas_id, descriptor.clone())
    }

    fn delete_shell_descriptor_by_id(
        &self,
        aas_id: &str,
    ) -> Result<()> {
        self.inner.delete_shell_descriptor_by_id(aas_id)
    }

    fn get_shell_descriptor_by_id(
        &self,
        aas_id: &str,
    ) -> Result<ShellDescriptor> {
        let descriptor = self.inner.get_shell_descriptor_by_id(aas_id)?;
        Ok(descriptor.clone())
    }

    fn get_all_shell_descriptors(
        &self,
        filter: Option<DescriptorFilter>,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<ShellDescriptor>>> {
        self.inner
            .get_all_shell_descriptors(filter, pagination)
            .map(|page| page.map(|descriptors| descriptors.to_vec()))
    }

    fn search_shell_descriptors(
        &self,
        query: &DescriptorSearchQuery,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<ShellDescriptor>>> {
        self.inner
            .search_shell_descriptors(query, pagination)
            .map(|page| page.map(|descriptors| descriptors.to_vec()))
    }

    fn get_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
    ) -> Result<SubmodelDescriptor> {
        let submodel = self.inner.get_submodel_descriptor_through_superpath(aas_id, submodel_id)?;
        Ok(submodel.clone())
    }

    fn get_all_submodel_descriptors_through_superpath(
        &self,
        aas_id: &str,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<SubmodelDescriptor>>> {
        self.inner
            .get_all_submodel_descriptors_through_superpath(aas_id, pagination)
            .map(|page| page.map(|submodels| submodels.to_vec()))
    }

    fn post_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel: SubmodelDescriptor,
    ) -> Result<()> {
        self.inner.post_submodel_descriptor_through_superpath(aas_id, submodel.clone())
    }

    fn put_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
        submodel: SubmodelDescriptor,
    ) -> Result<()> {
        self.inner
            .put_submodel_descriptor_through_superpath(aas_id, submodel_id, submodel.clone())
    }

    fn delete_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
    ) -> Result<()> {
        self.inner.delete_submodel_descriptor_through_superpath(aas_id, submodel_id)
    }

    fn clear(&self) -> Result<Vec<String>> {
        self.inner.clear()
    }
}
