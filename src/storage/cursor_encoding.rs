//! Cursor transport-encoding decorator.
//!
//! The core store pages with plain descriptor ids as cursors. This wrapper
//! opaque-encodes them on the way out and decodes them on the way in, so the
//! wire format carries no semantic meaning and the core's pagination
//! internals stay private.

use super::AasRegistryStorage;
use super::DescriptorFilter;
use super::DescriptorSearchQuery;
use crate::model::ShellDescriptor;
use crate::model::SubmodelDescriptor;
use crate::pagination::decode_cursor;
use crate::pagination::encode_cursor;
use crate::pagination::CursorResult;
use crate::pagination::PaginationInfo;
use crate::Result;

pub struct CursorEncodingStorage<S> {
    inner: S,
}

impl<S: AasRegistryStorage> CursorEncodingStorage<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

fn decode_pagination(pagination: &PaginationInfo) -> Result<PaginationInfo> {
    let cursor = match &pagination.cursor {
        Some(encoded) => Some(decode_cursor(encoded)?),
        None => None,
    };
    Ok(PaginationInfo::new(pagination.limit, cursor))
}

fn encode_result<T>(result: CursorResult<T>) -> CursorResult<T> {
    let cursor = result.cursor.as_deref().map(encode_cursor);
    CursorResult::new(result.result, cursor)
}

impl<S: AasRegistryStorage> AasRegistryStorage for CursorEncodingStorage<S> {
    fn insert_shell_descriptor(
        &self,
        descriptor: ShellDescriptor,
    ) -> Result<()> {
        self.inner.insert_shell_descriptor(descriptor)
    }

    fn update_shell_descriptor_by_id(
        &self,
        aas_id: &str,
        descriptor: ShellDescriptor,
    ) -> Result<()> {
        self.inner.update_shell_descriptor_by_id(aas_id, descriptor)
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
        self.inner.get_shell_descriptor_by_id(aas_id)
    }

    fn get_all_shell_descriptors(
        &self,
        filter: Option<DescriptorFilter>,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<ShellDescriptor>>> {
        let decoded = decode_pagination(pagination)?;
        let result = self.inner.get_all_shell_descriptors(filter, &decoded)?;
        Ok(encode_result(result))
    }

    fn search_shell_descriptors(
        &self,
        query: &DescriptorSearchQuery,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<ShellDescriptor>>> {
        let decoded = decode_pagination(pagination)?;
        let result = self.inner.search_shell_descriptors(query, &decoded)?;
        Ok(encode_result(result))
    }

    fn get_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
    ) -> Result<SubmodelDescriptor> {
        self.inner.get_submodel_descriptor_through_superpath(aas_id, submodel_id)
    }

    fn get_all_submodel_descriptors_through_superpath(
        &self,
        aas_id: &str,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<SubmodelDescriptor>>> {
        let decoded = decode_pagination(pagination)?;
        let result = self
            .inner
            .get_all_submodel_descriptors_through_superpath(aas_id, &decoded)?;
        Ok(encode_result(result))
    }

    fn post_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel: SubmodelDescriptor,
    ) -> Result<()> {
        self.inner.post_submodel_descriptor_through_superpath(aas_id, submodel)
    }

    fn put_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
        submodel: SubmodelDescriptor,
    ) -> Result<()> {
        self.inner.put_submodel_descriptor_through_superpath(aas_id, submodel_id, submodel)
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
