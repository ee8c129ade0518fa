//! Registry storage contract and its implementations.
//!
//! The core engine is [`InMemoryRegistryStorage`]; every cross-cutting
//! concern (thread safety, cursor transport encoding, defensive cloning,
//! event emission, access scoping) is a wrapper implementing the same
//! [`AasRegistryStorage`] trait. The chain is composed explicitly at
//! construction time by [`factory`], with no runtime wiring magic.

mod authorized;
mod cloning;
mod cursor_encoding;
mod event_sending;
mod factory;
mod filter;
mod in_memory;
mod search;
mod thread_safe;

#[cfg(test)]
mod authorized_test;
#[cfg(test)]
mod cloning_test;
#[cfg(test)]
mod factory_test;

pub use authorized::*;
pub use cloning::*;
pub use cursor_encoding::*;
pub use event_sending::*;
pub use factory::*;
pub use filter::*;
pub use in_memory::*;
pub use search::*;
pub use thread_safe::*;

use std::sync::Arc;

use crate::model::ShellDescriptor;
use crate::model::SubmodelDescriptor;
use crate::pagination::CursorResult;
use crate::pagination::PaginationInfo;
use crate::Result;

#[cfg(test)]
use mockall::automock;

/// Canonical CRUD contract over shell and submodel descriptors.
///
/// Descriptors are passed and returned by value: the store exclusively owns
/// its canonical copies, callers keep theirs. List operations page over the
/// ID-sorted key space with the cursor contract of [`crate::pagination`].
#[cfg_attr(test, automock)]
pub trait AasRegistryStorage: Send + Sync {
    /// Fails with `DuplicateIdentifier` when the shell id is already
    /// registered and with `DuplicateSubmodelIds` when the embedded submodel
    /// ids are not pairwise unique. Checked before any state change.
    fn insert_shell_descriptor(
        &self,
        descriptor: ShellDescriptor,
    ) -> Result<()>;

    /// Full replace, not a merge. The body id must equal `aas_id`.
    fn update_shell_descriptor_by_id(
        &self,
        aas_id: &str,
        descriptor: ShellDescriptor,
    ) -> Result<()>;

    /// Removes the shell and all nested submodel descriptors.
    fn delete_shell_descriptor_by_id(
        &self,
        aas_id: &str,
    ) -> Result<()>;

    fn get_shell_descriptor_by_id(
        &self,
        aas_id: &str,
    ) -> Result<ShellDescriptor>;

    /// Applies the externally computed predicate (identity when `None`) over
    /// the full ID-sorted key space, then the pagination window.
    fn get_all_shell_descriptors(
        &self,
        filter: Option<DescriptorFilter>,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<ShellDescriptor>>>;

    /// Matches one descriptor attribute by path and value over the full
    /// ID-sorted key space, paged like listing. `InvalidSearchQuery` when the
    /// query cannot be compiled.
    fn search_shell_descriptors(
        &self,
        query: &DescriptorSearchQuery,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<ShellDescriptor>>>;

    fn get_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
    ) -> Result<SubmodelDescriptor>;

    fn get_all_submodel_descriptors_through_superpath(
        &self,
        aas_id: &str,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<SubmodelDescriptor>>>;

    /// Adds a submodel to the owning shell; `DuplicateIdentifier` when the
    /// submodel id already exists within that shell.
    fn post_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel: SubmodelDescriptor,
    ) -> Result<()>;

    /// Replaces the addressed submodel; the replacement may carry a new id,
    /// the nested collection is re-keyed accordingly.
    fn put_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
        submodel: SubmodelDescriptor,
    ) -> Result<()>;

    fn delete_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
    ) -> Result<()>;

    /// Drops everything and reports the ids that were registered, so the
    /// event layer can emit one unregistration per shell.
    fn clear(&self) -> Result<Vec<String>>;
}

impl<S: AasRegistryStorage + ?Sized> AasRegistryStorage for Arc<S> {
    fn insert_shell_descriptor(
        &self,
        descriptor: ShellDescriptor,
    ) -> Result<()> {
        (**self).insert_shell_descriptor(descriptor)
    }

    fn update_shell_descriptor_by_id(
        &self,
        aas_id: &str,
        descriptor: ShellDescriptor,
    ) -> Result<()> {
        (**self).update_shell_descriptor_by_id(aas_id, descriptor)
    }

    fn delete_shell_descriptor_by_id(
        &self,
        aas_id: &str,
    ) -> Result<()> {
        (**self).delete_shell_descriptor_by_id(aas_id)
    }

    fn get_shell_descriptor_by_id(
        &self,
        aas_id: &str,
    ) -> Result<ShellDescriptor> {
        (**self).get_shell_descriptor_by_id(aas_id)
    }

    fn get_all_shell_descriptors(
        &self,
        filter: Option<DescriptorFilter>,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<ShellDescriptor>>> {
        (**self).get_all_shell_descriptors(filter, pagination)
    }

    fn search_shell_descriptors(
        &self,
        query: &DescriptorSearchQuery,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<ShellDescriptor>>> {
        (**self).search_shell_descriptors(query, pagination)
    }

    fn get_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
    ) -> Result<SubmodelDescriptor> {
        (**self).get_submodel_descriptor_through_superpath(aas_id, submodel_id)
    }

    fn get_all_submodel_descriptors_through_superpath(
        &self,
        aas_id: &str,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<SubmodelDescriptor>>> {
        (**self).get_all_submodel_descriptors_through_superpath(aas_id, pagination)
    }

    fn post_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel: SubmodelDescriptor,
    ) -> Result<()> {
        (**self).post_submodel_descriptor_through_superpath(aas_id, submodel)
    }

    fn put_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
        submodel: SubmodelDescriptor,
    ) -> Result<()> {
        (**self).put_submodel_descriptor_through_superpath(aas_id, submodel_id, submodel)
    }

    fn delete_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
    ) -> Result<()> {
        (**self).delete_submodel_descriptor_through_superpath(aas_id, submodel_id)
    }

    fn clear(&self) -> Result<Vec<String>> {
        (**self).clear()
    }
}
