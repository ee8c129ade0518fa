//! Storage decorator that turns committed mutations into registry events.

use std::sync::Arc;

use tracing::warn;

use super::AasRegistryStorage;
use super::DescriptorFilter;
use super::DescriptorSearchQuery;
use crate::events::RegistryEventSink;
use crate::model::RegistryEvent;
use crate::model::ShellDescriptor;
use crate::model::SubmodelDescriptor;
use crate::pagination::CursorResult;
use crate::pagination::PaginationInfo;
use crate::Result;

/// Emits exactly one event per committed mutation, after the wrapped call
/// returned successfully. A replacement that re-keys its target emits an
/// unregistration for the old id followed by a registration for the new one.
///
/// Sink failures are logged and dropped; the mutation's success stands.
pub struct EventSendingRegistryStorage<S> {
    inner: S,
    sink: Arc<dyn RegistryEventSink>,
}

impl<S: AasRegistryStorage> EventSendingRegistryStorage<S> {
    pub fn new(
        inner: S,
        sink: Arc<dyn RegistryEventSink>,
    ) -> Self {
        Self { inner, sink }
    }

    fn emit(
        &self,
        event: RegistryEvent,
    ) {
        if let Err(e) = self.sink.consume_event(event) {
            warn!("dropping registry event, sink refused delivery: {e}");
        }
    }
}

impl<S: AasRegistryStorage> AasRegistryStorage for EventSendingRegistryStorage<S> {
    fn insert_shell_descriptor(
        &self,
        descriptor: ShellDescriptor,
    ) -> Result<()> {
        self.inner.insert_shell_descriptor(descriptor.clone())?;
        self.emit(RegistryEvent::shell_registered(descriptor));
        Ok(())
    }

    fn update_shell_descriptor_by_id(
        &self,
        aas_id: &str,
        descriptor: ShellDescriptor,
    ) -> Result<()> {
        self.inner.update_shell_descriptor_by_id(aas_id, descriptor.clone())?;
        self.emit(RegistryEvent::shell_updated(descriptor));
        Ok(())
    }

    fn delete_shell_descriptor_by_id(
        &self,
        aas_id: &str,
    ) -> Result<()> {
        self.inner.delete_shell_descriptor_by_id(aas_id)?;
        self.emit(RegistryEvent::shell_unregistered(aas_id));
        Ok(())
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
        self.inner.get_all_shell_descriptors(filter, pagination)
    }

    fn search_shell_descriptors(
        &self,
        query: &DescriptorSearchQuery,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<ShellDescriptor>>> {
        self.inner.search_shell_descriptors(query, pagination)
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
        self.inner.get_all_submodel_descriptors_through_superpath(aas_id, pagination)
    }

    fn post_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel: SubmodelDescriptor,
    ) -> Result<()> {
        self.inner.post_submodel_descriptor_through_superpath(aas_id, submodel.clone())?;
        self.emit(RegistryEvent::submodel_registered(aas_id, submodel));
        Ok(())
    }

    fn put_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
        submodel: SubmodelDescriptor,
    ) -> Result<()> {
        self.inner
            .put_submodel_descriptor_through_superpath(aas_id, submodel_id, submodel.clone())?;
        if submodel.id != submodel_id {
            self.emit(RegistryEvent::submodel_unregistered(aas_id, submodel_id));
            self.emit(RegistryEvent::submodel_registered(aas_id, submodel));
        } else {
            self.emit(RegistryEvent::submodel_updated(aas_id, submodel));
        }
        Ok(())
    }

    fn delete_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
    ) -> Result<()> {
        self.inner.delete_submodel_descriptor_through_superpath(aas_id, submodel_id)?;
        self.emit(RegistryEvent::submodel_unregistered(aas_id, submodel_id));
        Ok(())
    }

    fn clear(&self) -> Result<Vec<String>> {
        let unregistered = self.inner.clear()?;
        for aas_id in &unregistered {
            self.emit(RegistryEvent::shell_unregistered(aas_id.clone()));
        }
        Ok(unregistered)
    }
}
