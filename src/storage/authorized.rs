//! Access-scoping decorator fed by an external authorization layer.
//!
//! The engine performs no policy evaluation of its own. It accepts a target
//! payload the surrounding RBAC/ABAC layer computed, turns it into a
//! [`DescriptorFilter`], and applies it to list operations and single-target
//! reads. A malformed payload is rejected with `InvalidTargetInformation`;
//! it never crashes the store.

use serde_json::Value;

use super::AasRegistryStorage;
use super::DescriptorFilter;
use super::DescriptorSearchQuery;
use crate::model::ShellDescriptor;
use crate::model::SubmodelDescriptor;
use crate::pagination::CursorResult;
use crate::pagination::PaginationInfo;
use crate::AuthorizationError;
use crate::RegistryError;
use crate::Result;

const WILDCARD: &str = "*";

/// Which shell ids a caller is scoped to. `*` grants everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetInformation {
    aas_ids: Vec<String>,
}

impl TargetInformation {
    pub fn all() -> Self {
        Self {
            aas_ids: vec![WILDCARD.to_string()],
        }
    }

    pub fn for_ids(aas_ids: Vec<String>) -> Self {
        Self { aas_ids }
    }

    /// Parses the payload handed over by the authorization layer:
    /// an object with a non-empty `aas_ids` array of non-empty strings.
    pub fn from_payload(payload: &Value) -> Result<Self> {
        let object = payload
            .as_object()
            .ok_or_else(|| AuthorizationError::InvalidTargetInformation("not an object".into()))?;
        let ids = object.get("aas_ids").ok_or_else(|| {
            AuthorizationError::InvalidTargetInformation("missing aas_ids".into())
        })?;
        let ids = ids.as_array().ok_or_else(|| {
            AuthorizationError::InvalidTargetInformation("aas_ids is not an array".into())
        })?;
        if ids.is_empty() {
            return Err(
                AuthorizationError::InvalidTargetInformation("aas_ids is empty".into()).into()
            );
        }

        let mut aas_ids = Vec::with_capacity(ids.len());
        for id in ids {
            match id.as_str() {
                Some(id) if !id.is_empty() => aas_ids.push(id.to_string()),
                Some(_) => {
                    return Err(AuthorizationError::InvalidTargetInformation(
                        "empty id pattern".into(),
                    )
                    .into())
                }
                None => {
                    return Err(AuthorizationError::InvalidTargetInformation(
                        "non-string id pattern".into(),
                    )
                    .into())
                }
            }
        }
        Ok(Self { aas_ids })
    }

    pub fn allows(
        &self,
        aas_id: &str,
    ) -> bool {
        self.aas_ids.iter().any(|pattern| pattern == WILDCARD || pattern == aas_id)
    }

    pub fn to_filter(&self) -> DescriptorFilter {
        let targets = self.clone();
        DescriptorFilter::new(move |descriptor| targets.allows(&descriptor.id))
    }
}

/// Scopes every single-target operation of the wrapped storage, reads and
/// writes alike, to the caller's targets.
///
/// Out-of-scope targets report `ShellNotFound` rather than revealing the
/// descriptor's existence; inserts of out-of-scope ids are refused the same
/// way. The collection-wide `clear` is administrative and stays with the
/// embedding layer, which must not hand it to scoped callers.
pub struct AuthorizedRegistryStorage<S> {
    inner: S,
    targets: TargetInformation,
}

impl<S: AasRegistryStorage> AuthorizedRegistryStorage<S> {
    pub fn new(
        inner: S,
        targets: TargetInformation,
    ) -> Self {
        Self { inner, targets }
    }

    /// Builds the decorator straight from the authorization layer's payload.
    pub fn from_payload(
        inner: S,
        payload: &Value,
    ) -> Result<Self> {
        Ok(Self::new(inner, TargetInformation::from_payload(payload)?))
    }

    fn check_target(
        &self,
        aas_id: &str,
    ) -> Result<()> {
        if self.targets.allows(aas_id) {
            Ok(())
        } else {
            Err(RegistryError::ShellNotFound(aas_id.to_string()).into())
        }
    }

    fn combined_filter(
        &self,
        filter: Option<DescriptorFilter>,
    ) -> DescriptorFilter {
        let targets = self.targets.to_filter();
        match filter {
            Some(outer) => {
                DescriptorFilter::new(move |d| targets.matches(d) && outer.matches(d))
            }
            None => targets,
        }
    }
}

impl<S: AasRegistryStorage> AasRegistryStorage for AuthorizedRegistryStorage<S> {
    fn insert_shell_descriptor(
        &self,
        descriptor: ShellDescriptor,
    ) -> Result<()> {
        self.check_target(&descriptor.id)?;
        self.inner.insert_shell_descriptor(descriptor)
    }

    fn update_shell_descriptor_by_id(
        &self,
        aas_id: &str,
        descriptor: ShellDescriptor,
    ) -> Result<()> {
        self.check_target(aas_id)?;
        self.inner.update_shell_descriptor_by_id(aas_id, descriptor)
    }

    fn delete_shell_descriptor_by_id(
        &self,
        aas_id: &str,
    ) -> Result<()> {
        self.check_target(aas_id)?;
        self.inner.delete_shell_descriptor_by_id(aas_id)
    }

    fn get_shell_descriptor_by_id(
        &self,
        aas_id: &str,
    ) -> Result<ShellDescriptor> {
        self.check_target(aas_id)?;
        self.inner.get_shell_descriptor_by_id(aas_id)
    }

    fn get_all_shell_descriptors(
        &self,
        filter: Option<DescriptorFilter>,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<ShellDescriptor>>> {
        self.inner
            .get_all_shell_descriptors(Some(self.combined_filter(filter)), pagination)
    }

    fn search_shell_descriptors(
        &self,
        query: &DescriptorSearchQuery,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<ShellDescriptor>>> {
        // a search is a filtered listing over the same ID-sorted space, so
        // the scope composes through the list path
        let filter = self.combined_filter(Some(query.to_filter()?));
        self.inner.get_all_shell_descriptors(Some(filter), pagination)
    }

    fn get_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
    ) -> Result<SubmodelDescriptor> {
        self.check_target(aas_id)?;
        self.inner.get_submodel_descriptor_through_superpath(aas_id, submodel_id)
    }

    fn get_all_submodel_descriptors_through_superpath(
        &self,
        aas_id: &str,
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<SubmodelDescriptor>>> {
        self.check_target(aas_id)?;
        self.inner.get_all_submodel_descriptors_through_superpath(aas_id, pagination)
    }

    fn post_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel: SubmodelDescriptor,
    ) -> Result<()> {
        self.check_target(aas_id)?;
        self.inner.post_submodel_descriptor_through_superpath(aas_id, submodel)
    }

    fn put_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
        submodel: SubmodelDescriptor,
    ) -> Result<()> {
        self.check_target(aas_id)?;
        self.inner.put_submodel_descriptor_through_superpath(aas_id, submodel_id, submodel)
    }

    fn delete_submodel_descriptor_through_superpath(
        &self,
        aas_id: &str,
        submodel_id: &str,
    ) -> Result<()> {
        self.check_target(aas_id)?;
        self.inner.delete_submodel_descriptor_through_superpath(aas_id, submodel_id)
    }

    fn clear(&self) -> Result<Vec<String>> {
        self.inner.clear()
    }
}
