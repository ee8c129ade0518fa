//! Externally computed list-scoping predicate.

use std::fmt;
use std::sync::Arc;

use crate::model::AssetKind;
use crate::model::ShellDescriptor;

/// Predicate applied over the ID-sorted descriptor space before pagination.
///
/// Computed outside the storage engine (typically by an RBAC/ABAC layer);
/// the engine only evaluates it. Cheap to clone, shared behind an `Arc`.
#[derive(Clone)]
pub struct DescriptorFilter {
    predicate: Arc<dyn Fn(&ShellDescriptor) -> bool + Send + Sync>,
}

impl DescriptorFilter {
    pub fn new(predicate: impl Fn(&ShellDescriptor) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// Identity predicate: every descriptor passes.
    pub fn allow_all() -> Self {
        Self::new(|_| true)
    }

    /// Matches descriptors of the given asset kind, and asset type when one
    /// is required.
    pub fn by_asset(
        kind: AssetKind,
        asset_type: Option<String>,
    ) -> Self {
        Self::new(move |descriptor| {
            if descriptor.asset_kind != Some(kind) {
                return false;
            }
            match &asset_type {
                Some(wanted) => descriptor.asset_type.as_deref() == Some(wanted.as_str()),
                None => true,
            }
        })
    }

    pub fn matches(
        &self,
        descriptor: &ShellDescriptor,
    ) -> bool {
        (self.predicate)(descriptor)
    }
}

impl fmt::Debug for DescriptorFilter {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("DescriptorFilter").finish()
    }
}
