//! Domain events describing committed registry mutations.

use serde::Deserialize;
use serde::Serialize;

use super::ShellDescriptor;
use super::SubmodelDescriptor;

/// Immutable record of one committed mutation, created synchronously at the
/// commit point and handed to exactly one configured sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEvent {
    pub kind: RegistryEventKind,

    /// Shell the mutation targeted
    pub shell_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submodel_id: Option<String>,

    /// After-snapshot for registrations and updates; `None` for removals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell_descriptor: Option<ShellDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submodel_descriptor: Option<SubmodelDescriptor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistryEventKind {
    ShellRegistered,
    ShellUpdated,
    ShellUnregistered,
    SubmodelRegistered,
    SubmodelUpdated,
    SubmodelUnregistered,
}

impl RegistryEvent {
    pub fn shell_registered(descriptor: ShellDescriptor) -> Self {
        Self {
            kind: RegistryEventKind::ShellRegistered,
            shell_id: descriptor.id.clone(),
            submodel_id: None,
            shell_descriptor: Some(descriptor),
            submodel_descriptor: None,
        }
    }

    pub fn shell_updated(descriptor: ShellDescriptor) -> Self {
        Self {
            kind: RegistryEventKind::ShellUpdated,
            shell_id: descriptor.id.clone(),
            submodel_id: None,
            shell_descriptor: Some(descriptor),
            submodel_descriptor: None,
        }
    }

    pub fn shell_unregistered(shell_id: impl Into<String>) -> Self {
        Self {
            kind: RegistryEventKind::ShellUnregistered,
            shell_id: shell_id.into(),
            submodel_id: None,
            shell_descriptor: None,
            submodel_descriptor: None,
        }
    }

    pub fn submodel_registered(
        shell_id: impl Into<String>,
        submodel: SubmodelDescriptor,
    ) -> Self {
        Self {
            kind: RegistryEventKind::SubmodelRegistered,
            shell_id: shell_id.into(),
            submodel_id: Some(submodel.id.clone()),
            shell_descriptor: None,
            submodel_descriptor: Some(submodel),
        }
    }

    pub fn submodel_updated(
        shell_id: impl Into<String>,
        submodel: SubmodelDescriptor,
    ) -> Self {
        Self {
            kind: RegistryEventKind::SubmodelUpdated,
            shell_id: shell_id.into(),
            submodel_id: Some(submodel.id.clone()),
            shell_descriptor: None,
            submodel_descriptor: Some(submodel),
        }
    }

    pub fn submodel_unregistered(
        shell_id: impl Into<String>,
        submodel_id: impl Into<String>,
    ) -> Self {
        Self {
            kind: RegistryEventKind::SubmodelUnregistered,
            shell_id: shell_id.into(),
            submodel_id: Some(submodel_id.into()),
            shell_descriptor: None,
            submodel_descriptor: None,
        }
    }
}
