//! Shell and submodel descriptor value types.
//!
//! A descriptor is the registry-side record describing how to reach a remote
//! digital-twin asset: identifiers plus endpoint metadata. The storage engine
//! only interprets the identifiers; everything else is opaque payload carried
//! along verbatim.

use serde::Deserialize;
use serde::Serialize;

use super::SpecificAssetId;

/// Descriptor of one Asset Administration Shell, uniquely identified by `id`.
///
/// Owns its submodel descriptors; their ids must be pairwise unique within
/// the shell, which the storage engine enforces on every insert and replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellDescriptor {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_short: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_kind: Option<AssetKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_asset_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specific_asset_ids: Vec<SpecificAssetId>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<Endpoint>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub submodel_descriptors: Vec<SubmodelDescriptor>,

    /// Arbitrary descriptor metadata, never inspected by the engine
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extensions: serde_json::Map<String, serde_json::Value>,
}

impl ShellDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            id_short: None,
            asset_kind: None,
            asset_type: None,
            global_asset_id: None,
            specific_asset_ids: Vec::new(),
            endpoints: Vec::new(),
            submodel_descriptors: Vec::new(),
            extensions: serde_json::Map::new(),
        }
    }

    pub fn with_submodels(
        id: impl Into<String>,
        submodel_descriptors: Vec<SubmodelDescriptor>,
    ) -> Self {
        Self {
            submodel_descriptors,
            ..Self::new(id)
        }
    }
}

/// Descriptor of one submodel, addressable directly or through its owning
/// shell ("superpath").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmodelDescriptor {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_short: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<Endpoint>,

    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extensions: serde_json::Map<String, serde_json::Value>,
}

impl SubmodelDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            id_short: None,
            semantic_id: None,
            endpoints: Vec::new(),
            extensions: serde_json::Map::new(),
        }
    }
}

/// Whether the described asset is a type or a concrete instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetKind {
    Type,
    Instance,
    NotApplicable,
}

/// How to reach the described element. Opaque to the storage engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub interface: String,
    pub protocol_information: ProtocolInformation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolInformation {
    pub href: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_protocol: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoint_protocol_versions: Vec<String>,
}

impl Endpoint {
    pub fn http(href: impl Into<String>) -> Self {
        Self {
            interface: "AAS-3.0".to_string(),
            protocol_information: ProtocolInformation {
                href: href.into(),
                endpoint_protocol: Some("HTTP".to_string()),
                endpoint_protocol_versions: Vec::new(),
            },
        }
    }
}
