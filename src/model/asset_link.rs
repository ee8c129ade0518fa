//! Asset identifier links and the discovery document keyed by them.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

/// One asset identifier key-value pair as queried through the lookup API.
///
/// `Ord` so link sets can live in ordered collections with set semantics.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetLink {
    pub name: String,
    pub value: String,
}

impl AssetLink {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Full asset identifier as registered by a shell, with optional semantics
/// metadata the engine carries along untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificAssetId {
    pub name: String,
    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_subject_id: Option<String>,
}

impl SpecificAssetId {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            external_subject_id: None,
        }
    }

    pub fn as_link(&self) -> AssetLink {
        AssetLink::new(self.name.clone(), self.value.clone())
    }
}

/// Discovery index entry: one shell and the asset links it is reachable by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryDocument {
    pub shell_id: String,
    pub asset_links: BTreeSet<AssetLink>,
    pub specific_asset_ids: Vec<SpecificAssetId>,
}

impl DiscoveryDocument {
    /// Derives the queryable link set from the registered asset ids.
    pub fn new(
        shell_id: impl Into<String>,
        specific_asset_ids: Vec<SpecificAssetId>,
    ) -> Self {
        let asset_links = specific_asset_ids.iter().map(SpecificAssetId::as_link).collect();
        Self {
            shell_id: shell_id.into(),
            asset_links,
            specific_asset_ids,
        }
    }

    /// True when this entry carries every queried link.
    pub fn matches_all(
        &self,
        links: &[AssetLink],
    ) -> bool {
        links.iter().all(|link| self.asset_links.contains(link))
    }
}
