//! Attribute search over the descriptor space.
//!
//! A search query addresses one descriptor attribute by path and matches its
//! value either exactly or against a regular expression. Evaluation walks
//! the ID-sorted key space with the query compiled into a
//! [`DescriptorFilter`], so results page with the same cursor contract as
//! plain listing.

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use super::DescriptorFilter;
use crate::model::ShellDescriptor;
use crate::RegistryError;
use crate::Result;

/// Descriptor attribute addressed by a search query.
///
/// Submodel paths match when any submodel of the shell carries the value;
/// the owning shell is returned whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchPath {
    Id,
    IdShort,
    AssetType,
    GlobalAssetId,
    SpecificAssetIdValue,
    SubmodelId,
    SubmodelIdShort,
    SubmodelSemanticId,
}

/// How the query value is compared against the attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchKind {
    #[default]
    Match,
    Regex,
}

/// One path/value search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorSearchQuery {
    pub path: SearchPath,
    pub value: String,

    #[serde(default)]
    pub kind: SearchKind,
}

impl DescriptorSearchQuery {
    pub fn exact(
        path: SearchPath,
        value: impl Into<String>,
    ) -> Self {
        Self {
            path,
            value: value.into(),
            kind: SearchKind::Match,
        }
    }

    pub fn regex(
        path: SearchPath,
        pattern: impl Into<String>,
    ) -> Self {
        Self {
            path,
            value: pattern.into(),
            kind: SearchKind::Regex,
        }
    }

    /// Compiles the query into a list predicate. An unparseable pattern is
    /// rejected with `InvalidSearchQuery` before any descriptor is visited.
    pub fn to_filter(&self) -> Result<DescriptorFilter> {
        let path = self.path;
        match self.kind {
            SearchKind::Match => {
                let wanted = self.value.clone();
                Ok(DescriptorFilter::new(move |descriptor| {
                    values_at_path(descriptor, path).any(|value| value == wanted)
                }))
            }
            SearchKind::Regex => {
                let pattern = Regex::new(&self.value)
                    .map_err(|e| RegistryError::InvalidSearchQuery(e.to_string()))?;
                Ok(DescriptorFilter::new(move |descriptor| {
                    values_at_path(descriptor, path).any(|value| pattern.is_match(value))
                }))
            }
        }
    }
}

fn values_at_path<'a>(
    descriptor: &'a ShellDescriptor,
    path: SearchPath,
) -> Box<dyn Iterator<Item = &'a str> + 'a> {
    match path {
        SearchPath::Id => Box::new(std::iter::once(descriptor.id.as_str())),
        SearchPath::IdShort => Box::new(descriptor.id_short.as_deref().into_iter()),
        SearchPath::AssetType => Box::new(descriptor.asset_type.as_deref().into_iter()),
        SearchPath::GlobalAssetId => Box::new(descriptor.global_asset_id.as_deref().into_iter()),
        SearchPath::SpecificAssetIdValue => Box::new(
            descriptor.specific_asset_ids.iter().map(|asset_id| asset_id.value.as_str()),
        ),
        SearchPath::SubmodelId => Box::new(
            descriptor.submodel_descriptors.iter().map(|submodel| submodel.id.as_str()),
        ),
        SearchPath::SubmodelIdShort => Box::new(
            descriptor
                .submodel_descriptors
                .iter()
                .filter_map(|submodel| submodel.id_short.as_deref()),
        ),
        SearchPath::SubmodelSemanticId => Box::new(
            descriptor
                .submodel_descriptors
                .iter()
                .filter_map(|submodel| submodel.semantic_id.as_deref()),
        ),
    }
}
