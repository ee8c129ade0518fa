//! Asset-link discovery: a many-to-many index from shells to asset ids.
//!
//! The registry answers "which shells carry these asset ids" without
//! touching the descriptor store. Each shell owns a replaceable set of
//! specific asset ids; lookup intersects over all requested name/value
//! pairs, so every pair must be present on a shell for it to match.

mod cursor_encoding;
mod in_memory;

#[cfg(test)]
mod cursor_encoding_test;

pub use cursor_encoding::CursorEncodingDiscoveryStorage;
pub use in_memory::InMemoryDiscoveryStorage;

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use crate::model::AssetLink;
use crate::model::SpecificAssetId;
use crate::pagination::CursorResult;
use crate::pagination::PaginationInfo;
use crate::Result;

/// Storage contract for the discovery index.
///
/// Shell ids are the primary key; the asset-id sets hanging off them are
/// replaced wholesale, never merged.
#[cfg_attr(test, automock)]
pub trait AasDiscoveryStorage: Send + Sync {
    /// Returns the ids of all shells carrying every one of the given
    /// name/value pairs, paged in id order. An empty query matches nothing.
    fn get_all_shell_ids_by_asset_link(
        &self,
        asset_links: &[AssetLink],
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<String>>>;

    /// Returns the specific asset ids registered for a shell.
    fn get_all_asset_links_by_id(
        &self,
        shell_id: &str,
    ) -> Result<Vec<SpecificAssetId>>;

    /// Registers the given asset ids for a shell, replacing whatever was
    /// registered before.
    fn set_asset_links(
        &self,
        shell_id: &str,
        specific_asset_ids: Vec<SpecificAssetId>,
    ) -> Result<Vec<SpecificAssetId>>;

    /// Removes a shell from the index. Removing an absent shell is a no-op,
    /// so delete is idempotent and safe to retry.
    fn delete_all_asset_links_by_id(
        &self,
        shell_id: &str,
    ) -> Result<()>;
}

impl<S: AasDiscoveryStorage + ?Sized> AasDiscoveryStorage for Arc<S> {
    fn get_all_shell_ids_by_asset_link(
        &self,
        asset_links: &[AssetLink],
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<String>>> {
        (**self).get_all_shell_ids_by_asset_link(asset_links, pagination)
    }

    fn get_all_asset_links_by_id(
        &self,
        shell_id: &str,
    ) -> Result<Vec<SpecificAssetId>> {
        (**self).get_all_asset_links_by_id(shell_id)
    }

    fn set_asset_links(
        &self,
        shell_id: &str,
        specific_asset_ids: Vec<SpecificAssetId>,
    ) -> Result<Vec<SpecificAssetId>> {
        (**self).set_asset_links(shell_id, specific_asset_ids)
    }

    fn delete_all_asset_links_by_id(
        &self,
        shell_id: &str,
    ) -> Result<()> {
        (**self).delete_all_asset_links_by_id(shell_id)
    }
}
