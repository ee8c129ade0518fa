//! Cursor transport-encoding decorator for the discovery index.
//!
//! Same contract as the descriptor-store wrapper: shell-id cursors are
//! opaque-encoded on the way out and decoded on the way in.

use super::AasDiscoveryStorage;
use crate::model::AssetLink;
use crate::model::SpecificAssetId;
use crate::pagination::decode_cursor;
use crate::pagination::encode_cursor;
use crate::pagination::CursorResult;
use crate::pagination::PaginationInfo;
use crate::Result;

pub struct CursorEncodingDiscoveryStorage<S> {
    inner: S,
}

impl<S: AasDiscoveryStorage> CursorEncodingDiscoveryStorage<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: AasDiscoveryStorage> AasDiscoveryStorage for CursorEncodingDiscoveryStorage<S> {
    fn get_all_shell_ids_by_asset_link(
        &self,
        asset_links: &[AssetLink],
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<String>>> {
        let cursor = match &pagination.cursor {
            Some(encoded) => Some(decode_cursor(encoded)?),
            None => None,
        };
        let decoded = PaginationInfo::new(pagination.limit, cursor);

        let result = self.inner.get_all_shell_ids_by_asset_link(asset_links, &decoded)?;
        let cursor = result.cursor.as_deref().map(encode_cursor);
        Ok(CursorResult::new(result.result, cursor))
    }

    fn get_all_asset_links_by_id(
        &self,
        shell_id: &str,
    ) -> Result<Vec<SpecificAssetId>> {
        self.inner.get_all_asset_links_by_id(shell_id)
    }

    fn set_asset_links(
        &self,
        shell_id: &str,
        specific_asset_ids: Vec<SpecificAssetId>,
    ) -> Result<Vec<SpecificAssetId>> {
        self.inner.set_asset_links(shell_id, specific_asset_ids)
    }

    fn delete_all_asset_links_by_id(
        &self,
        shell_id: &str,
    ) -> Result<()> {
        self.inner.delete_all_asset_links_by_id(shell_id)
    }
}
