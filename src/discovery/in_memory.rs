use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::discovery::AasDiscoveryStorage;
use crate::model::AssetLink;
use crate::model::DiscoveryDocument;
use crate::model::SpecificAssetId;
use crate::pagination::paginate_filtered;
use crate::pagination::CursorResult;
use crate::pagination::PaginationInfo;
use crate::RegistryError;
use crate::Result;

/// Discovery index over an id-sorted in-memory map.
///
/// One [`DiscoveryDocument`] per shell, keyed by shell id so lookups page in
/// a stable order. The lock is held per call; there is no cross-call locking
/// to compose here since every operation touches a single key or a single
/// scan.
#[derive(Debug, Default)]
pub struct InMemoryDiscoveryStorage {
    documents: RwLock<BTreeMap<String, DiscoveryDocument>>,
}

impl InMemoryDiscoveryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AasDiscoveryStorage for InMemoryDiscoveryStorage {
    fn get_all_shell_ids_by_asset_link(
        &self,
        asset_links: &[AssetLink],
        pagination: &PaginationInfo,
    ) -> Result<CursorResult<Vec<String>>> {
        // An empty query intersects over nothing; matching every shell here
        // would turn a lookup endpoint into a dump endpoint.
        if asset_links.is_empty() {
            return Ok(CursorResult::new(Vec::new(), None));
        }

        let documents = self.documents.read();
        let page = paginate_filtered(
            &documents,
            |document| document.matches_all(asset_links),
            pagination,
        )?;
        Ok(page.map(|documents| {
            documents
                .into_iter()
                .map(|document| document.shell_id)
                .collect()
        }))
    }

    fn get_all_asset_links_by_id(
        &self,
        shell_id: &str,
    ) -> Result<Vec<SpecificAssetId>> {
        let documents = self.documents.read();
        let document = documents
            .get(shell_id)
            .ok_or_else(|| RegistryError::AssetLinkNotFound(shell_id.to_string()))?;
        Ok(document.specific_asset_ids.clone())
    }

    fn set_asset_links(
        &self,
        shell_id: &str,
        specific_asset_ids: Vec<SpecificAssetId>,
    ) -> Result<Vec<SpecificAssetId>> {
        let document = DiscoveryDocument::new(shell_id, specific_asset_ids);
        let stored = document.specific_asset_ids.clone();
        self.documents
            .write()
            .insert(shell_id.to_string(), document);
        Ok(stored)
    }

    fn delete_all_asset_links_by_id(
        &self,
        shell_id: &str,
    ) -> Result<()> {
        self.documents.write().remove(shell_id);
        Ok(())
    }
}
