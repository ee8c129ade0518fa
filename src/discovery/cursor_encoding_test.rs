use crate::discovery::AasDiscoveryStorage;
use crate::discovery::CursorEncodingDiscoveryStorage;
use crate::discovery::InMemoryDiscoveryStorage;
use crate::discovery::MockAasDiscoveryStorage;
use crate::model::AssetLink;
use crate::model::SpecificAssetId;
use crate::pagination::decode_cursor;
use crate::pagination::encode_cursor;
use crate::pagination::CursorResult;
use crate::pagination::PaginationInfo;
use crate::Error;
use crate::PaginationError;

fn populated_index(n: usize) -> CursorEncodingDiscoveryStorage<InMemoryDiscoveryStorage> {
    let storage = CursorEncodingDiscoveryStorage::new(InMemoryDiscoveryStorage::new());
    for i in 0..n {
        storage
            .set_asset_links(
                &format!("urn:shell:{i:02}"),
                vec![SpecificAssetId::new("plant", "berlin")],
            )
            .unwrap();
    }
    storage
}

#[test]
fn test_outgoing_cursor_is_opaque_and_resumable() {
    let storage = populated_index(10);
    let query = [AssetLink::new("plant", "berlin")];

    let page1 = storage
        .get_all_shell_ids_by_asset_link(&query, &PaginationInfo::first_page(6))
        .unwrap();
    let cursor = page1.cursor.clone().unwrap();
    assert_ne!(cursor, "urn:shell:05");
    assert_eq!(decode_cursor(&cursor).unwrap(), "urn:shell:05");

    let page2 = storage
        .get_all_shell_ids_by_asset_link(&query, &PaginationInfo::resume(6, cursor))
        .unwrap();
    assert_eq!(page2.result, vec!["urn:shell:06", "urn:shell:07", "urn:shell:08", "urn:shell:09"]);
    assert_eq!(page2.cursor, None);
}

#[test]
fn test_undecodable_incoming_cursor_is_rejected() {
    let storage = populated_index(3);

    let err = storage
        .get_all_shell_ids_by_asset_link(
            &[AssetLink::new("plant", "berlin")],
            &PaginationInfo::resume(2, "!!not/base64!!"),
        )
        .unwrap_err();
    assert!(matches!(err, Error::Pagination(PaginationError::InvalidCursor(_))));
}

#[test]
fn test_inner_index_receives_decoded_cursor() {
    let mut mock = MockAasDiscoveryStorage::new();
    mock.expect_get_all_shell_ids_by_asset_link()
        .withf(|_, pagination| pagination.cursor.as_deref() == Some("urn:shell:05"))
        .returning(|_, _| Ok(CursorResult::new(Vec::new(), None)));

    let storage = CursorEncodingDiscoveryStorage::new(mock);
    let encoded = encode_cursor("urn:shell:05");
    storage
        .get_all_shell_ids_by_asset_link(
            &[AssetLink::new("plant", "berlin")],
            &PaginationInfo::resume(4, encoded),
        )
        .unwrap();
}

#[test]
fn test_pass_through_operations_are_untouched() {
    let storage = populated_index(1);

    let links = storage.get_all_asset_links_by_id("urn:shell:00").unwrap();
    assert_eq!(links, vec![SpecificAssetId::new("plant", "berlin")]);
    storage.delete_all_asset_links_by_id("urn:shell:00").unwrap();
}
