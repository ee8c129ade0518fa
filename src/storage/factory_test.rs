use crate::config::EventSinkKind;
use crate::config::RegistrySettings;
use crate::discovery::AasDiscoveryStorage;
use crate::model::RegistryEventKind;
use crate::model::ShellDescriptor;
use crate::model::SpecificAssetId;
use crate::pagination::decode_cursor;
use crate::pagination::PaginationInfo;
use crate::storage::build_discovery_storage;
use crate::storage::build_event_sink;
use crate::storage::build_registry_storage;
use crate::storage::AasRegistryStorage;
use crate::storage::DescriptorSearchQuery;
use crate::storage::SearchPath;

#[test]
fn test_default_stack_round_trip() {
    let settings = RegistrySettings::default();
    let (sink, receiver) = build_event_sink(&settings);
    assert!(receiver.is_none(), "log sink needs no consumer");

    let storage = build_registry_storage(&settings, sink);
    storage
        .insert_shell_descriptor(ShellDescriptor::new("urn:shell:1"))
        .unwrap();
    let descriptor = storage.get_shell_descriptor_by_id("urn:shell:1").unwrap();
    assert_eq!(descriptor.id, "urn:shell:1");
}

#[test]
fn test_stack_hands_out_encoded_cursors() {
    let settings = RegistrySettings::default();
    let (sink, _) = build_event_sink(&settings);
    let storage = build_registry_storage(&settings, sink);

    for i in 0..4 {
        storage
            .insert_shell_descriptor(ShellDescriptor::new(format!("urn:shell:{i}")))
            .unwrap();
    }

    let page = storage
        .get_all_shell_descriptors(None, &PaginationInfo::first_page(2))
        .unwrap();
    let cursor = page.cursor.unwrap();
    assert_ne!(cursor, "urn:shell:1");
    assert_eq!(decode_cursor(&cursor).unwrap(), "urn:shell:1");
}

#[test]
fn test_search_through_the_stack_pages_with_encoded_cursors() {
    let settings = RegistrySettings::default();
    let (sink, _) = build_event_sink(&settings);
    let storage = build_registry_storage(&settings, sink);

    for i in 0..4 {
        let mut descriptor = ShellDescriptor::new(format!("urn:shell:{i}"));
        descriptor.asset_type = Some("machine".to_string());
        storage.insert_shell_descriptor(descriptor).unwrap();
    }

    let query = DescriptorSearchQuery::exact(SearchPath::AssetType, "machine");
    let first = storage
        .search_shell_descriptors(&query, &PaginationInfo::first_page(3))
        .unwrap();
    assert_eq!(first.result.len(), 3);
    let cursor = first.cursor.unwrap();
    assert_eq!(decode_cursor(&cursor).unwrap(), "urn:shell:2");

    let second = storage
        .search_shell_descriptors(&query, &PaginationInfo::resume(3, cursor))
        .unwrap();
    assert_eq!(second.result.len(), 1);
    assert!(second.cursor.is_none());
}

#[test]
fn test_broker_sink_delivers_committed_mutations() {
    let mut settings = RegistrySettings::default();
    settings.events.sink = EventSinkKind::Broker;
    settings.events.broker_channel_capacity = 4;

    let (sink, receiver) = build_event_sink(&settings);
    let mut receiver = receiver.expect("broker sink hands out a receiver");
    let storage = build_registry_storage(&settings, sink);

    storage
        .insert_shell_descriptor(ShellDescriptor::new("urn:shell:1"))
        .unwrap();
    storage.delete_shell_descriptor_by_id("urn:shell:1").unwrap();

    let first = receiver.try_recv().unwrap();
    assert_eq!(first.kind, RegistryEventKind::ShellRegistered);
    let second = receiver.try_recv().unwrap();
    assert_eq!(second.kind, RegistryEventKind::ShellUnregistered);
    assert!(receiver.try_recv().is_err());
}

#[test]
fn test_none_sink_emits_nothing_and_mutations_still_commit() {
    let mut settings = RegistrySettings::default();
    settings.events.sink = EventSinkKind::None;

    let (sink, receiver) = build_event_sink(&settings);
    assert!(receiver.is_none());
    let storage = build_registry_storage(&settings, sink);

    storage
        .insert_shell_descriptor(ShellDescriptor::new("urn:shell:1"))
        .unwrap();
    assert!(storage.get_shell_descriptor_by_id("urn:shell:1").is_ok());
}

#[test]
fn test_discovery_stack_encodes_cursors() {
    let settings = RegistrySettings::default();
    let discovery = build_discovery_storage(&settings);

    for i in 0..3 {
        discovery
            .set_asset_links(
                &format!("urn:shell:{i}"),
                vec![SpecificAssetId::new("plant", "berlin")],
            )
            .unwrap();
    }

    let page = discovery
        .get_all_shell_ids_by_asset_link(
            &[crate::model::AssetLink::new("plant", "berlin")],
            &PaginationInfo::first_page(2),
        )
        .unwrap();
    assert_eq!(page.result.len(), 2);
    let cursor = page.cursor.unwrap();
    assert_eq!(decode_cursor(&cursor).unwrap(), "urn:shell:1");
}
