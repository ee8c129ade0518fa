use crate::model::ShellDescriptor;
use crate::model::SubmodelDescriptor;
use crate::pagination::PaginationInfo;
use crate::storage::AasRegistryStorage;
use crate::storage::CloningRegistryStorage;
use crate::storage::InMemoryRegistryStorage;

#[test]
fn test_caller_mutations_never_reach_the_store() {
    let storage = CloningRegistryStorage::new(InMemoryRegistryStorage::new());

    let mut descriptor = ShellDescriptor::new("urn:shell:1");
    storage.insert_shell_descriptor(descriptor.clone()).unwrap();

    // mutate the caller's copy after the insert
    descriptor.id_short = Some("mutated".to_string());
    descriptor.submodel_descriptors.push(SubmodelDescriptor::new("urn:sm:late"));

    let stored = storage.get_shell_descriptor_by_id("urn:shell:1").unwrap();
    assert_eq!(stored.id_short, None);
    assert!(stored.submodel_descriptors.is_empty());
}

#[test]
fn test_returned_copies_are_detached_per_call() {
    let storage = CloningRegistryStorage::new(InMemoryRegistryStorage::new());
    storage.insert_shell_descriptor(ShellDescriptor::new("urn:shell:1")).unwrap();

    let mut first = storage.get_shell_descriptor_by_id("urn:shell:1").unwrap();
    first.id_short = Some("local-change".to_string());

    let second = storage.get_shell_descriptor_by_id("urn:shell:1").unwrap();
    assert_eq!(second.id_short, None);
}

#[test]
fn test_listing_passes_through_the_page() {
    let storage = CloningRegistryStorage::new(InMemoryRegistryStorage::new());
    for i in 0..3 {
        storage
            .insert_shell_descriptor(ShellDescriptor::new(format!("urn:shell:{i}")))
            .unwrap();
    }

    let page = storage
        .get_all_shell_descriptors(None, &PaginationInfo::first_page(2))
        .unwrap();
    assert_eq!(page.result.len(), 2);
    assert_eq!(page.cursor.as_deref(), Some("urn:shell:1"));
}
