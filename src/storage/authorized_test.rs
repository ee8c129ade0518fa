use std::sync::Arc;

use serde_json::json;

use crate::model::ShellDescriptor;
use crate::model::SubmodelDescriptor;
use crate::pagination::PaginationInfo;
use crate::storage::AasRegistryStorage;
use crate::storage::AuthorizedRegistryStorage;
use crate::storage::DescriptorFilter;
use crate::storage::DescriptorSearchQuery;
use crate::storage::InMemoryRegistryStorage;
use crate::storage::SearchPath;
use crate::storage::TargetInformation;
use crate::AuthorizationError;
use crate::Error;
use crate::RegistryError;

fn populated() -> InMemoryRegistryStorage {
    let storage = InMemoryRegistryStorage::new();
    for id in ["urn:shell:a", "urn:shell:b", "urn:shell:c"] {
        storage.insert_shell_descriptor(ShellDescriptor::new(id)).unwrap();
    }
    storage
}

#[test]
fn test_malformed_target_payloads_are_rejected() {
    for payload in [
        json!("just a string"),
        json!({}),
        json!({ "aas_ids": "urn:shell:a" }),
        json!({ "aas_ids": [] }),
        json!({ "aas_ids": [""] }),
        json!({ "aas_ids": [42] }),
    ] {
        let err = TargetInformation::from_payload(&payload).unwrap_err();
        assert!(
            matches!(
                err,
                Error::Authorization(AuthorizationError::InvalidTargetInformation(_))
            ),
            "payload {payload} should be rejected"
        );
    }
}

#[test]
fn test_well_formed_payload_parses() {
    let targets =
        TargetInformation::from_payload(&json!({ "aas_ids": ["urn:shell:a", "*"] })).unwrap();
    assert!(targets.allows("urn:shell:a"));
    assert!(targets.allows("urn:shell:anything-else"));
}

#[test]
fn test_listing_is_scoped_to_targets() {
    let storage = AuthorizedRegistryStorage::new(
        populated(),
        TargetInformation::for_ids(vec!["urn:shell:a".into(), "urn:shell:c".into()]),
    );

    let page = storage
        .get_all_shell_descriptors(None, &PaginationInfo::no_limit())
        .unwrap();
    let ids: Vec<&str> = page.result.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["urn:shell:a", "urn:shell:c"]);
}

#[test]
fn test_external_filter_composes_with_target_scope() {
    let storage = AuthorizedRegistryStorage::new(populated(), TargetInformation::all());

    let page = storage
        .get_all_shell_descriptors(
            Some(DescriptorFilter::new(|d| d.id.ends_with('b'))),
            &PaginationInfo::no_limit(),
        )
        .unwrap();
    assert_eq!(page.result.len(), 1);
    assert_eq!(page.result[0].id, "urn:shell:b");
}

#[test]
fn test_out_of_scope_read_reports_not_found() {
    let storage = AuthorizedRegistryStorage::new(
        populated(),
        TargetInformation::for_ids(vec!["urn:shell:a".into()]),
    );

    storage.get_shell_descriptor_by_id("urn:shell:a").unwrap();
    let err = storage.get_shell_descriptor_by_id("urn:shell:b").unwrap_err();
    assert!(matches!(err, Error::Registry(RegistryError::ShellNotFound(_))));
}

#[test]
fn test_out_of_scope_writes_report_not_found_and_leave_state_intact() {
    let core = Arc::new(populated());
    let storage = AuthorizedRegistryStorage::new(
        Arc::clone(&core),
        TargetInformation::for_ids(vec!["urn:shell:a".into()]),
    );

    let err = storage.delete_shell_descriptor_by_id("urn:shell:b").unwrap_err();
    assert!(matches!(err, Error::Registry(RegistryError::ShellNotFound(_))));

    let err = storage
        .update_shell_descriptor_by_id("urn:shell:b", ShellDescriptor::new("urn:shell:b"))
        .unwrap_err();
    assert!(matches!(err, Error::Registry(RegistryError::ShellNotFound(_))));

    let err = storage
        .post_submodel_descriptor_through_superpath("urn:shell:b", SubmodelDescriptor::new("urn:sm:1"))
        .unwrap_err();
    assert!(matches!(err, Error::Registry(RegistryError::ShellNotFound(_))));

    // the denied shell is still there, untouched
    let untouched = core.get_shell_descriptor_by_id("urn:shell:b").unwrap();
    assert!(untouched.submodel_descriptors.is_empty());
}

#[test]
fn test_out_of_scope_insert_is_refused() {
    let storage = AuthorizedRegistryStorage::new(
        InMemoryRegistryStorage::new(),
        TargetInformation::for_ids(vec!["urn:shell:a".into()]),
    );

    let err = storage
        .insert_shell_descriptor(ShellDescriptor::new("urn:shell:b"))
        .unwrap_err();
    assert!(matches!(err, Error::Registry(RegistryError::ShellNotFound(_))));
}

#[test]
fn test_in_scope_writes_pass_through() {
    let storage = AuthorizedRegistryStorage::new(
        populated(),
        TargetInformation::for_ids(vec!["urn:shell:a".into()]),
    );

    storage
        .post_submodel_descriptor_through_superpath("urn:shell:a", SubmodelDescriptor::new("urn:sm:1"))
        .unwrap();
    storage
        .delete_submodel_descriptor_through_superpath("urn:shell:a", "urn:sm:1")
        .unwrap();
    storage.delete_shell_descriptor_by_id("urn:shell:a").unwrap();
}

#[test]
fn test_search_is_scoped_to_targets() {
    let storage = AuthorizedRegistryStorage::new(
        populated(),
        TargetInformation::for_ids(vec!["urn:shell:a".into()]),
    );

    // the query matches every seeded shell, the scope cuts it down
    let query = DescriptorSearchQuery::regex(SearchPath::Id, "^urn:shell:");
    let page = storage
        .search_shell_descriptors(&query, &PaginationInfo::no_limit())
        .unwrap();
    let ids: Vec<&str> = page.result.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["urn:shell:a"]);
}

#[test]
fn test_wildcard_scope_passes_everything() {
    let storage = AuthorizedRegistryStorage::from_payload(populated(), &json!({ "aas_ids": ["*"] }))
        .unwrap();

    let page = storage
        .get_all_shell_descriptors(None, &PaginationInfo::no_limit())
        .unwrap();
    assert_eq!(page.result.len(), 3);
}
