use std::collections::BTreeMap;

use crate::pagination::decode_cursor;
use crate::pagination::encode_cursor;
use crate::pagination::paginate;
use crate::pagination::paginate_filtered;
use crate::pagination::PaginationInfo;
use crate::Error;
use crate::PaginationError;

fn numbered_map(n: usize) -> BTreeMap<String, String> {
    (0..n).map(|i| (i.to_string(), format!("value-{i}"))).collect()
}

#[test]
fn test_first_page_and_resume_cover_whole_collection() {
    let map = numbered_map(10);

    let page1 = paginate(&map, &PaginationInfo::first_page(6)).unwrap();
    assert_eq!(page1.result.len(), 6);
    assert_eq!(page1.result[0], "value-0");
    assert_eq!(page1.result[5], "value-5");
    assert_eq!(page1.cursor.as_deref(), Some("5"));

    let page2 = paginate(&map, &PaginationInfo::resume(6, "5")).unwrap();
    assert_eq!(page2.result.len(), 4);
    assert_eq!(page2.result[3], "value-9");
    assert_eq!(page2.cursor, None);
}

#[test]
fn test_every_item_returned_exactly_once_for_any_limit() {
    let map = numbered_map(23);

    for limit in 1..=24 {
        let mut collected = Vec::new();
        let mut pagination = PaginationInfo::first_page(limit);
        loop {
            let page = paginate(&map, &pagination).unwrap();
            collected.extend(page.result);
            match page.cursor {
                Some(cursor) => pagination = PaginationInfo::resume(limit, cursor),
                None => break,
            }
        }
        let expected: Vec<String> = map.values().cloned().collect();
        assert_eq!(collected, expected, "limit {limit}");
    }
}

#[test]
fn test_exact_fit_page_signals_end() {
    let map = numbered_map(6);

    // the page consumes the whole collection, so no cursor is handed out
    let page = paginate(&map, &PaginationInfo::first_page(6)).unwrap();
    assert_eq!(page.result.len(), 6);
    assert_eq!(page.cursor, None);
}

#[test]
fn test_cursor_at_last_element_yields_empty_page() {
    let map = numbered_map(10);

    let page = paginate(&map, &PaginationInfo::resume(10, "9")).unwrap();
    assert!(page.result.is_empty());
    assert_eq!(page.cursor, None);
}

#[test]
fn test_zero_limit_yields_empty_page_reading_as_end() {
    let map = numbered_map(10);

    // zero is not a meaningful window; callers wanting everything pass None
    let page = paginate(&map, &PaginationInfo::first_page(0)).unwrap();
    assert!(page.result.is_empty());
    assert_eq!(page.cursor, None);
}

#[test]
fn test_stale_cursor_is_reported() {
    let mut map = numbered_map(10);
    map.remove("4");

    let err = paginate(&map, &PaginationInfo::resume(3, "4")).unwrap_err();
    assert!(matches!(
        err,
        Error::Pagination(PaginationError::CursorNotFound(cursor)) if cursor == "4"
    ));
}

#[test]
fn test_no_limit_returns_whole_remainder() {
    let map = numbered_map(10);

    let all = paginate(&map, &PaginationInfo::no_limit()).unwrap();
    assert_eq!(all.result.len(), 10);
    assert_eq!(all.cursor, None);

    let rest = paginate(&map, &PaginationInfo::new(None, Some("3".to_string()))).unwrap();
    assert_eq!(rest.result.len(), 6);
    assert_eq!(rest.cursor, None);
}

#[test]
fn test_filter_applies_before_windowing() {
    let map = numbered_map(10);

    let page = paginate_filtered(
        &map,
        |value| value.trim_start_matches("value-").parse::<usize>().unwrap() % 2 == 0,
        &PaginationInfo::first_page(3),
    )
    .unwrap();

    assert_eq!(page.result, vec!["value-0", "value-2", "value-4"]);
    assert_eq!(page.cursor.as_deref(), Some("4"));
}

#[test]
fn test_cursor_encoding_round_trip() {
    let encoded = encode_cursor("urn:shell:7/with?query");
    assert!(!encoded.contains('/'));
    assert!(!encoded.contains('?'));
    assert_eq!(decode_cursor(&encoded).unwrap(), "urn:shell:7/with?query");
}

#[test]
fn test_undecodable_cursor_is_invalid() {
    let err = decode_cursor("%%%not-base64%%%").unwrap_err();
    assert!(matches!(err, Error::Pagination(PaginationError::InvalidCursor(_))));
}
