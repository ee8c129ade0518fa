//! Cursor-based windowing over ID-sorted collections.
//!
//! Every list endpoint pages the same way: the request carries a limit and an
//! optional cursor, the result carries the page plus the cursor to resume
//! from. A `None` result cursor signals the end of the collection. The cursor
//! encodes a position in the current sort order, never an offset.

mod cursor;

#[cfg(test)]
mod pagination_test;

pub use cursor::decode_cursor;
pub use cursor::encode_cursor;

use std::collections::BTreeMap;
use std::ops::Bound;

use serde::Deserialize;
use serde::Serialize;

use crate::PaginationError;
use crate::Result;

/// Requested page window: `limit = None` means "the whole remainder".
///
/// `limit = Some(0)` is not a meaningful window: it yields an empty page
/// that reads as end-of-collection. Settings validation rejects a zero
/// default limit; callers wanting "no limit" pass `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub limit: Option<usize>,
    pub cursor: Option<String>,
}

impl PaginationInfo {
    pub fn new(
        limit: Option<usize>,
        cursor: Option<String>,
    ) -> Self {
        Self { limit, cursor }
    }

    /// Full remaining collection in one page.
    pub fn no_limit() -> Self {
        Self::default()
    }

    pub fn first_page(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            cursor: None,
        }
    }

    pub fn resume(
        limit: usize,
        cursor: impl Into<String>,
    ) -> Self {
        Self {
            limit: Some(limit),
            cursor: Some(cursor.into()),
        }
    }
}

/// One page of results plus the position to resume from.
///
/// `cursor = None` means the end of the collection was reached within this
/// page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorResult<T> {
    pub result: T,
    pub cursor: Option<String>,
}

impl<T> CursorResult<T> {
    pub fn new(
        result: T,
        cursor: Option<String>,
    ) -> Self {
        Self { result, cursor }
    }

    /// Rewraps the page payload, keeping the cursor.
    pub fn map<U>(
        self,
        f: impl FnOnce(T) -> U,
    ) -> CursorResult<U> {
        CursorResult {
            result: f(self.result),
            cursor: self.cursor,
        }
    }
}

/// Pages an ID-sorted map: skip up to and including the cursor key, take
/// `limit` elements, and report the id of the last returned element as the
/// next cursor while more elements remain.
pub fn paginate<V: Clone>(
    map: &BTreeMap<String, V>,
    pagination: &PaginationInfo,
) -> Result<CursorResult<Vec<V>>> {
    paginate_filtered(map, |_| true, pagination)
}

/// Same windowing with a predicate applied over the full ID-sorted key space
/// before the page is cut.
pub fn paginate_filtered<V: Clone>(
    map: &BTreeMap<String, V>,
    filter: impl Fn(&V) -> bool,
    pagination: &PaginationInfo,
) -> Result<CursorResult<Vec<V>>> {
    let start = match &pagination.cursor {
        Some(cursor) => {
            // A stale cursor for a since-deleted element is reported, not
            // silently treated as "start from the beginning".
            if !map.contains_key(cursor) {
                return Err(PaginationError::CursorNotFound(cursor.clone()).into());
            }
            Bound::Excluded(cursor.clone())
        }
        None => Bound::Unbounded,
    };

    let mut remaining = map
        .range((start, Bound::Unbounded))
        .filter(|(_, value)| filter(value));

    let mut page = Vec::new();
    let mut last_id: Option<&String> = None;
    if let Some(limit) = pagination.limit {
        for (id, value) in remaining.by_ref().take(limit) {
            page.push(value.clone());
            last_id = Some(id);
        }
    } else {
        for (id, value) in remaining.by_ref() {
            page.push(value.clone());
            last_id = Some(id);
        }
    }

    // Peek one element further: a cursor is only handed out while the
    // collection actually continues.
    let cursor = match remaining.next() {
        Some(_) => last_id.cloned(),
        None => None,
    };

    Ok(CursorResult::new(page, cursor))
}
