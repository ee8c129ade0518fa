//! Opaque transport encoding for pagination cursors.
//!
//! The native cursor is the last-returned descriptor id. Before crossing the
//! storage boundary it is wrapped in a URL-safe reversible encoding so the
//! wire format exposes no semantic meaning and the core keeps its pagination
//! internals to itself.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::PaginationError;
use crate::Result;

pub fn encode_cursor(cursor: &str) -> String {
    URL_SAFE_NO_PAD.encode(cursor.as_bytes())
}

pub fn decode_cursor(encoded: &str) -> Result<String> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded.as_bytes())
        .map_err(|_| PaginationError::InvalidCursor(encoded.to_string()))?;
    String::from_utf8(bytes).map_err(|_| PaginationError::InvalidCursor(encoded.to_string()).into())
}
