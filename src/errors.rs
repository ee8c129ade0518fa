//! Registry Storage Error Hierarchy
//!
//! Defines the error types for the descriptor registry and discovery index,
//! categorized by the layer that raises them.

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Descriptor identity and uniqueness violations raised by the core store
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Cursor handling failures raised by the pagination layer
    #[error(transparent)]
    Pagination(#[from] PaginationError),

    /// Malformed access-scoping input from the surrounding authorization layer
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    /// Settings validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Typed failures of the descriptor CRUD contract.
///
/// Every variant is detected before any in-memory state is altered, so a
/// returned error always leaves the store untouched.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Operation targets a shell descriptor id that is not stored
    #[error("shell descriptor not found: {0}")]
    ShellNotFound(String),

    /// Operation targets a submodel id that is absent from the owning shell
    #[error("submodel descriptor {submodel_id} not found in shell {aas_id}")]
    SubmodelNotFound { aas_id: String, submodel_id: String },

    /// Insert collides with an already-stored descriptor id
    #[error("descriptor id already registered: {0}")]
    DuplicateIdentifier(String),

    /// One incoming payload carries the same submodel id twice
    #[error("duplicate submodel id within one shell descriptor: {0}")]
    DuplicateSubmodelIds(String),

    /// Update body carries a different id than the addressed resource
    #[error("descriptor id {body_id} does not match addressed id {path_id}")]
    IdentificationMismatch { path_id: String, body_id: String },

    /// Discovery lookup targets a shell with no registered asset links
    #[error("no asset links registered for shell: {0}")]
    AssetLinkNotFound(String),

    /// Search query cannot be evaluated, e.g. an unparseable pattern
    #[error("invalid search query: {0}")]
    InvalidSearchQuery(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PaginationError {
    /// The transported cursor token cannot be decoded
    #[error("cursor is not decodable: {0}")]
    InvalidCursor(String),

    /// The decoded cursor points at an element no longer in the collection
    #[error("cursor position no longer present in the collection: {0}")]
    CursorNotFound(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AuthorizationError {
    /// Target payload handed in by the access-control layer is malformed.
    /// Rejected, never a panic.
    #[error("malformed target information: {0}")]
    InvalidTargetInformation(String),
}

/// Sink-internal delivery failures.
///
/// Deliberately not part of [`Error`]: a sink failure never rolls back or
/// fails the mutation that triggered the event. The emitting decorator logs
/// the failure and drops the event.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// The sink's consumer side is gone
    #[error("event sink closed")]
    SinkClosed,

    /// Bounded sink channel is full; event dropped (best-effort delivery)
    #[error("event sink saturated")]
    Saturated,

    /// Event could not be rendered for delivery
    #[error("event serialization failed: {0}")]
    Serialization(String),
}
