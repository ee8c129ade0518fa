//! Storage engine for an Asset Administration Shell registry.
//!
//! Keeps shell and submodel descriptors in an id-sorted in-memory store and
//! answers asset-link discovery queries next to it. Cross-cutting concerns
//! (thread safety, cursor transport encoding, defensive cloning, event
//! emission, access scoping) are storage decorators composed at startup by
//! the factory in [`storage`].

mod config;
mod discovery;
mod errors;
mod events;
mod model;
mod pagination;
mod storage;

pub use config::*;
pub use discovery::*;
pub use errors::*;
pub use events::*;
pub use model::*;
pub use pagination::*;
pub use storage::*;
