//! Storage layer
//!
//! Handles the persistence slot: a single JSON file holding the entire todo
//! list, read once at startup and overwritten wholesale on every mutation.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::JsonPersistence;
