//! Application layer: the file-store engine and the per-application factory.
//!
//! Depends on `jsonstore_core` for merge, schema, formatting and path rules,
//! and on the [`FileSystem`](crate::infrastructure::storage::FileSystem)
//! capability for all disk access.  Nothing in this layer touches `std::fs`
//! or `tokio::fs` directly, so every operation is unit-testable against an
//! in-memory or mocked filesystem.

pub mod app_store;
pub mod file_store;
