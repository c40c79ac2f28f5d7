//! jsonstore library entry point.
//!
//! Schema-validated persistence of small JSON settings files in the
//! per-application data directory.
//!
//! ```text
//! AppStore::from_process_env("notes")      -- resolves the data dir once
//!  └─ open("settings.json", schema, defaults)
//!       └─ FileStore
//!            ├─ read()          -- seeds, parses, validates, self-heals
//!            ├─ write(&data)    -- validates, then overwrites
//!            └─ update(&patch)  -- read + deep merge + validate + write
//! ```
//!
//! The `application` layer holds the engine; the `infrastructure` layer holds
//! the OS-facing adapters (filesystem, process environment).

pub mod application;
pub mod infrastructure;

pub use application::app_store::AppStore;
pub use application::file_store::{FileStore, StoreError};
pub use infrastructure::environment::process_environment;
pub use infrastructure::storage::{FileSystem, MemoryFileSystem, TokioFileSystem};

// The pieces of jsonstore-core a caller needs to open a store.
pub use jsonstore_core::{
    Environment, FnSchema, FormatError, Indent, PathError, Platform, Schema, SerializeOptions,
    TypedSchema, ValidationError,
};
