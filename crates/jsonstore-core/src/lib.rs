//! # jsonstore-core
//!
//! Pure building blocks for the `jsonstore` file-store engine: deep merge of
//! JSON trees, the schema capability, JSON text formatting, and resolution of
//! the per-application data directory.
//!
//! This crate performs no I/O and reads no process state.  Everything it needs
//! (platform, environment variables, serialization options) is passed in as a
//! value, so every function here can be unit-tested on any machine.
//!
//! # Architecture overview (for beginners)
//!
//! A *store* is one small JSON file holding an application's settings, e.g.
//! `~/.config/my-app/preferences.json`.  The `jsonstore` crate reads, writes
//! and patches that file.  This crate provides the parts that do not touch the
//! disk:
//!
//! - **`merge`** – Combines the current settings with a partial patch.  Nested
//!   objects are merged key by key; arrays, scalars and `null` in the patch
//!   replace whatever was there.
//!
//! - **`schema`** – The contract a settings type must satisfy.  A [`Schema`]
//!   either accepts a decoded JSON value and returns a typed value, or rejects
//!   it with a [`ValidationError`].
//!
//! - **`format`** – Turns JSON values into file text (pretty-printed with two
//!   spaces by default) and back.
//!
//! - **`platform`** – Works out where an application's data directory lives on
//!   Windows, macOS and Linux.

pub mod format;
pub mod merge;
pub mod platform;
pub mod schema;

// Re-export the most-used types at the crate root so callers can write
// `jsonstore_core::Schema` instead of `jsonstore_core::schema::Schema`.
pub use format::{from_json_text, to_json_text, to_tree, FormatError, Indent, SerializeOptions};
pub use merge::{deep_merge, NodeKind};
pub use platform::{resolve_app_data_dir, resolve_store_path, Environment, PathError, Platform};
pub use schema::{FnSchema, Schema, TypedSchema, ValidationError};
