//! FileStore: validated read / write / merge-update of one JSON settings file.
//!
//! Every value that leaves this module has passed the store's [`Schema`]:
//!
//! - [`FileStore::read`] seeds a missing file with the defaults, then parses
//!   and validates it.  Content that is not JSON, or JSON the schema rejects,
//!   is overwritten with the defaults and the defaults are returned.
//! - [`FileStore::write`] validates the caller's value and only then replaces
//!   the file.
//! - [`FileStore::update`] reads the current state (healing it if needed),
//!   deep-merges the patch on top, validates the merged value and writes it.
//!
//! # Recovery discards data
//!
//! Healing a corrupt file is destructive: the previous content is overwritten
//! and no backup is kept.  This trades durability for availability, since a
//! settings file that cannot be read must never stop the application from
//! starting.  Each recovery is logged at `warn` level with the reason.
//!
//! Invalid *caller* input is never healed: a rejected `write` or `update`
//! returns [`StoreError::Validation`] and leaves the file alone.
//!
//! # Concurrency
//!
//! No locking is performed.  Two concurrent `update` calls on the same file
//! race (last write wins), and a `read` concurrent with a `write` may observe
//! a partially written file, which it will then treat as corrupt.  Callers
//! that need multi-writer safety must serialize access themselves.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use jsonstore_core::{
    deep_merge, from_json_text, to_json_text, to_tree, FormatError, PathError, Schema,
    SerializeOptions, ValidationError,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::infrastructure::storage::FileSystem;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A value supplied to `write`, or the result of an `update` merge, was
    /// rejected by the schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The default values, as they would be written to disk, do not satisfy
    /// the schema.
    #[error("default values do not satisfy the schema: {0}")]
    InvalidDefaults(#[source] ValidationError),

    /// A filesystem operation failed.
    #[error("I/O error accessing store at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A value could not be converted to or from JSON text.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The store location could not be resolved.
    #[error(transparent)]
    Path(#[from] PathError),
}

impl StoreError {
    /// Whether this error is a schema rejection of caller-supplied data.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}

/// A handle on one schema-validated JSON file.
///
/// The handle is immutable after construction and can be shared between
/// tasks behind an `Arc`.
pub struct FileStore<S: Schema> {
    path: PathBuf,
    schema: S,
    defaults: S::Output,
    /// `defaults` serialized with `options`, written on seeding and recovery.
    defaults_text: String,
    options: SerializeOptions,
    fs: Arc<dyn FileSystem>,
}

impl<S: Schema> fmt::Debug for FileStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileStore")
            .field("path", &self.path)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<S: Schema> FileStore<S> {
    /// Creates a handle on the file at `path`.
    ///
    /// Usually called through [`AppStore::open`](crate::AppStore::open),
    /// which resolves `path` inside the application's data directory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidDefaults`] if `defaults`, serialized with
    /// `options` and parsed back, is rejected by `schema` (for example because
    /// the replacer drops a required key).  Such defaults could never heal a
    /// corrupt file.
    pub fn new(
        path: impl Into<PathBuf>,
        schema: S,
        defaults: S::Output,
        options: SerializeOptions,
        fs: Arc<dyn FileSystem>,
    ) -> Result<Self, StoreError> {
        let defaults_text = to_json_text(&to_tree(&defaults)?, &options)?;
        let persisted = from_json_text(&defaults_text)?;
        schema
            .validate(&persisted)
            .map_err(StoreError::InvalidDefaults)?;

        Ok(Self {
            path: path.into(),
            schema,
            defaults,
            defaults_text,
            options,
            fs,
        })
    }

    /// Full path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The values used to seed and heal the file.
    pub fn defaults(&self) -> &S::Output {
        &self.defaults
    }

    pub fn options(&self) -> &SerializeOptions {
        &self.options
    }

    /// Returns the current, schema-valid contents of the file.
    ///
    /// A missing file is created with the defaults.  A file that is not valid
    /// JSON, or fails the schema, is overwritten with the defaults and the
    /// defaults are returned.
    ///
    /// # Errors
    ///
    /// Only [`StoreError::Io`]: parse and validation failures of the stored
    /// content are healed, never reported.
    pub async fn read(&self) -> Result<S::Output, StoreError> {
        self.ensure_exists().await?;

        let text = self
            .fs
            .read_to_string(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;

        let value = match from_json_text(&text) {
            Ok(value) => value,
            Err(e) => return self.recover(&e.to_string()).await,
        };

        match self.schema.validate(&value) {
            Ok(data) => Ok(data),
            Err(e) => self.recover(e.reason()).await,
        }
    }

    /// Validates `data` and replaces the file with it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] without touching the disk if the
    /// schema rejects `data`, or [`StoreError::Io`] if writing fails.
    pub async fn write(&self, data: &S::Output) -> Result<(), StoreError> {
        let validated = self.schema.validate(&to_tree(data)?)?;
        self.ensure_exists().await?;
        self.persist(&to_tree(&validated)?).await
    }

    /// Deep-merges `patch` onto the current contents and writes the result.
    ///
    /// `patch` is anything that serializes to a JSON object: a `json!` value,
    /// a map, or a struct of `Option` fields with
    /// `#[serde(skip_serializing_if = "Option::is_none")]`.  Nested objects
    /// merge key by key; arrays, scalars and `null` replace.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if the merged value is rejected.  The
    /// file is then left as the preceding read left it: unchanged, or reset to
    /// the defaults if that read had to heal it.
    pub async fn update<P>(&self, patch: &P) -> Result<(), StoreError>
    where
        P: Serialize + Sync + ?Sized,
    {
        let patch = to_tree(patch)?;
        let current = to_tree(&self.read().await?)?;

        let merged = deep_merge(&current, &patch);
        let validated = self.schema.validate(&merged)?;
        self.persist(&to_tree(&validated)?).await
    }

    /// Creates the file with the defaults if nothing exists at its path.
    async fn ensure_exists(&self) -> Result<(), StoreError> {
        let exists = self
            .fs
            .exists(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        if exists {
            return Ok(());
        }

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            self.fs
                .ensure_dir(dir)
                .await
                .map_err(|source| StoreError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        debug!("seeding {} with default values", self.path.display());
        self.write_text(&self.defaults_text).await
    }

    /// Overwrites the file with the defaults and returns them.
    async fn recover(&self, reason: &str) -> Result<S::Output, StoreError> {
        warn!(
            "store file {} is unreadable ({reason}); overwriting it with default values",
            self.path.display()
        );
        self.write_text(&self.defaults_text).await?;
        Ok(self.defaults.clone())
    }

    async fn persist(&self, value: &Value) -> Result<(), StoreError> {
        let text = to_json_text(value, &self.options)?;
        self.write_text(&text).await?;
        debug!("persisted {}", self.path.display());
        Ok(())
    }

    async fn write_text(&self, text: &str) -> Result<(), StoreError> {
        self.fs
            .write_string(&self.path, text)
            .await
            .map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
