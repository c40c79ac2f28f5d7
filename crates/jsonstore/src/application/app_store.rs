//! AppStore: the per-application factory for [`FileStore`] handles.
//!
//! An `AppStore` is bound to one application name.  It resolves the
//! application's data directory once, at construction, and then opens any
//! number of store files inside it:
//!
//! ```no_run
//! # use jsonstore::{AppStore, TypedSchema};
//! # use serde::{Deserialize, Serialize};
//! # #[derive(Clone, Serialize, Deserialize)] struct Prefs { dark: bool }
//! # async fn run() -> Result<(), jsonstore::StoreError> {
//! let app = AppStore::from_process_env("notes")?;
//! let prefs = app.open("preferences.json", TypedSchema::<Prefs>::new(), Prefs { dark: false })?;
//! let current = prefs.read().await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use jsonstore_core::{resolve_app_data_dir, resolve_store_path, Environment, Schema, SerializeOptions};
use tracing::debug;

use crate::application::file_store::{FileStore, StoreError};
use crate::infrastructure::environment::process_environment;
use crate::infrastructure::storage::{FileSystem, TokioFileSystem};

/// Opens store files inside one application's data directory.
#[derive(Clone)]
pub struct AppStore {
    app_name: String,
    data_dir: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl fmt::Debug for AppStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppStore")
            .field("app_name", &self.app_name)
            .field("data_dir", &self.data_dir)
            .finish_non_exhaustive()
    }
}

impl AppStore {
    /// Creates a factory for `app_name`, resolving its data directory in `env`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Path`] if the name is unusable or `env` has no
    /// data directory for its platform.
    pub fn new(app_name: impl Into<String>, env: &Environment) -> Result<Self, StoreError> {
        let app_name = app_name.into();
        let data_dir = resolve_app_data_dir(&app_name, env)?;
        debug!("data directory for {app_name}: {}", data_dir.display());
        Ok(Self {
            app_name,
            data_dir,
            fs: Arc::new(TokioFileSystem::new()),
        })
    }

    /// Like [`AppStore::new`], using the current process environment.
    ///
    /// # Errors
    ///
    /// See [`AppStore::new`].
    pub fn from_process_env(app_name: impl Into<String>) -> Result<Self, StoreError> {
        Self::new(app_name, &process_environment())
    }

    /// Creates a factory that stores files in `data_dir` as given, skipping
    /// platform resolution.
    pub fn with_data_dir(app_name: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            app_name: app_name.into(),
            data_dir: data_dir.into(),
            fs: Arc::new(TokioFileSystem::new()),
        }
    }

    /// Replaces the filesystem used by every store opened afterwards.
    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Opens `file_name` with the default serialization options
    /// (two-space indentation, no key filter).
    ///
    /// Performs no I/O; the file is created on first use.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Path`] for file names that are empty, absolute or
    /// contain `..`, and [`StoreError::InvalidDefaults`] if `defaults` fails
    /// `schema`.
    pub fn open<S: Schema>(
        &self,
        file_name: &str,
        schema: S,
        defaults: S::Output,
    ) -> Result<FileStore<S>, StoreError> {
        self.open_with_options(file_name, schema, defaults, SerializeOptions::default())
    }

    /// Opens `file_name` with explicit serialization options.
    ///
    /// # Errors
    ///
    /// See [`AppStore::open`].
    pub fn open_with_options<S: Schema>(
        &self,
        file_name: &str,
        schema: S,
        defaults: S::Output,
        options: SerializeOptions,
    ) -> Result<FileStore<S>, StoreError> {
        let path = resolve_store_path(&self.data_dir, file_name)?;
        FileStore::new(path, schema, defaults, options, Arc::clone(&self.fs))
    }
}
