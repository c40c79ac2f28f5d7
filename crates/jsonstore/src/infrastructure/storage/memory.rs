//! In-memory [`FileSystem`] for tests and embedding.
//!
//! Mirrors the disk semantics the store relies on: writing into a missing
//! directory fails with `NotFound`, and reading an absent file fails with
//! `NotFound`.  Every successful `write_string` is counted so tests can assert
//! that an operation did (or did not) touch the file.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::FileSystem;

#[derive(Debug, Default)]
struct MemoryState {
    files: HashMap<PathBuf, String>,
    dirs: HashSet<PathBuf>,
    writes: usize,
}

impl MemoryState {
    fn has_dir(&self, path: &Path) -> bool {
        // The root and the empty relative base always exist.
        path.as_os_str().is_empty() || path.parent().is_none() || self.dirs.contains(path)
    }

    fn add_dir_all(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }
}

/// A filesystem held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    state: Mutex<MemoryState>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `contents` at `path`, creating parent directories.
    ///
    /// Does not count as a write; use it to stage on-disk state in tests.
    pub fn insert_file(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        let path = path.into();
        let mut state = self.lock();
        if let Some(parent) = path.parent() {
            state.add_dir_all(parent);
        }
        state.files.insert(path, contents.into());
    }

    /// The current contents of the file at `path`, if any.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.lock().files.get(path.as_ref()).cloned()
    }

    /// Number of successful `write_string` calls so far.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    async fn exists(&self, path: &Path) -> io::Result<bool> {
        let state = self.lock();
        Ok(state.files.contains_key(path) || state.dirs.contains(path))
    }

    async fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        let mut state = self.lock();
        if state.files.contains_key(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} exists and is not a directory", path.display()),
            ));
        }
        state.add_dir_all(path);
        Ok(())
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.lock().files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )
        })
    }

    async fn write_string(&self, path: &Path, contents: &str) -> io::Result<()> {
        let mut state = self.lock();
        if state.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} is a directory", path.display()),
            ));
        }
        if let Some(parent) = path.parent() {
            if !state.has_dir(parent) {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("directory {} does not exist", parent.display()),
                ));
            }
        }
        state.files.insert(path.to_path_buf(), contents.to_string());
        state.writes += 1;
        Ok(())
    }
}
