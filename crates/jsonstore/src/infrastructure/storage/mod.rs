//! Storage infrastructure: the filesystem capability the store engine consumes.
//!
//! The engine needs exactly four primitives: an existence check, recursive
//! directory creation, reading a file as text, and overwriting a file with
//! text.  They are expressed as the async [`FileSystem`] trait so the engine
//! can run against:
//!
//! - [`TokioFileSystem`] – the real disk, through `tokio::fs`.
//! - [`MemoryFileSystem`] – an in-process map of paths to contents.  Always
//!   compiled (not test-only) so downstream crates can test their own
//!   settings code without touching the disk.
//! - `MockFileSystem` – generated by `mockall` in this crate's unit tests for
//!   injecting I/O failures.

use std::io;
use std::path::Path;

use async_trait::async_trait;

pub mod disk;
pub mod memory;

pub use disk::TokioFileSystem;
pub use memory::MemoryFileSystem;

/// Async filesystem primitives used by `FileStore`.
///
/// Implementations must be shareable across tasks; the store holds one behind
/// an `Arc` and may call it from any tokio worker.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Returns whether anything (file or directory) exists at `path`.
    async fn exists(&self, path: &Path) -> io::Result<bool>;

    /// Creates `path` and all missing parent directories.
    async fn ensure_dir(&self, path: &Path) -> io::Result<()>;

    /// Reads the whole file at `path` as text.
    ///
    /// Fails with [`io::ErrorKind::NotFound`] if the file is absent.
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Creates or truncates the file at `path` and writes `contents` to it.
    ///
    /// The parent directory must already exist.
    async fn write_string(&self, path: &Path, contents: &str) -> io::Result<()>;
}
