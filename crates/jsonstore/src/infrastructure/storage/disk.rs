//! [`FileSystem`] backed by the real disk through `tokio::fs`.

use std::io;
use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use super::FileSystem;

/// The production filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for TokioFileSystem {
    async fn exists(&self, path: &Path) -> io::Result<bool> {
        fs::try_exists(path).await
    }

    async fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path).await
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        // Invalid UTF-8 is decoded lossily rather than failing: a file with
        // garbage bytes is corrupt content, which the store heals, not an
        // I/O failure.
        let bytes = fs::read(path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn write_string(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents).await
    }
}
