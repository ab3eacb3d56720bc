//! Backing file access module
//!
//! Reads and writes the single JSON document file on local disk.
//! Stateless: every call touches the filesystem, nothing is cached.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Accessor for the backing document file
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store for the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the entire backing file as text.
    ///
    /// A missing file surfaces as `io::ErrorKind::NotFound`. No parsing
    /// happens here.
    pub async fn load(&self) -> io::Result<String> {
        fs::read_to_string(&self.path).await
    }

    /// Overwrite the backing file with the given text.
    ///
    /// Existing content is truncated. There is no temp-file staging, so a
    /// failure partway through can leave a partially written file.
    pub async fn store(&self, contents: &str) -> io::Result<()> {
        fs::write(&self.path, contents).await
    }
}
