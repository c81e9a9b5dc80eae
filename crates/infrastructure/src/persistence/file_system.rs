//! Real file system implementation.

use std::io;
use std::path::Path;

use spaceport_application::ports::{FileSystem, FileSystemError};
use tokio::fs;

/// Real file system implementation using `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    /// Creates a new `TokioFileSystem`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn map_io(path: &Path, e: io::Error) -> FileSystemError {
    match e.kind() {
        io::ErrorKind::NotFound => FileSystemError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => FileSystemError::PermissionDenied(path.to_path_buf()),
        io::ErrorKind::InvalidData => FileSystemError::NotUtf8(path.to_path_buf()),
        _ => FileSystemError::Io(e),
    }
}

impl FileSystem for TokioFileSystem {
    async fn read_file_string(&self, path: &Path) -> Result<String, FileSystemError> {
        fs::read_to_string(path).await.map_err(|e| map_io(path, e))
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await.map_err(|e| map_io(parent, e))?;
        }
        fs::write(path, contents).await.map_err(|e| map_io(path, e))
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok()
    }
}
