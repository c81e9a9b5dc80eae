//! Writing downloaded documents to the local file system.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::ApplicationResult;
use crate::ports::FileSystem;

/// Writes `contents` to `dir/file_name`, replacing any existing file.
pub(super) async fn save_download<F: FileSystem>(
    fs: &F,
    dir: &Path,
    file_name: &str,
    contents: &str,
) -> ApplicationResult<PathBuf> {
    let path = dir.join(file_name);
    if fs.exists(&path).await {
        warn!(path = %path.display(), "overwriting existing file");
    }
    fs.write_file(&path, contents.as_bytes()).await?;
    info!(path = %path.display(), bytes = contents.len(), "download saved");
    Ok(path)
}
