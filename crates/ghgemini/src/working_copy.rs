use crate::prelude::*;
use ghgemini_core::resolve_target_path;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PREFIX: &str = "ghgemini-";

/// Per-request scratch directory holding a clone.
///
/// Removed when dropped, so every exit path of a request cleans up.
#[derive(Debug)]
pub struct WorkingCopy {
    dir: TempDir,
}

impl WorkingCopy {
    pub fn create() -> Result<Self, Error> {
        let dir = tempfile::Builder::new()
            .prefix(PREFIX)
            .tempdir()
            .map_err(|e| Error::WorkingCopy(e.to_string()))?;

        debug!("Created working copy {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `file_path` inside the working copy.
    ///
    /// Parent directories are created. The content is written to a sibling
    /// file first and renamed over the target, so readers never see a
    /// partial file.
    pub async fn write_file(&self, file_path: &str, content: &str) -> Result<PathBuf, Error> {
        let target = resolve_target_path(self.path(), file_path);
        let write_error = |detail: String| Error::Write {
            path: target.display().to_string(),
            detail,
        };

        if target.as_path() == self.path() {
            return Err(write_error("path does not name a file".to_string()));
        }
        let (Some(parent), Some(file_name)) = (target.parent(), target.file_name()) else {
            return Err(write_error("path does not name a file".to_string()));
        };

        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| write_error(format!("failed to create parent directories: {e}")))?;

        let staging = parent.join(format!(".{}.ghgemini-tmp", file_name.to_string_lossy()));
        tokio::fs::write(&staging, content)
            .await
            .map_err(|e| write_error(e.to_string()))?;
        tokio::fs::rename(&staging, &target)
            .await
            .map_err(|e| write_error(e.to_string()))?;

        debug!("Wrote {} bytes to {}", content.len(), target.display());
        Ok(target)
    }

    /// Remove the directory now, logging instead of failing.
    pub fn close(self) {
        let path = self.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            warn!("Failed to remove working copy {}: {e}", path.display());
        }
    }
}
