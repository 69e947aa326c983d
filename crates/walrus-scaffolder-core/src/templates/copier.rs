//! Recursive preset copying with housekeeping exclusions

use super::manifest::MANIFEST_FILE;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use walkdir::{DirEntry, WalkDir};

/// Entries never copied into a project, at any depth
pub const DEFAULT_EXCLUDES: &[&str] = &["node_modules", ".git", "dist"];

#[derive(Debug, Error)]
pub enum CopyError {
    #[error("Failed to read template directory")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to copy {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Copy cancelled")]
    Cancelled,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CopyError + '_ {
    move |source| CopyError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn is_excluded(entry: &DirEntry, excludes: &[&str]) -> bool {
    let name = entry.file_name().to_string_lossy();
    if excludes.iter().any(|e| *e == name) {
        return true;
    }
    // The manifest only has meaning at the preset root
    entry.depth() == 1 && name == MANIFEST_FILE
}

/// Copy `src` into `dest`, returning the relative paths of copied files
///
/// `permit` is called before every write and the value it returns is held
/// until that write has finished; `None` stops the copy with
/// [`CopyError::Cancelled`] and leaves what was already written.
pub async fn copy_dir<P>(
    src: &Path,
    dest: &Path,
    excludes: &[&str],
    permit: impl Fn() -> Option<P>,
) -> Result<Vec<PathBuf>, CopyError> {
    {
        let _permit = permit().ok_or(CopyError::Cancelled)?;
        fs::create_dir_all(dest).await.map_err(io_error(dest))?;
    }

    let mut copied = Vec::new();
    let walker = WalkDir::new(src)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, excludes));

    for entry in walker {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dest.join(relative);

        let _permit = permit().ok_or(CopyError::Cancelled)?;
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).await.map_err(io_error(&target))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await.map_err(io_error(parent))?;
        }
        fs::copy(entry.path(), &target)
            .await
            .map_err(io_error(entry.path()))?;
        copied.push(relative.to_path_buf());
    }

    tracing::debug!(files = copied.len(), from = %src.display(), "preset copied");
    Ok(copied)
}

/// A directory is writable for generation if it is absent or has no entries
pub async fn is_dir_empty(dir: &Path) -> std::io::Result<bool> {
    match fs::read_dir(dir).await {
        Ok(mut entries) => Ok(entries.next_entry().await?.is_none()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
        Err(e) => Err(e),
    }
}
