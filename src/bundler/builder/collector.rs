//! Glob-based artifact discovery and relocation.
//!
//! External tools report their outputs only by writing files, so outputs are
//! found by pattern after the tool exits and moved into the installer
//! directory.

use crate::bundler::{
    error::{Error, Result},
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Returns the regular files matching `pattern`, in glob order.
///
/// Directories and other non-file matches are skipped.
pub async fn find_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = pattern.to_string();
    tokio::task::spawn_blocking(move || {
        let mut files = Vec::new();
        for entry in glob::glob(&pattern)? {
            let path = entry?;
            if path.is_file() {
                files.push(path);
            } else {
                log::debug!("Skipping non-file match: {}", path.display());
            }
        }
        Ok::<_, Error>(files)
    })
    .await
    .map_err(|e| Error::GenericError(format!("glob task panicked: {e}")))?
}

/// Moves every file matching `pattern` into `destination`.
///
/// Existing files with the same name are overwritten. Returns the new paths
/// in discovery order; an empty result is not an error here, callers that
/// need at least one artifact check for it.
pub async fn collect_artifacts(pattern: &str, destination: &Path) -> Result<Vec<PathBuf>> {
    let files = find_files(pattern).await?;
    if !files.is_empty() {
        fs::create_dir_all(destination, false).await?;
    }

    let mut moved = Vec::with_capacity(files.len());
    for file in files {
        let Some(file_name) = file.file_name() else {
            continue;
        };
        let dest = destination.join(file_name);
        log::info!("Moving {} -> {}", file.display(), dest.display());
        fs::move_file(&file, &dest).await?;
        moved.push(dest);
    }

    Ok(moved)
}
