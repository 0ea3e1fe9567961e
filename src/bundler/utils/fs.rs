//! File system utilities for packaging.
//!
//! Idempotent directory handling, overwriting moves that work across
//! filesystems, and asset checks that report the expected path.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Removes a file if it exists.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing file", path),
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.is_file() {
        crate::bail!("{} does not exist or is not a file", from.display());
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file to", to)?;
    Ok(())
}

/// Moves a file, replacing anything already at the destination.
///
/// Falls back to copy-and-delete when a rename is not possible, e.g. when a
/// temporary directory lives on another filesystem.
pub async fn move_file(from: &Path, to: &Path) -> Result<()> {
    remove_file(to).await?;

    if let Err(rename_error) = fs::rename(from, to).await {
        log::debug!(
            "rename {} -> {} failed ({}), copying instead",
            from.display(),
            to.display(),
            rename_error
        );
        fs::copy(from, to).await.fs_context("copying file to", to)?;
        fs::remove_file(from)
            .await
            .fs_context("removing moved file", from)?;
    }

    Ok(())
}

/// Writes `contents` to `path` and marks it executable on Unix.
pub async fn write_executable(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)
        .await
        .fs_context("writing executable", path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .await
            .fs_context("setting permissions on", path)?;
    }

    Ok(())
}

/// Fails with [`Error::MissingAsset`] unless `path` is an existing file.
pub async fn require_file(kind: &str, path: &Path) -> Result<()> {
    match fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => Ok(()),
        _ => Err(Error::MissingAsset {
            kind: kind.to_string(),
            path: path.to_path_buf(),
        }),
    }
}

/// Fails with [`Error::MissingAsset`] unless `path` is an existing directory.
pub async fn require_dir(kind: &str, path: &Path) -> Result<()> {
    match fs::metadata(path).await {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        _ => Err(Error::MissingAsset {
            kind: kind.to_string(),
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn move_file_overwrites_destination() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("new.deb");
        let to = dir.path().join("out").join("app.deb");
        std::fs::create_dir_all(to.parent().unwrap()).unwrap();
        std::fs::write(&from, b"fresh").unwrap();
        std::fs::write(&to, b"stale").unwrap();

        move_file(&from, &to).await.unwrap();

        assert!(!from.exists());
        assert_eq!(std::fs::read(&to).unwrap(), b"fresh");
    }

    #[tokio::test]
    async fn create_dir_all_erases_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let installer = dir.path().join("installer");
        std::fs::create_dir_all(&installer).unwrap();
        std::fs::write(installer.join("old.snap"), b"old").unwrap();

        create_dir_all(&installer, true).await.unwrap();

        assert!(installer.is_dir());
        assert_eq!(std::fs::read_dir(&installer).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn require_file_reports_expected_path() {
        let dir = tempfile::tempdir().unwrap();
        let icon = dir.path().join("icon-logo.ico");

        let err = require_file("setup icon", &icon).await.unwrap_err();
        assert!(matches!(err, Error::MissingAsset { ref path, .. } if *path == icon));

        std::fs::write(&icon, b"ico").unwrap();
        require_file("setup icon", &icon).await.unwrap();
        assert!(require_dir("setup icon", &icon).await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn write_executable_sets_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let launcher = dir.path().join("electron-launch");
        write_executable(&launcher, "#!/bin/sh\n").await.unwrap();

        let mode = std::fs::metadata(&launcher).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
