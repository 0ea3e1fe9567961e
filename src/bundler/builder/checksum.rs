//! Artifact checksum calculation and the checksum manifest.
//!
//! The manifest is a line-oriented text file:
//!
//! ```text
//! Checksums: 
//! <64 hex chars> - <file name>
//! ```
//!
//! one line per artifact, in the order the glob discovered them.

use super::collector::find_files;
use crate::bundler::error::{Error, ErrorExt, Result};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Name of the manifest inside the installer directory.
pub const CHECKSUMS_FILE_NAME: &str = "checksums.txt";

/// First line of every manifest. The trailing space is part of the format.
pub const MANIFEST_HEADER: &str = "Checksums: ";

/// One artifact and its digest.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChecksumEntry {
    /// Artifact path as discovered
    pub path: PathBuf,
    /// Lowercase hex SHA-256 of the file contents
    pub digest: String,
}

impl ChecksumEntry {
    /// File name written to the manifest.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Ordered checksum entries for one run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Manifest {
    entries: Vec<ChecksumEntry>,
}

impl Manifest {
    /// Entries in discovery order.
    pub fn entries(&self) -> &[ChecksumEntry] {
        &self.entries
    }

    /// Renders the manifest text.
    pub fn render(&self) -> String {
        let mut text = format!("{MANIFEST_HEADER}\n");
        for entry in &self.entries {
            text.push_str(&format!("{} - {}\n", entry.digest, entry.file_name()));
        }
        text
    }

    /// Writes the manifest to `path`, replacing any previous one.
    pub async fn write(&self, path: &Path) -> Result<()> {
        tokio::fs::write(path, self.render())
            .await
            .fs_context("writing checksum manifest", path)
    }
}

/// Calculates the SHA-256 of a file.
///
/// Reads in 8KB chunks so large installers are never held in memory.
///
/// # Returns
///
/// * `Ok(String)` - lowercase hex digest (64 characters)
/// * `Err` - [`Error::ChecksumIo`] if the file cannot be opened or read
pub async fn calculate_sha256(path: &Path) -> Result<String> {
    let checksum_io = |source| Error::ChecksumIo {
        path: path.to_path_buf(),
        source,
    };

    let mut file = tokio::fs::File::open(path).await.map_err(checksum_io)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file.read(&mut buffer).await.map_err(checksum_io)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Hashes every file matching `pattern` and writes
/// `<installer_dir>/checksums.txt`.
///
/// The manifest file itself is never listed, even when the pattern would
/// match it.
///
/// # Errors
///
/// [`Error::EmptyResult`] when nothing matches; no manifest is written in
/// that case.
pub async fn generate_checksums(pattern: &str, installer_dir: &Path) -> Result<Manifest> {
    let manifest_path = installer_dir.join(CHECKSUMS_FILE_NAME);

    let files: Vec<PathBuf> = find_files(pattern)
        .await?
        .into_iter()
        .filter(|f| *f != manifest_path)
        .collect();

    if files.is_empty() {
        return Err(Error::EmptyResult {
            pattern: pattern.to_string(),
        });
    }

    let mut entries = Vec::with_capacity(files.len());
    for path in files {
        log::info!("Found installer: '{}'", path.display());
        let digest = calculate_sha256(&path).await?;
        log::debug!("{} - {}", digest, path.display());
        entries.push(ChecksumEntry { path, digest });
    }

    let manifest = Manifest { entries };
    manifest.write(&manifest_path).await?;
    log::info!("✓ Wrote checksums to {}", manifest_path.display());

    Ok(manifest)
}
