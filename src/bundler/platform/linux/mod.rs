//! Linux packaging: generic installers plus a snap, then checksums.
//!
//! The two build paths are independent and run concurrently. Both move their
//! outputs into the installer directory, and checksum generation starts only
//! once both have finished, so the manifest always covers every artifact.
//! A failing path never cuts the other one short.

mod installer;
mod snap;
mod template;

pub use installer::{BUILDER_TOOL, build_installers};
pub use snap::{SNAPCRAFT_TOOL, SnapcraftManifest, build_snap};

use crate::bundler::{
    artifact::{self, Artifact},
    builder::checksum::generate_checksums,
    error::Result,
    settings::PackagingOptions,
    utils::{fs, process::ToolRunner},
};

/// Builds every Linux artifact and writes `checksums.txt`.
///
/// # Errors
///
/// - [`crate::bundler::Error::MissingAsset`] for a missing prebuilt directory,
///   icon, or builder configuration (checked before any tool runs)
/// - any error of either build path
/// - [`crate::bundler::Error::EmptyResult`] if no artifact reached the
///   installer directory
pub async fn package<R: ToolRunner>(options: &PackagingOptions, runner: &R) -> Result<Vec<Artifact>> {
    let linux = options.linux();
    fs::require_dir("prebuilt application directory", options.dist_path()).await?;
    fs::require_file("application icon", &linux.icon).await?;
    fs::require_file("installer builder configuration", &linux.builder_config).await?;

    super::prepare_installer_dir(options).await?;

    let (installers, snap) = tokio::join!(
        build_installers(options, runner),
        build_snap(options, runner)
    );
    let (installers, snap) = match (installers, snap) {
        (Ok(installers), Ok(snap)) => (installers, snap),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => return Err(e),
        (Err(installer_error), Err(snap_error)) => {
            log::error!("Snap build also failed: {}", snap_error);
            return Err(installer_error);
        }
    };
    log::debug!(
        "Build paths settled: {} installer(s), snap at {}",
        installers.len(),
        snap.display()
    );

    let installer_dir = options.installer_dir();
    let manifest = generate_checksums(&options.artifact_pattern(installer_dir), installer_dir).await?;

    artifact::infer_all(manifest.entries().iter().map(|entry| &entry.path))
}
