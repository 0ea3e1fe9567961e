//! Core PackagingOptions struct and implementations.

use super::{Arch, LinuxSettings, PackageSettings, WindowsSettings};
use std::path::{Path, PathBuf};

/// Everything a packager needs to know, resolved once per run.
///
/// Constructed via [`super::PackagingOptionsBuilder`], then moved into the
/// [`crate::bundler::Packager`]. Platform packagers only ever see a shared
/// reference, so the value cannot change after construction.
#[derive(Clone, Debug)]
pub struct PackagingOptions {
    package: PackageSettings,
    repository_root: PathBuf,
    dist_root: PathBuf,
    dist_path: PathBuf,
    installer_dir: PathBuf,
    arch: Arch,
    ci: bool,
    windows: WindowsSettings,
    linux: LinuxSettings,
    app_bundle: PathBuf,
    archive_path: PathBuf,
}

impl PackagingOptions {
    /// Returns the product metadata.
    pub fn package(&self) -> &PackageSettings {
        &self.package
    }

    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the version string.
    pub fn version(&self) -> &str {
        &self.package.version
    }

    /// Returns the repository root the run was started from.
    pub fn repository_root(&self) -> &Path {
        &self.repository_root
    }

    /// Directory the generic Linux builder writes its outputs to.
    pub fn dist_root(&self) -> &Path {
        &self.dist_root
    }

    /// The prebuilt application directory.
    pub fn dist_path(&self) -> &Path {
        &self.dist_path
    }

    /// Canonical output directory for installer artifacts and `checksums.txt`.
    pub fn installer_dir(&self) -> &Path {
        &self.installer_dir
    }

    /// Architecture of the prebuilt application.
    pub fn arch(&self) -> Arch {
        self.arch
    }

    /// Whether the run happens on a CI machine (enables signing).
    pub fn is_ci(&self) -> bool {
        self.ci
    }

    /// Returns the Windows settings.
    pub fn windows(&self) -> &WindowsSettings {
        &self.windows
    }

    /// Returns the Linux settings.
    pub fn linux(&self) -> &LinuxSettings {
        &self.linux
    }

    /// The prebuilt macOS `.app` bundle.
    pub fn app_bundle(&self) -> &Path {
        &self.app_bundle
    }

    /// Destination of the macOS archive.
    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// Glob matching every installer artifact for this product inside `dir`.
    pub fn artifact_pattern(&self, dir: &Path) -> String {
        let dir = glob::Pattern::escape(&dir.to_string_lossy());
        format!("{dir}/{}*", self.package.file_prefix())
    }

    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        package: PackageSettings,
        repository_root: PathBuf,
        dist_root: PathBuf,
        dist_path: PathBuf,
        installer_dir: PathBuf,
        arch: Arch,
        ci: bool,
        windows: WindowsSettings,
        linux: LinuxSettings,
        app_bundle: PathBuf,
        archive_path: PathBuf,
    ) -> Self {
        Self {
            package,
            repository_root,
            dist_root,
            dist_path,
            installer_dir,
            arch,
            ci,
            windows,
            linux,
            app_bundle,
            archive_path,
        }
    }
}
