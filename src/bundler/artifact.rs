//! Produced installer files.

use crate::bundler::{
    PackagingTarget,
    error::{ErrorExt, Result},
};
use path_absolutize::Absolutize;
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// What kind of installer an artifact is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArtifactKind {
    /// Package installed through the system (MSI, deb, rpm, AppImage)
    Installer,
    /// Self-contained setup executable
    Standalone,
    /// Confinement package
    Snap,
    /// Compressed application bundle
    Archive,
}

/// An installer file on disk.
///
/// Artifacts are only ever discovered from the filesystem; there is no
/// registry beyond the values packagers return.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Artifact {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Platform the artifact installs on
    pub target: PackagingTarget,
    /// Inferred artifact kind
    pub kind: ArtifactKind,
}

impl Artifact {
    /// Infers platform and kind from the file extension.
    ///
    /// Returns `Ok(None)` for files that are not installers (update feeds,
    /// `.nupkg` files, manifests).
    pub fn infer(path: &Path) -> Result<Option<Self>> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let (target, kind) = match extension.as_deref() {
            Some("zip") => (PackagingTarget::MacOs, ArtifactKind::Archive),
            Some("exe") => (PackagingTarget::Windows, ArtifactKind::Standalone),
            Some("msi") => (PackagingTarget::Windows, ArtifactKind::Installer),
            Some("snap") => (PackagingTarget::Linux, ArtifactKind::Snap),
            Some("deb" | "rpm" | "appimage") => (PackagingTarget::Linux, ArtifactKind::Installer),
            _ => return Ok(None),
        };

        let path = path
            .absolutize()
            .fs_context("resolving artifact path", path)?
            .into_owned();

        Ok(Some(Self { path, target, kind }))
    }

    /// File name for display.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}: {}", self.target, self.kind, self.path.display())
    }
}

/// Infers every installer among `paths`, skipping anything else.
pub fn infer_all<I, P>(paths: I) -> Result<Vec<Artifact>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut artifacts = Vec::new();
    for path in paths {
        if let Some(artifact) = Artifact::infer(path.as_ref())? {
            artifacts.push(artifact);
        }
    }
    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_kind_from_extension() {
        let snap = Artifact::infer(Path::new("/out/GitHubDesktop-1.0.0-amd64.snap"))
            .unwrap()
            .unwrap();
        assert_eq!(snap.kind, ArtifactKind::Snap);
        assert_eq!(snap.target, PackagingTarget::Linux);

        let msi = Artifact::infer(Path::new("/out/GitHubDesktopSetup.msi"))
            .unwrap()
            .unwrap();
        assert_eq!(msi.kind, ArtifactKind::Installer);
        assert_eq!(msi.target, PackagingTarget::Windows);

        let appimage = Artifact::infer(Path::new("/out/GitHubDesktop-1.0.0.AppImage"))
            .unwrap()
            .unwrap();
        assert_eq!(appimage.kind, ArtifactKind::Installer);
    }

    #[test]
    fn skips_non_installers() {
        assert!(Artifact::infer(Path::new("/out/RELEASES")).unwrap().is_none());
        assert!(
            Artifact::infer(Path::new("/out/GitHubDesktop-1.0.0-full.nupkg"))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn relative_paths_become_absolute() {
        let artifact = Artifact::infer(Path::new("dist/GitHubDesktop.zip"))
            .unwrap()
            .unwrap();
        assert!(artifact.path.is_absolute());
        assert_eq!(artifact.file_name(), "GitHubDesktop.zip");
    }
}
