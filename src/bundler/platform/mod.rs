//! Platform packagers and the target they are selected by.

pub mod linux;
pub mod macos;
pub mod windows;

use crate::bundler::{
    error::{Error, Result},
    settings::PackagingOptions,
    utils::fs,
};
use std::fmt;

/// The platform a run packages for.
///
/// Selected once from the running operating system and never changed
/// afterwards. The orchestrator matches on it exhaustively, so a new variant
/// will not build until it has a packager.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PackagingTarget {
    /// Compressed `.app` archive
    MacOs,
    /// Standalone setup executable and MSI installer
    Windows,
    /// Generic installers and a snap
    Linux,
}

impl PackagingTarget {
    /// Target for the operating system this process runs on.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedPlatform`] for any other operating system.
    pub fn current() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Maps an operating system name as reported by [`std::env::consts::OS`].
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "macos" => Ok(Self::MacOs),
            "windows" => Ok(Self::Windows),
            "linux" => Ok(Self::Linux),
            other => Err(Error::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Platform component of the prebuilt application directory name.
    pub fn dist_platform_name(self) -> &'static str {
        match self {
            Self::MacOs => "darwin",
            Self::Windows => "win32",
            Self::Linux => "linux",
        }
    }
}

impl fmt::Display for PackagingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MacOs => "macOS",
            Self::Windows => "Windows",
            Self::Linux => "Linux",
        })
    }
}

/// Empties the installer directory so only this run's artifacts end up in it.
pub(crate) async fn prepare_installer_dir(options: &PackagingOptions) -> Result<()> {
    let dir = options.installer_dir();
    log::debug!("Clearing installer directory {}", dir.display());
    fs::create_dir_all(dir, true).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_supported_operating_systems() {
        assert_eq!(PackagingTarget::from_os("macos").unwrap(), PackagingTarget::MacOs);
        assert_eq!(PackagingTarget::from_os("windows").unwrap(), PackagingTarget::Windows);
        assert_eq!(PackagingTarget::from_os("linux").unwrap(), PackagingTarget::Linux);
    }

    #[test]
    fn rejects_unknown_operating_system() {
        let err = PackagingTarget::from_os("freebsd").unwrap_err();
        assert!(matches!(err, Error::UnsupportedPlatform(ref os) if os == "freebsd"));
        assert!(err.to_string().contains("freebsd"));
    }
}
