//! Installer packaging for macOS, Windows and Linux.
//!
//! Given an already built application tree, produces the platform's
//! installer artifacts in the installer directory and, on Linux, a
//! `checksums.txt` manifest over them.

pub mod artifact;
pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;

pub use artifact::{Artifact, ArtifactKind};
pub use builder::{
    Packager,
    checksum::{CHECKSUMS_FILE_NAME, ChecksumEntry, MANIFEST_HEADER, Manifest, generate_checksums},
    collector::collect_artifacts,
};
pub use error::{Error, Result};
pub use platform::PackagingTarget;
pub use settings::{
    Arch, CERTIFICATE_PASSWORD_VAR, LinuxSettings, MacOsSettings, PackageSettings,
    PackagingOptions, PackagingOptionsBuilder, SigningSettings, SnapSettings, WindowsSettings,
};
pub use utils::process::{SystemRunner, ToolInvocation, ToolRunner};
