//! CPU architecture types and utilities.

/// CPU architecture of the prebuilt application.
///
/// Each external tool spells the architecture differently; the mapping
/// methods below keep those spellings in one place.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// x86_64 / AMD64
    #[default]
    X86_64,
    /// AArch64 / ARM64
    AArch64,
}

impl Arch {
    /// Architecture of the machine running the packager.
    pub fn host() -> Self {
        if cfg!(target_arch = "aarch64") {
            Arch::AArch64
        } else {
            Arch::X86_64
        }
    }

    /// Suffix used in the packaged application directory name (`x64`, `arm64`).
    pub fn dist_suffix(self) -> &'static str {
        match self {
            Arch::X86_64 => "x64",
            Arch::AArch64 => "arm64",
        }
    }

    /// Flag understood by the generic Linux installer builder.
    pub fn builder_flag(self) -> &'static str {
        match self {
            Arch::X86_64 => "--x64",
            Arch::AArch64 => "--arm64",
        }
    }

    /// Debian-style architecture name used by snapcraft.
    pub fn snap_arch(self) -> &'static str {
        match self {
            Arch::X86_64 => "amd64",
            Arch::AArch64 => "arm64",
        }
    }
}
