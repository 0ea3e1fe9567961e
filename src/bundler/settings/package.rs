//! Product metadata and the file names derived from it.

/// Product metadata shared by every packager.
///
/// Typically loaded from the application's `package.json` by
/// [`crate::metadata::load_build_metadata`].
///
/// # Examples
///
/// ```
/// use release_packager::bundler::PackageSettings;
///
/// let package = PackageSettings {
///     product_name: "GitHub Desktop".into(),
///     version: "1.0.0".into(),
///     company_name: "GitHub, Inc.".into(),
/// };
/// assert_eq!(package.file_prefix(), "GitHubDesktop");
/// assert_eq!(package.snap_name(), "github-desktop");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageSettings {
    /// Product name displayed to users, e.g. "GitHub Desktop".
    pub product_name: String,

    /// Semantic version of the build.
    pub version: String,

    /// Publisher shown in installer metadata.
    pub company_name: String,
}

impl PackageSettings {
    /// Product name with whitespace removed.
    ///
    /// Every installer artifact file name starts with this prefix, which is
    /// what the collection and checksum globs match on.
    pub fn file_prefix(&self) -> String {
        self.product_name.split_whitespace().collect()
    }

    /// Lowercase, hyphen-separated name used for the snap and its launcher.
    pub fn snap_name(&self) -> String {
        self.product_name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Identifier of the Windows installer package.
    pub fn windows_identifier(&self) -> String {
        self.file_prefix()
    }

    /// File name of the standalone Windows setup executable.
    pub fn windows_standalone_name(&self) -> String {
        format!("{}Setup.exe", self.file_prefix())
    }

    /// File name of the Windows MSI installer.
    pub fn windows_installer_name(&self) -> String {
        format!("{}Setup.msi", self.file_prefix())
    }
}
