//! Linux platform-specific settings.

use std::path::PathBuf;

/// Linux packaging configuration.
#[derive(Clone, Debug)]
pub struct LinuxSettings {
    /// PNG icon copied into the snap's `meta/gui` directory.
    ///
    /// Must exist before anything runs.
    pub icon: PathBuf,

    /// Generic installer builder executable (electron-builder).
    pub builder: PathBuf,

    /// Configuration file passed to the generic installer builder.
    pub builder_config: PathBuf,

    /// Confinement package settings.
    pub snap: SnapSettings,
}

/// Contents of the generated `snapcraft.yaml`.
///
/// # Configuration
///
/// ```toml
/// [linux]
/// summary = "Simple collaboration from your desktop"
/// confinement = "classic"
/// stage_packages = ["libnss3", "openssh-client"]
/// ```
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// One-line summary shown in the store.
    pub summary: String,

    /// Long description.
    pub description: String,

    /// `stable` or `devel`.
    pub grade: String,

    /// `strict`, `classic` or `devmode`.
    pub confinement: String,

    /// Distribution packages staged into the snap.
    pub stage_packages: Vec<String>,

    /// Parts the application part is built after.
    pub after: Vec<String>,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            summary: "Simple collaboration from your desktop".into(),
            description: "Focus on what matters instead of fighting with Git.".into(),
            grade: "stable".into(),
            confinement: "classic".into(),
            stage_packages: [
                // default Electron dependencies
                "libnotify4",
                "libnss3",
                "libpcre3",
                "libxss1",
                "libxtst6",
                // additional application dependencies
                "libcurl3",
                "openssh-client",
                "gettext",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            after: vec!["desktop-gtk3".into()],
        }
    }
}
