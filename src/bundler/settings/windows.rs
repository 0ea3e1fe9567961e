//! Windows platform-specific settings.

use std::path::PathBuf;
use url::Url;

/// Default timestamp authority for Authenticode signatures.
pub const DEFAULT_TIMESTAMP_URL: &str = "http://timestamp.digicert.com";

/// Environment variable holding the signing certificate passphrase.
pub const CERTIFICATE_PASSWORD_VAR: &str = "WINDOWS_CERT_PASSWORD";

/// Windows installer configuration.
///
/// # Configuration
///
/// The URLs can be overridden in `script/packaging.toml`:
///
/// ```toml
/// [windows]
/// icon_url = "https://desktop.githubusercontent.com/app-icon.ico"
/// timestamp_url = "http://timestamp.digicert.com"
/// engine = "script/make-windows-installers.cmd"
/// ```
#[derive(Clone, Debug)]
pub struct WindowsSettings {
    /// Setup icon (`.ico`). Must exist before anything runs.
    pub setup_icon: PathBuf,

    /// Splash image shown while the installer runs. Must exist before anything runs.
    pub splash_image: PathBuf,

    /// Icon shown in Programs and Features.
    pub icon_url: Url,

    /// Remote releases feed used for delta packages.
    ///
    /// `None` disables delta generation.
    pub remote_releases: Option<Url>,

    /// Installer-generation engine executable.
    ///
    /// Invoked as `<engine> --config <json file>`; it writes the installers
    /// into the configuration's `outputDirectory`. Set through
    /// `[windows] engine` when the default wrapper is not installed.
    pub engine: PathBuf,

    /// Signing configuration, only applied under CI.
    pub signing: SigningSettings,
}

/// Authenticode signing configuration and certificate lifecycle scripts.
///
/// The passphrase is never stored here; it is read from
/// [`CERTIFICATE_PASSWORD_VAR`] at the moment the engine configuration is built.
#[derive(Clone, Debug)]
pub struct SigningSettings {
    /// Certificate (`.pfx`) written by the setup script.
    pub certificate_path: PathBuf,

    /// Timestamp authority URL.
    pub timestamp_url: Url,

    /// Digest algorithm for the timestamp (`/td`).
    pub digest_algorithm: String,

    /// PowerShell script that provisions the certificate.
    pub setup_script: PathBuf,

    /// PowerShell script that removes the certificate.
    pub cleanup_script: PathBuf,
}
