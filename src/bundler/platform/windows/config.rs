//! Configuration object handed to the Windows installer-generation engine.

use crate::bundler::{
    error::{Error, Result},
    settings::{CERTIFICATE_PASSWORD_VAR, PackagingOptions, SigningSettings},
};
use serde::{Serialize, Serializer};
use std::{fmt, path::PathBuf};
use url::Url;

/// Engine configuration, serialized as camelCase JSON.
///
/// `remoteReleases` is present only when delta packages are enabled and
/// `signWithParams` only when signing under CI.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallerConfig {
    pub name: String,
    pub app_directory: PathBuf,
    pub output_directory: PathBuf,
    pub authors: String,
    pub icon_url: String,
    pub setup_icon: PathBuf,
    pub loading_gif: PathBuf,
    pub exe: String,
    pub title: String,
    pub setup_exe: String,
    pub setup_msi: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_releases: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_with_params: Option<SignParams>,
}

impl InstallerConfig {
    /// Builds the engine configuration for this run.
    pub fn new(options: &PackagingOptions, sign_with_params: Option<SignParams>) -> Self {
        let package = options.package();
        let windows = options.windows();
        let identifier = package.windows_identifier();

        Self {
            exe: format!("{identifier}.exe"),
            name: identifier,
            app_directory: options.dist_path().to_path_buf(),
            output_directory: options.installer_dir().to_path_buf(),
            authors: package.company_name.clone(),
            icon_url: windows.icon_url.to_string(),
            setup_icon: windows.setup_icon.clone(),
            loading_gif: windows.splash_image.clone(),
            title: package.product_name.clone(),
            setup_exe: package.windows_standalone_name(),
            setup_msi: package.windows_installer_name(),
            remote_releases: windows.remote_releases.as_ref().map(|u| u.to_string()),
            sign_with_params,
        }
    }
}

/// Signtool parameters: key file, passphrase, timestamp authority and digest.
///
/// Serialized as the single command-line string the engine forwards to
/// signtool. The passphrase is redacted from `Debug` output.
#[derive(Clone)]
pub struct SignParams {
    certificate_path: PathBuf,
    password: String,
    timestamp_url: String,
    digest_algorithm: String,
}

impl SignParams {
    /// Combines the signing settings with a passphrase.
    pub fn new(signing: &SigningSettings, password: impl Into<String>) -> Self {
        Self {
            certificate_path: signing.certificate_path.clone(),
            password: password.into(),
            timestamp_url: as_written(&signing.timestamp_url),
            digest_algorithm: signing.digest_algorithm.clone(),
        }
    }

    /// Reads the passphrase from `WINDOWS_CERT_PASSWORD`.
    ///
    /// This is the only environment lookup in the packaging core.
    pub fn from_env(signing: &SigningSettings) -> Result<Self> {
        let password = std::env::var(CERTIFICATE_PASSWORD_VAR).map_err(|_| {
            Error::GenericError(format!(
                "{CERTIFICATE_PASSWORD_VAR} must be set to sign installers under CI"
            ))
        })?;
        Ok(Self::new(signing, password))
    }

    /// The signtool argument string.
    pub fn command_line(&self) -> String {
        format!(
            "/f {} /p {} /tr {} /td {}",
            self.certificate_path.display(),
            self.password,
            self.timestamp_url,
            self.digest_algorithm
        )
    }
}

/// The URL without the root slash `Url` adds to an empty path.
fn as_written(url: &Url) -> String {
    let text = url.as_str();
    if url.path() == "/" && url.query().is_none() && url.fragment().is_none() {
        text.trim_end_matches('/').to_string()
    } else {
        text.to_string()
    }
}

impl fmt::Debug for SignParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignParams")
            .field("certificate_path", &self.certificate_path)
            .field("password", &"<redacted>")
            .field("timestamp_url", &self.timestamp_url)
            .field("digest_algorithm", &self.digest_algorithm)
            .finish()
    }
}

impl Serialize for SignParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.command_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{PackageSettings, PackagingOptionsBuilder, PackagingTarget};

    fn options(remote_releases: Option<&str>) -> PackagingOptions {
        let mut builder = PackagingOptionsBuilder::new()
            .repository_root("/repo")
            .target(PackagingTarget::Windows)
            .package_settings(PackageSettings {
                product_name: "GitHub Desktop".into(),
                version: "1.0.0".into(),
                company_name: "GitHub, Inc.".into(),
            });
        if let Some(url) = remote_releases {
            builder = builder.remote_releases(url);
        }
        builder.build().unwrap()
    }

    #[test]
    fn required_fields_without_optional_ones() {
        let config = InstallerConfig::new(&options(None), None);
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["name"], "GitHubDesktop");
        assert_eq!(json["exe"], "GitHubDesktop.exe");
        assert_eq!(json["title"], "GitHub Desktop");
        assert_eq!(json["authors"], "GitHub, Inc.");
        assert_eq!(json["setupExe"], "GitHubDesktopSetup.exe");
        assert_eq!(json["setupMsi"], "GitHubDesktopSetup.msi");
        assert_eq!(json["outputDirectory"], "/repo/dist/installer");
        assert!(json.get("remoteReleases").is_none());
        assert!(json.get("signWithParams").is_none());
    }

    #[test]
    fn delta_and_signing_fields() {
        let options = options(Some("https://central.example.com/releases?env=production"));
        let sign = SignParams::new(&options.windows().signing, "hunter2");
        let config = InstallerConfig::new(&options, Some(sign));
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(
            json["remoteReleases"],
            "https://central.example.com/releases?env=production"
        );
        assert_eq!(
            json["signWithParams"],
            "/f /repo/script/windows-certificate.pfx /p hunter2 /tr http://timestamp.digicert.com /td sha256"
        );
    }

    #[test]
    fn timestamp_url_is_passed_as_written() {
        let bare = Url::parse("http://timestamp.digicert.com").unwrap();
        assert_eq!(as_written(&bare), "http://timestamp.digicert.com");

        let with_path = Url::parse("http://timestamp.example.com/rfc3161/").unwrap();
        assert_eq!(as_written(&with_path), "http://timestamp.example.com/rfc3161/");
    }

    #[test]
    fn debug_output_redacts_passphrase() {
        let options = options(None);
        let sign = SignParams::new(&options.windows().signing, "hunter2");
        let rendered = format!("{:?}", InstallerConfig::new(&options, Some(sign)));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
