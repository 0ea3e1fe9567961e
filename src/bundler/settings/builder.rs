//! Builder for constructing PackagingOptions.

use super::{
    Arch, LinuxSettings, MacOsSettings, PackageSettings, PackagingOptions, SigningSettings,
    SnapSettings, WindowsSettings,
    windows::DEFAULT_TIMESTAMP_URL,
};
use crate::bundler::{
    PackagingTarget,
    error::{Context, Error, Result},
};
use std::path::{Path, PathBuf};
use url::Url;

/// Default engine, a wrapper script installed next to the Node tooling.
///
/// Any replacement must honour the same contract: `<engine> --config <json>`
/// writes the installers into the configuration's `outputDirectory`.
pub const DEFAULT_ENGINE_NAME: &str = "electron-winstaller";

/// Icon shown for the installed application in Programs and Features.
pub const DEFAULT_ICON_URL: &str = "https://desktop.githubusercontent.com/app-icon.ico";

/// Builder for constructing [`PackagingOptions`].
///
/// Only the repository root and the package metadata are required. Every
/// path defaults to the conventional location inside the repository:
///
/// | Item | Default |
/// |------|---------|
/// | dist root | `<root>/dist` |
/// | prebuilt app | `<dist root>/<product>-<platform>-<arch>` |
/// | installer dir | `<dist root>/installer` |
/// | setup icon | `<root>/app/static/logos/icon-logo.ico` |
/// | splash image | `<root>/app/static/logos/win32-installer-splash.gif` |
/// | Windows engine | `<root>/node_modules/.bin/electron-winstaller` |
/// | Linux icon | `<prebuilt app>/resources/app/static/icon-logo.png` |
///
/// # Examples
///
/// ```no_run
/// use release_packager::bundler::{PackageSettings, PackagingOptionsBuilder};
///
/// # fn example() -> release_packager::bundler::Result<()> {
/// let options = PackagingOptionsBuilder::new()
///     .repository_root("/src/desktop")
///     .package_settings(PackageSettings {
///         product_name: "GitHub Desktop".into(),
///         version: "1.0.0".into(),
///         company_name: "GitHub, Inc.".into(),
///     })
///     .build()?;
/// assert!(options.installer_dir().ends_with("dist/installer"));
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct PackagingOptionsBuilder {
    repository_root: Option<PathBuf>,
    package_settings: Option<PackageSettings>,
    target: Option<PackagingTarget>,
    dist_root: Option<PathBuf>,
    dist_path: Option<PathBuf>,
    installer_dir: Option<PathBuf>,
    arch: Option<Arch>,
    ci: bool,
    icon_url: Option<String>,
    timestamp_url: Option<String>,
    remote_releases: Option<String>,
    engine: Option<PathBuf>,
    snap_settings: Option<SnapSettings>,
    macos_settings: MacOsSettings,
}

impl PackagingOptionsBuilder {
    /// Creates a new options builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the repository root. Required.
    pub fn repository_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.repository_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets product metadata. Required.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets the platform the prebuilt application was built for.
    ///
    /// Only affects the default prebuilt application directory name.
    /// Default: the running platform.
    pub fn target(mut self, target: PackagingTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Overrides the distribution root.
    pub fn dist_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dist_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Overrides the prebuilt application directory.
    pub fn dist_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dist_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Overrides the installer output directory.
    pub fn installer_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.installer_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the architecture. Default: host architecture.
    pub fn arch(mut self, arch: Arch) -> Self {
        self.arch = Some(arch);
        self
    }

    /// Marks the run as happening under continuous integration.
    pub fn ci(mut self, ci: bool) -> Self {
        self.ci = ci;
        self
    }

    /// Overrides the icon URL embedded in the Windows installer.
    pub fn icon_url(mut self, url: impl Into<String>) -> Self {
        self.icon_url = Some(url.into());
        self
    }

    /// Overrides the signing timestamp authority.
    pub fn timestamp_url(mut self, url: impl Into<String>) -> Self {
        self.timestamp_url = Some(url.into());
        self
    }

    /// Enables delta packages against the given releases feed.
    pub fn remote_releases(mut self, url: impl Into<String>) -> Self {
        self.remote_releases = Some(url.into());
        self
    }

    /// Overrides the Windows installer-generation engine.
    ///
    /// The engine is called as `<engine> --config <json file>`, must write
    /// `Setup.exe`/`.msi` into the configuration's `outputDirectory`, and exit
    /// non-zero on failure. A bare name is looked up on `PATH`.
    pub fn engine<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.engine = Some(path.as_ref().to_path_buf());
        self
    }

    /// Overrides the generated snap manifest contents.
    pub fn snap_settings(mut self, settings: SnapSettings) -> Self {
        self.snap_settings = Some(settings);
        self
    }

    /// Overrides the macOS bundle and archive locations.
    pub fn macos_settings(mut self, settings: MacOsSettings) -> Self {
        self.macos_settings = settings;
        self
    }

    /// Builds and validates the options.
    ///
    /// # Errors
    ///
    /// - `repository_root` or `package_settings` missing
    /// - empty product name or version
    /// - a configured URL that does not parse
    pub fn build(self) -> Result<PackagingOptions> {
        let root = self
            .repository_root
            .context("repository_root is required")?;
        let package = self
            .package_settings
            .context("package_settings is required")?;

        if package.product_name.trim().is_empty() {
            return Err(Error::InvalidMetadata("product name is empty".into()));
        }
        if package.version.trim().is_empty() {
            return Err(Error::InvalidMetadata("version is empty".into()));
        }

        let arch = self.arch.unwrap_or_else(Arch::host);
        let platform = match self.target {
            Some(target) => target.dist_platform_name(),
            None => PackagingTarget::current()
                .map(PackagingTarget::dist_platform_name)
                .unwrap_or(std::env::consts::OS),
        };

        let dist_root = self.dist_root.unwrap_or_else(|| root.join("dist"));
        let dist_path = self.dist_path.unwrap_or_else(|| {
            dist_root.join(format!(
                "{}-{}-{}",
                package.product_name,
                platform,
                arch.dist_suffix()
            ))
        });
        let installer_dir = self
            .installer_dir
            .unwrap_or_else(|| dist_root.join("installer"));

        let logos = root.join("app").join("static").join("logos");
        let scripts = root.join("script");
        let node_bin = root.join("node_modules").join(".bin");

        let windows = WindowsSettings {
            setup_icon: logos.join("icon-logo.ico"),
            splash_image: logos.join("win32-installer-splash.gif"),
            icon_url: Url::parse(self.icon_url.as_deref().unwrap_or(DEFAULT_ICON_URL))?,
            remote_releases: self.remote_releases.as_deref().map(Url::parse).transpose()?,
            engine: self
                .engine
                .unwrap_or_else(|| node_bin.join(DEFAULT_ENGINE_NAME)),
            signing: SigningSettings {
                certificate_path: scripts.join("windows-certificate.pfx"),
                timestamp_url: Url::parse(
                    self.timestamp_url
                        .as_deref()
                        .unwrap_or(DEFAULT_TIMESTAMP_URL),
                )?,
                digest_algorithm: "sha256".into(),
                setup_script: scripts.join("setup-windows-certificate.ps1"),
                cleanup_script: scripts.join("cleanup-windows-certificate.ps1"),
            },
        };

        let linux = LinuxSettings {
            icon: dist_path
                .join("resources")
                .join("app")
                .join("static")
                .join("icon-logo.png"),
            builder: node_bin.join("electron-builder"),
            builder_config: scripts.join("electron-builder-linux.yml"),
            snap: self.snap_settings.unwrap_or_default(),
        };

        let app_bundle = self
            .macos_settings
            .app_bundle
            .unwrap_or_else(|| dist_path.join(format!("{}.app", package.product_name)));
        let archive_path = self.macos_settings.archive_path.unwrap_or_else(|| {
            installer_dir.join(format!(
                "{}-{}-macOS.zip",
                package.file_prefix(),
                package.version
            ))
        });

        Ok(PackagingOptions::new(
            package,
            root,
            dist_root,
            dist_path,
            installer_dir,
            arch,
            self.ci,
            windows,
            linux,
            app_bundle,
            archive_path,
        ))
    }
}
