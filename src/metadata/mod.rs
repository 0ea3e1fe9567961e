//! Build metadata lookup and packaging configuration.
//!
//! Product name, version and company come from the application's
//! `app/package.json`. Optional overrides live in `script/packaging.toml`.
//! Everything is resolved here once and turned into a single
//! [`PackagingOptions`] value.

use crate::bundler::{
    PackageSettings, PackagingOptions, PackagingOptionsBuilder, PackagingTarget, SnapSettings,
    error::Error as BundleError,
};
use crate::error::{CliError, PackagerError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// Endpoint serving the release feed used for delta updates.
pub const DEFAULT_UPDATES_URL: &str =
    "https://central.github.com/api/deployments/desktop/desktop/latest";

/// Environment variables that mark a CI machine.
pub const CI_VARIABLES: [&str; 2] = ["APPVEYOR", "CI"];

/// `package.json` fields the packager cares about.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppPackageJson {
    product_name: Option<String>,
    version: Option<String>,
    company_name: Option<String>,
}

/// Contents of `script/packaging.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PackagingOverrides {
    /// `[windows]` table
    pub windows: WindowsOverrides,
    /// `[linux]` table
    pub linux: Option<SnapSettings>,
}

/// Windows overrides.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WindowsOverrides {
    /// Icon URL embedded in the installer
    pub icon_url: Option<String>,
    /// Signing timestamp authority
    pub timestamp_url: Option<String>,
    /// Release feed endpoint for delta updates
    pub updates_url: Option<String>,
    /// Installer-generation engine; relative paths are resolved against the
    /// repository root, bare names are looked up on `PATH`
    pub engine: Option<PathBuf>,
}

/// Reads product metadata from `package.json`.
///
/// All three fields are required and the version must be valid semver.
pub fn load_build_metadata(package_json: &Path) -> Result<PackageSettings> {
    let contents = std::fs::read_to_string(package_json).map_err(|e| {
        PackagerError::Cli(CliError::ExecutionFailed {
            command: "read_package_json".to_string(),
            reason: format!("Failed to read {}: {}", package_json.display(), e),
        })
    })?;

    let manifest: AppPackageJson = serde_json::from_str(&contents)?;

    let product_name = required(manifest.product_name, "productName")?;
    let company_name = required(manifest.company_name, "companyName")?;
    let version = required(manifest.version, "version")?;

    semver::Version::parse(&version).map_err(|e| {
        BundleError::InvalidMetadata(format!("version '{version}' is not semver: {e}"))
    })?;

    Ok(PackageSettings {
        product_name,
        version,
        company_name,
    })
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| BundleError::InvalidMetadata(format!("missing '{field}' in package.json")).into())
}

/// Reads `packaging.toml`. A missing file yields the defaults.
pub fn load_overrides(path: &Path) -> Result<PackagingOverrides> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No packaging overrides at {}", path.display());
            Ok(PackagingOverrides::default())
        }
        Err(e) => Err(PackagerError::Cli(CliError::ExecutionFailed {
            command: "read_packaging_overrides".to_string(),
            reason: format!("Failed to read {}: {}", path.display(), e),
        })),
    }
}

/// Whether an environment value counts as "set".
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && !value.eq_ignore_ascii_case("false") && value != "0"
}

/// Whether this process runs on a CI machine.
pub fn detect_ci() -> bool {
    CI_VARIABLES
        .iter()
        .any(|name| std::env::var(name).is_ok_and(|v| is_truthy(&v)))
}

/// Delta packages are only produced for channels users update from.
pub fn should_make_delta(channel: &str) -> bool {
    matches!(channel, "production" | "beta")
}

/// Release feed URL for `version` on `channel`.
pub fn updates_url(base: &str, version: &str, channel: &str) -> Result<Url> {
    let mut url = Url::parse(base).map_err(BundleError::from)?;
    url.query_pairs_mut()
        .append_pair("version", version)
        .append_pair("env", channel);
    Ok(url)
}

fn resolve_engine(root: &Path, engine: PathBuf) -> PathBuf {
    if engine.is_relative() && engine.components().count() > 1 {
        root.join(engine)
    } else {
        engine
    }
}

/// Inputs for [`load_options`].
#[derive(Debug, Clone)]
pub struct OptionsRequest {
    /// Repository root
    pub root: PathBuf,
    /// Release channel (`production`, `beta`, `test`, `development`)
    pub release_channel: String,
    /// Overrides file; defaults to `<root>/script/packaging.toml`
    pub config: Option<PathBuf>,
    /// Running under CI
    pub ci: bool,
    /// Platform being packaged
    pub target: PackagingTarget,
}

/// Resolves the complete packaging options for a run.
pub fn load_options(request: &OptionsRequest) -> Result<PackagingOptions> {
    let root = &request.root;
    let package = load_build_metadata(&root.join("app").join("package.json"))?;

    let config_path = request
        .config
        .clone()
        .unwrap_or_else(|| root.join("script").join("packaging.toml"));
    let overrides = load_overrides(&config_path)?;

    let mut builder = PackagingOptionsBuilder::new()
        .repository_root(root)
        .target(request.target)
        .ci(request.ci);

    if should_make_delta(&request.release_channel) {
        let base = overrides
            .windows
            .updates_url
            .as_deref()
            .unwrap_or(DEFAULT_UPDATES_URL);
        let url = updates_url(base, &package.version, &request.release_channel)?;
        log::debug!("Delta updates enabled against {}", url);
        builder = builder.remote_releases(url.as_str());
    }
    if let Some(icon_url) = overrides.windows.icon_url {
        builder = builder.icon_url(icon_url);
    }
    if let Some(timestamp_url) = overrides.windows.timestamp_url {
        builder = builder.timestamp_url(timestamp_url);
    }
    if let Some(engine) = overrides.windows.engine {
        builder = builder.engine(resolve_engine(root, engine));
    }
    if let Some(snap) = overrides.linux {
        builder = builder.snap_settings(snap);
    }

    Ok(builder.package_settings(package).build()?)
}
