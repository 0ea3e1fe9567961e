//! Snap (confinement package) build via snapcraft.

use super::template::{LAUNCHER_SCRIPT, render_desktop_entry};
use crate::bundler::{
    builder::collector::find_files,
    error::{Error, ErrorExt, Result},
    settings::PackagingOptions,
    utils::{
        fs,
        process::{ToolInvocation, ToolRunner},
    },
};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Tool name of the confinement packager.
pub const SNAPCRAFT_TOOL: &str = "snapcraft";

const LAUNCHER_PART: &str = "launcher";
const LAUNCHER_NAME: &str = "electron-launch";

/// In-memory form of `snap/snapcraft.yaml`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SnapcraftManifest {
    pub name: String,
    pub version: String,
    pub summary: String,
    pub description: String,
    pub grade: String,
    pub confinement: String,
    pub apps: BTreeMap<String, SnapApp>,
    pub parts: BTreeMap<String, SnapPart>,
}

/// Application entry of the snap.
#[derive(Debug, Serialize)]
pub struct SnapApp {
    pub command: String,
    pub environment: BTreeMap<String, String>,
}

/// A snapcraft part.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SnapPart {
    pub source: PathBuf,
    pub plugin: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stage_packages: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub after: Vec<String>,
}

impl SnapcraftManifest {
    /// Describes the snap for this run.
    ///
    /// The application part dumps the prebuilt directory as-is; the launcher
    /// shim comes from its own part so the prebuilt directory is never
    /// modified.
    pub fn new(options: &PackagingOptions, launcher_source: &Path) -> Self {
        let snap = &options.linux().snap;
        let snap_name = options.package().snap_name();

        let app = SnapApp {
            // quoted so the launcher receives the executable path as one word
            command: format!("bin/{LAUNCHER_NAME} '$SNAP/{snap_name}/{snap_name}'"),
            environment: BTreeMap::from([("TMPDIR".to_string(), "$XDG_RUNTIME_DIR".to_string())]),
        };

        let parts = BTreeMap::from([
            (
                snap_name.clone(),
                SnapPart {
                    source: options.dist_path().to_path_buf(),
                    plugin: "dump".into(),
                    stage_packages: snap.stage_packages.clone(),
                    after: snap.after.clone(),
                },
            ),
            (
                LAUNCHER_PART.to_string(),
                SnapPart {
                    source: launcher_source.to_path_buf(),
                    plugin: "dump".into(),
                    stage_packages: Vec::new(),
                    after: Vec::new(),
                },
            ),
        ]);

        Self {
            name: snap_name.clone(),
            version: options.version().to_string(),
            summary: snap.summary.clone(),
            description: snap.description.clone(),
            grade: snap.grade.clone(),
            confinement: snap.confinement.clone(),
            apps: BTreeMap::from([(snap_name, app)]),
            parts,
        }
    }
}

/// Builds the snap in a scratch directory and moves it into the installer
/// directory as `<prefix>-<version>-<arch>.snap`.
///
/// # Process
///
/// 1. Create a temporary scratch directory (removed when this returns)
/// 2. Write `snap/snapcraft.yaml`, the launcher shim and the desktop entry
/// 3. Copy the application icon to `snap/gui/icon.png`
/// 4. Run `snapcraft --target-arch=<arch>` inside the scratch directory
/// 5. Expect exactly one `.snap` and move it
///
/// # Errors
///
/// [`Error::ArtifactCountMismatch`] unless snapcraft produced exactly one
/// snap; nothing is moved in that case.
pub async fn build_snap<R: ToolRunner>(options: &PackagingOptions, runner: &R) -> Result<PathBuf> {
    let scratch = tempfile::Builder::new()
        .prefix("desktop-snap-package")
        .tempdir()
        .fs_context("creating snap scratch directory in", std::env::temp_dir())?;
    let root = scratch.path();

    let snap_dir = root.join("snap");
    let gui_dir = snap_dir.join("gui");
    let launcher_source = root.join(LAUNCHER_PART);
    let launcher_bin = launcher_source.join("bin");
    fs::create_dir_all(&gui_dir, false).await?;
    fs::create_dir_all(&launcher_bin, false).await?;

    let manifest = SnapcraftManifest::new(options, &launcher_source);
    let manifest_path = snap_dir.join("snapcraft.yaml");
    tokio::fs::write(&manifest_path, serde_yaml::to_string(&manifest)?)
        .await
        .fs_context("writing snap manifest", &manifest_path)?;
    log::debug!("Wrote {}", manifest_path.display());

    fs::write_executable(&launcher_bin.join(LAUNCHER_NAME), LAUNCHER_SCRIPT).await?;

    let desktop_path = gui_dir.join(format!("{}.desktop", manifest.name));
    tokio::fs::write(&desktop_path, render_desktop_entry(options)?)
        .await
        .fs_context("writing desktop entry", &desktop_path)?;

    fs::copy_file(&options.linux().icon, &gui_dir.join("icon.png")).await?;

    let arch = options.arch().snap_arch();
    let invocation = ToolInvocation::new(SNAPCRAFT_TOOL, "snapcraft")
        .arg(format!("--target-arch={arch}"))
        .current_dir(root);
    runner.run(&invocation).await?;

    let pattern = format!("{}/*.snap", glob::Pattern::escape(&root.to_string_lossy()));
    let mut found = find_files(&pattern).await?;
    if found.len() != 1 {
        return Err(Error::ArtifactCountMismatch {
            pattern,
            expected: 1,
            found,
        });
    }
    let built = found.remove(0);

    let dest = options.installer_dir().join(format!(
        "{}-{}-{}.snap",
        options.package().file_prefix(),
        options.version(),
        arch
    ));
    log::info!("Moving {} -> {}", built.display(), dest.display());
    fs::move_file(&built, &dest).await?;

    log::info!("✓ Created snap: {}", dest.display());
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{PackageSettings, PackagingOptionsBuilder, PackagingTarget};

    #[test]
    fn manifest_yaml_shape() {
        let options = PackagingOptionsBuilder::new()
            .repository_root("/repo")
            .target(PackagingTarget::Linux)
            .package_settings(PackageSettings {
                product_name: "GitHub Desktop".into(),
                version: "1.0.0".into(),
                company_name: "GitHub, Inc.".into(),
            })
            .build()
            .unwrap();

        let manifest = SnapcraftManifest::new(&options, Path::new("/scratch/launcher"));
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(&serde_yaml::to_string(&manifest).unwrap()).unwrap();

        assert_eq!(yaml["name"], "github-desktop");
        assert_eq!(yaml["version"], "1.0.0");
        assert_eq!(yaml["confinement"], "classic");
        assert_eq!(
            yaml["apps"]["github-desktop"]["command"],
            "bin/electron-launch '$SNAP/github-desktop/github-desktop'"
        );
        assert_eq!(
            yaml["apps"]["github-desktop"]["environment"]["TMPDIR"],
            "$XDG_RUNTIME_DIR"
        );
        let part = &yaml["parts"]["github-desktop"];
        assert_eq!(part["plugin"], "dump");
        assert_eq!(part["after"][0], "desktop-gtk3");
        assert!(
            part["stage-packages"]
                .as_sequence()
                .unwrap()
                .iter()
                .any(|p| p == "openssh-client")
        );
        assert_eq!(yaml["parts"]["launcher"]["source"], "/scratch/launcher");
        assert!(yaml["parts"]["launcher"].get("stage-packages").is_none());
    }
}
