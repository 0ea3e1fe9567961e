//! Windows packaging: standalone setup executable and MSI installer.
//!
//! The installer-generation engine is an external program that takes a JSON
//! configuration and writes its outputs into the installer directory. Under
//! CI the signing certificate is provisioned around the engine run.

mod config;

pub use config::{InstallerConfig, SignParams};

use crate::bundler::{
    artifact::{self, Artifact},
    builder::{collector::find_files, signing::with_certificate},
    error::{Error, ErrorExt, Result},
    settings::PackagingOptions,
    utils::{
        fs,
        process::{ToolInvocation, ToolRunner},
    },
};
use std::path::Path;

/// Tool name of the installer-generation engine.
pub const ENGINE_TOOL: &str = "installer-engine";

/// Creates the Windows installers.
///
/// # Process
///
/// 1. Verify the setup icon and splash image exist
/// 2. Build the engine configuration (signing parameters only under CI)
/// 3. Provision the certificate (CI only), run the engine, remove the certificate
/// 4. Collect the standalone and MSI installers from the installer directory
///
/// The certificate cleanup in step 3 runs whether or not the engine succeeds;
/// an engine failure is returned only after cleanup finished.
pub async fn package<R: ToolRunner>(options: &PackagingOptions, runner: &R) -> Result<Vec<Artifact>> {
    let windows = options.windows();
    fs::require_file("setup icon", &windows.setup_icon).await?;
    fs::require_file("setup splash screen gif", &windows.splash_image).await?;
    fs::require_dir("prebuilt application directory", options.dist_path()).await?;

    let sign_with_params = if options.is_ci() {
        Some(SignParams::from_env(&windows.signing)?)
    } else {
        None
    };
    let config = InstallerConfig::new(options, sign_with_params);
    log::debug!("Installer configuration: {:?}", config);

    super::prepare_installer_dir(options).await?;

    let engine_run = run_engine(runner, &windows.engine, &config);
    if let Err(e) = with_certificate(runner, &windows.signing, options.is_ci(), engine_run).await {
        log::error!("Error packaging: {}", e);
        return Err(e);
    }

    let installer_dir = options.installer_dir();
    log::info!("✓ Installers created in {}", installer_dir.display());

    let pattern = options.artifact_pattern(installer_dir);
    let artifacts = artifact::infer_all(find_files(&pattern).await?)?;
    if artifacts.is_empty() {
        return Err(Error::EmptyResult { pattern });
    }
    Ok(artifacts)
}

/// Writes the configuration to a temporary file and runs the engine on it.
///
/// The file may contain the signing passphrase; it is created owner-only and
/// deleted as soon as the engine exits.
async fn run_engine<R: ToolRunner>(runner: &R, engine: &Path, config: &InstallerConfig) -> Result<()> {
    let config_file = tempfile::Builder::new()
        .prefix("installer-config")
        .suffix(".json")
        .tempfile()
        .fs_context("creating engine configuration in", std::env::temp_dir())?;
    serde_json::to_writer_pretty(config_file.as_file(), config)?;

    let invocation = ToolInvocation::new(ENGINE_TOOL, engine)
        .arg("--config")
        .arg(config_file.path());
    runner.run(&invocation).await
}
