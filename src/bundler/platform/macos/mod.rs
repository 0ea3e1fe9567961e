//! macOS packaging: archive the prebuilt `.app` bundle.

use crate::bundler::{
    artifact::{self, Artifact},
    error::Result,
    settings::PackagingOptions,
    utils::{
        fs,
        process::{ToolInvocation, ToolRunner},
    },
};

/// Tool name of the archiving step.
pub const ARCHIVER_TOOL: &str = "ditto";

/// Archives the application bundle into a single zip.
///
/// `ditto -ck --keepParent` keeps the bundle's internal structure (symlinks,
/// extended attributes) intact, which a plain zip would not. Any archive
/// already at the destination is replaced.
///
/// # Errors
///
/// - [`crate::bundler::Error::MissingAsset`] if the `.app` bundle is missing
/// - [`crate::bundler::Error::ExternalTool`] with ditto's stderr if archiving fails
pub async fn package<R: ToolRunner>(options: &PackagingOptions, runner: &R) -> Result<Vec<Artifact>> {
    let app_bundle = options.app_bundle();
    fs::require_dir("application bundle", app_bundle).await?;

    super::prepare_installer_dir(options).await?;

    let dest = options.archive_path();
    fs::remove_file(dest).await?;
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent, false).await?;
    }

    let invocation = ToolInvocation::new(ARCHIVER_TOOL, "ditto")
        .args(["-ck", "--keepParent"])
        .arg(app_bundle)
        .arg(dest)
        .capture_output();
    runner.run(&invocation).await?;

    log::info!("✓ Zipped to {}", dest.display());

    artifact::infer_all([dest])
}
