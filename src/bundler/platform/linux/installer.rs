//! Generic installer build (deb, rpm, AppImage) via electron-builder.

use crate::bundler::{
    builder::collector::{collect_artifacts, find_files},
    error::{Error, Result},
    settings::PackagingOptions,
    utils::{
        fs,
        process::{ToolInvocation, ToolRunner},
    },
};
use std::path::PathBuf;

/// Tool name of the generic installer builder.
pub const BUILDER_TOOL: &str = "electron-builder";

/// Runs the generic installer builder and moves its outputs into the
/// installer directory.
///
/// The builder writes into the distribution root and its outputs are found
/// by the product prefix. Files left there by an earlier, interrupted run are
/// deleted first so they cannot be collected as this run's output.
///
/// # Errors
///
/// - [`Error::ExternalTool`] / [`Error::CommandFailed`] if the builder fails
/// - [`Error::EmptyResult`] if the builder produced nothing
pub async fn build_installers<R: ToolRunner>(
    options: &PackagingOptions,
    runner: &R,
) -> Result<Vec<PathBuf>> {
    let pattern = options.artifact_pattern(options.dist_root());

    for stale in find_files(&pattern).await? {
        log::warn!("Removing stale installer {}", stale.display());
        fs::remove_file(&stale).await?;
    }

    let linux = options.linux();
    // the builder resolves its project directory from the working directory
    let invocation = ToolInvocation::new(BUILDER_TOOL, &linux.builder)
        .args(["build", "--prepackaged"])
        .arg(options.dist_path())
        .arg(options.arch().builder_flag())
        .arg("--config")
        .arg(&linux.builder_config)
        .current_dir(options.repository_root());
    runner.run(&invocation).await?;

    let moved = collect_artifacts(&pattern, options.installer_dir()).await?;
    if moved.is_empty() {
        return Err(Error::EmptyResult { pattern });
    }

    log::info!("✓ Collected {} generic installer(s)", moved.len());
    Ok(moved)
}
