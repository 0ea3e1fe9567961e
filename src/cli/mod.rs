//! Command line interface for the release packager.
//!
//! Resolves the target platform, loads configuration and runs the
//! matching packager.

mod args;

pub use args::{Args, RELEASE_CHANNELS};

use crate::bundler::{Packager, PackagingTarget};
use crate::error::{CliError, Result};
use crate::metadata::{self, OptionsRequest};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args).await
}

/// Runs a packaging pass for already parsed arguments.
pub async fn execute(args: &Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    // Platform is decided once, before any configuration is read.
    let target = PackagingTarget::current()?;

    let options = metadata::load_options(&OptionsRequest {
        root: args.root.clone(),
        release_channel: args.release_channel.clone(),
        config: args.config.clone(),
        ci: metadata::detect_ci(),
        target,
    })?;

    log::info!(
        "Release channel {}, installers go to {}",
        args.release_channel,
        options.installer_dir().display()
    );

    let artifacts = Packager::new(options).package_for(target).await?;

    for artifact in &artifacts {
        log::info!("  {}", artifact);
    }
    log::info!("✓ {} artifact(s) ready", artifacts.len());

    Ok(0)
}
