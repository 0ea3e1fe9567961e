//! Platform dispatch.
//!
//! This module provides the [`Packager`] that maps the running operating
//! system to exactly one platform packager.

use crate::bundler::{
    Artifact, PackagingTarget, Result,
    platform::{linux, macos, windows},
    settings::PackagingOptions,
    utils::process::{SystemRunner, ToolRunner},
};

/// Runs the packager for one target.
///
/// Owns the run's [`PackagingOptions`]; the platform packagers only borrow
/// them.
///
/// # Platform Support
///
/// - **macOS**: zip archive of the `.app` bundle
/// - **Windows**: standalone setup executable and MSI
/// - **Linux**: deb, rpm and snap, plus `checksums.txt`
#[derive(Debug)]
pub struct Packager<R = SystemRunner> {
    options: PackagingOptions,
    runner: R,
}

impl Packager {
    /// Creates a packager that runs real external tools.
    pub fn new(options: PackagingOptions) -> Self {
        Self::with_runner(options, SystemRunner)
    }
}

impl<R: ToolRunner> Packager<R> {
    /// Creates a packager that runs external tools through `runner`.
    pub fn with_runner(options: PackagingOptions, runner: R) -> Self {
        Self { options, runner }
    }

    /// Packages for the running operating system.
    ///
    /// # Errors
    ///
    /// [`crate::bundler::Error::UnsupportedPlatform`] if the operating system
    /// has no packager, before anything else happens.
    pub async fn package(&self) -> Result<Vec<Artifact>> {
        let target = PackagingTarget::current()?;
        self.package_for(target).await
    }

    /// Packages for an explicit target.
    pub async fn package_for(&self, target: PackagingTarget) -> Result<Vec<Artifact>> {
        log::info!(
            "Packaging {} {} for {}",
            self.options.product_name(),
            self.options.version(),
            target
        );

        match target {
            PackagingTarget::MacOs => macos::package(&self.options, &self.runner).await,
            PackagingTarget::Windows => windows::package(&self.options, &self.runner).await,
            PackagingTarget::Linux => linux::package(&self.options, &self.runner).await,
        }
    }

    /// Returns a reference to the packaging options.
    pub fn options(&self) -> &PackagingOptions {
        &self.options
    }

    /// Returns the runner external tools go through.
    pub fn runner(&self) -> &R {
        &self.runner
    }
}
