//! Packaging orchestration and the steps shared between platforms.
//!
//! This module provides the [`Packager`] orchestrator that selects and runs
//! the packager for the running platform.
//!
//! # Overview
//!
//! A run:
//! 1. Selects one [`crate::bundler::PackagingTarget`] from the operating system
//! 2. Validates the assets that target needs
//! 3. Runs the platform's external tools
//! 4. Collects the produced files from the filesystem
//! 5. Writes the checksum manifest (Linux)
//!
//! # Example
//!
//! ```no_run
//! use release_packager::bundler::{Packager, PackageSettings, PackagingOptionsBuilder};
//!
//! # async fn example() -> release_packager::bundler::Result<()> {
//! let options = PackagingOptionsBuilder::new()
//!     .repository_root(".")
//!     .package_settings(PackageSettings {
//!         product_name: "GitHub Desktop".into(),
//!         version: "1.0.0".into(),
//!         company_name: "GitHub, Inc.".into(),
//!     })
//!     .build()?;
//!
//! for artifact in Packager::new(options).package().await? {
//!     println!("Created: {artifact}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA-256 digests and the `checksums.txt` manifest
//! - [`collector`] - glob discovery and relocation of tool outputs
//! - [`orchestrator`] - the [`Packager`] dispatcher
//! - [`signing`] - signing certificate lifecycle
//! - [`tool_detection`] - locating external tools on `PATH`

pub mod checksum;
pub mod collector;
pub mod orchestrator;
pub mod signing;
pub mod tool_detection;

pub use orchestrator::Packager;
pub use tool_detection::resolve_program;
