//! Release packager for a prebuilt Electron desktop application.
//!
//! Turns the packaged application directory into distributable artifacts:
//! - macOS: a zip archive of the `.app` bundle
//! - Windows: signed Squirrel installers (`Setup.exe`, `.msi`)
//! - Linux: `.deb`, `.rpm` and `.snap` plus a SHA-256 checksum manifest
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{CliError, PackagerError, Result};
