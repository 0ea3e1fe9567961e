//! Top-level error types for the packager binary.
//!
//! Wraps packaging errors with CLI and configuration failures and maps
//! the common ones to something the user can act on.

use crate::bundler::{CERTIFICATE_PASSWORD_VAR, Error as BundleError};
use thiserror::Error;

/// Result type alias for packager operations
pub type Result<T> = std::result::Result<T, PackagerError>;

/// Main error type for a packaging run
#[derive(Error, Debug)]
pub enum PackagerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Packaging errors
    #[error("Packaging error: {0}")]
    Bundler(#[from] BundleError),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl PackagerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            PackagerError::Bundler(BundleError::ToolNotFound(tool)) => {
                vec![format!("Install '{tool}' and make sure it is on PATH")]
            }
            PackagerError::Bundler(BundleError::MissingAsset { .. }) => vec![
                "Build and package the application before creating installers".to_string(),
            ],
            PackagerError::Bundler(BundleError::UnsupportedPlatform(_)) => {
                vec!["Run the packager on macOS, Windows or Linux".to_string()]
            }
            PackagerError::Bundler(BundleError::GenericError(msg))
                if msg.contains(CERTIFICATE_PASSWORD_VAR) =>
            {
                vec![format!(
                    "Set {CERTIFICATE_PASSWORD_VAR} to the signing certificate password"
                )]
            }
            PackagerError::Bundler(BundleError::InvalidMetadata(_)) | PackagerError::Json(_) => {
                vec!["Check productName, version and companyName in app/package.json".to_string()]
            }
            _ => Vec::new(),
        }
    }
}
