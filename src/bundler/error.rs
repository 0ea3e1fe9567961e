//! Error types for packaging operations.
//!
//! Every variant is terminal for the run. Nothing is retried; the caller
//! reports the error and the process exits non-zero.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error as DeriveError;

/// Result alias used throughout the bundler.
pub type Result<T> = std::result::Result<T, Error>;

/// Packaging errors.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// The running operating system has no packager.
    #[error("unsupported platform: don't know how to package for '{0}'")]
    UnsupportedPlatform(String),

    /// A required design asset or input directory does not exist.
    #[error("expected {kind} not found at location: {}", .path.display())]
    MissingAsset {
        /// Human-readable description of the asset
        kind: String,
        /// Path where the asset was expected
        path: PathBuf,
    },

    /// An external tool ran but reported failure.
    #[error("{tool} failed with exit code {code:?}{}", format_output(.output))]
    ExternalTool {
        /// Tool name as shown to the user
        tool: String,
        /// Exit code, `None` if terminated by a signal
        code: Option<i32>,
        /// Captured stderr (empty when stdio was inherited)
        output: String,
    },

    /// An external tool could not be spawned.
    #[error("failed to run '{command}': {error}")]
    CommandFailed {
        /// Command that failed to start
        command: String,
        /// Underlying spawn error
        error: io::Error,
    },

    /// An external tool is not installed.
    #[error("'{0}' not found in PATH")]
    ToolNotFound(String),

    /// A glob that must match at least one file matched nothing.
    #[error("could not find any files at {pattern}")]
    EmptyResult {
        /// The glob pattern that was evaluated
        pattern: String,
    },

    /// A build step was expected to produce an exact number of files.
    #[error("expected {expected} file(s) matching {pattern}, found {}: {found:?}", .found.len())]
    ArtifactCountMismatch {
        /// The glob pattern that was evaluated
        pattern: String,
        /// Number of files the step should produce
        expected: usize,
        /// Files that were actually found
        found: Vec<PathBuf>,
    },

    /// Reading an artifact while hashing it failed.
    #[error("failed to hash {}: {source}", .path.display())]
    ChecksumIo {
        /// Artifact being hashed
        path: PathBuf,
        /// Underlying read error
        #[source]
        source: io::Error,
    },

    /// Filesystem operation failed, with the operation and path attached.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying I/O error
        error: io::Error,
    },

    /// Build metadata is malformed or incomplete.
    #[error("invalid build metadata: {0}")]
    InvalidMetadata(String),

    /// I/O error without further context.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Invalid glob pattern.
    #[error("invalid glob pattern: {0}")]
    GlobPattern(#[from] glob::PatternError),

    /// Glob iteration hit an unreadable entry.
    #[error("{0}")]
    Glob(#[from] glob::GlobError),

    /// Snap manifest serialization failed.
    #[error("failed to serialize snap manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON (de)serialization failed.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// Packaging overrides file could not be parsed.
    #[error("{0}")]
    Toml(#[from] toml::de::Error),

    /// Template rendering failed.
    #[error("{0}")]
    Template(#[from] handlebars::RenderError),

    /// URL in configuration does not parse.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

fn format_output(output: &str) -> String {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

/// Convenience for attaching a message to an `Option` or `Result`.
pub trait Context<T> {
    /// Converts to [`Error::GenericError`] carrying `msg`.
    fn context<C>(self, msg: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Like [`Context::context`] with a lazily built message.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, msg: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, msg: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::GenericError(format!("{msg}: {e}")))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::GenericError(format!("{}: {e}", f())))
    }
}

/// Attaches an operation description and path to I/O errors.
pub trait ErrorExt<T> {
    /// Maps an I/O error into [`Error::Fs`].
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_asset_names_the_path() {
        let err = Error::MissingAsset {
            kind: "setup icon".into(),
            path: PathBuf::from("/repo/app/static/logos/icon-logo.ico"),
        };
        assert_eq!(
            err.to_string(),
            "expected setup icon not found at location: /repo/app/static/logos/icon-logo.ico"
        );
    }

    #[test]
    fn external_tool_includes_captured_output() {
        let err = Error::ExternalTool {
            tool: "ditto".into(),
            code: Some(1),
            output: "ditto: No such file or directory\n".into(),
        };
        assert_eq!(
            err.to_string(),
            "ditto failed with exit code Some(1): ditto: No such file or directory"
        );

        let err = Error::ExternalTool {
            tool: "snapcraft".into(),
            code: Some(2),
            output: String::new(),
        };
        assert_eq!(err.to_string(), "snapcraft failed with exit code Some(2)");
    }

    #[test]
    fn option_context_becomes_generic_error() {
        let value: Option<u8> = None;
        let err = value.context("no main binary").unwrap_err();
        assert!(matches!(err, Error::GenericError(msg) if msg == "no main binary"));
    }
}
