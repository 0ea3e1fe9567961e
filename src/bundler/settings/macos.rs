//! macOS packaging settings.

use std::path::PathBuf;

/// Inputs and outputs of the macOS archive step.
#[derive(Clone, Debug, Default)]
pub struct MacOsSettings {
    /// The prebuilt `.app` bundle to archive.
    ///
    /// Default: `<dist path>/<product name>.app`
    pub app_bundle: Option<PathBuf>,

    /// Destination of the compressed archive. Overwritten on every run.
    ///
    /// Default: `<installer dir>/<file prefix>-<version>-macOS.zip`
    pub archive_path: Option<PathBuf>,
}
