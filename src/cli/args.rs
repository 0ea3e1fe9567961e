//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Release channels the packager knows about.
pub const RELEASE_CHANNELS: [&str; 4] = ["production", "beta", "test", "development"];

/// Installer packager for the desktop application
#[derive(Parser, Debug)]
#[command(
    name = "release-packager",
    version,
    about = "Packages the built desktop application into platform installers",
    long_about = "Packages the already-built desktop application for the host platform.

macOS:   zips the .app bundle
Windows: creates signed Setup.exe and MSI installers
Linux:   creates deb, rpm and snap packages plus checksums.txt

Usage:
  release-packager
  release-packager --root ../desktop --release-channel beta

Exit code 0 = every artifact for the platform exists in the installer directory."
)]
pub struct Args {
    /// Repository root containing app/ and dist/
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Release channel: production, beta, test or development
    #[arg(
        short = 'c',
        long,
        value_name = "CHANNEL",
        env = "RELEASE_CHANNEL",
        default_value = "development"
    )]
    pub release_channel: String,

    /// Packaging overrides file (default: <root>/script/packaging.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if !RELEASE_CHANNELS.contains(&self.release_channel.as_str()) {
            return Err(format!(
                "Invalid release channel: {}. Valid channels: {}",
                self.release_channel,
                RELEASE_CHANNELS.join(", ")
            ));
        }

        Ok(())
    }
}
