//! Release packager - builds platform installers for the desktop app.
//!
//! This binary packages the already-built application for the host
//! platform and exits non-zero on the first failure.

use release_packager::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging, info by default, RUST_LOG overrides
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  hint: {}", suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}
