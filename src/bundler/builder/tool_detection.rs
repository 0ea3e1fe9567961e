//! External tool detection.
//!
//! Bare program names are looked up on `PATH` up front so a missing tool is
//! reported by name instead of as an opaque spawn error.

use crate::bundler::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Resolves `program` to an executable path.
///
/// Paths with more than one component are returned unchanged; a missing
/// file there surfaces as a spawn failure carrying the full path.
pub fn resolve_program(program: &Path) -> Result<PathBuf> {
    if program.components().count() > 1 {
        return Ok(program.to_path_buf());
    }

    match which::which(program) {
        Ok(path) => {
            log::debug!("Found {} at: {}", program.display(), path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", program.display(), e);
            Err(Error::ToolNotFound(program.display().to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_paths_are_not_searched() {
        let path = Path::new("node_modules/.bin/electron-builder");
        assert_eq!(resolve_program(path).unwrap(), path);
    }

    #[test]
    fn unknown_bare_name_is_tool_not_found() {
        let err = resolve_program(Path::new("definitely-not-a-packaging-tool")).unwrap_err();
        assert!(matches!(err, Error::ToolNotFound(name) if name == "definitely-not-a-packaging-tool"));
    }
}
