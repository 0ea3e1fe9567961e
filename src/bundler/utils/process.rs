//! External tool invocation.
//!
//! Every subprocess the packagers start goes through [`ToolRunner`], so a run
//! can be observed or faked without touching the real tools.

use crate::bundler::{
    builder::resolve_program,
    error::{Error, Result},
};
use std::{
    ffi::{OsStr, OsString},
    future::Future,
    path::{Path, PathBuf},
    process::Stdio,
};

/// A single external tool call.
#[derive(Clone, Debug)]
pub struct ToolInvocation {
    tool: String,
    program: PathBuf,
    args: Vec<OsString>,
    current_dir: Option<PathBuf>,
    capture_output: bool,
}

impl ToolInvocation {
    /// Creates an invocation of `program`, reported to the user as `tool`.
    pub fn new(tool: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            tool: tool.into(),
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            capture_output: false,
        }
    }

    /// Appends an argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Runs the tool inside `dir`.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Captures stdout/stderr instead of inheriting them, so failures can
    /// carry the tool's own error text.
    pub fn capture_output(mut self) -> Self {
        self.capture_output = true;
        self
    }

    /// Name shown in logs and errors.
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Executable to run.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments passed to the executable.
    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    /// Working directory, if any.
    pub fn working_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// The command line, for logging.
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Runs external tools to completion.
///
/// There is no timeout or cancellation: once launched, a tool is waited on
/// unconditionally.
pub trait ToolRunner: Send + Sync {
    /// Runs the invocation and waits for it to exit.
    ///
    /// # Errors
    ///
    /// - [`Error::ToolNotFound`] if a bare program name is not on `PATH`
    /// - [`Error::CommandFailed`] if the process cannot be spawned
    /// - [`Error::ExternalTool`] on a non-zero exit
    fn run(&self, invocation: &ToolInvocation) -> impl Future<Output = Result<()>> + Send;
}

/// Runs tools as real subprocesses via `tokio::process`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<()> {
        let program = resolve_program(invocation.program())?;

        let mut command = tokio::process::Command::new(&program);
        command.args(invocation.arguments()).stdin(Stdio::null());
        if let Some(dir) = invocation.working_dir() {
            command.current_dir(dir);
        }

        log::info!("Running {}", invocation.command_line());

        let command_failed = |error| Error::CommandFailed {
            command: invocation.command_line(),
            error,
        };

        if invocation.capture_output {
            let output = command.output().await.map_err(command_failed)?;
            let stdout = String::from_utf8_lossy(&output.stdout);
            if !stdout.trim().is_empty() {
                log::debug!("{} output: {}", invocation.tool(), stdout.trim());
            }
            if !output.status.success() {
                return Err(Error::ExternalTool {
                    tool: invocation.tool().to_string(),
                    code: output.status.code(),
                    output: String::from_utf8_lossy(&output.stderr).into_owned(),
                });
            }
        } else {
            let status = command.status().await.map_err(command_failed)?;
            if !status.success() {
                return Err(Error::ExternalTool {
                    tool: invocation.tool().to_string(),
                    code: status.code(),
                    output: String::new(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captured_failure_carries_stderr() {
        let invocation = ToolInvocation::new("sh", "sh")
            .args(["-c", "echo broken bundle >&2; exit 3"])
            .capture_output();

        let err = SystemRunner.run(&invocation).await.unwrap_err();
        match err {
            Error::ExternalTool { tool, code, output } => {
                assert_eq!(tool, "sh");
                assert_eq!(code, Some(3));
                assert_eq!(output.trim(), "broken bundle");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn runs_in_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let invocation = ToolInvocation::new("touch", "touch")
            .arg("marker")
            .current_dir(dir.path());

        SystemRunner.run(&invocation).await.unwrap();
        assert!(dir.path().join("marker").exists());
    }

    #[tokio::test]
    async fn missing_executable_is_a_spawn_failure() {
        let dir = tempfile::tempdir().unwrap();
        let invocation = ToolInvocation::new("engine", dir.path().join("no-such-engine"));

        let err = SystemRunner.run(&invocation).await.unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }

    #[test]
    fn command_line_joins_arguments() {
        let invocation = ToolInvocation::new("ditto", "ditto").args(["-ck", "--keepParent"]);
        assert_eq!(invocation.command_line(), "ditto -ck --keepParent");
    }
}
