use std::fmt;
use std::process::Output;

use tokio::process::Command;
use tracing::debug;

use crate::error::{CompileError, CompileResult};

/// An external program plus the arguments that always precede per-call ones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Run with `extra` appended and wait for it to exit, capturing stdout and stderr.
    ///
    /// A non-zero exit is not an error here; callers decide what it means.
    pub async fn output<I, S>(&self, extra: I) -> CompileResult<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let mut command = Command::new(&self.program);
        command.args(&self.args).args(extra);

        debug!("Running {}", self);
        command
            .output()
            .await
            .map_err(|source| CompileError::Spawn {
                program: self.program.clone(),
                source,
            })
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_program_and_args() {
        let cmd = ExternalCommand::with_args("mix", ["roux.validate"]);
        assert_eq!(cmd.to_string(), "mix roux.validate");
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let cmd = ExternalCommand::new("definitely-not-a-real-program-4f1c");
        let err = cmd.output(["x"]).await.unwrap_err();
        assert!(matches!(err, CompileError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_output_captures_streams_and_status() {
        let cmd = ExternalCommand::with_args("sh", ["-c", "echo out; echo err >&2; exit 3"]);
        let output = cmd.output(Vec::<String>::new()).await.unwrap();
        assert_eq!(output.status.code(), Some(3));
        assert_eq!(String::from_utf8_lossy(&output.stdout), "out\n");
        assert_eq!(String::from_utf8_lossy(&output.stderr), "err\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_program_path_with_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let tools = dir.path().join("My Tools");
        std::fs::create_dir(&tools).unwrap();
        let program = tools.join("sh");
        std::os::unix::fs::symlink("/bin/sh", &program).unwrap();

        let cmd = ExternalCommand::new(program.to_string_lossy());
        assert_eq!(cmd.program, program.to_string_lossy());
        assert!(cmd.args.is_empty());

        let output = cmd.output(["-c", "echo ok"]).await.unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "ok\n");
    }
}
