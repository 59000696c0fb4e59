use std::ffi::OsString;
use std::path::Path;

use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::io::ExternalCommand;
use crate::llm::Generator;

/// Configuration for the opencode subprocess generator
#[derive(Debug, Clone)]
pub struct OpencodeConfig {
    /// Command used to launch opencode
    pub command: ExternalCommand,
}

impl Default for OpencodeConfig {
    fn default() -> Self {
        Self {
            command: ExternalCommand::new("opencode"),
        }
    }
}

/// Generator that shells out to `opencode --prompt <prompt> [--file <context>]`
pub struct OpencodeGenerator {
    config: OpencodeConfig,
}

impl OpencodeGenerator {
    pub fn new(config: OpencodeConfig) -> Self {
        Self { config }
    }
}

impl Generator for OpencodeGenerator {
    fn name(&self) -> &str {
        "opencode"
    }

    async fn generate(&self, prompt: &str, context_file: Option<&Path>) -> CompileResult<String> {
        let mut args: Vec<OsString> = vec!["--prompt".into(), prompt.into()];
        if let Some(path) = context_file {
            args.push("--file".into());
            args.push(path.as_os_str().to_owned());
        }

        let output = self.config.command.output(&args).await?;

        if !output.status.success() {
            debug!("opencode exited with {}", output.status);
            return Err(CompileError::generator(
                self.name(),
                String::from_utf8_lossy(&output.stderr),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn script_generator(dir: &Path, body: &str) -> OpencodeGenerator {
        let script = dir.join("opencode.sh");
        std::fs::write(&script, body).unwrap();
        OpencodeGenerator::new(OpencodeConfig {
            command: ExternalCommand::with_args("sh", [script.to_string_lossy().into_owned()]),
        })
    }

    #[tokio::test]
    async fn test_passes_prompt_without_context() {
        let dir = tempfile::tempdir().unwrap();
        let generator = script_generator(dir.path(), "printf '%s|' \"$@\"\n");

        let text = generator.generate("make yaml", None).await.unwrap();
        assert_eq!(text, "--prompt|make yaml|");
    }

    #[tokio::test]
    async fn test_passes_context_file() {
        let dir = tempfile::tempdir().unwrap();
        let generator = script_generator(dir.path(), "printf '%s|' \"$@\"\n");
        let context = dir.path().join("recipe.yml");

        let text = generator.generate("p", Some(&context)).await.unwrap();
        assert_eq!(text, format!("--prompt|p|--file|{}|", context.display()));
    }

    #[tokio::test]
    async fn test_non_zero_exit_reports_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let generator = script_generator(dir.path(), "echo 'rate limited' >&2\nexit 1\n");

        let err = generator.generate("p", None).await.unwrap_err();
        assert_eq!(err.to_string(), "Error calling opencode: rate limited");
    }
}
