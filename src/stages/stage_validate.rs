use std::path::Path;

use tracing::{info, warn};

use crate::error::CompileResult;
use crate::io::ExternalCommand;

/// Configuration for the validation stage
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Validator command; the document path is appended as the last argument
    pub command: ExternalCommand,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            command: ExternalCommand::with_args("mix", ["roux.validate"]),
        }
    }
}

impl ValidatorConfig {
    /// Build from an optional program override and its arguments.
    ///
    /// Arguments given without a program are passed to the default `mix`.
    pub fn from_parts(program: Option<String>, args: Vec<String>) -> Self {
        match program {
            Some(program) => Self {
                command: ExternalCommand::with_args(program, args),
            },
            None if args.is_empty() => Self::default(),
            None => Self {
                command: ExternalCommand::with_args("mix", args),
            },
        }
    }
}

/// Result of running the external validator
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub passed: bool,
    /// `None` when the validator was killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
}

/// Execute the validation stage.
///
/// Runs the validator against the finished document and echoes its standard
/// output. A rejection is reported through [`ValidationResult::passed`];
/// only a validator that cannot be started is an error.
pub async fn execute_validation(
    document: &Path,
    config: &ValidatorConfig,
) -> CompileResult<ValidationResult> {
    info!("Validating {:?} with {}", document, config.command);

    let output = config.command.output([document]).await?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

    println!("{}", stdout.trim_end());
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        eprintln!("{}", stderr.trim_end());
    }

    let passed = output.status.success();
    if !passed {
        warn!("Validator exited with {}", output.status);
    }

    Ok(ValidationResult {
        passed,
        exit_code: output.status.code(),
        stdout,
    })
}
