use std::path::PathBuf;

use thiserror::Error;

/// Result type for compiler operations
pub type CompileResult<T> = std::result::Result<T, CompileError>;

/// Everything that can stop a compile run
#[derive(Error, Debug)]
pub enum CompileError {
    /// The generator ran but reported failure
    #[error("Error calling {tool}: {message}")]
    Generator { tool: String, message: String },

    /// The validator ran and rejected the document
    #[error("Validation failed. Please check the output above.")]
    Validation { exit_code: Option<i32> },

    /// An external program could not be started
    #[error("failed to run {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompileError {
    /// Create a generator failure, trimming trailing whitespace from the tool's message
    pub fn generator(tool: impl Into<String>, message: impl AsRef<str>) -> Self {
        Self::Generator {
            tool: tool.into(),
            message: message.as_ref().trim_end().to_string(),
        }
    }

    /// Short machine-readable outcome name for run reports
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Generator { .. } => "generator_failed",
            Self::Validation { .. } => "validation_failed",
            Self::Spawn { .. } | Self::Read { .. } | Self::Write { .. } => "error",
        }
    }
}
