use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{CompileError, CompileResult};
use crate::models::Stage;

/// Overwrite the working document with `text`, returning the bytes written
pub async fn write_document(path: &Path, text: &str) -> CompileResult<usize> {
    tokio::fs::write(path, text)
        .await
        .map_err(|source| CompileError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(text.len())
}

/// Machine-readable summary of a single compile run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub input: PathBuf,
    pub output: PathBuf,
    /// Name of the generator backend
    pub generator: String,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    /// Completed stages, in order
    pub stages: Vec<StageRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRecord>,
    /// `success`, `generator_failed`, `validation_failed` or `error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageRecord {
    pub stage: Stage,
    pub number: u8,
    pub used_context: bool,
    pub bytes_written: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationRecord {
    pub passed: bool,
    pub exit_code: Option<i32>,
}

impl RunReport {
    pub fn new(input: &Path, output: &Path, generator: &str) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            generator: generator.to_string(),
            started_at: Utc::now(),
            finished_at: None,
            stages: Vec::new(),
            validation: None,
            outcome: None,
        }
    }

    pub fn record_stage(&mut self, stage: Stage, bytes_written: usize, duration_ms: u64) {
        self.stages.push(StageRecord {
            stage,
            number: stage.number(),
            used_context: stage.uses_context(),
            bytes_written,
            duration_ms,
        });
    }

    pub fn record_validation(&mut self, passed: bool, exit_code: Option<i32>) {
        self.validation = Some(ValidationRecord { passed, exit_code });
    }

    /// Stamp the finish time and final outcome
    pub fn finish(&mut self, outcome: &str) {
        self.finished_at = Some(Utc::now());
        self.outcome = Some(outcome.to_string());
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}
