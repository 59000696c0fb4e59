use std::path::Path;

use tracing::info;

use crate::error::{CompileError, CompileResult};
use crate::io::{RunReport, read_recipe_text};
use crate::llm::Generator;
use crate::models::Stage;
use crate::stages::{ValidatorConfig, execute_stage, execute_validation};

/// Configuration for a full compile run
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub validator: ValidatorConfig,
}

/// Compile a raw recipe into Roux YAML at `output`.
///
/// Runs the four generation stages in order, then the validator. The first
/// failure ends the run; nothing is retried. `report` collects per-stage
/// records as the run progresses and is finished with the outcome either way.
pub async fn compile_recipe<G: Generator>(
    generator: &G,
    input: &Path,
    output: &Path,
    config: &PipelineConfig,
    report: &mut RunReport,
) -> CompileResult<()> {
    let result = run_stages(generator, input, output, config, report).await;

    report.finish(match &result {
        Ok(()) => "success",
        Err(e) => e.outcome(),
    });

    result
}

async fn run_stages<G: Generator>(
    generator: &G,
    input: &Path,
    output: &Path,
    config: &PipelineConfig,
    report: &mut RunReport,
) -> CompileResult<()> {
    info!("Loading recipe text from {:?}", input);
    let raw_text = read_recipe_text(input).await?;
    info!("Loaded {} bytes of recipe text", raw_text.len());

    for stage in Stage::ALL {
        let result = execute_stage(generator, stage, &raw_text, output).await?;
        report.record_stage(result.stage, result.bytes_written, result.duration_ms);
    }

    let validation = execute_validation(output, &config.validator).await?;
    report.record_validation(validation.passed, validation.exit_code);

    if !validation.passed {
        return Err(CompileError::Validation {
            exit_code: validation.exit_code,
        });
    }

    info!("Compiled {:?} to {:?}", input, output);
    Ok(())
}
