use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::CompileResult;
use crate::io::write_document;
use crate::llm::{Generator, build_stage_prompt};
use crate::models::Stage;

/// Result of one generation stage
#[derive(Debug, Clone)]
pub struct StageResult {
    pub stage: Stage,
    /// Size of the document the stage wrote
    pub bytes_written: usize,
    pub duration_ms: u64,
}

/// Execute one generation stage against the working document.
///
/// 1. Build the stage prompt around the raw recipe text
/// 2. Call the generator, handing it the working document unless this is the skeleton stage
/// 3. Overwrite the working document with whatever the generator produced
///
/// A generator failure returns before anything is written, so the document
/// keeps the previous stage's content.
pub async fn execute_stage<G: Generator>(
    generator: &G,
    stage: Stage,
    raw_text: &str,
    document: &Path,
) -> CompileResult<StageResult> {
    info!("{}...", stage);
    let started = Instant::now();

    let prompt = build_stage_prompt(stage, raw_text);
    let context = stage.uses_context().then_some(document);
    debug!(
        "Calling {} with {} byte prompt, context: {:?}",
        generator.name(),
        prompt.len(),
        context
    );

    let text = generator.generate(&prompt, context).await?;
    if text.trim().is_empty() {
        warn!("{} returned an empty document for stage {}", generator.name(), stage.number());
    }

    let bytes_written = write_document(document, &text).await?;
    let duration_ms = started.elapsed().as_millis() as u64;

    info!(
        "Stage {}: wrote {} bytes to {:?} in {}ms",
        stage.number(),
        bytes_written,
        document,
        duration_ms
    );

    Ok(StageResult {
        stage,
        bytes_written,
        duration_ms,
    })
}
