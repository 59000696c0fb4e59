use std::path::Path;

use crate::error::{CompileError, CompileResult};

/// Read the raw recipe text once for the whole run
pub async fn read_recipe_text(path: &Path) -> CompileResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CompileError::Read {
            path: path.to_path_buf(),
            source,
        })
}
