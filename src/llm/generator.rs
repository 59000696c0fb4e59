use std::path::Path;

use crate::error::CompileResult;

/// An external text generator that turns a prompt into a new working document
#[allow(async_fn_in_trait)]
pub trait Generator {
    /// Tool name used in failure messages
    fn name(&self) -> &str;

    /// Generate the next document text.
    ///
    /// `context_file` is the current working document, when the stage has one.
    /// A failure of the underlying tool must come back as
    /// [`CompileError::Generator`](crate::CompileError::Generator).
    async fn generate(&self, prompt: &str, context_file: Option<&Path>) -> CompileResult<String>;
}
