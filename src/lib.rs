pub mod error;
pub mod io;
pub mod llm;
pub mod models;
pub mod stages;

pub use error::{CompileError, CompileResult};
pub use io::{ExternalCommand, RunReport, read_recipe_text, write_document};
pub use llm::{AnthropicClient, AnthropicConfig, Generator, OpencodeConfig, OpencodeGenerator};
pub use models::Stage;
pub use stages::{
    PipelineConfig, ValidatorConfig, compile_recipe, execute_stage, execute_validation,
};
