pub mod pipeline;
pub mod stage_generate;
pub mod stage_validate;

pub use pipeline::*;
pub use stage_generate::*;
pub use stage_validate::*;
