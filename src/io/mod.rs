pub mod command;
pub mod input;
pub mod output;

pub use command::*;
pub use input::*;
pub use output::*;
