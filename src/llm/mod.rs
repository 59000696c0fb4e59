pub mod client;
pub mod generator;
pub mod opencode;
pub mod prompts;

pub use client::*;
pub use generator::*;
pub use opencode::*;
pub use prompts::*;
