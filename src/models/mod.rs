pub mod recipe;
pub mod stage;

pub use recipe::*;
pub use stage::*;
