pub mod action;
pub mod condition;
pub mod definition;

pub use action::*;
pub use condition::*;
pub use definition::*;
