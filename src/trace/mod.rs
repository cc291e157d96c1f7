pub mod formatter;
pub mod resolution;

pub use formatter::*;
pub use resolution::*;
