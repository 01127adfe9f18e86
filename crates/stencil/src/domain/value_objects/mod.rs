//! Value Objects

mod template_variable;

pub use template_variable::*;
