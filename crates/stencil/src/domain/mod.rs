//! Domain Layer
//!
//! Pure request handling logic with no HTTP or provider dependencies.

pub mod entities;
pub mod errors;
pub mod prompts;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use prompts::{default_system_prompt, user_instruction};
pub use value_objects::*;
