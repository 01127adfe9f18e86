//! Stencil API Models
//!
//! - Generate: request body documented for `/api/generate`
//! - Health: service status

mod generate;
mod health;

pub use generate::*;
pub use health::*;
