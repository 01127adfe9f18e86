//! Service Ports
//!
//! Abstract interfaces for external services.

mod text_generator;

pub use text_generator::*;
