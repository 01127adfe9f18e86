//! Domain Entities

mod generation;

pub use generation::*;
