//! Stencil API Routes
//!
//! - / - Landing page (local file or redirect)
//! - /api/generate - Streamed template generation
//! - /health - Liveness
//! - /swagger-ui - OpenAPI docs

pub mod generate;
pub mod health;
pub mod landing;
pub mod swagger;
