//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::models::{GenerateRequest, HealthCheck};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::generate::generate,
        super::health::health_check,
    ),
    components(schemas(GenerateRequest, HealthCheck, ErrorBody)),
    tags(
        (name = "Generate", description = "HTML template generation"),
        (name = "Health", description = "Service status")
    ),
    info(
        title = "Stencil API",
        description = "Streams HTML templates generated from a text prompt"
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/generate"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
