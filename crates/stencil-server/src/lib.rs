//! Stencil API Server
//!
//! HTTP surface over the `stencil` domain crate: a single generation
//! endpoint that streams model output, plus a landing page, health check,
//! and OpenAPI docs.

use axum::http::{header, Method};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use stencil::TextGenerator;

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::{LandingPage, Settings};
use services::GeminiGenerator;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
    pub default_system: Arc<str>,
    pub landing: Arc<LandingPage>,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        default_system: impl Into<Arc<str>>,
        landing: LandingPage,
    ) -> Self {
        Self {
            generator,
            default_system: default_system.into(),
            landing: Arc::new(landing),
        }
    }

    /// Wire the Gemini generator and configured prompts
    pub fn from_settings(settings: &Settings) -> Self {
        let generator = GeminiGenerator::new(settings.api_key.clone()).with_model(&settings.model);
        Self::new(
            Arc::new(generator),
            settings.default_system_prompt(),
            settings.landing_page(),
        )
    }
}

/// Any origin may call the API from a browser
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", routes::swagger::ApiDoc::openapi()),
        )
        .merge(routes::health::router())
        .merge(routes::landing::router())
        .merge(routes::generate::router())
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
