//! Landing Route - Developer convenience page

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use crate::config::LandingPage;
use crate::AppState;

/// Serve the local HTML page, or hand off to the platform's static hosting
pub async fn landing(State(state): State<AppState>) -> Response {
    match state.landing.as_ref() {
        LandingPage::Redirect(target) => {
            (StatusCode::FOUND, [(header::LOCATION, target.as_str())]).into_response()
        }
        LandingPage::LocalFile(path) => match tokio::fs::read_to_string(path).await {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                tracing::error!("Error reading HTML file {}: {}", path.display(), e);
                (StatusCode::NOT_FOUND, "HTML file not found").into_response()
            }
        },
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(landing))
}
