//! Generate Route - Stream an HTML template from the model provider

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use stencil::GenerationRequest;

use crate::error::ApiError;
use crate::services::relay::relay;
use crate::AppState;

/// Generate an HTML template
///
/// The response body is the model output relayed chunk by chunk, followed
/// by `\n\nFinished` once the model is done.
#[utoipa::path(
    post,
    path = "/api/generate",
    request_body = crate::models::GenerateRequest,
    responses(
        (status = 200, description = "Raw model output followed by \"\\n\\nFinished\"", content_type = "text/event-stream", body = String),
        (status = 400, description = "Missing prompt", body = crate::error::ErrorBody),
        (status = 502, description = "Model provider rejected the request", body = crate::error::ErrorBody)
    ),
    tag = "Generate"
)]
pub async fn generate(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    // Unparseable bodies carry no prompt either
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let request = GenerationRequest::from_json(&json)?;

    let span = tracing::info_span!(
        "generate",
        request_id = %Uuid::new_v4(),
        provider = state.generator.provider_name(),
        model = state.generator.model_id(),
        prompt_len = request.prompt.len(),
        custom_system = request.system.is_some()
    );

    let completion = request.into_completion(&state.default_system);
    let chunks = async {
        tracing::info!("Starting generation");
        state.generator.stream_text(&completion).await
    }
    .instrument(span.clone())
    .await?;

    let headers = [
        (header::CONTENT_TYPE, "text/event-stream"),
        (header::CACHE_CONTROL, "no-cache"),
    ];
    Ok((headers, Body::from_stream(relay(chunks, span))).into_response())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/generate", post(generate))
}
