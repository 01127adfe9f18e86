//! Gemini text generator using `streamGenerateContent` with `alt=sse`.

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt::Display;

use stencil::{CompletionRequest, DomainError, TextGenerator, TextStream};

use super::sse::SseDecoder;

pub const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Streams completions from the Gemini API.
#[derive(Clone)]
pub struct GeminiGenerator {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiGenerator {
    /// Creates a new generator using the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Overrides the Gemini model name if needed.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the generator at another endpoint (proxies, local fakes).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:streamGenerateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn stream_text(&self, request: &CompletionRequest) -> Result<TextStream, DomainError> {
        let body = GenerateContentRequest {
            system_instruction: (!request.system.is_empty()).then(|| SystemInstruction {
                parts: vec![Part {
                    text: request.system.clone(),
                }],
            }),
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("alt", "sse")])
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                DomainError::ExternalService(format!("Request failed: {}", err.without_url()))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body));
        }

        // Transport errors render their URL; keep it out of client-facing messages
        let bytes = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(reqwest::Error::without_url));
        Ok(decode_stream(bytes))
    }

    fn provider_name(&self) -> &str {
        "google"
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// ============================================
// Request/Response Types
// ============================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct StreamResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

// ============================================
// Stream decoding
// ============================================

struct DecodeState<S> {
    bytes: S,
    decoder: SseDecoder,
    pending: VecDeque<Result<String, DomainError>>,
    finished: bool,
}

impl<S> DecodeState<S> {
    fn enqueue(&mut self, payloads: impl IntoIterator<Item = String>) {
        self.pending
            .extend(payloads.into_iter().filter_map(|p| parse_event(&p)));
    }
}

/// Turn an upstream SSE byte stream into text chunks.
///
/// The first error ends the stream.
pub(crate) fn decode_stream<S, B, E>(bytes: S) -> TextStream
where
    S: Stream<Item = Result<B, E>> + Send + Unpin + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let state = DecodeState {
        bytes,
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        finished: false,
    };

    futures::stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.pending.pop_front() {
                if item.is_err() {
                    state.finished = true;
                    state.pending.clear();
                }
                return Some((item, state));
            }
            if state.finished {
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(chunk)) => {
                    let payloads = state.decoder.push(chunk.as_ref());
                    state.enqueue(payloads);
                }
                Some(Err(err)) => {
                    state.finished = true;
                    return Some((
                        Err(DomainError::ExternalService(format!(
                            "Stream interrupted: {}",
                            err
                        ))),
                        state,
                    ));
                }
                None => {
                    state.finished = true;
                    let last = state.decoder.finish();
                    state.enqueue(last);
                }
            }
        }
    })
    .boxed()
}

/// Text carried by one upstream event, if any.
fn parse_event(payload: &str) -> Option<Result<String, DomainError>> {
    let payload = payload.trim();
    if payload.is_empty() || payload == "[DONE]" {
        return None;
    }

    let event: StreamResponse = match serde_json::from_str(payload) {
        Ok(event) => event,
        Err(err) => {
            tracing::warn!("Failed to parse Gemini event: {} - {}", err, payload);
            return None;
        }
    };

    if let Some(error) = event.error {
        return Some(Err(DomainError::ExternalService(error.message)));
    }

    let text: String = event
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(Ok(text))
    }
}

fn map_http_error(status: StatusCode, body: String) -> DomainError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return DomainError::RateLimited;
    }

    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or(body);

    DomainError::ExternalService(format!("Gemini API error ({}): {}", status.as_u16(), message))
}
