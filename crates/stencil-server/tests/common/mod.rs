use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use futures::stream::{self, StreamExt};
use http_body_util::BodyExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use stencil::{CompletionRequest, DomainError, TextGenerator, TextStream};
use stencil_server::config::LandingPage;
use stencil_server::{build_router, AppState};

/// Sets the flag when the stream that owns it is dropped
struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Scripted generator that records every request it receives
#[derive(Default)]
pub struct FakeGenerator {
    chunks: Vec<Result<String, DomainError>>,
    reject: Option<DomainError>,
    never_ends: bool,
    calls: Mutex<Vec<CompletionRequest>>,
    dropped: Arc<AtomicBool>,
}

impl FakeGenerator {
    pub fn with_chunks(chunks: &[&str]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| Ok(c.to_string())).collect(),
            ..Default::default()
        }
    }

    pub fn failing_after(chunks: &[&str], error: DomainError) -> Self {
        let mut generator = Self::with_chunks(chunks);
        generator.chunks.push(Err(error));
        generator
    }

    pub fn rejecting(error: DomainError) -> Self {
        Self {
            reject: Some(error),
            ..Default::default()
        }
    }

    /// Yields `chunks`, then stays open forever
    pub fn hanging(chunks: &[&str]) -> Self {
        Self {
            never_ends: true,
            ..Self::with_chunks(chunks)
        }
    }

    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stream_dropped(&self) -> bool {
        self.dropped.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn stream_text(&self, request: &CompletionRequest) -> Result<TextStream, DomainError> {
        self.calls.lock().unwrap().push(request.clone());

        if let Some(error) = &self.reject {
            return Err(error.clone());
        }

        let guard = DropFlag(self.dropped.clone());
        let chunks = stream::iter(self.chunks.clone());
        let chunks = if self.never_ends {
            chunks.chain(stream::pending()).boxed()
        } else {
            chunks.boxed()
        };

        Ok(chunks
            .map(move |chunk| {
                let _held = &guard;
                chunk
            })
            .boxed())
    }

    fn provider_name(&self) -> &str {
        "fake"
    }

    fn model_id(&self) -> &str {
        "fake-model"
    }
}

pub const DEFAULT_SYSTEM: &str = "default system prompt";

pub fn state(generator: Arc<FakeGenerator>, landing: LandingPage) -> AppState {
    AppState::new(generator, DEFAULT_SYSTEM, landing)
}

pub async fn send(state: AppState, request: Request<Body>) -> Response<Body> {
    build_router(state).oneshot(request).await.unwrap()
}

pub fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}
