//! Text Generator Port
//!
//! Abstract interface for streaming text generation against a hosted
//! model provider (Gemini, OpenAI, Anthropic, ...).

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::entities::CompletionRequest;
use crate::domain::errors::DomainError;

/// Incremental text chunks in the order the provider produced them.
///
/// An `Err` item means the provider failed mid-stream; nothing follows it.
pub type TextStream = BoxStream<'static, Result<String, DomainError>>;

/// Streaming text generation interface
///
/// # Example
///
/// ```rust,ignore
/// use stencil::{CompletionRequest, TextGenerator, TextStream};
///
/// struct GeminiGenerator { /* ... */ }
///
/// #[async_trait]
/// impl TextGenerator for GeminiGenerator {
///     async fn stream_text(&self, request: &CompletionRequest)
///         -> Result<TextStream, DomainError> {
///         // Call streamGenerateContent
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Start a generation.
    ///
    /// Errors returned here happen before any chunk exists (rejected request,
    /// unreachable provider). Dropping the returned stream cancels the call.
    async fn stream_text(&self, request: &CompletionRequest) -> Result<TextStream, DomainError>;

    /// Get the provider name (e.g., "google")
    fn provider_name(&self) -> &str;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}
