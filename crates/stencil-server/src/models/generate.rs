//! Generate models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /api/generate`.
///
/// The handler validates the raw JSON itself so that every malformed body
/// gets the same `Missing prompt` answer; this type documents the shape.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateRequest {
    /// What the template is for
    #[schema(example = "order confirmation email")]
    pub prompt: String,
    /// Replaces the default system prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}
