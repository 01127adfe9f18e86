//! Generation - One template generation exchange

use serde_json::Value;

use crate::domain::errors::DomainError;
use crate::domain::prompts::user_instruction;

/// A validated request to generate an HTML template.
///
/// Lives for the duration of a single HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system: Option<String>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, system: Option<String>) -> Result<Self, DomainError> {
        let prompt = prompt.into();
        if prompt.is_empty() {
            return Err(DomainError::MissingPrompt);
        }
        Ok(Self { prompt, system })
    }

    /// Validate an untyped JSON body.
    ///
    /// `prompt` must be a non-empty string. `system` is kept only when it is a
    /// string; any other value falls back to the default.
    pub fn from_json(body: &Value) -> Result<Self, DomainError> {
        let prompt = body
            .get("prompt")
            .and_then(Value::as_str)
            .ok_or(DomainError::MissingPrompt)?;

        let system = body
            .get("system")
            .and_then(Value::as_str)
            .map(str::to_string);

        Self::new(prompt, system)
    }

    /// Caller-supplied system instruction, or `default`
    pub fn effective_system<'a>(&'a self, default: &'a str) -> &'a str {
        self.system.as_deref().unwrap_or(default)
    }

    pub fn into_completion(self, default_system: &str) -> CompletionRequest {
        CompletionRequest {
            system: self.effective_system(default_system).to_string(),
            prompt: user_instruction(&self.prompt),
        }
    }
}

/// What a text generator receives: system instruction plus user instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
}
