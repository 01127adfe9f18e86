//! Stencil Domain Library
//!
//! Core domain types and interfaces for the Stencil HTML template generator.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): request validation and prompt construction
//!   - `entities/`: Generation and completion requests
//!   - `value_objects/`: The five template variables
//!   - `prompts`: Built-in system prompt and user instruction
//!   - `errors`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `services/`: Streaming text generation
//!
//! # Usage
//!
//! ```rust,ignore
//! use stencil::{GenerationRequest, TextGenerator};
//!
//! let request = GenerationRequest::from_json(&body)?;
//! let completion = request.into_completion(&default_system);
//! let chunks = generator.stream_text(&completion).await?;
//! ```

pub mod domain;
pub mod ports;

pub use domain::{
    default_system_prompt, user_instruction, CompletionRequest, DomainError, GenerationRequest,
    TemplateVariable,
};
pub use ports::{TextGenerator, TextStream};
