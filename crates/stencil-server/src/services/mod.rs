pub mod gemini;
pub mod relay;
pub mod sse;

// Re-exports
pub use gemini::GeminiGenerator;
