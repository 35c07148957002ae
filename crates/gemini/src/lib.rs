//! Gemini REST client library.
//!
//! Wraps the `generateContent` endpoint for the three kinds of call the
//! animation pipeline makes: free text, structured JSON, and image
//! generation with an optional reference image. [`backend::GenerativeBackend`]
//! is the seam the pipeline depends on.

pub mod api;
pub mod backend;
pub mod config;
pub mod messages;

pub use api::{GeminiApi, GeminiApiError};
pub use backend::{GenerativeBackend, InlineImage};
pub use config::GeminiConfig;
