//! Request handlers for the flipbook API.
//!
//! Handlers validate input, delegate to `flipbook_pipeline`, and map
//! failures through [`AppError`](crate::error::AppError).

pub mod animations;
pub mod prompts;
