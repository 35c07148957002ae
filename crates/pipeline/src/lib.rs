//! Motion-to-animation generation pipeline.
//!
//! Turns one motion description into an ordered sequence of frames by
//! calling a [`GenerativeBackend`](flipbook_gemini::GenerativeBackend)
//! once per frame, chaining each frame on the previous one, and exports
//! the result as an animated GIF.

pub mod error;
pub mod export;
pub mod frames;
pub mod orchestrator;
pub mod planner;
pub mod refiner;

pub use error::PipelineError;
pub use orchestrator::AnimationOrchestrator;
