//! Domain types and rules for motion-to-animation generation.
//!
//! Everything here is pure: data URLs, frame sequences, storyboard
//! validation, prompt composition, playback timing and progress
//! messages. Remote calls live in `flipbook-gemini`; orchestration lives
//! in `flipbook-pipeline`.

pub mod data_url;
pub mod error;
pub mod frame;
pub mod generation;
pub mod playback;
pub mod progress;
pub mod prompts;
pub mod storyboard;
