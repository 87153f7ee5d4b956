pub mod client;
pub mod remote;
pub mod gemini;

pub use client::{GenerateOutcome, IdeaClient, IdeaError, TextModel};
