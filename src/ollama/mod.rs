//! Generation service client (Ollama-style streaming endpoint).
//!
//! Fully decoupled from the extractor and the tree store: a failure here
//! never blocks or corrupts family tree operations.

mod client;

pub use client::OllamaClient;
