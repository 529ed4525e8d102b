pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod graph;
pub mod ollama;
pub mod store;
pub mod web;

pub use config::Config;
pub use error::{FamtreeError, Result};
pub use extract::{extract_relationships, Relationship};
pub use graph::{build_family_graph, render_dot, EdgeKind};
