//! Family graph module: derived directed graph over person names.
//!
//! The graph is rebuilt from the tree store (plus session sibling pairs) every
//! time a visualization is requested; it is never persisted or mutated
//! incrementally across turns.

mod build;
mod dot;

pub use build::build_family_graph;
pub use dot::render_dot;

use std::fmt;

/// Edge label in the family graph (parent -> child, or sibling -> sibling).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Father,
    Mother,
    Sibling,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EdgeKind::Father => "father",
            EdgeKind::Mother => "mother",
            EdgeKind::Sibling => "sibling",
        };
        f.write_str(label)
    }
}
