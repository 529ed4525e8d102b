//! Graphviz DOT rendering, delegated to petgraph's emitter.

use petgraph::dot::Dot;
use petgraph::graph::DiGraph;

use super::EdgeKind;

/// Render the family graph as Graphviz DOT text. Layout and drawing are the
/// renderer's concern; this only emits the structure with edge labels.
pub fn render_dot(graph: &DiGraph<String, EdgeKind>) -> String {
    format!("{}", Dot::new(graph))
}
