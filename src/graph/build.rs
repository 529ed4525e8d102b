//! Construction of the family graph from store contents.

use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use super::EdgeKind;
use crate::store::{FamilyTree, SiblingPair};

/// Build the directed family graph.
///
/// For every child with a non-empty father, adds edge father -> child labeled
/// `father`; symmetrically for mothers. Every sibling pair adds an edge
/// sibling1 -> sibling2 labeled `sibling` (the direction is an artifact of the
/// edge representation, not a parent/child claim). At most one edge exists per
/// ordered node pair: restating a relationship updates the existing edge
/// instead of adding a parallel one.
///
/// Pure function of its inputs; rebuilding is idempotent.
pub fn build_family_graph(
    tree: &FamilyTree,
    siblings: &[SiblingPair],
) -> DiGraph<String, EdgeKind> {
    let mut graph = DiGraph::new();
    let mut nodes: HashMap<String, NodeIndex> = HashMap::new();

    let mut node_for = |graph: &mut DiGraph<String, EdgeKind>, name: &str| -> NodeIndex {
        *nodes
            .entry(name.to_string())
            .or_insert_with(|| graph.add_node(name.to_string()))
    };

    for (child, parentage) in tree {
        if !parentage.father.is_empty() {
            let from = node_for(&mut graph, &parentage.father);
            let to = node_for(&mut graph, child);
            graph.update_edge(from, to, EdgeKind::Father);
        }
        if !parentage.mother.is_empty() {
            let from = node_for(&mut graph, &parentage.mother);
            let to = node_for(&mut graph, child);
            graph.update_edge(from, to, EdgeKind::Mother);
        }
    }

    for (sibling1, sibling2) in siblings {
        let from = node_for(&mut graph, sibling1);
        let to = node_for(&mut graph, sibling2);
        graph.update_edge(from, to, EdgeKind::Sibling);
    }

    graph
}
