//! Splits a canvas graph into ordered, linear workflows.
//!
//! Chains start at every edge source that is never an edge target, followed
//! by every node that touches no edge at all. From a start, the walk follows
//! the first outgoing edge (in edge insertion order) until a node has none.
//!
//! Branches are not split: a node with two outgoing edges continues down the
//! first one only. Nodes reachable solely through an ignored branch, or only
//! through a merge, end up in no chain; [`uncovered_nodes`] lists them.

mod cache;

pub use cache::DecompositionCache;

use crate::error::GraphIntegrityError;
use crate::graph::{Edge, Node};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use tracing::{debug, warn};

/// One linear chain of nodes, upstream first.
pub type Workflow<'a> = Vec<&'a Node>;

/// Decomposes `nodes`/`edges` into workflows. Never fails.
///
/// A walk that hits an edge to a missing node, or that would revisit a node
/// already in its chain, ends at the last valid node.
pub fn decompose<'a>(nodes: &'a [Node], edges: &'a [Edge]) -> Vec<Workflow<'a>> {
    let index = GraphIndex::new(nodes, edges);
    let workflows: Vec<Workflow<'a>> = index
        .start_candidates()
        .into_iter()
        .filter_map(|start| match index.walk(start) {
            Ok(chain) => Some(chain),
            Err(Truncated { chain, cause }) => {
                warn!(start, error = %cause, "workflow truncated");
                (!chain.is_empty()).then_some(chain)
            }
        })
        .collect();
    debug!(workflows = workflows.len(), "graph decomposed");
    workflows
}

/// Decomposes like [`decompose`], but reports dangling edges and cycles
/// instead of truncating.
pub fn decompose_strict<'a>(
    nodes: &'a [Node],
    edges: &'a [Edge],
) -> Result<Vec<Workflow<'a>>, GraphIntegrityError> {
    let index = GraphIndex::new(nodes, edges);
    index
        .start_candidates()
        .into_iter()
        .map(|start| index.walk(start).map_err(|t| t.cause))
        .collect()
}

/// Ids that start a workflow, in discovery order.
pub fn start_candidates<'a>(nodes: &'a [Node], edges: &'a [Edge]) -> Vec<&'a str> {
    GraphIndex::new(nodes, edges).start_candidates()
}

/// Nodes that [`decompose`] places in no workflow.
pub fn uncovered_nodes<'a>(nodes: &'a [Node], edges: &'a [Edge]) -> Vec<&'a Node> {
    let covered: AHashSet<&str> = decompose(nodes, edges)
        .iter()
        .flatten()
        .map(|node| node.id.as_str())
        .collect();
    nodes
        .iter()
        .filter(|node| !covered.contains(node.id.as_str()))
        .collect()
}

/// A walk that stopped early, with what it had collected so far.
struct Truncated<'a> {
    chain: Workflow<'a>,
    cause: GraphIntegrityError,
}

struct GraphIndex<'a> {
    nodes: &'a [Node],
    edges: &'a [Edge],
    by_id: AHashMap<&'a str, &'a Node>,
    first_outgoing: AHashMap<&'a str, &'a Edge>,
    sources: AHashSet<&'a str>,
    targets: AHashSet<&'a str>,
}

impl<'a> GraphIndex<'a> {
    fn new(nodes: &'a [Node], edges: &'a [Edge]) -> Self {
        let mut by_id = AHashMap::with_capacity(nodes.len());
        for node in nodes {
            by_id.entry(node.id.as_str()).or_insert(node);
        }

        let mut first_outgoing = AHashMap::with_capacity(edges.len());
        let mut sources = AHashSet::with_capacity(edges.len());
        let mut targets = AHashSet::with_capacity(edges.len());
        for edge in edges {
            first_outgoing.entry(edge.source.as_str()).or_insert(edge);
            sources.insert(edge.source.as_str());
            targets.insert(edge.target.as_str());
        }

        Self {
            nodes,
            edges,
            by_id,
            first_outgoing,
            sources,
            targets,
        }
    }

    fn start_candidates(&self) -> Vec<&'a str> {
        if self.nodes.is_empty() {
            return Vec::new();
        }

        let chain_heads = self
            .edges
            .iter()
            .map(|edge| edge.source.as_str())
            .filter(|source| !self.targets.contains(source))
            .unique();
        let isolated = self
            .nodes
            .iter()
            .map(|node| node.id.as_str())
            .filter(|id| !self.sources.contains(id) && !self.targets.contains(id));

        chain_heads.chain(isolated).collect()
    }

    fn walk(&self, start: &'a str) -> Result<Workflow<'a>, Truncated<'a>> {
        let mut chain = Vec::new();
        let Some(mut current) = self.by_id.get(start).copied() else {
            // Only chain heads can be missing; they always have an edge.
            let edge_id = self
                .first_outgoing
                .get(start)
                .map(|edge| edge.id.clone())
                .unwrap_or_default();
            return Err(Truncated {
                chain,
                cause: GraphIntegrityError::DanglingEdge {
                    edge_id,
                    missing_node_id: start.to_string(),
                },
            });
        };

        let mut visited = AHashSet::new();
        visited.insert(current.id.as_str());
        chain.push(current);

        while let Some(edge) = self.first_outgoing.get(current.id.as_str()) {
            let Some(next) = self.by_id.get(edge.target.as_str()).copied() else {
                return Err(Truncated {
                    chain,
                    cause: GraphIntegrityError::DanglingEdge {
                        edge_id: edge.id.clone(),
                        missing_node_id: edge.target.clone(),
                    },
                });
            };
            if !visited.insert(next.id.as_str()) {
                return Err(Truncated {
                    chain,
                    cause: GraphIntegrityError::CycleDetected {
                        node_id: next.id.clone(),
                    },
                });
            }
            chain.push(next);
            current = next;
        }

        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Position;

    fn node(id: &str) -> Node {
        Node {
            id: id.to_string(),
            service_id: format!("svc-{}", id),
            label: id.to_string(),
            position: Position::default(),
            form_data: Vec::new(),
            additional_instructions: None,
        }
    }

    fn ids(workflows: &[Workflow<'_>]) -> Vec<Vec<String>> {
        workflows
            .iter()
            .map(|chain| chain.iter().map(|n| n.id.clone()).collect())
            .collect()
    }

    #[test]
    fn branching_source_is_a_single_start() {
        let nodes = vec![node("a"), node("b"), node("c")];
        let edges = vec![Edge::new("e1", "a", "b"), Edge::new("e2", "a", "c")];
        assert_eq!(start_candidates(&nodes, &edges), vec!["a"]);
        assert_eq!(ids(&decompose(&nodes, &edges)), vec![vec!["a", "b"]]);
    }

    #[test]
    fn cycle_below_a_start_terminates() {
        let nodes = vec![node("a"), node("b"), node("c")];
        let edges = vec![
            Edge::new("e1", "a", "b"),
            Edge::new("e2", "b", "c"),
            Edge::new("e3", "c", "b"),
        ];
        assert_eq!(ids(&decompose(&nodes, &edges)), vec![vec!["a", "b", "c"]]);
        assert_eq!(
            decompose_strict(&nodes, &edges).unwrap_err(),
            GraphIntegrityError::CycleDetected {
                node_id: "b".to_string()
            }
        );
    }

    #[test]
    fn missing_chain_head_yields_no_chain() {
        let nodes = vec![node("b")];
        let edges = vec![Edge::new("e1", "ghost", "b")];
        assert!(decompose(&nodes, &edges).is_empty());
        assert!(matches!(
            decompose_strict(&nodes, &edges),
            Err(GraphIntegrityError::DanglingEdge { .. })
        ));
    }
}
