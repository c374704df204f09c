//! Advisory checks for whether nodes have their parameters filled in.
//!
//! Nothing here blocks a mutation or a submission; callers decide what an
//! unfilled node means for them.

use crate::graph::{FieldValue, Node, NodeId, ParameterValue};
use ahash::AHashSet;

/// Returns `true` when every parameter of `node` holds a usable value.
///
/// A plain parameter needs a non-empty value unless it is optional. A result
/// parameter only counts as missing when it opts out of the upstream result
/// and has no override.
pub fn is_node_filled(node: &Node) -> bool {
    unfilled_parameters(node).is_empty()
}

/// The parameters of `node` that keep it from being filled.
pub fn unfilled_parameters(node: &Node) -> Vec<&ParameterValue> {
    node.form_data
        .iter()
        .filter(|param| match &param.value {
            FieldValue::Input { .. } => param.required && !param.value.is_filled(),
            FieldValue::Result { .. } => !param.value.is_filled(),
        })
        .collect()
}

/// Ids of every unfilled node, in the given order.
pub fn unfilled_nodes(nodes: &[Node]) -> Vec<&NodeId> {
    nodes
        .iter()
        .filter(|node| !is_node_filled(node))
        .map(|node| &node.id)
        .collect()
}

/// Readiness of one decomposed workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowReadiness {
    pub index: usize,
    pub unfilled: Vec<NodeId>,
}

impl WorkflowReadiness {
    pub fn is_ready(&self) -> bool {
        self.unfilled.is_empty()
    }
}

/// Readiness of every workflow a canvas decomposes into.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadinessReport {
    pub workflows: Vec<WorkflowReadiness>,
    /// Unfilled nodes that belong to no workflow (lost to a branch or merge).
    pub uncovered: Vec<NodeId>,
}

impl ReadinessReport {
    /// Readiness of `workflows` only.
    pub fn new(workflows: &[Vec<&Node>]) -> Self {
        let workflows = workflows
            .iter()
            .enumerate()
            .map(|(index, chain)| WorkflowReadiness {
                index,
                unfilled: chain
                    .iter()
                    .filter(|node| !is_node_filled(node))
                    .map(|node| node.id.clone())
                    .collect(),
            })
            .collect();
        Self {
            workflows,
            uncovered: Vec::new(),
        }
    }

    /// Readiness of `workflows`, plus every node of `nodes` that none of
    /// them contains.
    pub fn for_canvas(nodes: &[Node], workflows: &[Vec<&Node>]) -> Self {
        let covered: AHashSet<&str> = workflows
            .iter()
            .flatten()
            .map(|node| node.id.as_str())
            .collect();
        let mut report = Self::new(workflows);
        report.uncovered = nodes
            .iter()
            .filter(|node| !covered.contains(node.id.as_str()) && !is_node_filled(node))
            .map(|node| node.id.clone())
            .collect();
        report
    }

    pub fn is_ready(&self) -> bool {
        self.uncovered.is_empty() && self.workflows.iter().all(WorkflowReadiness::is_ready)
    }

    pub fn unfilled_count(&self) -> usize {
        self.uncovered.len() + self.workflows.iter().map(|w| w.unfilled.len()).sum::<usize>()
    }
}
