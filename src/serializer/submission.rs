use super::IdRemap;
use crate::decomposer::{Workflow, decompose};
use crate::error::{GraphError, SerializationError};
use crate::graph::{Canvas, CanvasData, Edge, IdScheme, Node, ParameterValue};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// A node as sent to the backend.
///
/// Only the fields the backend needs travel at the top level; the canvas
/// node itself rides along under `reactNode` so the UI can rebuild it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedNode {
    pub id: String,
    pub service_id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub form_data: Vec<ParameterValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub react_node: Option<Node>,
}

impl From<&Node> for SubmittedNode {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            service_id: node.service_id.clone(),
            label: node.label.clone(),
            form_data: node.form_data.clone(),
            additional_instructions: node.additional_instructions.clone(),
            react_node: Some(node.clone()),
        }
    }
}

/// An edge as sent to the backend, carrying the canvas edge under `reactEdge`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub react_edge: Option<Edge>,
}

impl From<&Edge> for SubmittedEdge {
    fn from(edge: &Edge) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source: edge.source.clone(),
            target: edge.target.clone(),
            react_edge: Some(edge.clone()),
        }
    }
}

/// A complete submitted graph: `{"nodes": [...], "edges": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionGraph {
    #[serde(default)]
    pub nodes: Vec<SubmittedNode>,
    #[serde(default)]
    pub edges: Vec<SubmittedEdge>,
}

/// The payload of the submission mutation for one workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSubmission {
    pub name: String,
    pub nodes: Vec<SubmittedNode>,
    pub edges: Vec<SubmittedEdge>,
}

impl WorkflowSubmission {
    fn from_workflow(name: String, workflow: &Workflow<'_>, edges: &[Edge]) -> Self {
        let submitted_edges = workflow
            .windows(2)
            .map(|pair| {
                let (from, to) = (&pair[0].id, &pair[1].id);
                edges
                    .iter()
                    .find(|e| &e.source == from && &e.target == to)
                    .map(SubmittedEdge::from)
                    .unwrap_or_else(|| SubmittedEdge {
                        id: Uuid::new_v4().to_string(),
                        source: from.clone(),
                        target: to.clone(),
                        react_edge: None,
                    })
            })
            .collect();

        Self {
            name,
            nodes: workflow.iter().map(|node| SubmittedNode::from(*node)).collect(),
            edges: submitted_edges,
        }
    }
}

/// Converts the whole graph to the submission shape.
///
/// Edges get fresh UUIDs; their endpoints keep the canvas node ids.
pub fn to_submission(nodes: &[Node], edges: &[Edge]) -> SubmissionGraph {
    SubmissionGraph {
        nodes: nodes.iter().map(SubmittedNode::from).collect(),
        edges: edges.iter().map(SubmittedEdge::from).collect(),
    }
}

/// Decomposes the graph and builds one submission per workflow.
///
/// A single workflow is submitted as `name`; several are numbered
/// `"{name} (1)"`, `"{name} (2)"`, ... in decomposition order.
pub fn workflow_submissions(nodes: &[Node], edges: &[Edge], name: &str) -> Vec<WorkflowSubmission> {
    let workflows = decompose(nodes, edges);
    let numbered = workflows.len() > 1;
    workflows
        .iter()
        .enumerate()
        .map(|(i, workflow)| {
            let name = if numbered {
                format!("{} ({})", name, i + 1)
            } else {
                name.to_string()
            };
            WorkflowSubmission::from_workflow(name, workflow, edges)
        })
        .collect()
}

/// Rebuilds a submitted graph into a new canvas.
pub fn from_submission(
    payload: &SubmissionGraph,
    scheme: IdScheme,
) -> Result<Canvas, SerializationError> {
    let mut canvas = Canvas::new(scheme);
    import_submission(&mut canvas, payload)?;
    Ok(canvas)
}

/// Adds a submitted graph to `canvas` under fresh ids and returns what was
/// added. Nothing is added when an edge references an unknown node.
pub fn import_submission(
    canvas: &mut Canvas,
    payload: &SubmissionGraph,
) -> Result<CanvasData, SerializationError> {
    let mut remap = IdRemap::default();
    let mut nodes = Vec::with_capacity(payload.nodes.len());
    for submitted in &payload.nodes {
        let id = next_unused(canvas, &nodes);
        remap.insert(&submitted.id, id.clone());
        nodes.push(Node {
            id,
            service_id: submitted.service_id.clone(),
            label: submitted.label.clone(),
            position: submitted
                .react_node
                .as_ref()
                .map(|n| n.position)
                .unwrap_or_default(),
            form_data: submitted.form_data.clone(),
            additional_instructions: submitted.additional_instructions.clone(),
        });
    }

    let mut endpoints = Vec::with_capacity(payload.edges.len());
    for submitted in &payload.edges {
        let source = remap.endpoint(&submitted.id, &submitted.source)?;
        let target = remap.endpoint(&submitted.id, &submitted.target)?;
        if source == target {
            return Err(GraphError::SelfLoop(source).into());
        }
        let flagged = submitted.react_edge.as_ref().is_some_and(|e| e.flagged);
        endpoints.push((source, target, flagged));
    }

    for node in &nodes {
        canvas.insert_node(node.clone())?;
    }
    let mut edges = Vec::with_capacity(endpoints.len());
    for (source, target, flagged) in endpoints {
        let mut edge = Edge::new(canvas.next_edge_id(), source, target);
        edge.flagged = flagged;
        canvas.insert_edge(edge.clone())?;
        edges.push(edge);
    }

    debug!(nodes = nodes.len(), edges = edges.len(), "submission imported");
    Ok(CanvasData { nodes, edges })
}

/// A fresh node id that collides neither with the canvas nor with nodes
/// still waiting to be inserted.
pub(super) fn next_unused(canvas: &mut Canvas, pending: &[Node]) -> String {
    loop {
        let id = canvas.next_node_id();
        if !pending.iter().any(|n| n.id == id) {
            return id;
        }
    }
}
