use super::submission::{SubmissionGraph, SubmittedEdge, SubmittedNode, WorkflowSubmission};
use crate::error::SerializationError;
use crate::graph::{Edge, Node, ParameterValue};
use serde::{Deserialize, Serialize};

/// A trait for payloads that can be turned into a [`SubmissionGraph`].
///
/// This is the extension point for re-opening workflows that come back from
/// the backend in a shape other than the one they were submitted in. Implement
/// it on your own structs and pass the result to
/// [`from_submission`](super::from_submission).
///
/// # Example
///
/// ```rust
/// use benchflow::error::SerializationError;
/// use benchflow::serializer::{IntoSubmission, SubmissionGraph, SubmittedNode};
///
/// struct LegacyRun {
///     steps: Vec<(String, String)>, // (run step id, service id)
/// }
///
/// impl IntoSubmission for LegacyRun {
///     fn into_submission(self) -> Result<SubmissionGraph, SerializationError> {
///         let nodes = self
///             .steps
///             .into_iter()
///             .map(|(id, service_id)| SubmittedNode {
///                 id,
///                 label: service_id.clone(),
///                 service_id,
///                 form_data: vec![],
///                 additional_instructions: None,
///                 react_node: None,
///             })
///             .collect();
///         Ok(SubmissionGraph { nodes, edges: vec![] })
///     }
/// }
///
/// let graph = LegacyRun { steps: vec![("1".into(), "pcr".into())] }
///     .into_submission()
///     .unwrap();
/// assert_eq!(graph.nodes[0].service_id, "pcr");
/// ```
pub trait IntoSubmission {
    /// Consumes the payload and converts it into the flat submission shape.
    fn into_submission(self) -> Result<SubmissionGraph, SerializationError>;
}

impl IntoSubmission for SubmissionGraph {
    fn into_submission(self) -> Result<SubmissionGraph, SerializationError> {
        Ok(self)
    }
}

impl IntoSubmission for WorkflowSubmission {
    fn into_submission(self) -> Result<SubmissionGraph, SerializationError> {
        Ok(SubmissionGraph {
            nodes: self.nodes,
            edges: self.edges,
        })
    }
}

/// A reference to a catalog service as the backend resolves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A reference to a stored node as the backend resolves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedNode {
    pub id: String,
    pub service: ServiceRef,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub form_data: Vec<ParameterValue>,
    #[serde(default)]
    pub additional_instructions: Option<String>,
    #[serde(default)]
    pub react_node: Option<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEdge {
    pub id: String,
    pub source: NodeRef,
    pub target: NodeRef,
    #[serde(default)]
    pub react_edge: Option<Edge>,
}

/// A previously submitted workflow, as returned by the backend: nodes carry
/// their resolved service and edges carry resolved node references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedWorkflow {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nodes: Vec<ResolvedNode>,
    #[serde(default)]
    pub edges: Vec<ResolvedEdge>,
}

impl ResolvedWorkflow {
    pub fn from_json(json: &str) -> Result<Self, SerializationError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl IntoSubmission for ResolvedWorkflow {
    fn into_submission(self) -> Result<SubmissionGraph, SerializationError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(|node| SubmittedNode {
                id: node.id,
                label: node
                    .label
                    .filter(|label| !label.is_empty())
                    .unwrap_or_else(|| node.service.name.clone()),
                service_id: node.service.id,
                form_data: node.form_data,
                additional_instructions: node.additional_instructions,
                react_node: node.react_node,
            })
            .collect();

        let edges = self
            .edges
            .into_iter()
            .map(|edge| SubmittedEdge {
                id: edge.id,
                source: edge.source.id,
                target: edge.target.id,
                react_edge: edge.react_edge,
            })
            .collect();

        Ok(SubmissionGraph { nodes, edges })
    }
}
