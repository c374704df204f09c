use super::ids::{IdGenerator, IdScheme};
use super::node::{Edge, FieldValue, Node, NodeId, Position};
use crate::catalog::Catalog;
use crate::error::GraphError;
use crate::validator::{self, ConnectionPolicy};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

/// The serializable contents of a canvas: `{"nodes": [...], "edges": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasData {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// The editable node/edge model of one canvas session.
///
/// Nodes and edges are kept in insertion order, which decomposition relies on.
/// Every mutation bumps [`Canvas::revision`].
///
/// A clone is a new canvas: it gets its own [`Canvas::id`], so caches keyed
/// on `(id, revision)` never confuse it with the original.
#[derive(Debug)]
pub struct Canvas {
    id: Uuid,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    ids: IdGenerator,
    revision: u64,
}

impl Clone for Canvas {
    fn clone(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            ids: self.ids.clone(),
            revision: self.revision,
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(IdScheme::default())
    }
}

impl Canvas {
    pub fn new(scheme: IdScheme) -> Self {
        Self {
            id: Uuid::new_v4(),
            nodes: Vec::new(),
            edges: Vec::new(),
            ids: IdGenerator::new(scheme),
            revision: 0,
        }
    }

    /// Wraps existing canvas contents without validating them.
    ///
    /// Loaded data may be stale; dangling edges are left for the decomposer
    /// to report.
    pub fn from_data(data: CanvasData, scheme: IdScheme) -> Self {
        let mut canvas = Self::new(scheme);
        canvas.nodes = data.nodes;
        canvas.edges = data.edges;
        canvas
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn edge(&self, edge_id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == edge_id)
    }

    pub fn contains_node(&self, node_id: &str) -> bool {
        self.node(node_id).is_some()
    }

    pub fn to_data(&self) -> CanvasData {
        CanvasData {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    /// A node id not currently used on this canvas.
    pub fn next_node_id(&mut self) -> NodeId {
        loop {
            let id = self.ids.next_id("node");
            if !self.contains_node(&id) {
                return id;
            }
        }
    }

    /// An edge id not currently used on this canvas.
    pub fn next_edge_id(&mut self) -> String {
        loop {
            let id = self.ids.next_id("edge");
            if self.edge(&id).is_none() {
                return id;
            }
        }
    }

    pub fn insert_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.contains_node(&node.id) {
            return Err(GraphError::DuplicateNodeId(node.id));
        }
        debug!(node_id = %node.id, service_id = %node.service_id, "node added");
        self.nodes.push(node);
        self.touch();
        Ok(())
    }

    /// Inserts an edge as-is. Both endpoints must already be on the canvas.
    ///
    /// This does not consult the catalog; use [`Canvas::connect`] for edges
    /// drawn by a user.
    pub fn insert_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        if self.edge(&edge.id).is_some() {
            return Err(GraphError::DuplicateEdgeId(edge.id));
        }
        if edge.source == edge.target {
            return Err(GraphError::SelfLoop(edge.source));
        }
        for endpoint in [&edge.source, &edge.target] {
            if !self.contains_node(endpoint) {
                return Err(GraphError::NodeNotFound(endpoint.clone()));
            }
        }
        debug!(edge_id = %edge.id, source = %edge.source, target = %edge.target, "edge added");
        self.edges.push(edge);
        self.touch();
        Ok(())
    }

    /// Draws an edge `source -> target`, checking it against the catalog.
    ///
    /// Under [`ConnectionPolicy::Strict`] an illegal connection is rejected.
    /// Under [`ConnectionPolicy::Advisory`] it is created with `flagged` set.
    /// Missing nodes are an error under either policy.
    pub fn connect(
        &mut self,
        catalog: &Catalog,
        source: &str,
        target: &str,
        policy: ConnectionPolicy,
    ) -> Result<String, GraphError> {
        for endpoint in [source, target] {
            if !self.contains_node(endpoint) {
                return Err(GraphError::NodeNotFound(endpoint.to_string()));
            }
        }

        let flagged = match validator::check_connection(catalog, &self.nodes, source, target) {
            Ok(()) => false,
            Err(err) if policy == ConnectionPolicy::Strict => return Err(err),
            Err(err) => {
                warn!(source, target, error = %err, "allowing illegal connection");
                true
            }
        };

        let mut edge = Edge::new(self.next_edge_id(), source, target);
        edge.flagged = flagged;
        let edge_id = edge.id.clone();
        self.insert_edge(edge)?;
        Ok(edge_id)
    }

    /// Removes a node together with every edge touching it.
    pub fn remove_node(&mut self, node_id: &str) -> Result<Node, GraphError> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        let node = self.nodes.remove(index);
        self.edges.retain(|e| !e.touches(node_id));
        debug!(node_id, "node removed");
        self.touch();
        Ok(node)
    }

    pub fn remove_edge(&mut self, edge_id: &str) -> Result<Edge, GraphError> {
        let index = self
            .edges
            .iter()
            .position(|e| e.id == edge_id)
            .ok_or_else(|| GraphError::EdgeNotFound(edge_id.to_string()))?;
        let edge = self.edges.remove(index);
        self.touch();
        Ok(edge)
    }

    /// Sets the value of a plain parameter, or the override of a result
    /// parameter (string values only; other JSON is stored as its text).
    pub fn set_field_value(
        &mut self,
        node_id: &str,
        parameter_id: &str,
        new_value: Value,
    ) -> Result<(), GraphError> {
        let field = self.field_mut(node_id, parameter_id)?;
        match field {
            FieldValue::Input { value } => *value = new_value,
            FieldValue::Result { override_value, .. } => {
                *override_value = match new_value {
                    Value::Null => None,
                    Value::String(s) => Some(s),
                    other => Some(other.to_string()),
                };
            }
        }
        self.touch();
        Ok(())
    }

    /// Sets both halves of a result parameter. Plain parameters are turned
    /// into result parameters.
    pub fn set_result_parameter(
        &mut self,
        node_id: &str,
        parameter_id: &str,
        use_upstream: bool,
        override_value: Option<String>,
    ) -> Result<(), GraphError> {
        let field = self.field_mut(node_id, parameter_id)?;
        *field = FieldValue::Result {
            use_upstream,
            override_value,
        };
        self.touch();
        Ok(())
    }

    pub fn set_additional_instructions(
        &mut self,
        node_id: &str,
        instructions: Option<String>,
    ) -> Result<(), GraphError> {
        self.node_mut(node_id)?.additional_instructions = instructions;
        self.touch();
        Ok(())
    }

    pub fn move_node(&mut self, node_id: &str, position: Position) -> Result<(), GraphError> {
        self.node_mut(node_id)?.position = position;
        self.touch();
        Ok(())
    }

    /// Replaces the whole contents, e.g. when a snapshot is loaded.
    pub fn replace(&mut self, data: CanvasData) {
        self.nodes = data.nodes;
        self.edges = data.edges;
        self.touch();
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.touch();
    }

    fn node_mut(&mut self, node_id: &str) -> Result<&mut Node, GraphError> {
        self.nodes
            .iter_mut()
            .find(|n| n.id == node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))
    }

    fn field_mut(
        &mut self,
        node_id: &str,
        parameter_id: &str,
    ) -> Result<&mut FieldValue, GraphError> {
        let node = self.node_mut(node_id)?;
        node.parameter_mut(parameter_id)
            .map(|p| &mut p.value)
            .ok_or_else(|| GraphError::ParameterNotFound {
                node_id: node_id.to_string(),
                parameter_id: parameter_id.to_string(),
            })
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
