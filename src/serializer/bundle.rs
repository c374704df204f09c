use super::IdRemap;
use super::submission::next_unused;
use crate::catalog::Catalog;
use crate::config::ScatterArea;
use crate::error::{GraphError, SerializationError};
use crate::graph::{Canvas, CanvasData, Edge, Node, ParameterValue, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A node in the bundle-editing payload. `position: null` asks for a random
/// on-canvas placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleNode {
    pub id: String,
    pub service_id: String,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub form_data: Vec<ParameterValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleGraph {
    #[serde(default)]
    pub nodes: Vec<BundleNode>,
    #[serde(default)]
    pub edges: Vec<BundleEdge>,
}

/// Exports a graph for bundle editing. Every position is kept.
pub fn to_bundle_graph(nodes: &[Node], edges: &[Edge]) -> BundleGraph {
    BundleGraph {
        nodes: nodes
            .iter()
            .map(|node| BundleNode {
                id: node.id.clone(),
                service_id: node.service_id.clone(),
                position: Some(node.position),
                form_data: node.form_data.clone(),
            })
            .collect(),
        edges: edges
            .iter()
            .map(|edge| BundleEdge {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
            })
            .collect(),
    }
}

/// Adds a bundle-editing payload to `canvas` under fresh ids.
///
/// Labels come from the catalog, and nodes stored without form data get the
/// defaults of their service. Missing positions are drawn uniformly from
/// `scatter`. Nothing is added when a service is unknown or an edge
/// references an unknown node.
pub fn from_bundle_graph<R: Rng + ?Sized>(
    graph: &BundleGraph,
    catalog: &Catalog,
    canvas: &mut Canvas,
    scatter: ScatterArea,
    rng: &mut R,
) -> Result<CanvasData, SerializationError> {
    let mut remap = IdRemap::default();
    let mut nodes = Vec::with_capacity(graph.nodes.len());
    for bundle_node in &graph.nodes {
        let service = catalog
            .service(&bundle_node.service_id)
            .map_err(GraphError::from)?;
        let position = bundle_node
            .position
            .unwrap_or_else(|| random_position(scatter, rng));

        let mut node = Node::for_service(next_unused(canvas, &nodes), service, position);
        if !bundle_node.form_data.is_empty() {
            node.form_data = bundle_node.form_data.clone();
        }
        remap.insert(&bundle_node.id, node.id.clone());
        nodes.push(node);
    }

    let mut endpoints = Vec::with_capacity(graph.edges.len());
    for bundle_edge in &graph.edges {
        let source = remap.endpoint(&bundle_edge.id, &bundle_edge.source)?;
        let target = remap.endpoint(&bundle_edge.id, &bundle_edge.target)?;
        if source == target {
            return Err(GraphError::SelfLoop(source).into());
        }
        endpoints.push((source, target));
    }

    for node in &nodes {
        canvas.insert_node(node.clone())?;
    }
    let mut edges = Vec::with_capacity(endpoints.len());
    for (source, target) in endpoints {
        let edge = Edge::new(canvas.next_edge_id(), source, target);
        canvas.insert_edge(edge.clone())?;
        edges.push(edge);
    }

    Ok(CanvasData { nodes, edges })
}

fn random_position<R: Rng + ?Sized>(scatter: ScatterArea, rng: &mut R) -> Position {
    let x = if scatter.width > 0.0 {
        rng.random_range(0.0..scatter.width)
    } else {
        0.0
    };
    let y = if scatter.height > 0.0 {
        rng.random_range(0.0..scatter.height)
    } else {
        0.0
    };
    Position::new(x, y)
}
