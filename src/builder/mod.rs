//! Creates nodes, and the edges that join them, when services or bundles are
//! dropped onto a canvas.

use crate::catalog::{Catalog, ServiceDefinition};
use crate::config::EngineConfig;
use crate::error::GraphError;
use crate::graph::{Canvas, Edge, Node, NodeId, ParameterValue, Position};
use tracing::{debug, warn};

/// The sentinel the canvas uses for "no upstream node".
pub const ROOT_MARKER: &str = "source";

/// Where a newly added node hangs off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// Start of a new chain; no edge is created.
    Root,
    /// Connect `node -> new node`.
    Node(NodeId),
}

impl Anchor {
    /// An empty id or the root marker means [`Anchor::Root`].
    pub fn parse(source: &str) -> Self {
        if source.is_empty() || source == ROOT_MARKER {
            Anchor::Root
        } else {
            Anchor::Node(source.to_string())
        }
    }
}

/// Adds nodes and edges to a canvas. Reads the catalog, never writes it.
pub struct GraphBuilder<'a> {
    catalog: &'a Catalog,
    config: &'a EngineConfig,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// Builds a node for `service` without placing it on the canvas.
    ///
    /// Values in `seed` whose parameter id and kind match a declared
    /// parameter are carried over; everything else starts unset.
    pub fn build_node(
        &self,
        canvas: &mut Canvas,
        service: &ServiceDefinition,
        seed: &[ParameterValue],
        position: Position,
    ) -> Node {
        let mut node = Node::for_service(canvas.next_node_id(), service, position);
        for field in &mut node.form_data {
            let seeded = seed.iter().find(|s| {
                s.parameter_id == field.parameter_id && s.is_result() == field.is_result()
            });
            if let Some(seeded) = seeded {
                field.value = seeded.value.clone();
            }
        }
        node
    }

    /// Adds a node for `service`, seeding its form data from `seed`.
    pub fn add_node(
        &self,
        canvas: &mut Canvas,
        service: &ServiceDefinition,
        seed: &[ParameterValue],
        position: Position,
    ) -> Result<Node, GraphError> {
        let node = self.build_node(canvas, service, seed, position);
        canvas.insert_node(node.clone())?;
        Ok(node)
    }

    /// Adds a node for the catalog service `service_id` and, unless `anchor`
    /// is the root, connects the anchor node to it.
    ///
    /// Nothing is left on the canvas when the connection is refused.
    pub fn add_node_with_edge(
        &self,
        canvas: &mut Canvas,
        anchor: &Anchor,
        service_id: &str,
        position: Position,
    ) -> Result<NodeId, GraphError> {
        let service = self.catalog.service(service_id)?;
        if let Anchor::Node(source) = anchor {
            if !canvas.contains_node(source) {
                return Err(GraphError::NodeNotFound(source.clone()));
            }
        }

        let node = self.add_node(canvas, service, &[], position)?;
        if let Anchor::Node(source) = anchor {
            let connected =
                canvas.connect(self.catalog, source, &node.id, self.config.connection_policy);
            if let Err(err) = connected {
                canvas.remove_node(&node.id)?;
                return Err(err);
            }
        }
        Ok(node.id)
    }

    /// Seeds a linear chain, one node per service id, each placed
    /// `vertical_spacing` below the previous one and connected to it.
    /// The chain starts at `chain_origin`, or below the lowest node when the
    /// canvas is not empty.
    ///
    /// All services (and, under the strict policy, all connections) are
    /// checked before the canvas is touched.
    pub fn add_chain_from_service_ids(
        &self,
        canvas: &mut Canvas,
        service_ids: &[String],
    ) -> Result<Vec<NodeId>, GraphError> {
        let services = service_ids
            .iter()
            .map(|id| self.catalog.service(id))
            .collect::<Result<Vec<_>, _>>()?;

        let mut flags = Vec::with_capacity(services.len().saturating_sub(1));
        for pair in services.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let legal = from.allows(&to.id);
            if !legal {
                if self.config.connection_policy.is_strict() {
                    return Err(GraphError::IllegalConnection {
                        source_service: from.id.clone(),
                        target_service: to.id.clone(),
                    });
                }
                warn!(source = %from.id, target = %to.id, "chaining illegal connection");
            }
            flags.push(!legal);
        }

        let mut node_ids = Vec::with_capacity(services.len());
        let mut position = self.next_chain_origin(canvas);
        for service in services {
            let node = self.add_node(canvas, service, &[], position)?;
            node_ids.push(node.id);
            position = position.offset(0.0, self.config.vertical_spacing);
        }

        for (pair, flagged) in node_ids.windows(2).zip(flags) {
            let mut edge = Edge::new(canvas.next_edge_id(), &pair[0], &pair[1]);
            edge.flagged = flagged;
            canvas.insert_edge(edge)?;
        }

        debug!(nodes = node_ids.len(), "chain seeded");
        Ok(node_ids)
    }

    fn next_chain_origin(&self, canvas: &Canvas) -> Position {
        let origin = self.config.chain_origin;
        canvas
            .nodes()
            .iter()
            .map(|node| node.position.y)
            .reduce(f64::max)
            .map_or(origin, |lowest| {
                let y = (lowest + self.config.vertical_spacing).max(origin.y);
                Position::new(origin.x, y)
            })
    }

    /// Seeds a chain from a catalog bundle.
    pub fn add_bundle(
        &self,
        canvas: &mut Canvas,
        bundle_id: &str,
    ) -> Result<Vec<NodeId>, GraphError> {
        let bundle = self.catalog.bundle(bundle_id)?;
        self.add_chain_from_service_ids(canvas, &bundle.service_ids)
    }
}
