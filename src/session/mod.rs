//! The owner of one open canvas.
//!
//! A [`CanvasSession`] is the only place that holds mutable canvas state. It
//! wires the catalog and config into the engine's functions, keeps the
//! decomposition cache warm, and manages manually saved snapshots.

mod snapshot;

pub use snapshot::{CanvasSnapshot, SnapshotStore};

use crate::builder::{Anchor, GraphBuilder};
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::decomposer::{self, DecompositionCache, Workflow};
use crate::error::{GraphError, SessionError};
use crate::graph::{Canvas, CanvasData, NodeId, Position};
use crate::readiness::ReadinessReport;
use crate::serializer::{self, BundleGraph, IntoSubmission, WorkflowSubmission};
use crate::validator;
use rand::Rng;
use tracing::info;

pub struct CanvasSession {
    catalog: Catalog,
    config: EngineConfig,
    canvas: Canvas,
    cache: DecompositionCache,
    snapshots: SnapshotStore,
}

impl CanvasSession {
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        let canvas = Canvas::new(config.id_scheme);
        Self {
            catalog,
            config,
            canvas,
            cache: DecompositionCache::new(),
            snapshots: SnapshotStore::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Direct access for field edits, moves and removals.
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    /// Drops a service onto the canvas, connected to `anchor`.
    pub fn add_service(
        &mut self,
        anchor: &Anchor,
        service_id: &str,
        position: Position,
    ) -> Result<NodeId, SessionError> {
        let builder = GraphBuilder::new(&self.catalog, &self.config);
        Ok(builder.add_node_with_edge(&mut self.canvas, anchor, service_id, position)?)
    }

    /// Seeds a linear workflow from a catalog bundle.
    pub fn add_bundle(&mut self, bundle_id: &str) -> Result<Vec<NodeId>, SessionError> {
        let builder = GraphBuilder::new(&self.catalog, &self.config);
        Ok(builder.add_bundle(&mut self.canvas, bundle_id)?)
    }

    /// Draws an edge under the configured connection policy.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<String, SessionError> {
        Ok(self.canvas.connect(
            &self.catalog,
            source,
            target,
            self.config.connection_policy,
        )?)
    }

    pub fn is_valid_connection(&self, source: &str, target: &str) -> bool {
        validator::is_valid_connection(&self.catalog, self.canvas.nodes(), source, target)
    }

    /// The canvas' workflows, recomputed only after the canvas changed.
    pub fn workflows(&mut self) -> Vec<Workflow<'_>> {
        self.cache.workflows(&self.canvas)
    }

    /// The canvas' workflows, failing on dangling edges and cycles.
    pub fn workflows_strict(&self) -> Result<Vec<Workflow<'_>>, SessionError> {
        Ok(decomposer::decompose_strict(
            self.canvas.nodes(),
            self.canvas.edges(),
        )?)
    }

    /// Readiness of every workflow and of the nodes left out of them.
    pub fn readiness(&mut self) -> ReadinessReport {
        let workflows = self.cache.workflows(&self.canvas);
        ReadinessReport::for_canvas(self.canvas.nodes(), &workflows)
    }

    /// One submission payload per workflow.
    pub fn submissions(&self, name: &str) -> Vec<WorkflowSubmission> {
        serializer::workflow_submissions(self.canvas.nodes(), self.canvas.edges(), name)
    }

    /// Re-opens a previously submitted workflow on this canvas.
    pub fn reopen<P: IntoSubmission>(&mut self, payload: P) -> Result<CanvasData, SessionError> {
        let graph = payload.into_submission()?;
        Ok(serializer::import_submission(&mut self.canvas, &graph)?)
    }

    pub fn export_bundle_graph(&self) -> BundleGraph {
        serializer::to_bundle_graph(self.canvas.nodes(), self.canvas.edges())
    }

    pub fn import_bundle_graph<R: Rng + ?Sized>(
        &mut self,
        graph: &BundleGraph,
        rng: &mut R,
    ) -> Result<CanvasData, SessionError> {
        Ok(serializer::from_bundle_graph(
            graph,
            &self.catalog,
            &mut self.canvas,
            self.config.scatter,
            rng,
        )?)
    }

    pub fn save_snapshot(&mut self, name: &str) -> &CanvasSnapshot {
        info!(name, nodes = self.canvas.nodes().len(), "canvas saved");
        self.snapshots.save(name, &self.canvas)
    }

    /// Replaces the canvas with a saved snapshot.
    pub fn load_snapshot(&mut self, name: &str) -> Result<(), SessionError> {
        let snapshot = self
            .snapshots
            .get(name)
            .ok_or_else(|| SessionError::SnapshotNotFound(name.to_string()))?;
        self.canvas.replace(snapshot.to_data());
        info!(name, "canvas loaded");
        Ok(())
    }

    pub fn delete_snapshot(&mut self, name: &str) -> Result<CanvasSnapshot, SessionError> {
        self.snapshots
            .remove(name)
            .ok_or_else(|| SessionError::SnapshotNotFound(name.to_string()))
    }

    /// Swaps in a snapshot store loaded from disk.
    pub fn set_snapshots(&mut self, snapshots: SnapshotStore) {
        self.snapshots = snapshots;
    }

    /// Removes a node, e.g. when it is dragged off the canvas.
    pub fn remove_node(&mut self, node_id: &str) -> Result<(), GraphError> {
        self.canvas.remove_node(node_id).map(|_| ())
    }

    /// Discards every node and edge.
    pub fn discard(&mut self) {
        self.canvas.clear();
    }
}
