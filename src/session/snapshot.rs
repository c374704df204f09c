use crate::error::SerializationError;
use crate::graph::{Canvas, CanvasData, Edge, Node};
use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs;

/// A named copy of a canvas' nodes and edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasSnapshot {
    pub name: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Canvas revision at the time of saving.
    #[serde(default)]
    pub saved_revision: u64,
}

impl CanvasSnapshot {
    pub fn capture(name: &str, canvas: &Canvas) -> Self {
        Self {
            name: name.to_string(),
            nodes: canvas.nodes().to_vec(),
            edges: canvas.edges().to_vec(),
            saved_revision: canvas.revision(),
        }
    }

    pub fn to_data(&self) -> CanvasData {
        CanvasData {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }
}

/// Manually saved canvases, keyed by a user-chosen name.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    snapshots: AHashMap<String, CanvasSnapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves `canvas` under `name`, replacing any previous snapshot.
    pub fn save(&mut self, name: &str, canvas: &Canvas) -> &CanvasSnapshot {
        let snapshot = CanvasSnapshot::capture(name, canvas);
        self.snapshots.insert(name.to_string(), snapshot);
        &self.snapshots[name]
    }

    pub fn get(&self, name: &str) -> Option<&CanvasSnapshot> {
        self.snapshots.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<CanvasSnapshot> {
        self.snapshots.remove(name)
    }

    /// Snapshot names in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        self.snapshots.keys().map(String::as_str).sorted().collect()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Writes every snapshot to `path` as a JSON array, sorted by name.
    pub fn to_file(&self, path: &str) -> Result<(), SerializationError> {
        let snapshots: Vec<&CanvasSnapshot> = self
            .snapshots
            .values()
            .sorted_by(|a, b| a.name.cmp(&b.name))
            .collect();
        let json = serde_json::to_string_pretty(&snapshots)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Loads a store previously written by [`SnapshotStore::to_file`].
    pub fn from_file(path: &str) -> Result<Self, SerializationError> {
        let content = fs::read_to_string(path)?;
        let snapshots: Vec<CanvasSnapshot> = serde_json::from_str(&content)?;
        Ok(Self {
            snapshots: snapshots
                .into_iter()
                .map(|s| (s.name.clone(), s))
                .collect(),
        })
    }
}
