//! Conversions between the canvas model and external payloads.
//!
//! - [`submission`]: the shape sent to the backend when workflows are submitted.
//! - [`resolved`]: the shape the backend returns for previously submitted
//!   workflows, and the [`IntoSubmission`] trait that normalizes such shapes.
//! - [`bundle`]: the bundle-editing round trip, where positions may be missing.
//!
//! Canvas ids and backend ids live in different namespaces, so every import
//! assigns fresh canvas ids and remaps edge endpoints.

pub mod bundle;
pub mod resolved;
pub mod submission;

pub use bundle::*;
pub use resolved::*;
pub use submission::*;

use crate::error::{GraphIntegrityError, SerializationError};
use crate::graph::NodeId;
use ahash::AHashMap;

/// Maps ids from an external payload onto freshly assigned canvas ids.
#[derive(Debug, Clone, Default)]
pub struct IdRemap {
    ids: AHashMap<String, NodeId>,
}

impl IdRemap {
    pub fn insert(&mut self, external: &str, canvas_id: NodeId) {
        self.ids.insert(external.to_string(), canvas_id);
    }

    pub fn get(&self, external: &str) -> Option<&NodeId> {
        self.ids.get(external)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Resolves one endpoint of `edge_id`.
    fn endpoint(&self, edge_id: &str, external: &str) -> Result<NodeId, SerializationError> {
        self.get(external)
            .cloned()
            .ok_or_else(|| {
                GraphIntegrityError::UnknownEndpoint {
                    edge_id: edge_id.to_string(),
                    node_id: external.to_string(),
                }
                .into()
            })
    }
}
