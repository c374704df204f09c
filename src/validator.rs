//! Connection rules between nodes.
//!
//! A connection `source -> target` is legal when the source node's service
//! lists the target node's service in its `allowedConnections`.

use crate::catalog::{Catalog, ServiceDefinition};
use crate::error::GraphError;
use crate::graph::{Edge, Node};
use serde::{Deserialize, Serialize};

/// What happens when a user draws an edge the catalog does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionPolicy {
    /// Create the edge anyway and flag it.
    Advisory,
    /// Refuse to create the edge.
    #[default]
    Strict,
}

impl ConnectionPolicy {
    pub fn is_strict(self) -> bool {
        self == ConnectionPolicy::Strict
    }
}

/// Returns `true` iff the connection is allowed by the catalog.
///
/// Fails closed: an unknown node or service yields `false`.
pub fn is_valid_connection(catalog: &Catalog, nodes: &[Node], source: &str, target: &str) -> bool {
    check_connection(catalog, nodes, source, target).is_ok()
}

/// Like [`is_valid_connection`], but names the reason a connection is refused.
pub fn check_connection(
    catalog: &Catalog,
    nodes: &[Node],
    source: &str,
    target: &str,
) -> Result<(), GraphError> {
    let unresolved = || GraphError::UnresolvedConnection {
        source_node: source.to_string(),
        target_node: target.to_string(),
    };

    let source_service = resolve_service(catalog, nodes, source).ok_or_else(unresolved)?;
    let target_service = resolve_service(catalog, nodes, target).ok_or_else(unresolved)?;

    if source_service.allows(&target_service.id) {
        Ok(())
    } else {
        Err(GraphError::IllegalConnection {
            source_service: source_service.id.clone(),
            target_service: target_service.id.clone(),
        })
    }
}

/// Every edge that the catalog would refuse, paired with the reason.
pub fn illegal_edges<'a>(
    catalog: &Catalog,
    nodes: &[Node],
    edges: &'a [Edge],
) -> Vec<(&'a Edge, GraphError)> {
    edges
        .iter()
        .filter_map(|edge| {
            check_connection(catalog, nodes, &edge.source, &edge.target)
                .err()
                .map(|err| (edge, err))
        })
        .collect()
}

fn resolve_service<'c>(
    catalog: &'c Catalog,
    nodes: &[Node],
    node_id: &str,
) -> Option<&'c ServiceDefinition> {
    let node = nodes.iter().find(|n| n.id == node_id)?;
    catalog.get(&node.service_id)
}
