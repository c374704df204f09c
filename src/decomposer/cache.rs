use super::{Workflow, decompose};
use crate::graph::{Canvas, Node, NodeId};
use ahash::AHashMap;
use uuid::Uuid;

/// Memoizes [`decompose`] per canvas revision.
///
/// Chains are stored as node ids so the cache does not borrow the canvas;
/// they are resolved back to nodes on every read.
#[derive(Debug, Clone, Default)]
pub struct DecompositionCache {
    key: Option<(Uuid, u64)>,
    chains: Vec<Vec<NodeId>>,
    recomputations: u64,
}

impl DecompositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The workflow chains of `canvas` as node ids, recomputed only when the
    /// canvas changed since the last call.
    pub fn chains(&mut self, canvas: &Canvas) -> &[Vec<NodeId>] {
        let key = (canvas.id(), canvas.revision());
        if self.key != Some(key) {
            self.chains = decompose(canvas.nodes(), canvas.edges())
                .into_iter()
                .map(|chain| chain.into_iter().map(|node| node.id.clone()).collect())
                .collect();
            self.key = Some(key);
            self.recomputations += 1;
        }
        &self.chains
    }

    /// The workflows of `canvas`, resolved to its nodes.
    pub fn workflows<'c>(&mut self, canvas: &'c Canvas) -> Vec<Workflow<'c>> {
        let by_id: AHashMap<&str, &'c Node> = canvas
            .nodes()
            .iter()
            .rev()
            .map(|node| (node.id.as_str(), node))
            .collect();
        self.chains(canvas)
            .iter()
            .map(|chain| {
                chain
                    .iter()
                    .filter_map(|id| by_id.get(id.as_str()).copied())
                    .collect()
            })
            .collect()
    }

    /// How many times the cache had to decompose.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub fn invalidate(&mut self) {
        self.key = None;
    }
}
