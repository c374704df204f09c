use crate::graph::Node;
use serde::{Deserialize, Serialize};

/// A predefined, ordered list of services that seeds a linear workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(alias = "service_ids", alias = "services")]
    pub service_ids: Vec<String>,
}

impl Bundle {
    /// Captures a decomposed workflow as a reusable bundle template.
    pub fn from_workflow(id: impl Into<String>, name: impl Into<String>, workflow: &[&Node]) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: None,
            service_ids: workflow.iter().map(|node| node.service_id.clone()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.service_ids.is_empty()
    }
}
