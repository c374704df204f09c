use crate::catalog::Catalog;
use crate::decomposer::Workflow;
use crate::graph::Node;
use crate::readiness::is_node_filled;
use itertools::Itertools;

/// Formats decomposed workflows into human-readable text.
pub struct WorkflowFormatter;

impl WorkflowFormatter {
    /// Renders one workflow as `pcr -> dpn1 -> run-gel`, marking unfilled
    /// nodes with `*`.
    pub fn format_workflow(workflow: &Workflow<'_>) -> String {
        workflow.iter().map(|node| Self::format_node(node)).join(" -> ")
    }

    /// Renders every workflow on its own numbered line.
    pub fn format_workflows(workflows: &[Workflow<'_>]) -> String {
        if workflows.is_empty() {
            return "(empty canvas)".to_string();
        }
        workflows
            .iter()
            .enumerate()
            .map(|(i, workflow)| format!("{}. {}", i + 1, Self::format_workflow(workflow)))
            .join("\n")
    }

    /// Like [`WorkflowFormatter::format_workflow`], but uses catalog service
    /// names where a node has no label of its own.
    pub fn format_with_catalog(workflow: &Workflow<'_>, catalog: &Catalog) -> String {
        workflow
            .iter()
            .map(|node| {
                let name = if node.label.is_empty() {
                    catalog
                        .get(&node.service_id)
                        .map(|s| s.name.as_str())
                        .unwrap_or(node.service_id.as_str())
                } else {
                    node.label.as_str()
                };
                Self::mark(name, node)
            })
            .join(" -> ")
    }

    fn format_node(node: &Node) -> String {
        Self::mark(&node.service_id, node)
    }

    fn mark(name: &str, node: &Node) -> String {
        if is_node_filled(node) {
            name.to_string()
        } else {
            format!("{}*", name)
        }
    }
}
