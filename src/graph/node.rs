use crate::catalog::{ParameterDefinition, ParameterKind, ServiceDefinition};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canvas-local node identifier. Never the id of the service a node wraps.
pub type NodeId = String;

/// On-canvas coordinates. Only the UI cares about these.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The current value of a single parameter on a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldValue {
    /// A plain, user-entered value. `Null` means unset.
    Input {
        #[serde(default)]
        value: Value,
    },
    /// A value normally taken from the upstream step's output.
    Result {
        #[serde(rename = "useUpstreamResult", default = "default_use_upstream")]
        use_upstream: bool,
        #[serde(
            rename = "overrideValue",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        override_value: Option<String>,
    },
}

fn default_use_upstream() -> bool {
    true
}

fn default_required() -> bool {
    true
}

impl FieldValue {
    /// Whether this value counts as filled in.
    ///
    /// Relying on an upstream result always counts; opting out of it requires
    /// a non-empty override.
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Input { value } => !is_empty_value(value),
            FieldValue::Result {
                use_upstream,
                override_value,
            } => *use_upstream || override_value.as_deref().is_some_and(|v| !v.is_empty()),
        }
    }
}

/// `null`, `""` and `[]` are empty. `0` and `false` are real values.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Binds a [`ParameterDefinition`] to its current value on one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterValue {
    #[serde(alias = "parameter_id")]
    pub parameter_id: String,
    pub name: String,
    /// Copied from the definition. Payloads that omit it are treated as
    /// required, matching [`ParameterDefinition::required`].
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(flatten)]
    pub value: FieldValue,
}

impl ParameterValue {
    /// An unset value for `definition`; result parameters default to using
    /// the upstream result.
    pub fn from_definition(definition: &ParameterDefinition) -> Self {
        let value = match definition.kind {
            ParameterKind::Input => FieldValue::Input { value: Value::Null },
            ParameterKind::Result => FieldValue::Result {
                use_upstream: true,
                override_value: None,
            },
        };
        Self {
            parameter_id: definition.id.clone(),
            name: definition.name.clone(),
            required: definition.required,
            value,
        }
    }

    pub fn is_result(&self) -> bool {
        matches!(self.value, FieldValue::Result { .. })
    }
}

/// One service instance placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    #[serde(alias = "service_id")]
    pub service_id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default, alias = "form_data")]
    pub form_data: Vec<ParameterValue>,
    #[serde(
        default,
        alias = "additional_instructions",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_instructions: Option<String>,
}

impl Node {
    /// Creates a node for `service` with one unset value per declared parameter.
    pub fn for_service(id: NodeId, service: &ServiceDefinition, position: Position) -> Self {
        Self {
            id,
            service_id: service.id.clone(),
            label: service.name.clone(),
            position,
            form_data: service
                .parameters
                .iter()
                .map(ParameterValue::from_definition)
                .collect(),
            additional_instructions: None,
        }
    }

    pub fn parameter(&self, parameter_id: &str) -> Option<&ParameterValue> {
        self.form_data
            .iter()
            .find(|p| p.parameter_id == parameter_id)
    }

    pub fn parameter_mut(&mut self, parameter_id: &str) -> Option<&mut ParameterValue> {
        self.form_data
            .iter_mut()
            .find(|p| p.parameter_id == parameter_id)
    }
}

/// A directed connection: the output of `source` feeds into `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    /// Set when the edge was created against the catalog's connection rules
    /// under the advisory policy.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub flagged: bool,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            flagged: false,
        }
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_and_false_count_as_filled() {
        assert!(FieldValue::Input { value: json!(0) }.is_filled());
        assert!(FieldValue::Input { value: json!(false) }.is_filled());
        assert!(!FieldValue::Input { value: json!("") }.is_filled());
        assert!(!FieldValue::Input { value: json!([]) }.is_filled());
    }

    #[test]
    fn result_value_deserializes_with_upstream_default() {
        let value: ParameterValue = serde_json::from_value(json!({
            "parameterId": "template",
            "name": "Template",
            "kind": "result"
        }))
        .unwrap();
        assert_eq!(
            value.value,
            FieldValue::Result {
                use_upstream: true,
                override_value: None
            }
        );
    }
}
