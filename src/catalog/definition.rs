use serde::{Deserialize, Serialize};

/// A service offered by the lab, as returned by the catalog query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
    /// Ids of the services this one may feed into.
    #[serde(default, alias = "allowed_connections")]
    pub allowed_connections: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ServiceDefinition {
    pub fn allows(&self, target_service_id: &str) -> bool {
        self.allowed_connections
            .iter()
            .any(|allowed| allowed == target_service_id)
    }
}

/// Whether a parameter is entered by hand or produced by an upstream step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    #[default]
    Input,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    String,
    Number,
    Boolean,
    Dropdown,
}

/// A parameter declared by a service definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: ParameterKind,
    #[serde(default, alias = "data_type")]
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}
