use crate::error::ConfigError;
use crate::graph::{IdScheme, Position};
use crate::validator::ConnectionPolicy;
use serde::{Deserialize, Serialize};
use std::fs;

/// The area random placements are drawn from, anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterArea {
    pub width: f64,
    pub height: f64,
}

impl Default for ScatterArea {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Tunables for the graph engine.
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```rust
/// use benchflow::config::EngineConfig;
/// use benchflow::validator::ConnectionPolicy;
///
/// let config = EngineConfig::from_json(r#"{ "connectionPolicy": "advisory" }"#).unwrap();
/// assert_eq!(config.connection_policy, ConnectionPolicy::Advisory);
/// assert_eq!(config.vertical_spacing, 150.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub id_scheme: IdScheme,
    pub connection_policy: ConnectionPolicy,
    /// Where the first node of a seeded chain is placed.
    pub chain_origin: Position,
    /// Vertical distance between consecutive nodes of a seeded chain.
    pub vertical_spacing: f64,
    pub scatter: ScatterArea,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            id_scheme: IdScheme::Uuid,
            connection_policy: ConnectionPolicy::Strict,
            chain_origin: Position::new(250.0, 50.0),
            vertical_spacing: 150.0,
            scatter: ScatterArea::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn with_id_scheme(mut self, scheme: IdScheme) -> Self {
        self.id_scheme = scheme;
        self
    }

    pub fn with_connection_policy(mut self, policy: ConnectionPolicy) -> Self {
        self.connection_policy = policy;
        self
    }

    pub fn with_chain_origin(mut self, origin: Position) -> Self {
        self.chain_origin = origin;
        self
    }

    pub fn with_vertical_spacing(mut self, spacing: f64) -> Self {
        self.vertical_spacing = spacing;
        self
    }

    pub fn with_scatter(mut self, width: f64, height: f64) -> Self {
        self.scatter = ScatterArea { width, height };
        self
    }
}
