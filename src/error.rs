use thiserror::Error;

/// Errors raised while reading or querying the service catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Failed to parse catalog JSON: {0}")]
    JsonParseError(String),

    #[error("Service '{0}' is not part of the catalog")]
    ServiceNotFound(String),

    #[error("Bundle '{0}' is not part of the catalog")]
    BundleNotFound(String),
}

/// Errors raised by mutations of the node/edge model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node '{0}' not found on the canvas")]
    NodeNotFound(String),

    #[error("Edge '{0}' not found on the canvas")]
    EdgeNotFound(String),

    #[error("A node with id '{0}' already exists on the canvas")]
    DuplicateNodeId(String),

    #[error("An edge with id '{0}' already exists on the canvas")]
    DuplicateEdgeId(String),

    #[error("Service '{source_service}' is not allowed to connect to service '{target_service}'")]
    IllegalConnection {
        source_service: String,
        target_service: String,
    },

    #[error("Connection '{source_node}' -> '{target_node}' could not be resolved against the catalog")]
    UnresolvedConnection {
        source_node: String,
        target_node: String,
    },

    #[error("Node '{node_id}' has no parameter '{parameter_id}'")]
    ParameterNotFound {
        node_id: String,
        parameter_id: String,
    },

    #[error("Node '{0}' cannot be connected to itself")]
    SelfLoop(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Structural corruption of a node/edge graph.
///
/// Unlike a [`GraphError`], these are never caused by a single user action;
/// they mean the graph itself is inconsistent (e.g. loaded from a stale payload).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphIntegrityError {
    #[error("Edge '{edge_id}' references node '{missing_node_id}', which is not on the canvas")]
    DanglingEdge {
        edge_id: String,
        missing_node_id: String,
    },

    #[error("Workflow walk revisited node '{node_id}'; the graph contains a cycle")]
    CycleDetected { node_id: String },

    #[error("Submitted edge '{edge_id}' references unknown node '{node_id}'")]
    UnknownEndpoint { edge_id: String, node_id: String },
}

/// Errors raised while converting to or from external payloads.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SerializationError {
    #[error("Failed to (de)serialize payload: {0}")]
    Json(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error(transparent)]
    Integrity(#[from] GraphIntegrityError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl From<serde_json::Error> for SerializationError {
    fn from(e: serde_json::Error) -> Self {
        SerializationError::Json(e.to_string())
    }
}

impl From<std::io::Error> for SerializationError {
    fn from(e: std::io::Error) -> Self {
        SerializationError::Io(e.to_string())
    }
}

/// Errors raised by a canvas session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("No snapshot named '{0}'")]
    SnapshotNotFound(String),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Serialization(#[from] SerializationError),

    #[error(transparent)]
    Integrity(#[from] GraphIntegrityError),
}

/// Errors raised while loading an `EngineConfig`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),
}
