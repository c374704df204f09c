//! Prelude module for convenient imports
//!
//! Re-exports the types and functions most callers need, so a single
//! `use benchflow::prelude::*;` is enough to build, decompose and submit a
//! canvas.

// Catalog and model
pub use crate::catalog::{Bundle, Catalog, ParameterDefinition, ServiceDefinition};
pub use crate::graph::{Canvas, CanvasData, Edge, FieldValue, Node, ParameterValue, Position};

// Engine
pub use crate::builder::{Anchor, GraphBuilder};
pub use crate::config::EngineConfig;
pub use crate::decomposer::{Workflow, decompose, decompose_strict};
pub use crate::readiness::{ReadinessReport, is_node_filled};
pub use crate::session::CanvasSession;
pub use crate::validator::{ConnectionPolicy, is_valid_connection};

// Payloads
pub use crate::serializer::{
    IntoSubmission, SubmissionGraph, WorkflowSubmission, from_submission, to_submission,
};

// Error types
pub use crate::error::{GraphError, GraphIntegrityError, SerializationError, SessionError};

// Formatting
pub use crate::report::WorkflowFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
