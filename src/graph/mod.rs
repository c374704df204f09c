//! The node/edge model of a canvas.
//!
//! A [`Canvas`] is a plain value: it owns its nodes, edges and id generator and
//! is threaded explicitly through the builder, validator, decomposer and
//! serializer. Nothing in the engine holds on to a canvas between calls.

mod canvas;
mod ids;
mod node;

pub use canvas::{Canvas, CanvasData};
pub use ids::{IdGenerator, IdScheme};
pub use node::{Edge, FieldValue, Node, NodeId, ParameterValue, Position};
