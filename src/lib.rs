//! # Benchflow - Workflow Graph Engine for Lab Service Canvases
//!
//! **Benchflow** is the engine behind a canvas on which users drag lab
//! services (PCR, digestion, gel runs, sequencing, ...) and connect them into
//! workflows. It owns the node/edge model of the canvas, the catalog rules
//! that decide which services may feed into which, and the decomposition of
//! an arbitrary canvas graph into the ordered, linear workflows that are
//! submitted, reviewed and billed.
//!
//! ## Core Workflow
//!
//! 1.  **Load the catalog**: Parse the catalog query into a [`catalog::Catalog`].
//! 2.  **Build the canvas**: Use a [`builder::GraphBuilder`] (or a
//!     [`session::CanvasSession`], which wraps one) to add services and bundles.
//!     Connections are checked against the catalog as they are drawn.
//! 3.  **Decompose**: [`decomposer::decompose`] splits the canvas into workflows.
//! 4.  **Check and submit**: [`readiness`] flags nodes with missing parameters;
//!     [`serializer`] turns the workflows into submission payloads.
//!
//! ## Quick Start
//!
//! ```rust
//! use benchflow::prelude::*;
//!
//! fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Catalog::from_json(r#"{
//!         "services": [
//!             { "id": "pcr", "name": "PCR", "allowedConnections": ["dpn1"] },
//!             { "id": "dpn1", "name": "DpnI Digest", "allowedConnections": ["run-gel"] },
//!             { "id": "run-gel", "name": "Run Gel" }
//!         ],
//!         "bundles": [
//!             { "id": "cloning", "name": "Cloning", "serviceIds": ["pcr", "dpn1", "run-gel"] }
//!         ]
//!     }"#)?;
//!
//!     let mut session = CanvasSession::new(catalog, EngineConfig::default());
//!     session.add_bundle("cloning")?;
//!
//!     let workflows = session.workflows();
//!     assert_eq!(workflows.len(), 1);
//!     println!("{}", WorkflowFormatter::format_workflows(&workflows));
//!
//!     let submissions = session.submissions("Cloning run");
//!     assert_eq!(submissions[0].nodes.len(), 3);
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod catalog;
pub mod config;
pub mod decomposer;
pub mod error;
pub mod graph;
pub mod prelude;
pub mod readiness;
pub mod report;
pub mod serializer;
pub mod session;
pub mod validator;

#[cfg(feature = "python-bindings")]
mod python;
