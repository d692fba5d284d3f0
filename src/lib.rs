//! # mesh-revise
//!
//! mesh-revise is a Rust library for tolerance-based mesh revision in
//! finite-element pre-processing pipelines: it merges near-coincident nodes
//! and re-derives valid lower-complexity elements for everything whose
//! corners collapsed, across the seven classic FE topologies (line,
//! triangle, quad, tet, pyramid, prism, hex).
//!
//! ## Features
//! - Uniform-grid proximity queries with a stable, reproducible scan order
//! - Greedy single-pass node collapsing with exact, documented tolerance
//!   semantics (squared distance against the raw tolerance)
//! - Per-topology degeneration rules, including element splits (prism with
//!   a collapsed triangle edge becomes two tets) and a generic four-node
//!   coplanarity reduction
//! - Structured per-element diagnostics aggregated in a pass report;
//!   element-local failures never abort a pass
//!
//! ## Determinism
//!
//! A revision pass is single-threaded and ordering-dependent by contract:
//! nodes are visited in ascending id order and grid buckets are scanned in
//! a fixed cell order, so identical input yields identical output across
//! runs.
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! mesh-revise = "0.1"
//! ```
//!
//! ```rust
//! use mesh_revise::prelude::*;
//!
//! let nodes = vec![
//!     Node::new(0.0, 0.0, 0.0),
//!     Node::new(1.0, 0.0, 0.0),
//!     Node::new(1.0, 1.0, 0.0),
//!     Node::new(1.0 + 1e-9, 1.0, 0.0), // duplicate within tolerance
//! ];
//! let quad = Element::new(
//!     CellType::Quadrilateral,
//!     [NodeId::new(0), NodeId::new(1), NodeId::new(2), NodeId::new(3)],
//!     1,
//! )?;
//! let mesh = Mesh::new("plate", nodes, vec![quad])?;
//!
//! let (simplified, report) = MeshRevision::new(&mesh).simplify("plate.rev", 1e-6, 2)?;
//! let simplified = simplified.expect("one triangle survives");
//! assert_eq!(simplified.node_count(), 3);
//! assert_eq!(simplified.elements()[0].cell_type(), CellType::Triangle);
//! assert_eq!(report.merged_nodes(), 1);
//! # Ok::<(), mesh_revise::mesh_error::MeshReviseError>(())
//! ```

pub mod geometry;
pub mod mesh;
pub mod mesh_error;
pub mod revision;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::mesh::Mesh;
    pub use crate::mesh_error::MeshReviseError;
    pub use crate::revision::collapse::NodeRemap;
    pub use crate::revision::reduce::{Reduction, ReductionResult};
    pub use crate::revision::{ElementIssue, IssueKind, MeshRevision, RevisionReport};
    pub use crate::topology::cell_type::CellType;
    pub use crate::topology::element::{Connectivity, Element};
    pub use crate::topology::node::{Node, NodeId};
}
