//! `MeshReviseError`: unified error type for mesh-revise public APIs.
//!
//! This error type is used throughout the mesh-revise library to provide
//! robust, non-panicking error handling for all public APIs. Element-local
//! diagnostics produced *during* a revision pass are not errors; they are
//! collected as [`ElementIssue`](crate::revision::ElementIssue) records in
//! the pass report.

use crate::topology::cell_type::CellType;
use thiserror::Error;

/// Unified error type for mesh-revise operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshReviseError {
    /// An element was constructed with a connectivity length that does not
    /// match its cell type.
    #[error("cell type {cell_type:?} requires {expected} nodes, got {found}")]
    CellArityMismatch {
        cell_type: CellType,
        expected: usize,
        found: usize,
    },
    /// An element references a node index outside the owning mesh's node array.
    #[error("element {element} references node {node}, but the mesh has only {node_count} nodes")]
    NodeIndexOutOfBounds {
        element: usize,
        node: u32,
        node_count: usize,
    },
    /// The node array exceeds the `u32` index space of [`NodeId`](crate::topology::node::NodeId).
    #[error("mesh has {node_count} nodes, exceeding the supported maximum of {max}")]
    MeshTooLarge { node_count: usize, max: usize },
    /// The collapse tolerance is NaN, infinite, or negative.
    #[error("collapse tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),
    /// The minimum output dimension is outside `1..=3`.
    #[error("minimum output dimension must be 1, 2 or 3, got {0}")]
    InvalidMinDimension(u8),
}
