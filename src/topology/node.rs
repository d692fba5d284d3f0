//! `NodeId`: a strong, zero-cost handle for mesh nodes
//!
//! Every node of a mesh is addressed by its position in the owning mesh's
//! node array. `NodeId` wraps that position in a transparent `u32` newtype
//! so node references cannot be confused with element indices or other
//! integers flowing through a revision pass.
//!
//! This module provides:
//! - A transparent `NodeId` newtype for zero-cost layout guarantees.
//! - The `Node` value: a 3D coordinate owned by a mesh.
//! - Implementations of common traits (`Debug`, `Display`, ordering,
//!   hashing) so `NodeId` can be used in maps, sets, and printed easily.

use std::fmt;

/// Index of a node within its owning mesh's node array.
///
/// # Memory layout
/// This type is `repr(transparent)`, meaning it has the same ABI and
/// alignment as its single `u32` field.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a new `NodeId` from a raw `u32` index.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        NodeId(raw)
    }

    /// Returns the inner `u32` value of this `NodeId`.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the id as a `usize`, suitable for indexing a node array.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Custom `Debug` implementation to display as `NodeId(raw_value)`.
impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeId").field(&self.get()).finish()
    }
}

/// Custom `Display` implementation to print only the raw index.
impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// A mesh node: a point in 3D space.
///
/// Nodes carry no identity of their own; their id is their position in the
/// owning mesh's node array. A revision pass never mutates source nodes —
/// survivors are copied verbatim into the output array and the rest are
/// dropped with their ids remapped.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Node {
    /// Cartesian coordinates `[x, y, z]`.
    pub coords: [f64; 3],
}

impl Node {
    /// Creates a node at the given coordinates.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Node { coords: [x, y, z] }
    }
}

impl From<[f64; 3]> for Node {
    #[inline]
    fn from(coords: [f64; 3]) -> Self {
        Node { coords }
    }
}
