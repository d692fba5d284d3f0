//! Geometry utilities for mesh-revise.
//!
//! This module provides the distance/coplanarity predicates used by element
//! reduction and the uniform node grid backing proximity queries.

pub mod grid;
pub mod predicates;
