//! Per-topology element reduction rules.
//!
//! Given an element whose corners collapsed to fewer distinct nodes, deduce
//! the valid lower-complexity replacement — or two replacements where a
//! degeneration splits an element, or nothing where the surviving shape
//! falls below the caller's minimum output dimension.
//!
//! Connectivity emitted here always refers to the compacted node array
//! produced by the collapse step, and every replacement carries its parent's
//! material value.

use crate::geometry::predicates::coplanar;
use crate::revision::collapse::NodeRemap;
use crate::topology::cell_type::CellType;
use crate::topology::element::{Connectivity, Element};
use crate::topology::node::{Node, NodeId};
use itertools::Itertools;
use smallvec::{SmallVec, smallvec};

/// Replacement elements for one reduced input element.
///
/// `clean` is true for a single unambiguous replacement and false when the
/// input had to split in two; downstream neighbor-consistency passes use
/// the flag to detect split element boundaries.
#[derive(Clone, Debug)]
pub struct ReductionResult {
    pub elements: SmallVec<[Element; 2]>,
    pub clean: bool,
}

impl ReductionResult {
    fn single(element: Element) -> Self {
        ReductionResult {
            elements: smallvec![element],
            clean: true,
        }
    }

    fn split(first: Element, second: Element) -> Self {
        ReductionResult {
            elements: smallvec![first, second],
            clean: false,
        }
    }
}

/// Outcome of reducing one element.
#[derive(Clone, Debug)]
pub enum Reduction {
    /// The element reduced to one or two valid replacements.
    Reduced(ReductionResult),
    /// The surviving shape lies below the requested minimum dimension and
    /// the element is dropped.
    BelowMinimumDimension,
    /// No reduction rule is defined for this topology/unique-count
    /// combination.
    Unsupported,
}

/// Reduces `element`, whose corners collapsed to `unique` distinct nodes
/// under `remap`. Callers guarantee `1 < unique < element.node_count()`.
pub fn reduce(
    element: &Element,
    remap: &NodeRemap,
    new_nodes: &[Node],
    unique: usize,
    min_dimension: u8,
) -> Reduction {
    debug_assert!(unique > 1 && unique < element.node_count());
    match element.cell_type() {
        // a line with fewer than two distinct corners is point-degenerate
        // and never reaches the reducer
        CellType::Line => Reduction::Unsupported,
        CellType::Triangle => {
            if min_dimension == 1 {
                Reduction::Reduced(ReductionResult::single(line_from(element, remap)))
            } else {
                Reduction::BelowMinimumDimension
            }
        }
        CellType::Quadrilateral | CellType::Tetrahedron => {
            if unique == 3 && min_dimension < 3 {
                Reduction::Reduced(ReductionResult::single(tri_from(element, remap)))
            } else if unique == 2 && min_dimension == 1 {
                Reduction::Reduced(ReductionResult::single(line_from(element, remap)))
            } else {
                Reduction::BelowMinimumDimension
            }
        }
        CellType::Pyramid => reduce_pyramid(element, remap, unique, min_dimension),
        CellType::Prism => reduce_prism(element, remap, new_nodes, unique, min_dimension),
        CellType::Hexahedron => reduce_hex(element, remap, new_nodes, unique, min_dimension),
    }
}

/// Pyramid corners: base quad `0..4` in winding order, apex `4`.
fn reduce_pyramid(
    element: &Element,
    remap: &NodeRemap,
    unique: usize,
    min_dimension: u8,
) -> Reduction {
    match unique {
        4 => {
            let apex_collapsed = (0..4).any(|i| same_class(element, remap, i, 4));
            if apex_collapsed {
                // the apex fell into the base plane: the base quad is all
                // that is left
                if min_dimension < 3 {
                    let nodes: Connectivity =
                        (0..4).map(|i| surviving(element, remap, i)).collect();
                    Reduction::Reduced(ReductionResult::single(Element::from_parts(
                        CellType::Quadrilateral,
                        nodes,
                        element.material(),
                    )))
                } else {
                    Reduction::BelowMinimumDimension
                }
            } else {
                // a base edge collapsed: three distinct base corners plus
                // the apex form a tet
                let mut nodes = distinct_base(element, remap, 4);
                nodes.push(surviving(element, remap, 4));
                Reduction::Reduced(ReductionResult::single(Element::from_parts(
                    CellType::Tetrahedron,
                    nodes,
                    element.material(),
                )))
            }
        }
        3 if min_dimension < 3 => {
            Reduction::Reduced(ReductionResult::single(tri_from(element, remap)))
        }
        2 if min_dimension == 1 => {
            Reduction::Reduced(ReductionResult::single(line_from(element, remap)))
        }
        _ => Reduction::BelowMinimumDimension,
    }
}

/// Prism corners: bottom triangle `0..3`, top triangle `3..6`, vertical
/// edges `(i, i + 3)`.
fn reduce_prism(
    element: &Element,
    remap: &NodeRemap,
    new_nodes: &[Node],
    unique: usize,
    min_dimension: u8,
) -> Reduction {
    match unique {
        5 => {
            let Some((i, j)) = (0..6)
                .tuple_combinations()
                .find(|&(i, j)| same_class(element, remap, i, j))
            else {
                return Reduction::Unsupported;
            };
            if i % 3 == j % 3 {
                // vertical edge collapsed: the quad face opposite the edge
                // survives as a pyramid base, the collapsed edge is the apex
                let b1 = (i + 1) % 3;
                let b2 = (i + 2) % 3;
                let nodes: Connectivity = smallvec![
                    surviving(element, remap, b1),
                    surviving(element, remap, b2),
                    surviving(element, remap, b2 + 3),
                    surviving(element, remap, b1 + 3),
                    surviving(element, remap, i),
                ];
                Reduction::Reduced(ReductionResult::single(Element::from_parts(
                    CellType::Pyramid,
                    nodes,
                    element.material(),
                )))
            } else if i / 3 == j / 3 {
                // an edge of one triangular face collapsed: the solid splits
                // into two tets across the surviving quad faces
                let k = if i < 3 { 3 - i - j } else { 12 - i - j };
                let opp = |c: usize| if c < 3 { c + 3 } else { c - 3 };
                let tet1: Connectivity = smallvec![
                    surviving(element, remap, opp(i)),
                    surviving(element, remap, opp(j)),
                    surviving(element, remap, k),
                    surviving(element, remap, i),
                ];
                let tet2: Connectivity = smallvec![
                    surviving(element, remap, opp(i)),
                    surviving(element, remap, opp(j)),
                    surviving(element, remap, opp(k)),
                    surviving(element, remap, k),
                ];
                let material = element.material();
                Reduction::Reduced(ReductionResult::split(
                    Element::from_parts(CellType::Tetrahedron, tet1, material),
                    Element::from_parts(CellType::Tetrahedron, tet2, material),
                ))
            } else {
                // a quad-face diagonal collapsed; no rule covers it
                Reduction::Unsupported
            }
        }
        4 => four_node_reduction(element, remap, new_nodes, min_dimension),
        3 if min_dimension < 3 => {
            Reduction::Reduced(ReductionResult::single(tri_from(element, remap)))
        }
        2 if min_dimension == 1 => {
            Reduction::Reduced(ReductionResult::single(line_from(element, remap)))
        }
        _ => Reduction::BelowMinimumDimension,
    }
}

/// Hex corners: bottom quad `0..4`, top quad `4..8`, vertical edges
/// `(i, i + 4)`.
fn reduce_hex(
    element: &Element,
    remap: &NodeRemap,
    new_nodes: &[Node],
    unique: usize,
    min_dimension: u8,
) -> Reduction {
    match unique {
        // the prism/pyramid/tet decompositions for these counts remain an
        // unresolved rule set; surface them instead of guessing geometry
        7 | 6 | 5 => Reduction::Unsupported,
        4 => four_node_reduction(element, remap, new_nodes, min_dimension),
        3 if min_dimension < 3 => {
            Reduction::Reduced(ReductionResult::single(tri_from(element, remap)))
        }
        2 if min_dimension == 1 => {
            Reduction::Reduced(ReductionResult::single(line_from(element, remap)))
        }
        _ => Reduction::BelowMinimumDimension,
    }
}

/// Generic reduction of any element left with four distinct corners:
/// coplanar corners become a quad (unless volumes were requested),
/// non-coplanar corners become a tet.
fn four_node_reduction(
    element: &Element,
    remap: &NodeRemap,
    new_nodes: &[Node],
    min_dimension: u8,
) -> Reduction {
    let nodes = distinct_nodes(element, remap);
    debug_assert_eq!(nodes.len(), 4);
    let p = |i: usize| new_nodes[nodes[i].index()].coords;
    if coplanar(p(0), p(1), p(2), p(3)) {
        if min_dimension < 3 {
            Reduction::Reduced(ReductionResult::single(Element::from_parts(
                CellType::Quadrilateral,
                nodes,
                element.material(),
            )))
        } else {
            Reduction::BelowMinimumDimension
        }
    } else {
        Reduction::Reduced(ReductionResult::single(Element::from_parts(
            CellType::Tetrahedron,
            nodes,
            element.material(),
        )))
    }
}

/// Line over the first two distinct corners, in visiting order.
fn line_from(element: &Element, remap: &NodeRemap) -> Element {
    let nodes = distinct_nodes(element, remap);
    debug_assert!(nodes.len() >= 2);
    Element::from_parts(
        CellType::Line,
        nodes.into_iter().take(2).collect(),
        element.material(),
    )
}

/// Triangle over the first three distinct corners, in visiting order.
fn tri_from(element: &Element, remap: &NodeRemap) -> Element {
    let nodes = distinct_nodes(element, remap);
    debug_assert!(nodes.len() >= 3);
    Element::from_parts(
        CellType::Triangle,
        nodes.into_iter().take(3).collect(),
        element.material(),
    )
}

/// Surviving (compacted) id of corner `i`.
#[inline]
fn surviving(element: &Element, remap: &NodeRemap, i: usize) -> NodeId {
    remap.surviving(element.nodes()[i])
}

/// True if corners `i` and `j` collapsed into the same class.
#[inline]
fn same_class(element: &Element, remap: &NodeRemap, i: usize, j: usize) -> bool {
    remap.canonical(element.nodes()[i]) == remap.canonical(element.nodes()[j])
}

/// Distinct surviving corner ids in original visiting order.
fn distinct_nodes(element: &Element, remap: &NodeRemap) -> Connectivity {
    element
        .nodes()
        .iter()
        .map(|&n| remap.surviving(n))
        .unique()
        .collect()
}

/// Distinct surviving ids among the first `base_len` corners, in visiting
/// order.
fn distinct_base(element: &Element, remap: &NodeRemap, base_len: usize) -> Connectivity {
    element.nodes()[..base_len]
        .iter()
        .map(|&n| remap.surviving(n))
        .unique()
        .collect()
}
