//! Element classification after node collapsing.

use crate::revision::collapse::NodeRemap;
use crate::topology::element::Element;

/// Counts the distinct canonical node ids among an element's corners.
///
/// A pairwise first-occurrence scan over the (at most eight) corners; exact
/// by construction. An element whose count equals its corner count survives
/// unchanged, a count between two and the corner count routes to the
/// reducer, and a count of one (or zero) means the element degenerated to a
/// point and must be dropped by the caller.
pub fn unique_node_count(element: &Element, remap: &NodeRemap) -> usize {
    let nodes = element.nodes();
    let mut unique = 0;
    for (i, &node) in nodes.iter().enumerate() {
        let canon = remap.canonical(node);
        if !nodes[..i].iter().any(|&prev| remap.canonical(prev) == canon) {
            unique += 1;
        }
    }
    unique
}
