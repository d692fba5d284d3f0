//! Tolerance-based node collapsing.
//!
//! Merges nodes whose coordinates lie within a tolerance into canonical
//! equivalence classes and compacts the survivors into a fresh node array.
//!
//! The union is a greedy single pass in ascending node-id order over
//! grid-local candidates, not a full transitive closure: a node that has
//! already been merged into a class is frozen as a merge *target*, though it
//! still acts as a merge *center* and propagates its class to later
//! candidates. The result therefore depends on the node ordering of the
//! input; that ordering dependence is part of the contract.
//!
//! Tolerance semantics: two nodes merge when the *squared* Euclidean
//! distance between them is below the raw (unsquared) tolerance, and the
//! candidate search cube also uses the raw tolerance as its half-width.
//! Both asymmetries are deliberate and preserved exactly.

use crate::geometry::grid::NodeGrid;
use crate::geometry::predicates::sqr_dist;
use crate::topology::node::{Node, NodeId};

/// Pass-scoped renaming from original node ids to canonical and compacted
/// ids.
///
/// `canonical` maps every original id to the terminal representative of its
/// equivalence class (idempotent: canonical ids map to themselves).
/// `surviving` maps every original id to the representative's index in the
/// compacted node array produced alongside this remap.
#[derive(Clone, Debug)]
pub struct NodeRemap {
    canonical: Vec<u32>,
    compact: Vec<u32>,
    survivor_count: usize,
}

impl NodeRemap {
    /// Number of original nodes covered by this remap.
    #[inline]
    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    /// True if the remap covers no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    /// Canonical (original-id) representative of `id`'s equivalence class.
    #[inline]
    pub fn canonical(&self, id: NodeId) -> NodeId {
        NodeId::new(self.canonical[id.index()])
    }

    /// Index of `id`'s representative in the compacted node array.
    #[inline]
    pub fn surviving(&self, id: NodeId) -> NodeId {
        NodeId::new(self.compact[id.index()])
    }

    /// Number of surviving equivalence classes.
    #[inline]
    pub fn survivor_count(&self) -> usize {
        self.survivor_count
    }

    /// Number of nodes merged away.
    #[inline]
    pub fn merged_count(&self) -> usize {
        self.len() - self.survivor_count
    }
}

/// Collapses `nodes` under tolerance `eps`.
///
/// Returns the remap and the compacted node array: one entry per surviving
/// class, holding the coordinates of the class representative, in ascending
/// original-id (encounter) order.
pub fn collapse(nodes: &[Node], eps: f64) -> (NodeRemap, Vec<Node>) {
    let mut canonical: Vec<u32> = (0..nodes.len() as u32).collect();

    let grid = NodeGrid::build(nodes);
    for (k, node) in nodes.iter().enumerate() {
        for bucket in grid.cells_intersecting_cube(node.coords, eps) {
            for &candidate in bucket {
                let t = candidate.index();
                // already in the same class (including t == k)
                if canonical[k] == canonical[t] {
                    continue;
                }
                // a node already collapsed onto another is frozen; had it
                // belonged with us, the merge happened when it was visited
                if canonical[t] != t as u32 {
                    continue;
                }
                if sqr_dist(node.coords, nodes[t].coords) < eps {
                    canonical[t] = canonical[k];
                }
            }
        }
    }

    // Late re-absorption of a class root can leave remap chains
    // (t -> x -> y). Resolve every id to its terminal root so the
    // published map is idempotent; merge decisions are unaffected.
    for i in 0..canonical.len() {
        let mut root = canonical[i];
        while canonical[root as usize] != root {
            root = canonical[root as usize];
        }
        canonical[i] = root;
    }

    let mut compact = vec![0u32; nodes.len()];
    let mut survivors = Vec::new();
    for (i, node) in nodes.iter().enumerate() {
        if canonical[i] == i as u32 {
            compact[i] = survivors.len() as u32;
            survivors.push(*node);
        }
    }
    for i in 0..compact.len() {
        compact[i] = compact[canonical[i] as usize];
    }

    let remap = NodeRemap {
        canonical,
        compact,
        survivor_count: survivors.len(),
    };
    log::debug!(
        "node collapse: {} nodes -> {} survivors ({} merged, eps {eps})",
        nodes.len(),
        remap.survivor_count(),
        remap.merged_count(),
    );
    (remap, survivors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloud(points: &[[f64; 3]]) -> Vec<Node> {
        points.iter().map(|&p| Node::from(p)).collect()
    }

    #[test]
    fn empty_input() {
        let (remap, survivors) = collapse(&[], 1.0);
        assert!(remap.is_empty());
        assert!(survivors.is_empty());
    }

    #[test]
    fn distinct_nodes_survive() {
        let nodes = cloud(&[[0.0; 3], [10.0, 0.0, 0.0], [0.0, 10.0, 0.0]]);
        let (remap, survivors) = collapse(&nodes, 0.5);
        assert_eq!(survivors.len(), 3);
        for i in 0..3 {
            let id = NodeId::new(i);
            assert_eq!(remap.canonical(id), id);
            assert_eq!(remap.surviving(id).get(), i);
        }
    }

    #[test]
    fn coincident_pair_collapses_to_lower_id() {
        let nodes = cloud(&[[5.0, 5.0, 5.0], [1.0, 1.0, 1.0], [1.0, 1.0, 1.0]]);
        let (remap, survivors) = collapse(&nodes, 1e-6);
        assert_eq!(survivors.len(), 2);
        // node 2 collapses onto node 1; survivors keep encounter order
        assert_eq!(remap.canonical(NodeId::new(2)), NodeId::new(1));
        assert_eq!(remap.surviving(NodeId::new(1)), remap.surviving(NodeId::new(2)));
        assert_eq!(survivors[0], nodes[0]);
        assert_eq!(survivors[1], nodes[1]);
    }

    #[test]
    fn squared_distance_compares_against_raw_tolerance() {
        // distance 0.4 -> squared 0.16, below eps 0.3: merges even though
        // the plain distance exceeds the tolerance
        let nodes = cloud(&[[0.0; 3], [0.4, 0.0, 0.0]]);
        let (remap, survivors) = collapse(&nodes, 0.3);
        assert_eq!(survivors.len(), 1);
        assert_eq!(remap.canonical(NodeId::new(1)), NodeId::new(0));
    }

    #[test]
    fn remap_is_idempotent() {
        // chain-inducing layout: 1 merges 3; 2 (already merged into 0)
        // re-absorbs root 1; resolution must map 3 straight to 0
        let nodes = cloud(&[
            [0.0, 0.0, 0.0],
            [1.5, 0.0, 0.0],
            [0.9, 0.0, 0.0],
            [1.6, 0.0, 0.0],
        ]);
        let (remap, _) = collapse(&nodes, 1.0);
        for i in 0..4 {
            let canon = remap.canonical(NodeId::new(i));
            assert_eq!(remap.canonical(canon), canon, "chain left for node {i}");
        }
    }

    #[test]
    fn frozen_nodes_still_propagate_their_class() {
        // a-b and b-c within tolerance, a-c not: the ascending pass merges
        // b onto a, then b (frozen as target, active as center) pulls c
        // into a's class as well
        let nodes = cloud(&[[0.0; 3], [0.9, 0.0, 0.0], [1.8, 0.0, 0.0]]);
        let (remap, survivors) = collapse(&nodes, 1.0);
        assert_eq!(survivors.len(), 1);
        assert_eq!(remap.canonical(NodeId::new(2)), NodeId::new(0));
    }

    #[test]
    fn merged_nodes_are_frozen_no_transitive_closure() {
        // class {0,2} forms first, then center 1 claims node 3. Node 3 is
        // within tolerance of node 2 as well, so a full union-find closure
        // would fuse everything into one class; the greedy pass leaves two
        // classes because 3 is already frozen when center 2 reaches it.
        let nodes = cloud(&[
            [0.0, 0.0, 0.0],
            [2.6, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [2.05, 0.0, 0.0],
        ]);
        let (remap, survivors) = collapse(&nodes, 1.21);
        assert_eq!(survivors.len(), 2);
        assert_eq!(remap.canonical(NodeId::new(2)), NodeId::new(0));
        assert_eq!(remap.canonical(NodeId::new(3)), NodeId::new(1));
    }

    #[test]
    fn survivors_get_fresh_sequential_ids() {
        let nodes = cloud(&[
            [0.0; 3],
            [0.0; 3],
            [5.0, 0.0, 0.0],
            [5.0, 0.0, 0.0],
            [9.0, 0.0, 0.0],
        ]);
        let (remap, survivors) = collapse(&nodes, 1e-3);
        assert_eq!(survivors.len(), 3);
        assert_eq!(remap.surviving(NodeId::new(0)).get(), 0);
        assert_eq!(remap.surviving(NodeId::new(1)).get(), 0);
        assert_eq!(remap.surviving(NodeId::new(3)).get(), 1);
        assert_eq!(remap.surviving(NodeId::new(4)).get(), 2);
        assert_eq!(remap.merged_count(), 2);
    }
}
