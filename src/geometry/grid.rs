//! Uniform bucket grid over node coordinates.
//!
//! The grid partitions the bounding box of a node set into axis-aligned
//! cells sized for roughly [`NODES_PER_CELL`] nodes each and answers one
//! query: which node buckets belong to grid cells intersecting an
//! axis-aligned cube around a point. Buckets are returned in ascending
//! flat-cell order, so the scan order seen by callers is stable across runs
//! for identical input — node collapsing relies on that for reproducible
//! results.
//!
//! The query is a coarse pre-filter: a returned bucket may contain nodes
//! outside the cube. Callers apply their own exact predicate.

use crate::topology::node::{Node, NodeId};
use itertools::Itertools;

/// Construction hint: average number of nodes per grid cell.
const NODES_PER_CELL: f64 = 64.0;

/// A uniform spatial grid over a node array.
#[derive(Clone, Debug)]
pub struct NodeGrid {
    origin: [f64; 3],
    step: [f64; 3],
    dims: [usize; 3],
    buckets: Vec<Vec<NodeId>>,
}

impl NodeGrid {
    /// Builds a grid over `nodes`. An empty node set produces an empty
    /// grid whose queries yield nothing.
    pub fn build(nodes: &[Node]) -> Self {
        let Some(minmax) = bounding_box(nodes) else {
            return NodeGrid {
                origin: [0.0; 3],
                step: [1.0; 3],
                dims: [0; 3],
                buckets: Vec::new(),
            };
        };
        let (min, max) = minmax;
        let extent = [max[0] - min[0], max[1] - min[1], max[2] - min[2]];

        // axes with (relatively) negligible extent get a single cell, so a
        // sliver extent cannot blow up the cell count of the other axes
        let max_extent = extent.iter().fold(0.0f64, |acc, &e| acc.max(e));
        let spans = extent.map(|e| if e > max_extent * 1e-9 { e } else { 0.0 });

        let target_cells = (nodes.len() as f64 / NODES_PER_CELL).ceil().max(1.0);
        let edge = cell_edge_length(spans, target_cells);
        let axis_cap = target_cells as usize;
        let mut dims = [1usize; 3];
        let mut step = [1.0f64; 3];
        for axis in 0..3 {
            if spans[axis] > 0.0 {
                dims[axis] = ((spans[axis] / edge).ceil() as usize).clamp(1, axis_cap);
                step[axis] = extent[axis] / dims[axis] as f64;
            }
        }

        let mut buckets = vec![Vec::new(); dims[0] * dims[1] * dims[2]];
        let grid = NodeGrid {
            origin: min,
            step,
            dims,
            buckets: Vec::new(),
        };
        for (idx, node) in nodes.iter().enumerate() {
            let cell = grid.cell_of(node.coords);
            buckets[grid.flatten(cell)].push(NodeId::new(idx as u32));
        }
        NodeGrid { buckets, ..grid }
    }

    /// Yields the node buckets of all grid cells intersecting the cube of
    /// half-width `half_width` centered at `center`, in ascending flat-cell
    /// order. A cube entirely outside the grid yields nothing.
    pub fn cells_intersecting_cube(
        &self,
        center: [f64; 3],
        half_width: f64,
    ) -> impl Iterator<Item = &[NodeId]> {
        let range = |axis: usize| -> std::ops::RangeInclusive<usize> {
            if self.dims[axis] == 0 {
                return 1..=0; // empty
            }
            let lo = (center[axis] - half_width - self.origin[axis]) / self.step[axis];
            let hi = (center[axis] + half_width - self.origin[axis]) / self.step[axis];
            if hi < 0.0 || lo >= self.dims[axis] as f64 {
                return 1..=0;
            }
            let lo = (lo.floor().max(0.0)) as usize;
            let hi = (hi.floor() as usize).min(self.dims[axis] - 1);
            lo..=hi
        };
        let (xs, ys, zs) = (range(0), range(1), range(2));
        xs.cartesian_product(ys)
            .cartesian_product(zs)
            .map(move |((i, j), k)| self.buckets[self.flatten([i, j, k])].as_slice())
    }

    /// Grid cell containing `point`; coordinates on the upper boundary land
    /// in the last cell of each axis.
    fn cell_of(&self, point: [f64; 3]) -> [usize; 3] {
        let mut cell = [0usize; 3];
        for axis in 0..3 {
            let offset = (point[axis] - self.origin[axis]) / self.step[axis];
            cell[axis] = (offset.floor().max(0.0) as usize).min(self.dims[axis] - 1);
        }
        cell
    }

    #[inline]
    fn flatten(&self, cell: [usize; 3]) -> usize {
        (cell[0] * self.dims[1] + cell[1]) * self.dims[2] + cell[2]
    }
}

/// Cell edge length such that the box extents split into about
/// `target_cells` cells, counting only axes with positive extent.
fn cell_edge_length(extent: [f64; 3], target_cells: f64) -> f64 {
    let positive: Vec<f64> = extent.iter().copied().filter(|&e| e > 0.0).collect();
    if positive.is_empty() {
        return 1.0;
    }
    let measure: f64 = positive.iter().product();
    (measure / target_cells).powf(1.0 / positive.len() as f64)
}

fn bounding_box(nodes: &[Node]) -> Option<([f64; 3], [f64; 3])> {
    let mut iter = nodes.iter();
    let first = iter.next()?.coords;
    let (min, max) = iter.fold((first, first), |(mut min, mut max), node| {
        for axis in 0..3 {
            min[axis] = min[axis].min(node.coords[axis]);
            max[axis] = max[axis].max(node.coords[axis]);
        }
        (min, max)
    });
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloud(points: &[[f64; 3]]) -> Vec<Node> {
        points.iter().map(|&p| Node::from(p)).collect()
    }

    fn collect_ids<'a>(buckets: impl Iterator<Item = &'a [NodeId]>) -> Vec<u32> {
        buckets
            .flat_map(|b| b.iter().map(|n| n.get()))
            .collect::<Vec<_>>()
    }

    #[test]
    fn empty_grid_yields_nothing() {
        let grid = NodeGrid::build(&[]);
        assert_eq!(
            grid.cells_intersecting_cube([0.0; 3], 1.0).count(),
            0,
            "empty grid must produce no buckets"
        );
    }

    #[test]
    fn single_node_is_found() {
        let grid = NodeGrid::build(&cloud(&[[2.0, 3.0, 4.0]]));
        let ids = collect_ids(grid.cells_intersecting_cube([2.0, 3.0, 4.0], 0.1));
        assert_eq!(ids, vec![0]);
    }

    #[test]
    fn coincident_cloud_lands_in_one_cell() {
        let nodes = vec![Node::new(1.0, 1.0, 1.0); 10];
        let grid = NodeGrid::build(&nodes);
        let ids = collect_ids(grid.cells_intersecting_cube([1.0, 1.0, 1.0], 0.0));
        assert_eq!(ids, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn query_covers_all_nodes_with_large_cube() {
        let nodes: Vec<Node> = (0..100)
            .map(|i| Node::new(i as f64, (i % 7) as f64, (i % 3) as f64))
            .collect();
        let grid = NodeGrid::build(&nodes);
        let mut ids = collect_ids(grid.cells_intersecting_cube([50.0, 3.0, 1.0], 1000.0));
        ids.sort_unstable();
        assert_eq!(ids, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn cube_outside_bbox_yields_nothing() {
        let grid = NodeGrid::build(&cloud(&[[0.0; 3], [1.0, 1.0, 1.0]]));
        assert_eq!(
            grid.cells_intersecting_cube([50.0, 50.0, 50.0], 0.5).count(),
            0
        );
    }

    #[test]
    fn planar_cloud_builds_flat_grid() {
        // zero extent along z must not divide by zero or lose nodes
        let nodes: Vec<Node> = (0..200)
            .map(|i| Node::new((i % 20) as f64, (i / 20) as f64, 5.0))
            .collect();
        let grid = NodeGrid::build(&nodes);
        let mut ids = collect_ids(grid.cells_intersecting_cube([10.0, 5.0, 5.0], 100.0));
        ids.sort_unstable();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn scan_order_is_stable() {
        let nodes: Vec<Node> = (0..500)
            .map(|i| {
                let f = i as f64;
                Node::new(f.sin() * 10.0, f.cos() * 10.0, (f * 0.37).fract())
            })
            .collect();
        let grid = NodeGrid::build(&nodes);
        let first = collect_ids(grid.cells_intersecting_cube([0.0; 3], 5.0));
        let second = collect_ids(grid.cells_intersecting_cube([0.0; 3], 5.0));
        assert_eq!(first, second);
    }
}
