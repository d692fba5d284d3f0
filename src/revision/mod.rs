//! Mesh revision passes: node collapsing and element simplification.
//!
//! [`MeshRevision`] borrows a source mesh read-only and produces fresh
//! meshes; all bookkeeping (the node remap, per-element issues) is scoped to
//! the pass. Two operations are provided:
//!
//! - [`MeshRevision::collapse_nodes`] merges near-coincident nodes and
//!   rewrites element connectivity without touching topology, so degenerate
//!   (zero-volume) elements pass through.
//! - [`MeshRevision::simplify`] additionally re-derives a valid
//!   lower-complexity element for every element whose corners collapsed,
//!   dropping what falls below the requested minimum dimension.
//!
//! Element-local failures never abort a pass; they are aggregated as
//! [`ElementIssue`] records in the [`RevisionReport`].

pub mod classify;
pub mod collapse;
pub mod reduce;

use crate::mesh::Mesh;
use crate::mesh_error::MeshReviseError;
use crate::topology::cell_type::CellType;
use crate::topology::node::Node;
use collapse::NodeRemap;
use reduce::Reduction;

/// A revision pass over a borrowed source mesh.
#[derive(Clone, Copy, Debug)]
pub struct MeshRevision<'m> {
    mesh: &'m Mesh,
}

/// An element-local diagnostic recorded during a pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementIssue {
    /// Index of the offending element in the source mesh.
    pub element: usize,
    pub kind: IssueKind,
}

/// What went wrong with a single element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IssueKind {
    /// All corners collapsed into one node; nothing sensible remains.
    DegeneratedToPoint { unique: usize },
    /// No reduction rule is defined for this topology/unique-count
    /// combination.
    AmbiguousReduction { cell_type: CellType, unique: usize },
}

/// Statistics and diagnostics aggregated over one simplification pass.
#[derive(Clone, Debug, Default)]
pub struct RevisionReport {
    /// Node count of the source mesh.
    pub input_nodes: usize,
    /// Node count after collapsing.
    pub surviving_nodes: usize,
    /// Element count of the source mesh.
    pub input_elements: usize,
    /// Element count of the output mesh.
    pub output_elements: usize,
    /// Elements dropped because their surviving shape fell below the
    /// requested minimum dimension.
    pub dropped_below_dimension: usize,
    /// Source indices of elements whose reduction split them in two
    /// (reported "not clean" by the reducer).
    pub split_elements: Vec<usize>,
    /// Element-local failures; the pass continued past each of them.
    pub issues: Vec<ElementIssue>,
}

impl RevisionReport {
    /// Number of nodes merged away by collapsing.
    pub fn merged_nodes(&self) -> usize {
        self.input_nodes - self.surviving_nodes
    }
}

impl<'m> MeshRevision<'m> {
    /// Creates a revision pass over `mesh`.
    pub fn new(mesh: &'m Mesh) -> Self {
        MeshRevision { mesh }
    }

    /// Runs node collapsing only and returns the remap together with the
    /// compacted node array, for callers that need the renaming itself.
    pub fn collapse_node_map(
        &self,
        eps: f64,
    ) -> Result<(NodeRemap, Vec<Node>), MeshReviseError> {
        if !eps.is_finite() || eps < 0.0 {
            return Err(MeshReviseError::InvalidTolerance(eps));
        }
        Ok(collapse::collapse(self.mesh.nodes(), eps))
    }

    /// Merges nodes closer than `eps` and rewrites every element's
    /// connectivity onto the surviving nodes.
    ///
    /// Topology is left alone: elements whose corners became non-unique are
    /// copied as-is, so the output may contain degenerate (zero-volume)
    /// elements. Use [`MeshRevision::simplify`] to reduce them instead.
    pub fn collapse_nodes(
        &self,
        name: impl Into<String>,
        eps: f64,
    ) -> Result<Mesh, MeshReviseError> {
        let (remap, new_nodes) = self.collapse_node_map(eps)?;
        let elements = self
            .mesh
            .elements()
            .iter()
            .map(|e| e.map_nodes(|n| remap.surviving(n)))
            .collect();
        Mesh::new(name, new_nodes, elements)
    }

    /// Merges nodes closer than `eps`, then re-derives a valid element for
    /// every element whose corners collapsed, dropping elements below
    /// `min_dimension` (1 = lines, 2 = surfaces, 3 = volumes).
    ///
    /// Returns `None` for the mesh when no elements survive — a defined
    /// empty result, not an error. Per-element failures are collected in
    /// the report and never abort the pass.
    pub fn simplify(
        &self,
        name: impl Into<String>,
        eps: f64,
        min_dimension: u8,
    ) -> Result<(Option<Mesh>, RevisionReport), MeshReviseError> {
        if !(1..=3).contains(&min_dimension) {
            return Err(MeshReviseError::InvalidMinDimension(min_dimension));
        }
        let (remap, new_nodes) = self.collapse_node_map(eps)?;

        let mut report = RevisionReport {
            input_nodes: self.mesh.node_count(),
            surviving_nodes: remap.survivor_count(),
            input_elements: self.mesh.element_count(),
            ..RevisionReport::default()
        };

        let mut elements = Vec::with_capacity(self.mesh.element_count());
        for (idx, element) in self.mesh.elements().iter().enumerate() {
            let unique = classify::unique_node_count(element, &remap);
            if unique <= 1 {
                log::warn!(
                    "element {idx} ({:?}) degenerated to a point and was dropped",
                    element.cell_type(),
                );
                report.issues.push(ElementIssue {
                    element: idx,
                    kind: IssueKind::DegeneratedToPoint { unique },
                });
                continue;
            }
            if unique == element.node_count() {
                if element.dimension() >= min_dimension {
                    elements.push(element.map_nodes(|n| remap.surviving(n)));
                } else {
                    report.dropped_below_dimension += 1;
                }
                continue;
            }
            match reduce::reduce(element, &remap, &new_nodes, unique, min_dimension) {
                Reduction::Reduced(result) => {
                    if !result.clean {
                        report.split_elements.push(idx);
                    }
                    elements.extend(result.elements);
                }
                Reduction::BelowMinimumDimension => {
                    report.dropped_below_dimension += 1;
                }
                Reduction::Unsupported => {
                    log::warn!(
                        "element {idx}: no reduction rule for {:?} with {unique} unique nodes",
                        element.cell_type(),
                    );
                    report.issues.push(ElementIssue {
                        element: idx,
                        kind: IssueKind::AmbiguousReduction {
                            cell_type: element.cell_type(),
                            unique,
                        },
                    });
                }
            }
        }

        report.output_elements = elements.len();
        if elements.is_empty() {
            return Ok((None, report));
        }
        let mesh = Mesh::new(name, new_nodes, elements)?;
        Ok((Some(mesh), report))
    }
}
