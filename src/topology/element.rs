//! Mesh elements: typed connectivity plus a material value.

use crate::mesh_error::MeshReviseError;
use crate::topology::cell_type::CellType;
use crate::topology::node::NodeId;
use smallvec::SmallVec;

/// Inline connectivity storage; 8 covers the largest supported cell (hex).
pub type Connectivity = SmallVec<[NodeId; 8]>;

/// A mesh element: a cell type, an ordered list of node ids, and a scalar
/// material/region value.
///
/// The node order encodes the topology-specific adjacency convention of the
/// cell type (see [`CellType`]); reduction logic depends on that convention
/// being preserved whenever connectivity is rewritten.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Element {
    cell_type: CellType,
    nodes: Connectivity,
    material: u32,
}

impl Element {
    /// Creates an element, validating the connectivity length against the
    /// cell type.
    pub fn new(
        cell_type: CellType,
        nodes: impl IntoIterator<Item = NodeId>,
        material: u32,
    ) -> Result<Self, MeshReviseError> {
        let nodes: Connectivity = nodes.into_iter().collect();
        if nodes.len() != cell_type.node_count() {
            return Err(MeshReviseError::CellArityMismatch {
                cell_type,
                expected: cell_type.node_count(),
                found: nodes.len(),
            });
        }
        Ok(Element {
            cell_type,
            nodes,
            material,
        })
    }

    /// Crate-internal constructor for connectivity already known to match
    /// `cell_type`. The public [`Element::new`] validates instead.
    pub(crate) fn from_parts(cell_type: CellType, nodes: Connectivity, material: u32) -> Element {
        debug_assert_eq!(nodes.len(), cell_type.node_count());
        Element {
            cell_type,
            nodes,
            material,
        }
    }

    /// The element's topology tag.
    #[inline]
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    /// The element's node ids, in corner-numbering order.
    #[inline]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of corner nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The scalar material/region value carried by this element.
    #[inline]
    pub fn material(&self) -> u32 {
        self.material
    }

    /// The topological dimension of the element.
    #[inline]
    pub fn dimension(&self) -> u8 {
        self.cell_type.dimension()
    }

    /// Returns a copy of this element with every node id rewritten through
    /// `map`. The cell type and material are unchanged.
    pub(crate) fn map_nodes(&self, mut map: impl FnMut(NodeId) -> NodeId) -> Element {
        Element {
            cell_type: self.cell_type,
            nodes: self.nodes.iter().copied().map(&mut map).collect(),
            material: self.material,
        }
    }
}
