//! Cell type metadata for mesh elements.

/// The closed set of element topologies supported by a revision pass.
///
/// The connectivity of an element of each type follows the usual FE corner
/// numbering: quads list their corners in winding order, pyramids list the
/// base quad then the apex, prisms list the bottom triangle then the top,
/// and hexahedra list the bottom quad then the top.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CellType {
    /// 1D segment/edge.
    Line,
    /// 2D simplex (triangle).
    Triangle,
    /// 2D tensor-product cell (quad).
    Quadrilateral,
    /// 3D simplex (tet).
    Tetrahedron,
    /// 3D pyramid (quad base, apex last).
    Pyramid,
    /// 3D wedge/prism (two triangles, bottom then top).
    Prism,
    /// 3D tensor-product cell (hex, bottom quad then top quad).
    Hexahedron,
}

impl CellType {
    /// Returns the number of corner nodes of the cell.
    pub const fn node_count(self) -> usize {
        match self {
            CellType::Line => 2,
            CellType::Triangle => 3,
            CellType::Quadrilateral | CellType::Tetrahedron => 4,
            CellType::Pyramid => 5,
            CellType::Prism => 6,
            CellType::Hexahedron => 8,
        }
    }

    /// Returns the topological dimension of the cell.
    pub const fn dimension(self) -> u8 {
        match self {
            CellType::Line => 1,
            CellType::Triangle | CellType::Quadrilateral => 2,
            CellType::Tetrahedron | CellType::Pyramid | CellType::Prism | CellType::Hexahedron => 3,
        }
    }
}
