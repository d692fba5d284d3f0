//! Owning mesh container: a node arena plus typed elements.

use crate::mesh_error::MeshReviseError;
use crate::topology::element::Element;
use crate::topology::node::{Node, NodeId};

/// A mesh owning its node and element arrays.
///
/// Elements reference nodes by index into this mesh's node array only;
/// cross-mesh references do not exist. A mesh produced by a revision pass
/// exclusively owns freshly allocated nodes and elements and never aliases
/// the source mesh's storage.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Mesh {
    name: String,
    nodes: Vec<Node>,
    elements: Vec<Element>,
}

impl Mesh {
    /// Builds a mesh, validating that every element references only nodes
    /// present in `nodes`.
    pub fn new(
        name: impl Into<String>,
        nodes: Vec<Node>,
        elements: Vec<Element>,
    ) -> Result<Self, MeshReviseError> {
        if nodes.len() > u32::MAX as usize {
            return Err(MeshReviseError::MeshTooLarge {
                node_count: nodes.len(),
                max: u32::MAX as usize,
            });
        }
        for (idx, element) in elements.iter().enumerate() {
            for &node in element.nodes() {
                if node.index() >= nodes.len() {
                    return Err(MeshReviseError::NodeIndexOutOfBounds {
                        element: idx,
                        node: node.get(),
                        node_count: nodes.len(),
                    });
                }
            }
        }
        Ok(Mesh {
            name: name.into(),
            nodes,
            elements,
        })
    }

    /// The mesh name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node array.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The element array.
    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of elements.
    #[inline]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// The node referenced by `id`.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}
