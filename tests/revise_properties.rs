//! Property-based tests for revision passes.
//!
//! Random node clouds are drawn from a coarse lattice so coincident and
//! near-coincident coordinates actually occur.

use mesh_revise::prelude::*;
use mesh_revise::revision::collapse::collapse;
use proptest::prelude::*;

/// Lattice positions produce plenty of exact duplicates.
fn arb_lattice_node() -> impl Strategy<Value = Node> {
    prop::array::uniform3(0..4u8).prop_map(|[x, y, z]| {
        Node::new(f64::from(x) * 0.25, f64::from(y) * 0.25, f64::from(z) * 0.25)
    })
}

fn arb_cloud(max: usize) -> impl Strategy<Value = Vec<Node>> {
    prop::collection::vec(arb_lattice_node(), 0..max)
}

/// Tets over arbitrary (possibly repeated) corner indices, as a sloppy
/// importer might produce them.
fn arb_tet_mesh() -> impl Strategy<Value = Mesh> {
    arb_cloud(48).prop_flat_map(|nodes| {
        let n = nodes.len() as u32;
        if n == 0 {
            return Just(Mesh::new("prop", nodes, Vec::new()).unwrap()).boxed();
        }
        let corner = 0..n;
        let tet = (prop::array::uniform4(corner), 0..8u32).prop_map(|(ids, material)| {
            Element::new(
                CellType::Tetrahedron,
                ids.into_iter().map(NodeId::new),
                material,
            )
            .unwrap()
        });
        prop::collection::vec(tet, 0..24)
            .prop_map(move |elements| Mesh::new("prop", nodes.clone(), elements).unwrap())
            .boxed()
    })
}

proptest! {
    #[test]
    fn remap_is_idempotent_and_compact(nodes in arb_cloud(64), eps in 0.0..0.5f64) {
        let (remap, survivors) = collapse(&nodes, eps);
        prop_assert_eq!(remap.len(), nodes.len());
        prop_assert_eq!(remap.survivor_count(), survivors.len());
        prop_assert!(survivors.len() <= nodes.len());
        for i in 0..nodes.len() as u32 {
            let id = NodeId::new(i);
            let canon = remap.canonical(id);
            // canonical ids map to themselves
            prop_assert_eq!(remap.canonical(canon), canon);
            // compacted ids index the survivor array
            prop_assert!(remap.surviving(id).index() < survivors.len());
            // a class representative keeps its own coordinates
            prop_assert_eq!(
                survivors[remap.surviving(id).index()],
                nodes[canon.index()]
            );
        }
    }

    #[test]
    fn exact_duplicates_always_merge(nodes in arb_cloud(64)) {
        let (remap, _) = collapse(&nodes, 1e-6);
        for i in 0..nodes.len() {
            for j in 0..nodes.len() {
                if nodes[i] == nodes[j] {
                    prop_assert_eq!(
                        remap.canonical(NodeId::new(i as u32)),
                        remap.canonical(NodeId::new(j as u32)),
                        "coincident nodes {} and {} did not merge", i, j
                    );
                }
            }
        }
    }

    #[test]
    fn simplify_output_is_structurally_sound(
        mesh in arb_tet_mesh(),
        eps in 0.0..0.3f64,
        min_dimension in 1..=3u8,
    ) {
        let (result, report) = MeshRevision::new(&mesh)
            .simplify("prop.rev", eps, min_dimension)
            .unwrap();
        prop_assert_eq!(report.input_elements, mesh.element_count());
        let materials: Vec<u32> = mesh.elements().iter().map(|e| e.material()).collect();
        if let Some(out) = result {
            prop_assert_eq!(report.output_elements, out.element_count());
            prop_assert!(out.node_count() <= mesh.node_count());
            for element in out.elements() {
                // arity always matches the emitted cell type
                prop_assert_eq!(element.node_count(), element.cell_type().node_count());
                // connectivity stays inside the surviving node array
                for id in element.nodes() {
                    prop_assert!(id.index() < out.node_count());
                }
                // every emitted element carries a parent's material
                prop_assert!(materials.contains(&element.material()));
                // nothing below the requested dimension is emitted
                prop_assert!(element.dimension() >= min_dimension);
            }
        } else {
            prop_assert_eq!(report.output_elements, 0);
        }
    }

    #[test]
    fn collapse_nodes_preserves_element_count(mesh in arb_tet_mesh(), eps in 0.0..0.3f64) {
        let out = MeshRevision::new(&mesh).collapse_nodes("prop.rev", eps).unwrap();
        prop_assert_eq!(out.element_count(), mesh.element_count());
        prop_assert!(out.node_count() <= mesh.node_count());
    }
}
