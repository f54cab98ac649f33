use proptest::prelude::*;
use verdant_mesh::{HalfEdgeMesh, VertexId};

fn dim() -> impl Strategy<Value = usize> {
    1usize..=12
}

fn grid(w: usize, h: usize) -> HalfEdgeMesh {
    let mut m = HalfEdgeMesh::new();
    for j in 0..h {
        for i in 0..w {
            m.add_vertex(i as f32, 0.0, j as f32);
            if i > 0 && j > 0 {
                m.add_face(i + j * w, i - 1 + j * w, i - 1 + (j - 1) * w, i + (j - 1) * w);
            }
        }
    }
    m
}

proptest! {
    // Quad grids share interior edges: W*(H-1) + H*(W-1) unique edges
    #[test]
    fn grid_edge_count(w in dim(), h in dim()) {
        let m = grid(w, h);
        let expect = if w > 1 && h > 1 { w * (h - 1) + h * (w - 1) } else { 0 };
        prop_assert_eq!(m.edge_count(), expect);
        for e in m.edges() {
            prop_assert!(!e.faces().is_empty() && e.faces().len() <= 2);
        }
    }

    // Every face edge connects the face's consecutive corners
    #[test]
    fn face_edges_match_corners(w in dim(), h in dim()) {
        let m = grid(w, h);
        for f in m.faces() {
            for k in 0..4 {
                let e = &m.edges()[f.edges[k].index()];
                let a = f.verts[k];
                let b = f.verts[(k + 1) % 4];
                prop_assert_eq!(e.other(a), Some(b));
                prop_assert!(e.faces().contains(&f.id));
            }
        }
    }

    // Triangulation keeps the vertex buffer aligned with vertex ids
    #[test]
    fn triangulation_is_indexed_by_vertex_id(w in dim(), h in dim()) {
        let m = grid(w, h);
        let tri = m.triangulate();
        prop_assert_eq!(tri.vertex_count(), w * h);
        prop_assert_eq!(tri.idx.len(), m.face_count() * 6);
        prop_assert!(tri.idx.iter().all(|&i| (i as usize) < w * h));
        for v in m.vertices() {
            let i = v.id.index() * 3;
            prop_assert_eq!(tri.pos[i], v.point.x);
            prop_assert_eq!(tri.pos[i + 2], v.point.z);
        }
        prop_assert_eq!(m.vertices().last().map(|v| v.id), Some(VertexId((w * h - 1) as u32)));
    }
}
