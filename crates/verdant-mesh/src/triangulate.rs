use verdant_geom::Vec3;

use crate::HalfEdgeMesh;

/// Flat, indexed triangle buffers ready for upload by a rendering layer.
///
/// The vertex buffer mirrors the mesh's vertex order, so `pos[3*i..3*i+3]` is
/// the position of `VertexId(i)`.
#[derive(Default, Clone, Debug)]
pub struct TriangleMesh {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub idx: Vec<u32>,
}

impl TriangleMesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }
}

impl HalfEdgeMesh {
    /// Splits every quad into the fan `(0,1,2)` / `(0,2,3)` and computes smooth
    /// per-vertex normals from the area-weighted face normals.
    ///
    /// Faces use clockwise front-face winding (viewed from above the grid), so
    /// face normals are `(c - a) × (b - a)`.
    pub fn triangulate(&self) -> TriangleMesh {
        let n_verts = self.vertex_count();
        let mut out = TriangleMesh {
            pos: Vec::with_capacity(n_verts * 3),
            norm: Vec::with_capacity(n_verts * 3),
            idx: Vec::with_capacity(self.face_count() * 6),
        };
        let mut acc = vec![Vec3::ZERO; n_verts];

        for v in self.vertices() {
            out.pos.extend_from_slice(&[v.point.x, v.point.y, v.point.z]);
        }

        for face in self.faces() {
            let [a, b, c, d] = face.verts;
            let [pa, pb, pc, pd] = self.face_points(face);
            let n0 = (pc - pa).cross(pb - pa);
            let n1 = (pd - pa).cross(pc - pa);
            for (vid, n) in [(a, n0), (b, n0), (c, n0 + n1), (a, n1), (d, n1)] {
                acc[vid.index()] += n;
            }
            out.idx.extend_from_slice(&[a.0, b.0, c.0, a.0, c.0, d.0]);
        }

        for n in acc {
            // Isolated vertices keep an upward normal.
            let n = if n.length() > 0.0 { n.normalized() } else { Vec3::UP };
            out.norm.extend_from_slice(&[n.x, n.y, n.z]);
        }
        out
    }
}
