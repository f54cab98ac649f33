//! Half-edge style quad mesh container used by the terrain builder.
//!
//! Vertices are stored in insertion order and addressed by [`VertexId`], which is
//! simply the insertion index. Terrain code relies on that: a grid vertex at
//! `(i, j)` lives at index `i + j * width`.
#![forbid(unsafe_code)]

mod triangulate;

pub use triangulate::TriangleMesh;

use hashbrown::HashMap;
use verdant_geom::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceId(pub u32);

impl VertexId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl FaceId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
pub struct Vertex {
    pub id: VertexId,
    pub point: Vec3,
}

/// Undirected edge between two vertices, shared by every face that borders it.
#[derive(Clone, Debug)]
pub struct Edge {
    pub id: EdgeId,
    pub v1: VertexId,
    pub v2: VertexId,
    faces: Vec<FaceId>,
}

impl Edge {
    #[inline]
    pub fn faces(&self) -> &[FaceId] {
        &self.faces
    }

    /// Edges with a single adjacent face sit on the mesh border.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.faces.len() < 2
    }

    pub fn other(&self, v: VertexId) -> Option<VertexId> {
        if v == self.v1 {
            Some(self.v2)
        } else if v == self.v2 {
            Some(self.v1)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug)]
pub struct Face {
    pub id: FaceId,
    pub verts: [VertexId; 4],
    pub edges: [EdgeId; 4],
}

#[derive(Clone, Debug, Default)]
pub struct HalfEdgeMesh {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
    edge_index: HashMap<(VertexId, VertexId), EdgeId>,
}

impl HalfEdgeMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            edges: Vec::with_capacity(faces * 2 + vertices),
            faces: Vec::with_capacity(faces),
            edge_index: HashMap::with_capacity(faces * 2 + vertices),
        }
    }

    pub fn add_vertex(&mut self, x: f32, y: f32, z: f32) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(Vertex {
            id,
            point: Vec3::new(x, y, z),
        });
        id
    }

    /// Registers a quad over four existing vertices, creating or reusing the
    /// edges between consecutive corners. Winding and planarity are the
    /// caller's concern.
    pub fn add_face(&mut self, i0: usize, i1: usize, i2: usize, i3: usize) -> FaceId {
        debug_assert!(
            [i0, i1, i2, i3].iter().all(|&i| i < self.vertices.len()),
            "face references a vertex that does not exist"
        );
        let id = FaceId(self.faces.len() as u32);
        let verts = [i0, i1, i2, i3].map(|i| VertexId(i as u32));
        let mut edges = [EdgeId(0); 4];
        for k in 0..4 {
            let a = verts[k];
            let b = verts[(k + 1) % 4];
            let eid = self.ensure_edge(a, b);
            self.edges[eid.index()].faces.push(id);
            edges[k] = eid;
        }
        self.faces.push(Face { id, verts, edges });
        id
    }

    fn ensure_edge(&mut self, a: VertexId, b: VertexId) -> EdgeId {
        let key = if a <= b { (a, b) } else { (b, a) };
        if let Some(&eid) = self.edge_index.get(&key) {
            return eid;
        }
        let eid = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge {
            id: eid,
            v1: a,
            v2: b,
            faces: Vec::with_capacity(2),
        });
        self.edge_index.insert(key, eid);
        eid
    }

    pub fn edge_between(&self, a: VertexId, b: VertexId) -> Option<&Edge> {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.edge_index.get(&key).map(|e| &self.edges[e.index()])
    }

    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.vertices[id.index()]
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Corner positions of a face in winding order.
    pub fn face_points(&self, face: &Face) -> [Vec3; 4] {
        face.verts.map(|v| self.vertex(v).point)
    }
}
