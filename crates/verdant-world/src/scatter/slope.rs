use hashbrown::HashMap;
use verdant_geom::Vec2i;
use verdant_mesh::{HalfEdgeMesh, Vertex, VertexId};

/// Rounded XZ cell → first vertex seen in that cell.
#[derive(Clone, Debug, Default)]
pub struct SpatialHash {
    cells: HashMap<Vec2i, VertexId>,
}

impl SpatialHash {
    pub fn build(mesh: &HalfEdgeMesh) -> Self {
        let mut cells = HashMap::with_capacity(mesh.vertex_count());
        for v in mesh.vertices() {
            cells.entry(Vec2i::cell_of(v.point)).or_insert(v.id);
        }
        Self { cells }
    }

    #[inline]
    pub fn get(&self, cell: Vec2i) -> Option<VertexId> {
        self.cells.get(&cell).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[inline]
fn to_slope(max_height_diff: f32) -> f32 {
    (max_height_diff / 2.0).clamp(0.0, 1.0)
}

/// Largest height step to any of the 8 neighbouring cells, halved and clamped
/// to `[0, 1]`. Cells with no vertex are skipped.
pub(super) fn slope_from_hash(mesh: &HalfEdgeMesh, v: &Vertex, grid: &SpatialHash) -> f32 {
    let cell = Vec2i::cell_of(v.point);
    let mut max_diff = 0.0f32;
    for off in Vec2i::NEIGHBORS_8 {
        if let Some(n) = grid.get(cell + off) {
            let diff = (v.point.y - mesh.vertex(n).point.y).abs();
            max_diff = max_diff.max(diff);
        }
    }
    to_slope(max_diff)
}

const NEIGHBOR_MIN_DIST: f32 = 0.1;
const NEIGHBOR_MAX_DIST: f32 = 1.5;

/// Same measure as [`slope_from_hash`] but scanning every vertex for planar
/// neighbours in `(0.1, 1.5)`.
pub(super) fn slope_all_pairs(mesh: &HalfEdgeMesh, v: &Vertex) -> f32 {
    let mut max_diff = 0.0f32;
    for other in mesh.vertices() {
        if other.id == v.id {
            continue;
        }
        let d = v.point.planar_distance(other.point);
        if d > NEIGHBOR_MIN_DIST && d < NEIGHBOR_MAX_DIST {
            max_diff = max_diff.max((v.point.y - other.point.y).abs());
        }
    }
    to_slope(max_diff)
}
