use verdant_geom::round_to_i32;
use verdant_mesh::HalfEdgeMesh;

use crate::noise::NoiseField;

/// Running min/max over vertex elevations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElevationRange {
    pub min: f32,
    pub max: f32,
}

impl ElevationRange {
    pub const EMPTY: ElevationRange = ElevationRange {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    #[inline]
    pub fn add(&mut self, v: f32) {
        if v > self.max {
            self.max = v;
        }
        if v < self.min {
            self.min = v;
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    #[inline]
    pub fn span(&self) -> f32 {
        if self.is_empty() { 0.0 } else { self.max - self.min }
    }

    /// Maps `y` into `[0, 1]` over the range. An empty or flat range maps
    /// everything to 0.
    #[inline]
    pub fn normalize(&self, y: f32) -> f32 {
        let span = self.span();
        if span > 0.0 { (y - self.min) / span } else { 0.0 }
    }
}

impl Default for ElevationRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Builds a `width * height` grid of vertices at `(i, 0, j)` in row-major
/// order with one quad per interior cell. Non-positive sizes give an empty mesh.
pub fn build_grid(width: i32, height: i32) -> HalfEdgeMesh {
    if width <= 0 || height <= 0 {
        return HalfEdgeMesh::new();
    }
    let (w, h) = (width as usize, height as usize);
    let mut mesh = HalfEdgeMesh::with_capacity(w * h, (w - 1) * (h - 1));
    for j in 0..h {
        for i in 0..w {
            mesh.add_vertex(i as f32, 0.0, j as f32);
            if i > 0 && j > 0 {
                mesh.add_face(i + j * w, i - 1 + j * w, i - 1 + (j - 1) * w, i + (j - 1) * w);
            }
        }
    }
    mesh
}

/// Sets every vertex height from the unclamped noise and returns the range seen.
pub fn assign_elevation(mesh: &mut HalfEdgeMesh, field: &NoiseField) -> ElevationRange {
    let mut range = ElevationRange::EMPTY;
    for v in mesh.vertices_mut() {
        let y = field.sample_unclamped(v.point.x, v.point.z);
        v.point.y = y;
        range.add(y);
    }
    range
}

/// A generated grid together with its dimensions and elevation range.
#[derive(Clone, Debug)]
pub struct TerrainGrid {
    mesh: HalfEdgeMesh,
    width: i32,
    height: i32,
    range: ElevationRange,
}

impl TerrainGrid {
    pub fn generate(width: i32, height: i32, field: &NoiseField) -> Self {
        let mut mesh = build_grid(width, height);
        let range = assign_elevation(&mut mesh, field);
        Self::from_parts(mesh, width, height, range)
    }

    pub fn from_parts(mesh: HalfEdgeMesh, width: i32, height: i32, range: ElevationRange) -> Self {
        Self {
            mesh,
            width: width.max(0),
            height: height.max(0),
            range,
        }
    }

    #[inline]
    pub fn mesh(&self) -> &HalfEdgeMesh {
        &self.mesh
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn range(&self) -> ElevationRange {
        self.range
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }

    /// Terrain height under a world position: rounds and clamps to the grid,
    /// then reads vertex `ix + iz * width`. Empty grids report 0.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        if self.width <= 0 || self.height <= 0 {
            return 0.0;
        }
        let ix = round_to_i32(x).clamp(0, self.width - 1);
        let iz = round_to_i32(z).clamp(0, self.height - 1);
        let idx = (ix + iz * self.width) as usize;
        self.mesh
            .vertices()
            .get(idx)
            .map(|v| v.point.y)
            .unwrap_or(0.0)
    }

    /// Height of grid cell `(ix, iz)`.
    ///
    /// The caller must keep `ix` in `[0, width)` and `iz` in `[0, height)`;
    /// anything else panics.
    #[inline]
    pub fn height_at_cell(&self, ix: usize, iz: usize) -> f32 {
        self.mesh.vertices()[ix + iz * self.width as usize].point.y
    }
}
