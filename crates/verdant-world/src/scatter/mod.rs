//! Slope-aware vegetation scattering over a terrain mesh.
//!
//! One scatter pass walks the mesh vertices with a fixed stride, rejects steep
//! vertices, and turns four noise signals into a category plus transform for
//! the rest. The output is plain data for an instantiation layer.

mod classify;
mod plan;
mod slope;

use std::time::Instant;

use hashbrown::HashMap;
use verdant_geom::{Vec3, round_to_i32};
use verdant_mesh::{HalfEdgeMesh, VertexId};

use crate::config::Vegetation;
use crate::noise::NoiseField;
use crate::terrain::ElevationRange;

pub use self::classify::{
    GLOBAL_DENSITY_THRESHOLD, NoiseSignals, PlacementDecision, Rejection, VegetationCategory,
    category_threshold, classify, decide,
};
pub use self::plan::{InstancePlan, InstanceSpawn, PrefabTable};
pub use self::slope::SpatialHash;

/// Flattened scatter tunables (snapshot of the vegetation config).
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterParams {
    pub grass_density: f32,
    pub tree_density: f32,
    pub bush_density: f32,
    pub max_slope: f32,
    pub sample_distance: f32,
}

impl ScatterParams {
    pub fn from_config(cfg: &Vegetation) -> Self {
        Self {
            grass_density: cfg.grass_density,
            tree_density: cfg.tree_density,
            bush_density: cfg.bush_density,
            max_slope: cfg.max_slope,
            sample_distance: cfg.sample_distance,
        }
    }

    /// Vertex stride: `sample_distance` rounded, never below 1.
    #[inline]
    pub fn sample_step(&self) -> usize {
        round_to_i32(self.sample_distance).max(1) as usize
    }
}

impl Default for ScatterParams {
    fn default() -> Self {
        Self::from_config(&Vegetation::default())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementInstance {
    pub vertex: VertexId,
    pub position: Vec3,
    pub category: VegetationCategory,
    pub scale: f32,
    pub rotation_degrees: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScatterStats {
    pub sampled: u32,
    pub rejected_slope: u32,
    pub rejected_density: u32,
    pub rejected_category: u32,
    pub placed: u32,
    pub duration_us: u32,
}

impl ScatterStats {
    fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::Slope => self.rejected_slope += 1,
            Rejection::Density => self.rejected_density += 1,
            Rejection::CategoryThreshold => self.rejected_category += 1,
        }
    }
}

/// The four independently seeded fields feeding the placement decision.
pub struct ScatterNoise {
    pub density: NoiseField,
    pub cluster: NoiseField,
    pub kind: NoiseField,
    pub detail: NoiseField,
}

impl ScatterNoise {
    /// Each field's configured seed is a salt XORed into the vegetation seed.
    pub fn from_config(cfg: &Vegetation) -> Self {
        let n = &cfg.noise;
        Self {
            density: NoiseField::with_seed(&n.density, cfg.seed ^ n.density.seed),
            cluster: NoiseField::with_seed(&n.cluster, cfg.seed ^ n.cluster.seed),
            kind: NoiseField::with_seed(&n.kind, cfg.seed ^ n.kind.seed),
            detail: NoiseField::with_seed(&n.detail, cfg.seed ^ n.detail.seed),
        }
    }

    #[inline]
    pub fn signals_at(&self, x: f32, z: f32) -> NoiseSignals {
        NoiseSignals {
            density: self.density.sample(x, z),
            cluster: self.cluster.sample(x, z),
            kind: self.kind.sample(x, z),
            detail: self.detail.sample(x, z),
        }
    }
}

pub struct VegetationScatterer {
    noise: ScatterNoise,
    slope_cache: HashMap<VertexId, f32>,
    last_stats: ScatterStats,
}

impl VegetationScatterer {
    pub fn new(cfg: &Vegetation) -> Self {
        Self::with_noise(ScatterNoise::from_config(cfg))
    }

    pub fn with_noise(noise: ScatterNoise) -> Self {
        Self {
            noise,
            slope_cache: HashMap::new(),
            last_stats: ScatterStats::default(),
        }
    }

    #[inline]
    pub fn noise(&self) -> &ScatterNoise {
        &self.noise
    }

    #[inline]
    pub fn last_stats(&self) -> ScatterStats {
        self.last_stats
    }

    /// Slopes computed during the most recent pass.
    #[inline]
    pub fn cached_slope(&self, v: VertexId) -> Option<f32> {
        self.slope_cache.get(&v).copied()
    }

    /// Production pass: spatial-hash neighbour lookup over every
    /// `sample_step`-th vertex.
    pub fn scatter(
        &mut self,
        mesh: &HalfEdgeMesh,
        range: ElevationRange,
        params: &ScatterParams,
    ) -> Vec<PlacementInstance> {
        let start = Instant::now();
        self.slope_cache.clear();
        let grid = SpatialHash::build(mesh);
        let step = params.sample_step();
        let mut stats = ScatterStats::default();
        let mut out = Vec::new();

        for v in mesh.vertices().iter().step_by(step) {
            let slope = match self.slope_cache.get(&v.id) {
                Some(&s) => s,
                None => {
                    let s = slope::slope_from_hash(mesh, v, &grid);
                    self.slope_cache.insert(v.id, s);
                    s
                }
            };
            self.evaluate(v.id, v.point, slope, range, params, &mut stats, &mut out);
        }

        stats.duration_us = elapsed_us(start);
        self.finish_pass("scatter", stats, step);
        out
    }

    /// Verification pass: every vertex, all-pairs neighbour search. Quadratic
    /// in the vertex count; matches [`Self::scatter`] when the stride is 1.
    pub fn scatter_reference(
        &mut self,
        mesh: &HalfEdgeMesh,
        range: ElevationRange,
        params: &ScatterParams,
    ) -> Vec<PlacementInstance> {
        let start = Instant::now();
        self.slope_cache.clear();
        let mut stats = ScatterStats::default();
        let mut out = Vec::new();

        for v in mesh.vertices() {
            let slope = match self.slope_cache.get(&v.id) {
                Some(&s) => s,
                None => {
                    let s = slope::slope_all_pairs(mesh, v);
                    self.slope_cache.insert(v.id, s);
                    s
                }
            };
            self.evaluate(v.id, v.point, slope, range, params, &mut stats, &mut out);
        }

        stats.duration_us = elapsed_us(start);
        self.finish_pass("scatter_reference", stats, 1);
        out
    }

    #[allow(clippy::too_many_arguments)]
    fn evaluate(
        &self,
        id: VertexId,
        pos: Vec3,
        slope: f32,
        range: ElevationRange,
        params: &ScatterParams,
        stats: &mut ScatterStats,
        out: &mut Vec<PlacementInstance>,
    ) {
        stats.sampled += 1;
        if slope > params.max_slope {
            stats.record(Rejection::Slope);
            return;
        }
        let h = range.normalize(pos.y);
        let signals = self.noise.signals_at(pos.x, pos.z);
        match decide(signals, h, params) {
            Ok(d) => {
                stats.placed += 1;
                out.push(PlacementInstance {
                    vertex: id,
                    position: pos,
                    category: d.category,
                    scale: d.scale,
                    rotation_degrees: d.rotation_degrees,
                });
            }
            Err(r) => stats.record(r),
        }
    }

    fn finish_pass(&mut self, label: &str, stats: ScatterStats, step: usize) {
        log::debug!(
            target: "scatter",
            "{} step={} sampled={} placed={} rejected(slope={}, density={}, category={}) in {}us",
            label,
            step,
            stats.sampled,
            stats.placed,
            stats.rejected_slope,
            stats.rejected_density,
            stats.rejected_category,
            stats.duration_us
        );
        self.last_stats = stats;
    }
}

fn elapsed_us(start: Instant) -> u32 {
    start.elapsed().as_micros().min(u128::from(u32::MAX)) as u32
}

/// Per-category totals, in [`VegetationCategory::ALL`] order.
pub fn count_by_category(instances: &[PlacementInstance]) -> [(VegetationCategory, usize); 4] {
    VegetationCategory::ALL.map(|c| (c, instances.iter().filter(|i| i.category == c).count()))
}
