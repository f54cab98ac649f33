//! Regeneration driver: runs the terrain pipeline as an explicit stage
//! machine that a caller ticks, with cooperative cancellation between stages.
#![forbid(unsafe_code)]

mod cancel;

pub use cancel::CancelFlag;

use std::time::Instant;

use verdant_geom::Vec3;
use verdant_mesh::{HalfEdgeMesh, TriangleMesh};
use verdant_world::config::GenConfig;
use verdant_world::structures::{self, StructurePlacement};
use verdant_world::terrain::{assign_elevation, build_grid};
use verdant_world::{
    NoiseField, PlacementInstance, ScatterParams, ScatterStats, TerrainGrid, VegetationScatterer,
};

/// Last completed stage of the current generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Idle,
    BuildGrid,
    AssignElevation,
    Scatter,
    PlaceStructure,
    Done,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::BuildGrid => "build_grid",
            Stage::AssignElevation => "assign_elevation",
            Stage::Scatter => "scatter",
            Stage::PlaceStructure => "place_structure",
            Stage::Done => "done",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageTimings {
    pub build_grid_us: u32,
    pub assign_elevation_us: u32,
    pub scatter_us: u32,
    pub place_structure_us: u32,
}

impl StageTimings {
    pub fn total_us(&self) -> u32 {
        self.build_grid_us
            .saturating_add(self.assign_elevation_us)
            .saturating_add(self.scatter_us)
            .saturating_add(self.place_structure_us)
    }
}

/// Output of one complete regeneration.
#[derive(Clone, Debug)]
pub struct Generation {
    pub grid: TerrainGrid,
    pub placements: Vec<PlacementInstance>,
    pub scatter_stats: ScatterStats,
    pub structure: Option<StructurePlacement>,
    /// Placements removed because they fell inside the structure footprint.
    pub cleared: usize,
    /// Only set on the first generation a regenerator completes.
    pub spawn: Option<Vec3>,
    pub timings: StageTimings,
}

impl Generation {
    pub fn triangulate(&self) -> TriangleMesh {
        self.grid.mesh().triangulate()
    }
}

pub enum StepResult {
    Pending(Stage),
    Finished(Box<Generation>),
}

pub enum RegenOutcome {
    Completed(Box<Generation>),
    Cancelled { after: Stage },
}

// Data carried between stages.
enum Pipeline {
    Idle,
    BuildGrid(HalfEdgeMesh),
    AssignElevation(TerrainGrid),
    Scatter(TerrainGrid, Vec<PlacementInstance>),
    PlaceStructure(TerrainGrid, Vec<PlacementInstance>, Option<StructurePlacement>, usize),
    Done,
}

pub struct Regenerator {
    config: GenConfig,
    scatterer: VegetationScatterer,
    pipeline: Pipeline,
    timings: StageTimings,
    has_started: bool,
    generations: u64,
}

impl Regenerator {
    pub fn new(config: GenConfig) -> Self {
        let scatterer = VegetationScatterer::new(&config.vegetation);
        Self {
            config,
            scatterer,
            pipeline: Pipeline::Idle,
            timings: StageTimings::default(),
            has_started: false,
            generations: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    /// True once a generation has completed; the spawn point is only emitted
    /// before that.
    #[inline]
    pub fn has_started(&self) -> bool {
        self.has_started
    }

    #[inline]
    pub fn generations(&self) -> u64 {
        self.generations
    }

    pub fn stage(&self) -> Stage {
        match self.pipeline {
            Pipeline::Idle => Stage::Idle,
            Pipeline::BuildGrid(_) => Stage::BuildGrid,
            Pipeline::AssignElevation(_) => Stage::AssignElevation,
            Pipeline::Scatter(..) => Stage::Scatter,
            Pipeline::PlaceStructure(..) => Stage::PlaceStructure,
            Pipeline::Done => Stage::Done,
        }
    }

    /// Swaps in a new configuration and abandons any generation in flight.
    pub fn update_config(&mut self, config: GenConfig) {
        self.scatterer = VegetationScatterer::new(&config.vegetation);
        self.config = config;
        self.reset();
        log::info!(target: "regen", "config updated; pipeline reset");
    }

    pub fn reset(&mut self) {
        self.pipeline = Pipeline::Idle;
        self.timings = StageTimings::default();
    }

    /// Runs exactly one stage. Stepping a finished regenerator starts a new
    /// generation.
    pub fn step(&mut self) -> StepResult {
        let pipeline = std::mem::replace(&mut self.pipeline, Pipeline::Idle);
        let start = Instant::now();
        let (next, finished) = match pipeline {
            Pipeline::Idle | Pipeline::Done => {
                self.timings = StageTimings::default();
                let mesh = build_grid(self.config.terrain.width, self.config.terrain.height);
                self.timings.build_grid_us = elapsed_us(start);
                (Pipeline::BuildGrid(mesh), None)
            }
            Pipeline::BuildGrid(mut mesh) => {
                let field = NoiseField::new(&self.config.terrain.noise);
                let range = assign_elevation(&mut mesh, &field);
                let t = &self.config.terrain;
                let grid = TerrainGrid::from_parts(mesh, t.width, t.height, range);
                self.timings.assign_elevation_us = elapsed_us(start);
                (Pipeline::AssignElevation(grid), None)
            }
            Pipeline::AssignElevation(grid) => {
                let params = ScatterParams::from_config(&self.config.vegetation);
                let placements = self.scatterer.scatter(grid.mesh(), grid.range(), &params);
                self.timings.scatter_us = elapsed_us(start);
                (Pipeline::Scatter(grid, placements), None)
            }
            Pipeline::Scatter(grid, mut placements) => {
                let cfg = &self.config.structure;
                let structure = if cfg.enable {
                    structures::place(&grid, cfg, self.config.vegetation.seed as u32)
                } else {
                    None
                };
                let cleared = match &structure {
                    Some(s) if cfg.clear_vegetation => {
                        structures::clear_footprint(&mut placements, &s.footprint)
                    }
                    _ => 0,
                };
                self.timings.place_structure_us = elapsed_us(start);
                (Pipeline::PlaceStructure(grid, placements, structure, cleared), None)
            }
            Pipeline::PlaceStructure(grid, placements, structure, cleared) => {
                let generation = self.finish(grid, placements, structure, cleared);
                (Pipeline::Done, Some(generation))
            }
        };
        self.pipeline = next;
        let stage = self.stage();
        log::debug!(target: "regen", "stage {} in {}us", stage.name(), elapsed_us(start));
        match finished {
            Some(generation) => StepResult::Finished(Box::new(generation)),
            None => StepResult::Pending(stage),
        }
    }

    /// Steps until the generation completes, checking `cancel` before every
    /// stage. A cancelled run leaves the regenerator idle.
    pub fn run(&mut self, cancel: &CancelFlag) -> RegenOutcome {
        self.run_until(|_| cancel.is_cancelled())
    }

    /// Like [`Self::run`] but asks `should_cancel` with the last completed
    /// stage.
    pub fn run_until(&mut self, mut should_cancel: impl FnMut(Stage) -> bool) -> RegenOutcome {
        if self.stage() == Stage::Done {
            self.reset();
        }
        loop {
            let stage = self.stage();
            if should_cancel(stage) {
                log::info!(target: "regen", "cancelled after {}", stage.name());
                self.reset();
                return RegenOutcome::Cancelled { after: stage };
            }
            if let StepResult::Finished(generation) = self.step() {
                return RegenOutcome::Completed(generation);
            }
        }
    }

    fn finish(
        &mut self,
        grid: TerrainGrid,
        placements: Vec<PlacementInstance>,
        structure: Option<StructurePlacement>,
        cleared: usize,
    ) -> Generation {
        let spawn = if self.has_started {
            None
        } else {
            self.has_started = true;
            let t = &self.config.terrain;
            Some(Vec3::new(
                (t.width / 2) as f32,
                self.config.spawn.height,
                (t.height / 2) as f32,
            ))
        };
        self.generations += 1;
        let timings = self.timings;
        log::info!(
            target: "regen",
            "generation {} done: {} verts, {} placements, structure={} in {}us",
            self.generations,
            grid.mesh().vertex_count(),
            placements.len(),
            structure.is_some(),
            timings.total_us()
        );
        Generation {
            grid,
            placements,
            scatter_stats: self.scatterer.last_stats(),
            structure,
            cleared,
            spawn,
            timings,
        }
    }
}

fn elapsed_us(start: Instant) -> u32 {
    start.elapsed().as_micros().min(u128::from(u32::MAX)) as u32
}
