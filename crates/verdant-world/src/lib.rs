//! Terrain generation, vegetation scattering and the supporting config.
#![forbid(unsafe_code)]

pub mod colour;
pub mod config;
pub mod noise;
pub mod rng;
pub mod scatter;
pub mod structures;
pub mod terrain;

pub use colour::{ColourKey, Gradient, elevation_uniform};
pub use config::{ConfigError, GenConfig, NoiseConfig, load_config_from_path, parse_config};
pub use noise::NoiseField;
pub use scatter::{
    InstancePlan, PlacementInstance, PrefabTable, ScatterParams, ScatterStats, VegetationCategory,
    VegetationScatterer,
};
pub use structures::{PlacedAnchor, StructurePlacement};
pub use terrain::{ElevationRange, TerrainGrid, assign_elevation, build_grid};
