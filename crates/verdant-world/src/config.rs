use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GenConfig {
    #[serde(default)]
    pub terrain: Terrain,
    #[serde(default)]
    pub vegetation: Vegetation,
    #[serde(default)]
    pub structure: Structure,
    #[serde(default)]
    pub colour: Colour,
    #[serde(default)]
    pub spawn: Spawn,
}

// --- Noise ---

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoiseKind {
    Perlin,
    OpenSimplex2,
    Cellular,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FractalKind {
    Fbm,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CellularDistance {
    Euclidean,
    EuclideanSq,
    Manhattan,
    Hybrid,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CellularReturn {
    CellValue,
    Distance,
    Distance2,
    Distance2Add,
    Distance2Sub,
    Distance2Mul,
    Distance2Div,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NoiseConfig {
    #[serde(default)]
    pub seed: i32,
    #[serde(default = "default_noise_kind")]
    pub kind: NoiseKind,
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    /// Scale applied by the unclamped sampler only.
    #[serde(default = "d_one")]
    pub amplitude: f32,
    #[serde(default)]
    pub fractal: Option<Fractal>,
    #[serde(default)]
    pub cellular: Option<Cellular>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Fractal {
    #[serde(default = "d_oct")]
    pub octaves: i32,
    #[serde(default = "d_fractal_kind", rename = "type")]
    pub kind: FractalKind,
    #[serde(default = "d_lac")]
    pub lacunarity: f32,
    #[serde(default = "d_gain")]
    pub gain: f32,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Cellular {
    #[serde(default = "d_cell_dist")]
    pub distance: CellularDistance,
    #[serde(default = "d_cell_ret")]
    pub return_type: CellularReturn,
}

fn default_noise_kind() -> NoiseKind {
    NoiseKind::OpenSimplex2
}
fn default_frequency() -> f32 {
    0.01
}
fn d_one() -> f32 {
    1.0
}
fn d_oct() -> i32 {
    3
}
fn d_fractal_kind() -> FractalKind {
    FractalKind::Fbm
}
fn d_lac() -> f32 {
    2.0
}
fn d_gain() -> f32 {
    0.5
}
fn d_cell_dist() -> CellularDistance {
    CellularDistance::Euclidean
}
fn d_cell_ret() -> CellularReturn {
    CellularReturn::Distance
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            kind: default_noise_kind(),
            frequency: default_frequency(),
            amplitude: d_one(),
            fractal: None,
            cellular: None,
        }
    }
}

impl Default for Fractal {
    fn default() -> Self {
        Self {
            octaves: d_oct(),
            kind: d_fractal_kind(),
            lacunarity: d_lac(),
            gain: d_gain(),
        }
    }
}

impl NoiseConfig {
    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(ConfigError::Invalid {
                field,
                reason: format!("frequency must be positive, got {}", self.frequency),
            });
        }
        if !self.amplitude.is_finite() {
            return Err(ConfigError::Invalid {
                field,
                reason: "amplitude must be finite".into(),
            });
        }
        if let Some(f) = &self.fractal {
            if f.octaves < 1 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("fractal octaves must be >= 1, got {}", f.octaves),
                });
            }
        }
        Ok(())
    }
}

// --- Terrain ---

#[derive(Clone, Debug, Deserialize)]
pub struct Terrain {
    #[serde(default = "default_grid_size")]
    pub width: i32,
    #[serde(default = "default_grid_size")]
    pub height: i32,
    #[serde(default = "default_terrain_noise")]
    pub noise: NoiseConfig,
}
fn default_grid_size() -> i32 {
    100
}
fn default_terrain_noise() -> NoiseConfig {
    NoiseConfig {
        seed: 1337,
        kind: NoiseKind::OpenSimplex2,
        frequency: 0.03,
        amplitude: 8.0,
        fractal: Some(Fractal {
            octaves: 4,
            ..Fractal::default()
        }),
        cellular: None,
    }
}
impl Default for Terrain {
    fn default() -> Self {
        Self {
            width: default_grid_size(),
            height: default_grid_size(),
            noise: default_terrain_noise(),
        }
    }
}

// --- Vegetation ---

#[derive(Clone, Debug, Deserialize)]
pub struct Vegetation {
    #[serde(default = "default_veg_seed")]
    pub seed: i32,
    #[serde(default = "default_grass_density")]
    pub grass_density: f32,
    #[serde(default = "default_tree_density")]
    pub tree_density: f32,
    #[serde(default = "default_bush_density")]
    pub bush_density: f32,
    #[serde(default = "default_max_slope")]
    pub max_slope: f32,
    #[serde(default = "default_sample_distance")]
    pub sample_distance: f32,
    #[serde(default = "default_y_offset")]
    pub y_offset: f32,
    #[serde(default)]
    pub prefabs: Prefabs,
    #[serde(default)]
    pub noise: VegetationNoise,
}

/// Per-signal noise settings. `seed` here is a salt XORed into the vegetation seed.
#[derive(Clone, Debug, Deserialize)]
pub struct VegetationNoise {
    #[serde(default = "default_density_noise")]
    pub density: NoiseConfig,
    #[serde(default = "default_type_noise", rename = "type")]
    pub kind: NoiseConfig,
    #[serde(default = "default_cluster_noise")]
    pub cluster: NoiseConfig,
    #[serde(default = "default_detail_noise")]
    pub detail: NoiseConfig,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct Prefabs {
    #[serde(default)]
    pub grass: Vec<String>,
    #[serde(default)]
    pub tree: Vec<String>,
    #[serde(default)]
    pub bush: Vec<String>,
    #[serde(default)]
    pub flower: Vec<String>,
}

fn default_veg_seed() -> i32 {
    12345
}
fn default_grass_density() -> f32 {
    0.5
}
fn default_tree_density() -> f32 {
    0.2
}
fn default_bush_density() -> f32 {
    0.3
}
fn default_max_slope() -> f32 {
    0.5
}
fn default_sample_distance() -> f32 {
    2.0
}
fn default_y_offset() -> f32 {
    -10.0
}
fn default_density_noise() -> NoiseConfig {
    NoiseConfig {
        seed: 0x0D15_EA5E,
        kind: NoiseKind::OpenSimplex2,
        frequency: 0.15,
        amplitude: 1.0,
        fractal: Some(Fractal {
            octaves: 3,
            ..Fractal::default()
        }),
        cellular: None,
    }
}
fn default_type_noise() -> NoiseConfig {
    NoiseConfig {
        seed: 0x7E_7E7E,
        kind: NoiseKind::Perlin,
        frequency: 0.2,
        amplitude: 1.0,
        fractal: None,
        cellular: None,
    }
}
fn default_cluster_noise() -> NoiseConfig {
    NoiseConfig {
        seed: 0x00C1_0575,
        kind: NoiseKind::Cellular,
        frequency: 0.25,
        amplitude: 1.0,
        fractal: None,
        cellular: Some(Cellular {
            distance: CellularDistance::Euclidean,
            return_type: CellularReturn::Distance2Add,
        }),
    }
}
fn default_detail_noise() -> NoiseConfig {
    NoiseConfig {
        seed: 0x0DE7_A111,
        kind: NoiseKind::OpenSimplex2,
        frequency: 0.8,
        amplitude: 1.0,
        fractal: None,
        cellular: None,
    }
}

impl Default for VegetationNoise {
    fn default() -> Self {
        Self {
            density: default_density_noise(),
            kind: default_type_noise(),
            cluster: default_cluster_noise(),
            detail: default_detail_noise(),
        }
    }
}

impl Default for Vegetation {
    fn default() -> Self {
        Self {
            seed: default_veg_seed(),
            grass_density: default_grass_density(),
            tree_density: default_tree_density(),
            bush_density: default_bush_density(),
            max_slope: default_max_slope(),
            sample_distance: default_sample_distance(),
            y_offset: default_y_offset(),
            prefabs: Prefabs::default(),
            noise: VegetationNoise::default(),
        }
    }
}

// --- Structure ---

#[derive(Clone, Debug, Deserialize)]
pub struct Structure {
    #[serde(default = "default_structure_enable")]
    pub enable: bool,
    #[serde(default = "default_structure_size")]
    pub size: [f32; 3],
    #[serde(default)]
    pub base_offset: f32,
    #[serde(default = "default_structure_salt")]
    pub seed_salt: u32,
    #[serde(default = "default_clear_vegetation")]
    pub clear_vegetation: bool,
    #[serde(default)]
    pub anchors: Vec<Anchor>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Anchor {
    pub name: String,
    #[serde(default)]
    pub offset: [f32; 3],
    /// Pinned anchors keep their authored height instead of following the ground.
    #[serde(default)]
    pub pinned: bool,
}

fn default_structure_enable() -> bool {
    true
}
fn default_structure_size() -> [f32; 3] {
    [6.0, 4.0, 6.0]
}
fn default_structure_salt() -> u32 {
    0x57_2C7
}
fn default_clear_vegetation() -> bool {
    true
}
impl Default for Structure {
    fn default() -> Self {
        Self {
            enable: default_structure_enable(),
            size: default_structure_size(),
            base_offset: 0.0,
            seed_salt: default_structure_salt(),
            clear_vegetation: default_clear_vegetation(),
            anchors: Vec::new(),
        }
    }
}

// --- Colour ---

#[derive(Clone, Debug, Deserialize)]
pub struct Colour {
    #[serde(default = "default_ramp_width")]
    pub ramp_width: usize,
    #[serde(default = "default_colour_keys")]
    pub keys: Vec<ColourKeyConfig>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct ColourKeyConfig {
    pub t: f32,
    pub rgba: [f32; 4],
}

fn default_ramp_width() -> usize {
    256
}
fn default_colour_keys() -> Vec<ColourKeyConfig> {
    vec![
        ColourKeyConfig {
            t: 0.0,
            rgba: [0.86, 0.80, 0.58, 1.0],
        },
        ColourKeyConfig {
            t: 0.25,
            rgba: [0.35, 0.62, 0.24, 1.0],
        },
        ColourKeyConfig {
            t: 0.7,
            rgba: [0.45, 0.42, 0.38, 1.0],
        },
        ColourKeyConfig {
            t: 1.0,
            rgba: [0.95, 0.96, 0.98, 1.0],
        },
    ]
}
impl Default for Colour {
    fn default() -> Self {
        Self {
            ramp_width: default_ramp_width(),
            keys: default_colour_keys(),
        }
    }
}

// --- Spawn ---

#[derive(Clone, Debug, Deserialize)]
pub struct Spawn {
    /// Height above the grid origin for the first-run spawn point.
    #[serde(default = "default_spawn_height")]
    pub height: f32,
}
fn default_spawn_height() -> f32 {
    10.0
}
impl Default for Spawn {
    fn default() -> Self {
        Self {
            height: default_spawn_height(),
        }
    }
}

impl GenConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.terrain.noise.validate("terrain.noise")?;
        let veg = &self.vegetation;
        veg.noise.density.validate("vegetation.noise.density")?;
        veg.noise.kind.validate("vegetation.noise.kind")?;
        veg.noise.cluster.validate("vegetation.noise.cluster")?;
        veg.noise.detail.validate("vegetation.noise.detail")?;
        if !veg.sample_distance.is_finite() {
            return Err(ConfigError::Invalid {
                field: "vegetation.sample_distance",
                reason: "must be finite".into(),
            });
        }
        if !veg.max_slope.is_finite() {
            return Err(ConfigError::Invalid {
                field: "vegetation.max_slope",
                reason: "must be finite".into(),
            });
        }
        for (field, value) in [
            ("vegetation.grass_density", veg.grass_density),
            ("vegetation.tree_density", veg.tree_density),
            ("vegetation.bush_density", veg.bush_density),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be within [0, 1], got {value}"),
                });
            }
        }
        if self.structure.size.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(ConfigError::Invalid {
                field: "structure.size",
                reason: format!("extents must be finite and >= 0, got {:?}", self.structure.size),
            });
        }
        for k in &self.colour.keys {
            if !(0.0..=1.0).contains(&k.t) {
                return Err(ConfigError::Invalid {
                    field: "colour.keys",
                    reason: format!("key position {} outside [0, 1]", k.t),
                });
            }
        }
        Ok(())
    }
}

pub fn parse_config(s: &str) -> Result<GenConfig, ConfigError> {
    let cfg: GenConfig = toml::from_str(s)?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_config_from_path(path: &Path) -> Result<GenConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&s)
}
