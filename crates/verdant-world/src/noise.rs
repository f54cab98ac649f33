use fastnoise_lite::{
    CellularDistanceFunction, CellularReturnType, FastNoiseLite, FractalType, NoiseType,
};

use crate::config::{CellularDistance, CellularReturn, FractalKind, NoiseConfig, NoiseKind};

/// Deterministic 2D noise sampler built from a [`NoiseConfig`].
///
/// Sampling has no hidden state: the same configuration and coordinates always
/// produce the same bits.
pub struct NoiseField {
    noise: FastNoiseLite,
    amplitude: f32,
    config: NoiseConfig,
}

impl NoiseField {
    pub fn new(config: &NoiseConfig) -> Self {
        Self::with_seed(config, config.seed)
    }

    /// Builds the field with `seed` in place of `config.seed`.
    pub fn with_seed(config: &NoiseConfig, seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(match config.kind {
            NoiseKind::Perlin => NoiseType::Perlin,
            NoiseKind::OpenSimplex2 => NoiseType::OpenSimplex2,
            NoiseKind::Cellular => NoiseType::Cellular,
        }));
        noise.set_frequency(Some(config.frequency));
        if let Some(fractal) = &config.fractal {
            noise.set_fractal_type(Some(match fractal.kind {
                FractalKind::Fbm => FractalType::FBm,
            }));
            noise.set_fractal_octaves(Some(fractal.octaves));
            noise.set_fractal_lacunarity(Some(fractal.lacunarity));
            noise.set_fractal_gain(Some(fractal.gain));
        }
        if let Some(cellular) = &config.cellular {
            noise.set_cellular_distance_function(Some(match cellular.distance {
                CellularDistance::Euclidean => CellularDistanceFunction::Euclidean,
                CellularDistance::EuclideanSq => CellularDistanceFunction::EuclideanSq,
                CellularDistance::Manhattan => CellularDistanceFunction::Manhattan,
                CellularDistance::Hybrid => CellularDistanceFunction::Hybrid,
            }));
            noise.set_cellular_return_type(Some(match cellular.return_type {
                CellularReturn::CellValue => CellularReturnType::CellValue,
                CellularReturn::Distance => CellularReturnType::Distance,
                CellularReturn::Distance2 => CellularReturnType::Distance2,
                CellularReturn::Distance2Add => CellularReturnType::Distance2Add,
                CellularReturn::Distance2Sub => CellularReturnType::Distance2Sub,
                CellularReturn::Distance2Mul => CellularReturnType::Distance2Mul,
                CellularReturn::Distance2Div => CellularReturnType::Distance2Div,
            }));
        }
        let mut config = config.clone();
        config.seed = seed;
        Self {
            noise,
            amplitude: config.amplitude,
            config,
        }
    }

    /// Noise value clamped to `[-1, 1]`.
    #[inline]
    pub fn sample(&self, x: f32, z: f32) -> f32 {
        self.noise.get_noise_2d(x, z).clamp(-1.0, 1.0)
    }

    /// Raw noise scaled by the configured amplitude; fractal sums may leave `[-1, 1]`.
    #[inline]
    pub fn sample_unclamped(&self, x: f32, z: f32) -> f32 {
        self.noise.get_noise_2d(x, z) * self.amplitude
    }

    #[inline]
    pub fn seed(&self) -> i32 {
        self.config.seed
    }

    #[inline]
    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField")
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Cellular, Fractal};

    fn fbm(seed: i32) -> NoiseConfig {
        NoiseConfig {
            seed,
            kind: NoiseKind::OpenSimplex2,
            frequency: 0.15,
            amplitude: 3.0,
            fractal: Some(Fractal {
                octaves: 3,
                ..Fractal::default()
            }),
            cellular: None,
        }
    }

    #[test]
    fn identical_config_is_bit_identical() {
        let a = NoiseField::new(&fbm(99));
        let b = NoiseField::new(&fbm(99));
        for i in 0..64 {
            let (x, z) = (i as f32 * 1.7, i as f32 * -0.3);
            assert_eq!(a.sample(x, z).to_bits(), b.sample(x, z).to_bits());
            assert_eq!(
                a.sample_unclamped(x, z).to_bits(),
                b.sample_unclamped(x, z).to_bits()
            );
        }
    }

    #[test]
    fn sampling_order_does_not_matter() {
        let f = NoiseField::new(&fbm(5));
        let first = f.sample(12.0, 4.0);
        for i in 0..32 {
            let _ = f.sample(i as f32, -(i as f32));
        }
        assert_eq!(first.to_bits(), f.sample(12.0, 4.0).to_bits());
    }

    #[test]
    fn clamped_sample_stays_in_unit_range() {
        let f = NoiseField::new(&fbm(3));
        for i in 0..400 {
            let v = f.sample((i % 20) as f32, (i / 20) as f32);
            assert!((-1.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn unclamped_sample_applies_amplitude() {
        let f = NoiseField::new(&fbm(11));
        let mut unit = fbm(11);
        unit.amplitude = 1.0;
        let g = NoiseField::new(&unit);
        for i in 0..16 {
            let (x, z) = (i as f32, 2.0 * i as f32);
            let expect = g.sample_unclamped(x, z) * 3.0;
            assert_eq!(f.sample_unclamped(x, z).to_bits(), expect.to_bits());
        }
    }

    #[test]
    fn with_seed_overrides_config_seed() {
        let cfg = fbm(1);
        let f = NoiseField::with_seed(&cfg, 77);
        assert_eq!(f.seed(), 77);
        assert_eq!(f.config().frequency, cfg.frequency);
        let g = NoiseField::new(&fbm(77));
        assert_eq!(f.sample(3.5, 8.25).to_bits(), g.sample(3.5, 8.25).to_bits());
    }

    #[test]
    fn cellular_field_is_deterministic() {
        let cfg = NoiseConfig {
            seed: 4,
            kind: NoiseKind::Cellular,
            frequency: 0.25,
            amplitude: 1.0,
            fractal: None,
            cellular: Some(Cellular {
                distance: CellularDistance::Euclidean,
                return_type: CellularReturn::Distance2Add,
            }),
        };
        let a = NoiseField::new(&cfg);
        let b = NoiseField::new(&cfg);
        for i in 0..32 {
            let (x, z) = (i as f32 * 0.9, i as f32 * 1.1);
            assert_eq!(a.sample(x, z).to_bits(), b.sample(x, z).to_bits());
        }
    }
}
