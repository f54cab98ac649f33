//! Elevation colour ramp baked into a 1D texture for the terrain shader.

use crate::config::Colour;
use crate::terrain::ElevationRange;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColourKey {
    pub t: f32,
    pub rgba: [f32; 4],
}

/// Piecewise-linear gradient over `[0, 1]`, keys sorted by `t`.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    keys: Vec<ColourKey>,
}

impl Gradient {
    pub fn new(mut keys: Vec<ColourKey>) -> Self {
        keys.sort_by(|a, b| a.t.total_cmp(&b.t));
        Self { keys }
    }

    pub fn from_config(cfg: &Colour) -> Self {
        Self::new(
            cfg.keys
                .iter()
                .map(|k| ColourKey { t: k.t, rgba: k.rgba })
                .collect(),
        )
    }

    #[inline]
    pub fn keys(&self) -> &[ColourKey] {
        &self.keys
    }

    /// Colour at `t`; values outside the key span take the nearest end key.
    /// An empty gradient is opaque black.
    pub fn evaluate(&self, t: f32) -> [f32; 4] {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return [0.0, 0.0, 0.0, 1.0];
        };
        if t <= first.t {
            return first.rgba;
        }
        if t >= last.t {
            return last.rgba;
        }
        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.t {
                let span = b.t - a.t;
                let f = if span > 0.0 { (t - a.t) / span } else { 1.0 };
                return lerp4(a.rgba, b.rgba, f);
            }
        }
        last.rgba
    }

    /// Samples the gradient at `width` evenly spaced points from 0 to 1.
    pub fn bake(&self, width: usize) -> Vec<[u8; 4]> {
        let denom = width.saturating_sub(1).max(1) as f32;
        (0..width)
            .map(|x| to_rgba8(self.evaluate(x as f32 / denom)))
            .collect()
    }
}

/// `(min, max, 0, 0)`; the shader normalizes heights with it.
pub fn elevation_uniform(range: ElevationRange) -> [f32; 4] {
    if range.is_empty() {
        return [0.0; 4];
    }
    [range.min, range.max, 0.0, 0.0]
}

fn lerp4(a: [f32; 4], b: [f32; 4], f: f32) -> [f32; 4] {
    std::array::from_fn(|i| a[i] + (b[i] - a[i]) * f)
}

fn to_rgba8(c: [f32; 4]) -> [u8; 4] {
    c.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bw() -> Gradient {
        Gradient::new(vec![
            ColourKey {
                t: 1.0,
                rgba: [1.0, 1.0, 1.0, 1.0],
            },
            ColourKey {
                t: 0.0,
                rgba: [0.0, 0.0, 0.0, 1.0],
            },
        ])
    }

    #[test]
    fn keys_are_sorted_and_midpoint_interpolates() {
        let g = bw();
        assert_eq!(g.keys()[0].t, 0.0);
        assert_eq!(g.evaluate(0.5), [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(g.evaluate(-3.0), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(g.evaluate(7.0), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn bake_endpoints_match_end_keys() {
        let g = Gradient::from_config(&Colour::default());
        let tex = g.bake(256);
        assert_eq!(tex.len(), 256);
        assert_eq!(tex[0], to_rgba8(g.keys()[0].rgba));
        assert_eq!(tex[255], to_rgba8(g.keys()[g.keys().len() - 1].rgba));
    }

    #[test]
    fn bake_degenerate_widths() {
        let g = bw();
        assert!(g.bake(0).is_empty());
        assert_eq!(g.bake(1), vec![[0, 0, 0, 255]]);
        assert_eq!(g.bake(2), vec![[0, 0, 0, 255], [255, 255, 255, 255]]);
    }

    #[test]
    fn empty_gradient_is_black() {
        assert_eq!(Gradient::new(Vec::new()).evaluate(0.3), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn uniform_carries_range() {
        let mut r = ElevationRange::EMPTY;
        assert_eq!(elevation_uniform(r), [0.0; 4]);
        r.add(-2.0);
        r.add(5.0);
        assert_eq!(elevation_uniform(r), [-2.0, 5.0, 0.0, 0.0]);
    }
}
