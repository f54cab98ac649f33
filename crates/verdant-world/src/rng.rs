//! Stateless coordinate hashing used wherever placement needs a repeatable
//! random choice.

/// Scrambles a grid cell and a seed into 32 bits: each input is scaled by an
/// odd multiplier, XOR-combined, then run through an avalanche finalizer.
pub fn hash2(ix: i32, iz: i32, seed: u32) -> u32 {
    let cell = (ix as u32).wrapping_mul(0x85eb_ca6b) ^ (iz as u32).wrapping_mul(0xc2b2_ae35);
    avalanche(cell ^ seed.wrapping_mul(0x27d4_eb2d))
}

#[inline]
fn avalanche(mut h: u32) -> u32 {
    for (shift, mul) in [(16, 0x7feb_352d), (15, 0x846c_a68b)] {
        h ^= h >> shift;
        h = h.wrapping_mul(mul);
    }
    h ^ (h >> 16)
}

/// Uniform value in `[0, 1)` derived from a cell, a seed and a salt.
pub fn rand01(seed: u32, ix: i32, iz: i32, salt: u32) -> f32 {
    let h = hash2(ix, iz, (seed ^ salt).wrapping_add(0x9E37_79B9));
    ((h & 0x00FF_FFFF) as f32) / 16_777_216.0
}

/// Uniform value in `[min, max)`; collapses to the midpoint when the range is empty.
pub fn range_f32(seed: u32, ix: i32, iz: i32, salt: u32, min: f32, max: f32) -> f32 {
    if max <= min {
        return (min + max) * 0.5;
    }
    min + rand01(seed, ix, iz, salt) * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash2_spreads_neighbouring_cells() {
        assert_eq!(hash2(3, -4, 9), hash2(3, -4, 9));
        assert_ne!(hash2(0, 0, 1), hash2(1, 0, 1));
        assert_ne!(hash2(0, 0, 1), hash2(0, 1, 1));
        assert_ne!(hash2(0, 0, 1), hash2(0, 0, 2));
        // Flipping one input bit should flip many output bits
        let flipped = (hash2(10, 10, 7) ^ hash2(11, 10, 7)).count_ones();
        assert!(flipped >= 8, "only {flipped} bits changed");
    }

    #[test]
    fn rand01_is_repeatable_and_in_unit_range() {
        for i in -50..50 {
            let a = rand01(42, i, i * 3, 7);
            let b = rand01(42, i, i * 3, 7);
            assert_eq!(a.to_bits(), b.to_bits());
            assert!((0.0..1.0).contains(&a));
        }
    }

    #[test]
    fn salt_changes_the_stream() {
        let same = (0..64)
            .filter(|&i| rand01(1, i, 0, 1) == rand01(1, i, 0, 2))
            .count();
        assert!(same < 4);
    }

    #[test]
    fn range_collapses_when_inverted() {
        assert_eq!(range_f32(9, 0, 0, 0, 6.0, 4.0), 5.0);
        let v = range_f32(9, 3, 4, 0, 2.0, 8.0);
        assert!((2.0..8.0).contains(&v));
    }
}
