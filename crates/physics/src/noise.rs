//! Smoothed value noise for the terrain height field.
//!
//! Heights are produced by hashing the four integer lattice corners around a
//! point and blending them with Hermite easing. The result lies in [0, 1) and
//! is a pure function of `(seed, position)`.

use glam::Vec2;

use crate::math::{fract, lerp, sin_det, smoothstep};

/// Dot-product axis for the lattice hash.
const HASH_AXIS: Vec2 = Vec2::new(12.9898, 78.233);

/// Amplifier that scatters the sine output across the unit interval.
const HASH_GAIN: f32 = 43758.547;

/// Pseudo-random value in [0, 1) for an integer lattice corner.
#[inline]
pub fn lattice_hash(corner: Vec2, seed: f32) -> f32 {
    fract(sin_det(corner.dot(HASH_AXIS)) * HASH_GAIN + seed)
}

/// Sample the value noise at a continuous point.
pub fn value_noise(point: Vec2, seed: f32) -> f32 {
    let cell = point.floor();
    let local = point - cell;

    let a = lattice_hash(cell, seed);
    let b = lattice_hash(cell + Vec2::X, seed);
    let c = lattice_hash(cell + Vec2::Y, seed);
    let d = lattice_hash(cell + Vec2::ONE, seed);

    let ux = smoothstep(local.x);
    let uy = smoothstep(local.y);

    lerp(a, b, ux) + (c - a) * uy * (1.0 - ux) + (d - b) * ux * uy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_same_input() {
        for i in 0..200 {
            let p = Vec2::new(i as f32 * 0.37 - 40.0, i as f32 * -0.91 + 25.0);
            let first = value_noise(p, 1.25);
            let second = value_noise(p, 1.25);
            assert_eq!(first.to_bits(), second.to_bits());
        }
    }

    #[test]
    fn range_is_unit_interval() {
        for i in 0..500 {
            let p = Vec2::new(i as f32 * 0.173, (i * 7 % 113) as f32 * 0.29 - 16.0);
            let h = value_noise(p, 0.8);
            assert!((0.0..=1.0).contains(&h), "height {h} at {p}");
        }
    }

    #[test]
    fn lattice_points_match_hash() {
        let corner = Vec2::new(3.0, -7.0);
        assert_eq!(value_noise(corner, 0.5), lattice_hash(corner, 0.5));
    }

    #[test]
    fn seed_changes_field() {
        let p = Vec2::new(12.3, 4.56);
        assert_ne!(value_noise(p, 0.25), value_noise(p, 1.75));
    }

    #[test]
    fn continuous_across_cells() {
        let seed = 1.1;
        let left = value_noise(Vec2::new(4.0 - 1e-4, 2.5), seed);
        let right = value_noise(Vec2::new(4.0, 2.5), seed);
        assert!((left - right).abs() < 1e-2);
    }
}
