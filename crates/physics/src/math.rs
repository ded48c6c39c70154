//! Deterministic scalar helpers.
//!
//! Hardware trig can differ between x86, ARM and WASM. Terrain hashing feeds
//! `sin` straight into a 43758x amplifier, so even a one-ulp difference
//! changes the whole field. The software sine below gives identical bits
//! everywhere.

use std::f32::consts::PI;

const TWO_PI: f32 = 2.0 * PI;

/// Deterministic sine using Bhaskara I's approximation.
/// Input in radians, returns value in [-1, 1] (accurate to ~0.002).
#[inline]
pub fn sin_det(x: f32) -> f32 {
    // rem_euclid is exact in IEEE arithmetic, unlike a subtract loop
    // on large hash arguments
    let x = x.rem_euclid(TWO_PI);

    let (x, sign) = if x > PI { (x - PI, -1.0) } else { (x, 1.0) };

    // sin(x) ≈ 16x(π-x) / (5π² - 4x(π-x)) for x in [0, π]
    let numerator = 16.0 * x * (PI - x);
    let denominator = 5.0 * PI * PI - 4.0 * x * (PI - x);

    sign * numerator / denominator
}

/// Fractional part, always in [0, 1) (GLSL `fract`, not `f32::fract`).
#[inline]
pub fn fract(x: f32) -> f32 {
    let f = x - x.floor();
    // x - floor(x) can round up to exactly 1.0 for tiny negative x
    if f >= 1.0 {
        0.0
    } else {
        f
    }
}

/// Linear interpolation.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite easing `3t² - 2t³` without clamping; callers pass t in [0, 1].
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Move towards a target value at a maximum delta.
#[inline]
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sin_det_key_angles() {
        let eps = 0.01;

        assert!(sin_det(0.0).abs() < eps);
        assert!((sin_det(PI / 2.0) - 1.0).abs() < eps);
        assert!(sin_det(PI).abs() < eps);
        assert!((sin_det(3.0 * PI / 2.0) + 1.0).abs() < eps);
        assert!((sin_det(15f32.to_radians()) - 0.2588).abs() < eps);
    }

    #[test]
    fn test_sin_det_large_arguments() {
        // Hash arguments run into the thousands
        let x = 12.9898 * 117.0 + 78.233 * -43.0;
        let s = sin_det(x);
        assert!((-1.0..=1.0).contains(&s));
        assert_eq!(s.to_bits(), sin_det(x).to_bits());
    }

    #[test]
    fn test_fract_range() {
        assert_eq!(fract(2.25), 0.25);
        assert_eq!(fract(-0.25), 0.75);
        assert_eq!(fract(3.0), 0.0);
        assert!(fract(-1e-9) < 1.0);
    }

    #[test]
    fn test_smoothstep_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
    }

    #[test]
    fn test_move_towards() {
        assert_eq!(move_towards(0.0, 10.0, 3.0), 3.0);
        assert_eq!(move_towards(8.0, 10.0, 3.0), 10.0);
        assert_eq!(move_towards(10.0, 0.0, 3.0), 7.0);
    }
}
