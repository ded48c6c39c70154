//! Obstacle primitives and their collision predicates.
//!
//! Every obstacle part rests on a base point (`base`) and extends upward.
//! Horizontal coordinates of the base are the shape's vertical axis.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::volume::Aabb;

/// A single collidable obstacle part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Solid {
    /// Square box of side `side`, `side * height_scale` tall.
    ///
    /// House bodies and packages.
    Cube {
        base: Vec3,
        side: f32,
        height_scale: f32,
    },

    /// Square roof tapering from `side` at its base to a point at `height`.
    Prism { base: Vec3, side: f32, height: f32 },

    /// Upright cylinder (tree trunk).
    Cylinder { base: Vec3, radius: f32, height: f32 },

    /// Upright cone tapering to a point at `height` (tree crown).
    Cone { base: Vec3, radius: f32, height: f32 },
}

impl Solid {
    /// Test the drone's box against this part.
    pub fn collides(&self, vehicle: &Aabb) -> bool {
        match *self {
            Solid::Cube {
                base,
                side,
                height_scale,
            } => cube_collides(vehicle, base, side, height_scale),
            Solid::Prism { base, side, height } => prism_collides(vehicle, base, side, height),
            Solid::Cylinder {
                base,
                radius,
                height,
            } => cylinder_collides(vehicle, base, radius, height),
            Solid::Cone {
                base,
                radius,
                height,
            } => cone_collides(vehicle, base, radius, height),
        }
    }

    /// Highest point of the part.
    pub fn top(&self) -> f32 {
        match *self {
            Solid::Cube {
                base,
                side,
                height_scale,
            } => base.y + side * height_scale,
            Solid::Prism { base, height, .. }
            | Solid::Cylinder { base, height, .. }
            | Solid::Cone { base, height, .. } => base.y + height,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Solid::Cube { .. } => "cube",
            Solid::Prism { .. } => "prism",
            Solid::Cylinder { .. } => "cylinder",
            Solid::Cone { .. } => "cone",
        }
    }
}

/// Half-width (or radius) of a tapering shape at `height_into` above its base.
///
/// Falls linearly from `base_extent` at the base to exactly zero at the apex
/// and stays zero above it.
#[inline]
pub fn taper(base_extent: f32, height_into: f32, height: f32) -> f32 {
    let t = (height_into / height).clamp(0.0, 1.0);
    base_extent * (1.0 - t)
}

/// Box against a square cube. Vertical span is `[base.y, base.y + side * height_scale]`.
pub fn cube_collides(vehicle: &Aabb, base: Vec3, side: f32, height_scale: f32) -> bool {
    let half = side / 2.0;
    let cube = Aabb::new(
        Vec3::new(base.x - half, base.y, base.z - half),
        Vec3::new(base.x + half, base.y + side * height_scale, base.z + half),
    );
    vehicle.overlaps(&cube)
}

/// Box against a tapering square roof.
///
/// The roof is tested at the lowest height where the two vertical spans
/// overlap, which is where its cross-section is widest. This is stricter than
/// sampling at the box's top, where the cross-section is narrower.
pub fn prism_collides(vehicle: &Aabb, base: Vec3, side: f32, height: f32) -> bool {
    if !vehicle.overlaps_vertically(base.y, base.y + height) {
        return false;
    }

    let contact_y = vehicle.min.y.max(base.y);
    let half = taper(side / 2.0, contact_y - base.y, height);

    let roof_min = Vec2::new(base.x - half, base.z - half);
    let roof_max = Vec2::new(base.x + half, base.z + half);

    vehicle.footprint_min().cmple(roof_max).all() && vehicle.footprint_max().cmpge(roof_min).all()
}

/// Box against an upright cylinder.
pub fn cylinder_collides(vehicle: &Aabb, base: Vec3, radius: f32, height: f32) -> bool {
    if !vehicle.overlaps_vertically(base.y, base.y + height) {
        return false;
    }

    footprint_reaches(vehicle, Vec2::new(base.x, base.z), radius)
}

/// Box against an upright cone, radius shrinking to zero at the apex.
///
/// Like the roof, the cone is tested at its widest overlapping section.
pub fn cone_collides(vehicle: &Aabb, base: Vec3, radius: f32, height: f32) -> bool {
    if !vehicle.overlaps_vertically(base.y, base.y + height) {
        return false;
    }

    let contact_y = vehicle.min.y.max(base.y);
    let current = taper(radius, contact_y - base.y, height);

    footprint_reaches(vehicle, Vec2::new(base.x, base.z), current)
}

/// True when the footprint's nearest point to `axis` lies within `radius`.
#[inline]
fn footprint_reaches(vehicle: &Aabb, axis: Vec2, radius: f32) -> bool {
    let closest = vehicle.closest_footprint_point(axis);
    closest.distance_squared(axis) <= radius * radius
}

/// True when the drone's footprint lies entirely inside a square of `side`
/// centered on `center`. Touching the edge still counts as inside.
pub fn footprint_within_square(vehicle: &Aabb, center: Vec2, side: f32) -> bool {
    let half = side / 2.0;
    let zone_min = center - Vec2::splat(half);
    let zone_max = center + Vec2::splat(half);

    zone_min.cmple(vehicle.footprint_min()).all() && vehicle.footprint_max().cmple(zone_max).all()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box(center: Vec3) -> Aabb {
        Aabb::from_center(center, Vec3::splat(0.5))
    }

    #[test]
    fn cube_reflexive() {
        // A unit cube based at y = -0.5 occupies exactly the unit box
        let vehicle = unit_box(Vec3::ZERO);
        assert!(cube_collides(&vehicle, Vec3::new(0.0, -0.5, 0.0), 1.0, 1.0));
    }

    #[test]
    fn cube_separated_on_single_axis() {
        let base = Vec3::new(0.0, -0.5, 0.0);
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            // sum of half-extents is 1.0
            let vehicle = unit_box(axis * 1.001);
            assert!(!cube_collides(&vehicle, base, 1.0, 1.0), "axis {axis}");
            let vehicle = unit_box(axis * -1.001);
            assert!(!cube_collides(&vehicle, base, 1.0, 1.0), "axis -{axis}");
        }
    }

    #[test]
    fn cube_corner_touch_collides() {
        let vehicle = unit_box(Vec3::new(1.0, 1.0, 1.0));
        assert!(cube_collides(&vehicle, Vec3::new(0.0, -0.5, 0.0), 1.0, 1.0));
    }

    #[test]
    fn cube_height_scale() {
        let vehicle = unit_box(Vec3::new(0.0, 3.0, 0.0));
        assert!(!cube_collides(&vehicle, Vec3::ZERO, 2.0, 1.0));
        assert!(cube_collides(&vehicle, Vec3::ZERO, 2.0, 1.5));
    }

    #[test]
    fn taper_zero_at_apex() {
        assert_eq!(taper(1.0, 1.25, 1.25), 0.0);
        assert_eq!(taper(1.1, 3.0, 3.0), 0.0);
        assert_eq!(taper(1.1, 4.0, 3.0), 0.0);
        assert_eq!(taper(2.0, 0.0, 3.0), 2.0);
        assert!((taper(2.0, 1.5, 3.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn prism_tapers_with_height() {
        let base = Vec3::new(0.0, 2.0, 0.0);
        // At the roof base, a box offset 0.9 sideways still touches the 1.0 half-width
        let low = Aabb::from_center(Vec3::new(1.4, 2.1, 0.0), Vec3::new(0.5, 0.1, 0.5));
        assert!(prism_collides(&low, base, 2.0, 1.0));

        // Near the apex the roof is too narrow to reach the same offset
        let high = low.translated(Vec3::new(0.0, 0.7, 0.0));
        assert!(!prism_collides(&high, base, 2.0, 1.0));
    }

    #[test]
    fn prism_apex_has_no_width() {
        let base = Vec3::new(0.0, 2.0, 0.0);
        // Box resting on the apex height, beside the apex axis
        let vehicle = Aabb::new(Vec3::new(0.05, 3.0, -0.5), Vec3::new(1.0, 3.5, 0.5));
        assert!(!prism_collides(&vehicle, base, 2.0, 1.0));
    }

    #[test]
    fn prism_tested_at_lowest_overlap() {
        let base = Vec3::new(0.0, 2.0, 0.0);
        // Box reaches above the apex but its bottom sits where the roof is 0.9 wide
        let vehicle = Aabb::new(Vec3::new(0.6, 2.1, -0.5), Vec3::new(1.6, 4.0, 0.5));
        assert!(prism_collides(&vehicle, base, 2.0, 1.0));
        assert!(cone_collides(&vehicle, base, 1.0, 1.0));
    }

    #[test]
    fn prism_requires_vertical_overlap() {
        let vehicle = unit_box(Vec3::new(0.0, 5.0, 0.0));
        assert!(!prism_collides(&vehicle, Vec3::ZERO, 2.0, 1.0));
    }

    #[test]
    fn cylinder_nearest_point() {
        let base = Vec3::ZERO;
        // Footprint edge at x = 0.9, trunk radius 0.4 centered at x = 1.2
        let vehicle = Aabb::new(Vec3::new(-0.9, 0.5, -0.9), Vec3::new(0.9, 1.0, 0.9));
        assert!(cylinder_collides(&vehicle, base + Vec3::new(1.2, 0.0, 0.0), 0.4, 2.0));
        assert!(!cylinder_collides(&vehicle, base + Vec3::new(1.5, 0.0, 0.0), 0.4, 2.0));
        // Diagonal: corner (0.9, 0.9) to (1.2, 1.2) is ~0.42 away
        assert!(!cylinder_collides(&vehicle, base + Vec3::new(1.2, 0.0, 1.2), 0.4, 2.0));
        assert!(cylinder_collides(&vehicle, base + Vec3::new(1.1, 0.0, 1.1), 0.4, 2.0));
    }

    #[test]
    fn cylinder_above_trunk() {
        let vehicle = Aabb::new(Vec3::new(-0.5, 2.5, -0.5), Vec3::new(0.5, 3.0, 0.5));
        assert!(!cylinder_collides(&vehicle, Vec3::ZERO, 0.4, 2.0));
    }

    #[test]
    fn cone_radius_shrinks() {
        let base = Vec3::new(0.0, 2.0, 0.0);
        // Footprint edge 1.0 from the axis
        let at_base = Aabb::new(Vec3::new(1.0, 2.0, -0.5), Vec3::new(2.0, 2.3, 0.5));
        assert!(cone_collides(&at_base, base, 1.1, 3.0));

        let halfway = at_base.translated(Vec3::new(0.0, 1.5, 0.0));
        assert!(!cone_collides(&halfway, base, 1.1, 3.0));
    }

    #[test]
    fn cone_apex_has_no_radius() {
        let base = Vec3::new(0.0, 2.0, 0.0);
        let vehicle = Aabb::new(Vec3::new(0.01, 5.0, -0.5), Vec3::new(1.0, 5.3, 0.5));
        assert!(!cone_collides(&vehicle, base, 1.1, 3.0));
    }

    #[test]
    fn solid_dispatch_and_top() {
        let solid = Solid::Cube {
            base: Vec3::ZERO,
            side: 2.0,
            height_scale: 1.25,
        };
        assert_eq!(solid.top(), 2.5);
        assert_eq!(solid.name(), "cube");
        assert!(solid.collides(&unit_box(Vec3::new(0.0, 2.9, 0.0))));

        let cone = Solid::Cone {
            base: Vec3::new(0.0, 2.0, 0.0),
            radius: 1.0,
            height: 3.0,
        };
        assert_eq!(cone.top(), 5.0);
    }

    #[test]
    fn containment_centered() {
        // Vehicle footprint half the zone side
        let vehicle = Aabb::from_center(Vec3::new(3.0, 1.0, -2.0), Vec3::new(1.0, 0.2, 1.0));
        assert!(footprint_within_square(&vehicle, Vec2::new(3.0, -2.0), 4.0));
    }

    #[test]
    fn containment_offset_limit() {
        let zone = Vec2::ZERO;
        let half = Vec3::new(1.0, 0.2, 1.0);
        // (zone_side - vehicle_side) / 2 = 1.0
        let inside = Aabb::from_center(Vec3::new(0.99, 1.0, 0.0), half);
        let outside = Aabb::from_center(Vec3::new(1.01, 1.0, 0.0), half);
        let outside_z = Aabb::from_center(Vec3::new(0.0, 1.0, -1.01), half);
        assert!(footprint_within_square(&inside, zone, 4.0));
        assert!(!footprint_within_square(&outside, zone, 4.0));
        assert!(!footprint_within_square(&outside_z, zone, 4.0));
    }
}
