//! World geometry constants.
//!
//! All obstacle and vehicle dimensions are grouped here. Most of them scale
//! with the field so a larger field keeps the same proportions.

use serde::{Deserialize, Serialize};

use crate::collision::FieldBounds;

/// Dimensions of the field, the vehicle and every obstacle primitive.
///
/// Units are world meters. The field is centered on the origin and spans
/// `[-field_x/2, field_x/2] × [-field_z/2, field_z/2]` on the ground plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    // ========================================================================
    // Field
    // ========================================================================
    /// Field extent along X.
    pub field_x: f32,

    /// Field extent along Z.
    pub field_z: f32,

    /// Scale applied to ground coordinates before the terrain noise lookup.
    pub noise_frequency: f32,

    // ========================================================================
    // Vehicle
    // ========================================================================
    /// Length of each body arm.
    pub body_x: f32,

    /// Body thickness.
    pub body_y: f32,

    /// Body arm width.
    pub body_z: f32,

    /// Propeller blade span.
    pub propeller_x: f32,

    /// Propeller blade thickness.
    pub propeller_y: f32,

    // ========================================================================
    // Trees
    // ========================================================================
    /// Trunk height at scale 1.
    pub trunk_height: f32,

    pub trunk_radius: f32,

    /// Crown height. Crowns are not scaled, only lifted by the trunk.
    pub crown_height: f32,

    /// Crown radius at its base.
    pub crown_radius: f32,

    // ========================================================================
    // Houses
    // ========================================================================
    /// Side of the square house body.
    pub house_side: f32,

    /// Roof height at scale 1.
    pub roof_height: f32,

    // ========================================================================
    // Deliveries
    // ========================================================================
    /// Side of a package cube.
    pub package_side: f32,

    /// Side of the square delivery footprint the vehicle must fit inside.
    pub zone_side: f32,

    /// Height of the package resting surface and zone markers.
    pub marker_height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::for_field(50.0, 50.0)
    }
}

impl WorldConfig {
    /// Build a config whose obstacle and vehicle sizes are proportional to
    /// the field extents.
    pub fn for_field(field_x: f32, field_z: f32) -> Self {
        let package_side = field_x / 100.0;

        Self {
            field_x,
            field_z,
            noise_frequency: 5.0,

            body_x: field_x / 30.0,
            body_y: 0.15,
            body_z: field_z / 400.0,
            propeller_x: field_x / 100.0,
            propeller_y: 0.05,

            trunk_height: 2.0,
            trunk_radius: field_x / 125.0,
            crown_height: 3.0,
            crown_radius: field_x / 45.0,

            house_side: field_x / 25.0,
            roof_height: 1.25,

            package_side,
            zone_side: 8.0 * package_side,
            marker_height: 1.0,
        }
    }

    /// Half-width of the vehicle's horizontal footprint (propeller tip to
    /// propeller tip, measured along either ground axis).
    #[inline]
    pub fn vehicle_half_extent(&self) -> f32 {
        (self.body_x - self.body_z + self.propeller_x) / 2.0
    }

    /// Height of the untilted vehicle from skids to propeller tops.
    #[inline]
    pub fn vehicle_height(&self) -> f32 {
        2.0 * self.body_y + self.propeller_y
    }

    /// Radius of the circle enclosing the widest obstacle footprint.
    ///
    /// A house body is the widest primitive; its diagonal half-length bounds
    /// every footprint regardless of orientation.
    #[inline]
    pub fn max_obstacle_radius(&self) -> f32 {
        self.house_side * std::f32::consts::SQRT_2 / 2.0
    }

    /// Height of the tallest tree for a given trunk scale.
    #[inline]
    pub fn tree_height(&self, scale: f32) -> f32 {
        self.trunk_height * scale + self.crown_height
    }

    /// Height of the tallest house for a given scale.
    #[inline]
    pub fn house_height(&self, scale: f32) -> f32 {
        (self.house_side + self.roof_height) * scale
    }

    /// The playable rectangle on the ground plane.
    pub fn field_bounds(&self) -> FieldBounds {
        FieldBounds::centered(self.field_x, self.field_z)
    }
}
