//! Field boundary and terrain clearance.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::volume::Aabb;
use crate::noise::value_noise;

/// Rectangular playable area on the ground plane, stored as (x, z).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl FieldBounds {
    pub const fn new(min_x: f32, min_z: f32, max_x: f32, max_z: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_z),
            max: Vec2::new(max_x, max_z),
        }
    }

    /// Bounds of a field of the given extents centered on the origin.
    pub fn centered(extent_x: f32, extent_z: f32) -> Self {
        Self::new(-extent_x / 2.0, -extent_z / 2.0, extent_x / 2.0, extent_z / 2.0)
    }

    /// Check if a ground point is within bounds.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if a box's whole footprint is within bounds.
    pub fn contains_footprint(&self, aabb: &Aabb) -> bool {
        self.contains(aabb.footprint_min()) && self.contains(aabb.footprint_max())
    }

    /// Clamp a ground point with padding so a footprint of `half` stays inside.
    pub fn clamp_with_margin(&self, point: Vec2, half: f32) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.min.x + half, self.max.x - half),
            point.y.clamp(self.min.y + half, self.max.y - half),
        )
    }
}

/// What stopped a box at ground level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GroundContact {
    /// Part of the footprint left the field.
    OutOfBounds,
    /// The box dips below the highest terrain sample under it.
    Terrain { peak: f32 },
}

/// Seeded rolling terrain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainField {
    /// Episode seed, added to every lattice hash.
    pub seed: f32,
    /// Ground coordinates are multiplied by this before the noise lookup.
    pub frequency: f32,
}

impl TerrainField {
    pub const fn new(seed: f32, frequency: f32) -> Self {
        Self { seed, frequency }
    }

    /// Terrain height at a ground point.
    #[inline]
    pub fn height_at(&self, ground: Vec2) -> f32 {
        value_noise(ground * self.frequency, self.seed)
    }

    /// Highest terrain sample among the footprint's corners and center.
    ///
    /// A finite body must clear the highest nearby point, not just the one
    /// straight below its hub.
    pub fn peak_under(&self, aabb: &Aabb) -> f32 {
        aabb.footprint_corners()
            .into_iter()
            .chain(std::iter::once(aabb.footprint_center()))
            .map(|p| self.height_at(p))
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Ground test: leaving the field counts as a collision before any
    /// terrain is sampled.
    pub fn contact(&self, aabb: &Aabb, bounds: &FieldBounds) -> Option<GroundContact> {
        if !bounds.contains_footprint(aabb) {
            return Some(GroundContact::OutOfBounds);
        }

        let peak = self.peak_under(aabb);
        if aabb.min.y < peak {
            Some(GroundContact::Terrain { peak })
        } else {
            None
        }
    }

    /// Boolean form of [`TerrainField::contact`].
    #[inline]
    pub fn collides(&self, aabb: &Aabb, bounds: &FieldBounds) -> bool {
        self.contact(aabb, bounds).is_some()
    }
}
