//! The drone's bounding volume.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::WorldConfig;

/// Maximum roll or pitch angle the drone reaches on a single axis.
const SINGLE_AXIS_TILT: f32 = 15.0 * std::f32::consts::PI / 180.0;

/// Combined tilt when pitch and roll are both at their limit.
const DUAL_AXIS_TILT: f32 = SINGLE_AXIS_TILT * std::f32::consts::SQRT_2;

/// How many control axes are currently deflected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TiltLevel {
    /// Level flight, no pitch or roll input.
    #[default]
    Level,
    /// Either pitch or roll is active.
    Single,
    /// Pitch and roll are active together.
    Dual,
}

impl TiltLevel {
    /// Classify from the active control axes.
    pub fn from_axes(pitching: bool, rolling: bool) -> Self {
        match (pitching, rolling) {
            (false, false) => Self::Level,
            (true, true) => Self::Dual,
            _ => Self::Single,
        }
    }

    /// Body tilt angle in radians for this level.
    pub fn angle(self) -> f32 {
        match self {
            Self::Level => 0.0,
            Self::Single => SINGLE_AXIS_TILT,
            Self::Dual => DUAL_AXIS_TILT,
        }
    }
}

/// Whether a package hangs beneath the drone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Payload {
    #[default]
    Empty,
    Attached,
}

/// Axis-aligned box, inclusive on every face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box from a center point and half-size.
    pub fn from_center(center: Vec3, half_size: Vec3) -> Self {
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// Inclusive overlap on all three axes; touching faces count.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Inclusive overlap of the vertical span with `[bottom, top]`.
    #[inline]
    pub fn overlaps_vertically(&self, bottom: f32, top: f32) -> bool {
        self.min.y <= top && self.max.y >= bottom
    }

    /// Ground-plane minimum corner as (x, z).
    #[inline]
    pub fn footprint_min(&self) -> Vec2 {
        Vec2::new(self.min.x, self.min.z)
    }

    /// Ground-plane maximum corner as (x, z).
    #[inline]
    pub fn footprint_max(&self) -> Vec2 {
        Vec2::new(self.max.x, self.max.z)
    }

    #[inline]
    pub fn footprint_center(&self) -> Vec2 {
        (self.footprint_min() + self.footprint_max()) * 0.5
    }

    /// The four ground-plane corners of the footprint.
    pub fn footprint_corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.min.x, self.min.z),
            Vec2::new(self.min.x, self.max.z),
            Vec2::new(self.max.x, self.min.z),
            Vec2::new(self.max.x, self.max.z),
        ]
    }

    /// Nearest footprint point to a ground-plane point.
    #[inline]
    pub fn closest_footprint_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.footprint_min(), self.footprint_max())
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// Bounding box of the drone whose hub sits at `center`.
///
/// The footprint half-width is fixed by the arm and propeller geometry. In
/// level flight the box spans the full body height `H` above the hub. A
/// tilted level keeps the same vertical center and scales the half-height to
/// `(H / 2) * (1 - sin(angle))`, so higher tilt levels always nest inside
/// lower ones. A carried package extends the bottom by one package side.
pub fn vehicle_aabb(center: Vec3, tilt: TiltLevel, payload: Payload, world: &WorldConfig) -> Aabb {
    let half = world.vehicle_half_extent();
    let body_height = world.vehicle_height();

    let half_height = match tilt {
        TiltLevel::Level => body_height / 2.0,
        tilted => (body_height / 2.0) * (1.0 - tilted.angle().sin()),
    };

    let mid_y = center.y + body_height / 2.0;
    let mut min = Vec3::new(center.x - half, mid_y - half_height, center.z - half);
    let max = Vec3::new(center.x + half, mid_y + half_height, center.z + half);

    if tilt == TiltLevel::Level {
        // keep the level-flight bottom exactly on the hub
        min.y = center.y;
    }

    if payload == Payload::Attached {
        min.y -= world.package_side;
    }

    Aabb { min, max }
}
