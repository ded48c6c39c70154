//! Obstacles and delivery markers placed on the field.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use skydrop_physics::{Solid, WorldConfig};

/// What occupies a placement cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Tree,
    House,
    Package,
    DeliveryZone,
}

/// One placed item. `position` is the ground point (x, z).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Vec2,
    /// Uniform scale for trees and houses, 1.0 for markers.
    pub scale_factor: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn new(position: Vec2, scale_factor: f32, kind: ObstacleKind) -> Self {
        Self {
            position,
            scale_factor,
            kind,
        }
    }

    /// Trees and houses block flight; markers do not.
    pub fn is_solid(&self) -> bool {
        matches!(self.kind, ObstacleKind::Tree | ObstacleKind::House)
    }

    /// Ground position lifted to height `y`.
    #[inline]
    pub fn at_height(&self, y: f32) -> Vec3 {
        Vec3::new(self.position.x, y, self.position.y)
    }

    /// The collidable parts of a tree or house.
    ///
    /// A tree is a crown cone resting on a trunk cylinder; the trunk scales,
    /// the crown only rides on top of it. A house is a scaled cube with a
    /// prism roof. Markers have no solid parts.
    pub fn solids(&self, world: &WorldConfig) -> Option<[Solid; 2]> {
        let s = self.scale_factor;
        match self.kind {
            ObstacleKind::Tree => {
                let trunk_top = world.trunk_height * s;
                Some([
                    Solid::Cone {
                        base: self.at_height(trunk_top),
                        radius: world.crown_radius,
                        height: world.crown_height,
                    },
                    Solid::Cylinder {
                        base: self.at_height(0.0),
                        radius: world.trunk_radius,
                        height: trunk_top,
                    },
                ])
            }
            ObstacleKind::House => Some([
                Solid::Cube {
                    base: self.at_height(0.0),
                    side: world.house_side,
                    height_scale: s,
                },
                Solid::Prism {
                    base: self.at_height(world.house_side * s),
                    side: world.house_side,
                    height: world.roof_height * s,
                },
            ]),
            ObstacleKind::Package | ObstacleKind::DeliveryZone => None,
        }
    }

    /// Highest point of the obstacle, or the marker height for markers.
    pub fn top(&self, world: &WorldConfig) -> f32 {
        match self.solids(world) {
            Some(parts) => parts.iter().map(Solid::top).fold(0.0, f32::max),
            None => world.marker_height,
        }
    }
}

/// The cube a resting package occupies.
pub fn package_solid(position: Vec2, world: &WorldConfig) -> Solid {
    Solid::Cube {
        base: Vec3::new(position.x, world.marker_height, position.y),
        side: world.package_side,
        height_scale: 1.0,
    }
}
