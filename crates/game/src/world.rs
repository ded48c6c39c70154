//! The per-step collision battery.
//!
//! A proposed drone position is tested, in order, against the active
//! package, the field boundary and terrain, and then every tree and house in
//! layout order. The first hit vetoes the move.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use skydrop_physics::{
    vehicle_aabb, FieldBounds, GroundContact, TerrainField, TiltLevel, WorldConfig,
};

use crate::error::Result;
use crate::layout::Layout;
use crate::obstacle::{package_solid, ObstacleKind};
use crate::task::{TaskState, TaskStatus};

/// Everything a proposed move is tested against during one episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub config: WorldConfig,
    pub layout: Layout,
    pub terrain: TerrainField,
    pub bounds: FieldBounds,
}

impl World {
    pub fn new(config: WorldConfig, layout: Layout, terrain_seed: f32) -> Self {
        let terrain = TerrainField::new(terrain_seed, config.noise_frequency);
        let bounds = config.field_bounds();
        Self {
            config,
            layout,
            terrain,
            bounds,
        }
    }
}

/// What vetoed a move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Blocker {
    /// The active package; the task is now `Colliding`.
    Package { index: usize },
    Ground(GroundContact),
    /// A tree or house part.
    Obstacle {
        index: usize,
        kind: ObstacleKind,
        part: &'static str,
    },
}

/// Verdict on one proposed position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    pub proposed: Vec3,
    /// Task state after the package test, whether or not the move stands.
    pub task: TaskState,
    pub blocker: Option<Blocker>,
}

impl MoveOutcome {
    #[inline]
    pub fn accepted(&self) -> bool {
        self.blocker.is_none()
    }

    /// The position the drone ends up at.
    pub fn resolve(&self, current: Vec3) -> Vec3 {
        if self.accepted() {
            self.proposed
        } else {
            current
        }
    }

    fn blocked(proposed: Vec3, task: TaskState, blocker: Blocker) -> Self {
        tracing::debug!(?blocker, x = proposed.x, y = proposed.y, z = proposed.z, "move vetoed");
        Self {
            proposed,
            task,
            blocker: Some(blocker),
        }
    }
}

/// Test a proposed drone position.
///
/// Unless a package is already carried, touching the active package moves
/// the task to `Colliding` and vetoes the move; staying clear of it returns a
/// `Colliding` task to `Free`. Terrain, field bounds and obstacles veto the
/// move in every task state. Fails only when the task points past the
/// layout's packages.
pub fn try_move(
    world: &World,
    task: TaskState,
    proposed: Vec3,
    tilt: TiltLevel,
) -> Result<MoveOutcome> {
    let config = &world.config;
    let aabb = vehicle_aabb(proposed, tilt, task.payload(), config);
    let mut task = task;

    if task.status != TaskStatus::Attached {
        let package = world.layout.package(task.package_index)?;
        if package_solid(package.position, config).collides(&aabb) {
            if task.status == TaskStatus::Free {
                tracing::debug!(package = task.package_index, "package contact");
            }
            let task = task.on_package_contact();
            return Ok(MoveOutcome::blocked(
                proposed,
                task,
                Blocker::Package {
                    index: task.package_index,
                },
            ));
        }
        task = task.on_package_clear();
    }

    if let Some(contact) = world.terrain.contact(&aabb, &world.bounds) {
        return Ok(MoveOutcome::blocked(proposed, task, Blocker::Ground(contact)));
    }

    for (index, obstacle) in world.layout.obstacles.iter().enumerate() {
        let Some(parts) = obstacle.solids(config) else {
            continue;
        };
        if let Some(hit) = parts.iter().find(|part| part.collides(&aabb)) {
            return Ok(MoveOutcome::blocked(
                proposed,
                task,
                Blocker::Obstacle {
                    index,
                    kind: obstacle.kind,
                    part: hit.name(),
                },
            ));
        }
    }

    Ok(MoveOutcome {
        proposed,
        task,
        blocker: None,
    })
}
