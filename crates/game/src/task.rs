//! Delivery task state machine.
//!
//! [`TaskState`] is a plain value. Every transition consumes the current
//! state and returns the next one, so the host owns exactly one copy and
//! nothing else can mutate it behind its back.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use skydrop_physics::collision::footprint_within_square;
use skydrop_physics::{vehicle_aabb, Payload, TiltLevel, WorldConfig};

use crate::error::{GameError, Result};

/// Where the active package is relative to the drone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Resting on the ground, not touched.
    #[default]
    Free,
    /// The last proposed move touched the package; pickup is possible.
    Colliding,
    /// Carried beneath the drone.
    Attached,
}

/// Kind of marker a navigation indicator points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    Package,
    Zone,
}

/// The marker the drone should head for next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveTarget {
    pub kind: TargetKind,
    pub index: usize,
}

/// Result of a drop attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub task: TaskState,
    /// The package was dropped in its zone.
    pub delivered: bool,
    /// That was the last zone; the host must generate a new layout. `task`
    /// has already been reset for it.
    pub episode_complete: bool,
}

/// Progress through one episode's deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskState {
    pub status: TaskStatus,
    pub package_index: usize,
    pub zone_index: usize,
    pub target: ActiveTarget,
    /// Number of package/zone pairs in the episode.
    pub deliveries: usize,
}

impl TaskState {
    /// Fresh state pointing at the first package.
    pub fn new(deliveries: usize) -> Self {
        Self {
            status: TaskStatus::Free,
            package_index: 0,
            zone_index: 0,
            target: ActiveTarget {
                kind: TargetKind::Package,
                index: 0,
            },
            deliveries,
        }
    }

    /// What hangs under the drone in this state.
    #[inline]
    pub fn payload(&self) -> Payload {
        if self.status == TaskStatus::Attached {
            Payload::Attached
        } else {
            Payload::Empty
        }
    }

    /// Deliveries completed so far in this episode.
    pub fn delivered(&self) -> usize {
        self.zone_index
    }

    pub fn is_complete(&self) -> bool {
        self.zone_index >= self.deliveries
    }

    /// A proposed move touched the active package.
    pub fn on_package_contact(self) -> Self {
        match self.status {
            TaskStatus::Attached => self,
            _ => Self {
                status: TaskStatus::Colliding,
                ..self
            },
        }
    }

    /// A proposed move stayed clear of the active package.
    pub fn on_package_clear(self) -> Self {
        match self.status {
            TaskStatus::Colliding => Self {
                status: TaskStatus::Free,
                ..self
            },
            _ => self,
        }
    }

    /// Pick the package up. Only a drone already in contact can do so;
    /// any other state is returned unchanged.
    pub fn on_pickup_attempt(self) -> Self {
        if self.status != TaskStatus::Colliding {
            return self;
        }

        tracing::debug!(package = self.package_index, "package attached");
        Self {
            status: TaskStatus::Attached,
            target: ActiveTarget {
                kind: TargetKind::Zone,
                index: self.zone_index,
            },
            ..self
        }
    }

    /// Drop the carried package.
    ///
    /// Succeeds only while attached with the drone's footprint entirely
    /// inside the active zone's square. A successful drop advances both
    /// indices; after the last zone the state resets to a fresh episode and
    /// `episode_complete` is set.
    pub fn on_deliver_attempt(
        self,
        vehicle: Vec3,
        zone: Vec2,
        world: &WorldConfig,
    ) -> Result<Delivery> {
        if self.is_complete() {
            tracing::warn!(
                zone = self.zone_index,
                deliveries = self.deliveries,
                "drop attempted on a finished episode"
            );
            return Err(GameError::TargetOutOfRange {
                kind: TargetKind::Zone,
                index: self.zone_index,
                len: self.deliveries,
            });
        }

        let refused = Delivery {
            task: self,
            delivered: false,
            episode_complete: false,
        };
        if self.status != TaskStatus::Attached {
            return Ok(refused);
        }

        // Footprint does not depend on tilt or payload.
        let footprint = vehicle_aabb(vehicle, TiltLevel::Level, Payload::Empty, world);
        if !footprint_within_square(&footprint, zone, world.zone_side) {
            return Ok(refused);
        }

        let package_index = self.package_index + 1;
        let zone_index = self.zone_index + 1;
        tracing::info!(
            delivered = zone_index,
            total = self.deliveries,
            "delivered {} of {}",
            zone_index,
            self.deliveries
        );

        if zone_index >= self.deliveries {
            return Ok(Delivery {
                task: Self::new(self.deliveries),
                delivered: true,
                episode_complete: true,
            });
        }

        Ok(Delivery {
            task: Self {
                status: TaskStatus::Free,
                package_index,
                zone_index,
                target: ActiveTarget {
                    kind: TargetKind::Package,
                    index: package_index,
                },
                deliveries: self.deliveries,
            },
            delivered: true,
            episode_complete: false,
        })
    }
}
