//! Scripted pilot.
//!
//! Flies every delivery of an episode without collisions. The drone keeps
//! its heading at zero and moves along one ground axis at a time at a cruise
//! altitude above the tallest possible obstacle, so every leg is an L-shape
//! inside the field. Over a package it sinks until it touches and grabs it;
//! over a zone it drops the package without descending.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::FlightInput;
use crate::simulation::Simulation;
use crate::task::{TargetKind, TaskStatus};

/// Autopilot tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutopilotConfig {
    /// Height of the drone's underside above the tallest obstacle while
    /// cruising, carried package included.
    pub cruise_clearance: f32,

    /// Extra gap kept between the footprint and the field edge.
    pub edge_margin: f32,

    /// Largest heading error left uncorrected (radians).
    pub heading_tolerance: f32,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            cruise_clearance: 0.5,
            edge_margin: 0.01,
            heading_tolerance: 1f32.to_radians(),
        }
    }
}

/// Produces one input per tick from the simulation state.
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    pub config: AutopilotConfig,
    last: FlightInput,
}

impl Autopilot {
    pub fn new(config: AutopilotConfig) -> Self {
        Self {
            config,
            last: FlightInput::default(),
        }
    }

    /// Input for the next tick of `dt` seconds.
    pub fn control(&mut self, sim: &Simulation, dt: f32) -> Result<FlightInput> {
        let input = self.decide(sim, dt)?;
        self.last = input;
        Ok(input)
    }

    fn decide(&self, sim: &Simulation, dt: f32) -> Result<FlightInput> {
        let vehicle = sim.vehicle();
        let yaw = vehicle.attitude.yaw;

        if yaw.abs() > self.config.heading_tolerance {
            let turn = if yaw > 0.0 {
                FlightInput::YAW_RIGHT
            } else {
                FlightInput::YAW_LEFT
            };
            return Ok(FlightInput::with(turn));
        }

        let world = sim.world();
        let task = sim.task();
        let target = sim.target_position()?;
        let goal = world.bounds.clamp_with_margin(
            Vec2::new(target.x, target.z),
            world.config.vehicle_half_extent() + self.config.edge_margin,
        );
        let delta = goal - Vec2::new(vehicle.position.x, vehicle.position.z);

        // One tick of travel; closer than this counts as arrived.
        let reach = sim.config.flight.horizontal_speed * dt;
        let arrived = delta.x.abs() <= reach && delta.y.abs() <= reach;

        if !arrived {
            let mut input = FlightInput::with(FlightInput::THROTTLE);
            if vehicle.position.y < self.cruise_altitude(sim) {
                return Ok(input);
            }

            if delta.x.abs() > reach {
                input.press(if delta.x > 0.0 {
                    FlightInput::STRAFE_RIGHT
                } else {
                    FlightInput::STRAFE_LEFT
                });
            } else {
                // Forward is -Z at zero heading.
                input.press(if delta.y > 0.0 {
                    FlightInput::BACKWARD
                } else {
                    FlightInput::FORWARD
                });
            }
            return Ok(input);
        }

        let mut input = FlightInput::default();
        match task.target.kind {
            TargetKind::Package => {
                // Keep pushing down so the contact persists through the grab.
                input.press(FlightInput::DESCEND);
                if task.status == TaskStatus::Colliding && !self.last.pressed(FlightInput::ACTION)
                {
                    input.press(FlightInput::ACTION);
                }
            }
            TargetKind::Zone => {
                if !self.last.pressed(FlightInput::ACTION) {
                    input.press(FlightInput::ACTION);
                }
            }
        }
        Ok(input)
    }

    /// Hub altitude at which the tilted drone's underside clears everything.
    fn cruise_altitude(&self, sim: &Simulation) -> f32 {
        let config = &sim.config;
        let mut altitude =
            config.layout.max_obstacle_height(&config.world) + self.config.cruise_clearance;
        if sim.task().status == TaskStatus::Attached {
            altitude += config.world.package_side;
        }
        altitude
    }
}
