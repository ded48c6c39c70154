//! Flight control model.
//!
//! Turns held controls into a proposed next vehicle state. The proposal is
//! not checked against anything here; the caller runs it through the
//! collision battery and keeps or discards the new position.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use skydrop_physics::math::move_towards;
use skydrop_physics::TiltLevel;

use crate::input::FlightInput;

/// Rates and limits of the flight model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightConfig {
    /// Horizontal speed while a direction is held with throttle (m/s).
    pub horizontal_speed: f32,

    /// Vertical speed for both climb and descent (m/s).
    pub climb_rate: f32,

    /// Heading change rate (radians/second).
    pub yaw_rate: f32,

    /// Roll and pitch change rate (radians/second).
    pub tilt_rate: f32,

    /// Maximum roll or pitch (radians).
    pub max_tilt: f32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            horizontal_speed: 5.0,
            climb_rate: 3.0,
            yaw_rate: 45f32.to_radians(),
            tilt_rate: 45f32.to_radians(),
            max_tilt: 15f32.to_radians(),
        }
    }
}

/// Body orientation in radians.
///
/// Yaw 0 faces -Z and grows counter-clockwise seen from above. Negative
/// pitch is nose down, positive roll is left side down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Attitude {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Attitude {
    /// Unit heading on the ground plane.
    pub fn forward(&self) -> Vec3 {
        let (sin, cos) = self.yaw.sin_cos();
        Vec3::new(-sin, 0.0, -cos)
    }

    /// Unit right-hand vector on the ground plane.
    pub fn right(&self) -> Vec3 {
        let (sin, cos) = self.yaw.sin_cos();
        Vec3::new(cos, 0.0, -sin)
    }
}

/// Pose of the drone. The position is the hub, at the bottom of the body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub position: Vec3,
    pub attitude: Attitude,
    pub tilt: TiltLevel,
}

impl VehicleState {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            attitude: Attitude {
                yaw,
                ..Attitude::default()
            },
            tilt: TiltLevel::Level,
        }
    }
}

/// Wrap an angle into `[-PI, PI)`.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Yaw that points the drone from `from` toward `to` on the ground plane.
///
/// Matches [`Attitude::forward`]: the returned heading's forward vector is
/// the horizontal direction to `to`.
pub fn heading_to(from: Vec3, to: Vec3) -> f32 {
    let delta = to - from;
    wrap_angle(delta.x.atan2(delta.z) + PI)
}

/// Advance the controls by `dt` seconds.
///
/// Translation only happens with throttle held: a direction moves the drone
/// along its heading or sideways, throttle alone climbs. Descent works on its
/// own. Roll and pitch lean toward their limit while their controls are held
/// and settle back to level otherwise. The tilt level counts the held
/// directional axes.
pub fn propose(
    current: &VehicleState,
    input: FlightInput,
    dt: f32,
    config: &FlightConfig,
) -> VehicleState {
    let mut next = *current;
    let attitude = &mut next.attitude;

    let travel = config.horizontal_speed * dt;
    let thrust = config.climb_rate * dt;

    if input.pressed(FlightInput::THROTTLE) {
        let forward = current.attitude.forward();
        let right = current.attitude.right();
        let mut step = Vec3::ZERO;

        if input.pressed(FlightInput::FORWARD) {
            step += forward;
        }
        if input.pressed(FlightInput::BACKWARD) {
            step -= forward;
        }
        if input.pressed(FlightInput::STRAFE_RIGHT) {
            step += right;
        }
        if input.pressed(FlightInput::STRAFE_LEFT) {
            step -= right;
        }

        if input.has_direction() {
            next.position += step * travel;
        } else {
            next.position.y += thrust;
        }
    }

    if input.pressed(FlightInput::DESCEND) {
        next.position.y -= thrust;
    }

    // Heading
    let yaw_step = config.yaw_rate * dt;
    if input.pressed(FlightInput::YAW_LEFT) {
        attitude.yaw += yaw_step;
    }
    if input.pressed(FlightInput::YAW_RIGHT) {
        attitude.yaw -= yaw_step;
    }
    attitude.yaw = wrap_angle(attitude.yaw);

    // Lean
    let tilt_step = config.tilt_rate * dt;
    let roll_target = match (
        input.pressed(FlightInput::STRAFE_LEFT),
        input.pressed(FlightInput::STRAFE_RIGHT),
    ) {
        (true, false) => config.max_tilt,
        (false, true) => -config.max_tilt,
        _ => 0.0,
    };
    let pitch_target = match (
        input.pressed(FlightInput::FORWARD),
        input.pressed(FlightInput::BACKWARD),
    ) {
        (true, false) => -config.max_tilt,
        (false, true) => config.max_tilt,
        _ => 0.0,
    };
    attitude.roll = move_towards(attitude.roll, roll_target, tilt_step);
    attitude.pitch = move_towards(attitude.pitch, pitch_target, tilt_step);

    next.tilt = TiltLevel::from_axes(input.pitching(), input.rolling());
    next
}
