//! Skydrop Physics
//!
//! Collision geometry for a small delivery drone flying over a procedurally
//! populated field. Everything here is a pure function of its inputs so the
//! same episode replays identically on every machine.
//!
//! # Architecture
//!
//! - **Noise**: deterministic value noise that shapes the rolling terrain
//! - **Collision**: the drone's tilt-dependent bounding volume, the obstacle
//!   primitives it is tested against, and the terrain/field boundary test
//!
//! # Design Principles
//!
//! 1. **Determinism**: same seed and position always produce the same height
//! 2. **Purity**: colliders take geometric values only and never mutate state
//! 3. **Simplicity**: axis-aligned boxes against analytic shapes, no broadphase

pub mod collision;
pub mod config;
pub mod math;
pub mod noise;

// Re-export commonly used types
pub use collision::{
    vehicle_aabb, Aabb, FieldBounds, GroundContact, Payload, Solid, TerrainField, TiltLevel,
};
pub use config::WorldConfig;
pub use noise::value_noise;
