//! Skydrop Game Logic
//!
//! This crate runs delivery episodes on top of the collision geometry in
//! `skydrop-physics`:
//!
//! - Procedural field layout (trees, houses, package and zone markers)
//! - The pickup/delivery task state machine
//! - The flight control model and pilot input
//! - The per-step collision battery and the episode simulation
//! - A scripted autopilot that flies whole episodes
//!
//! # Architecture
//!
//! One seeded generator drives every layout and terrain seed, and every tick
//! is a pure function of the previous state and the input, so a seed plus an
//! input sequence replays a run exactly.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Simulation                            │
//! │  ┌─────────┐   ┌──────────┐   ┌──────────┐   ┌───────────┐   │
//! │  │ Flight  │──►│ Proposed │──►│ try_move │──►│ TaskState │   │
//! │  │ Input   │   │ pose     │   │ (veto)   │   │ pickup/   │   │
//! │  └─────────┘   └──────────┘   └──────────┘   │ deliver   │   │
//! │                                              └─────┬─────┘   │
//! │                 ┌────────────┐  episode complete   │         │
//! │                 │ generate() │◄────────────────────┘         │
//! │                 └────────────┘                               │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod autopilot;
pub mod error;
pub mod flight;
pub mod input;
pub mod layout;
pub mod obstacle;
pub mod random;
pub mod simulation;
pub mod task;
pub mod world;

// Re-export main types
pub use autopilot::{Autopilot, AutopilotConfig};
pub use error::GameError;
pub use flight::{FlightConfig, VehicleState};
pub use input::FlightInput;
pub use layout::{generate, Layout, LayoutConfig, LayoutParams};
pub use obstacle::{Obstacle, ObstacleKind};
pub use random::SeededRandom;
pub use simulation::{Simulation, SimulationConfig, StepReport, TaskEvent};
pub use task::{Delivery, TaskState, TaskStatus};
pub use world::{try_move, Blocker, MoveOutcome, World};

// Re-export physics types for convenience
pub use skydrop_physics::{Aabb, Payload, TiltLevel, WorldConfig};
