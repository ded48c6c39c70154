//! Episode simulation - the main loop.
//!
//! Owns the field, the drone and the task state, and advances them one tick
//! at a time from pilot input. All randomness comes from one seeded
//! generator, so a seed and an input sequence replay the same run.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use skydrop_physics::WorldConfig;

use crate::error::Result;
use crate::flight::{self, FlightConfig, VehicleState};
use crate::input::FlightInput;
use crate::layout::{self, LayoutConfig, LayoutParams};
use crate::random::SeededRandom;
use crate::task::{Delivery, TargetKind, TaskState, TaskStatus};
use crate::world::{self, Blocker, World};

/// Simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    pub world: WorldConfig,

    pub layout: LayoutConfig,

    pub params: LayoutParams,

    pub flight: FlightConfig,

    /// Half-open range the per-episode terrain seed is drawn from.
    pub terrain_seed_range: (f32, f32),

    /// Distance of the spawn point from the +Z field edge.
    pub spawn_inset: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            world: WorldConfig::default(),
            layout: LayoutConfig::default(),
            params: LayoutParams::default(),
            flight: FlightConfig::default(),
            terrain_seed_range: (0.25, 2.0),
            spawn_inset: 5.0,
        }
    }
}

impl SimulationConfig {
    /// Get the time step per tick in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// Where the drone starts every episode: centered on X, near the +Z
    /// edge, level with the tallest possible obstacle.
    pub fn spawn_point(&self) -> Vec3 {
        Vec3::new(
            0.0,
            self.layout.max_obstacle_height(&self.world),
            self.world.field_z / 2.0 - self.spawn_inset,
        )
    }
}

/// Discrete task events raised during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskEvent {
    PickedUp { package: usize },
    Delivered { delivered: usize, total: usize },
    /// The last zone was served and a fresh field generated.
    EpisodeComplete { episode: u32 },
    Restarted { episode: u32 },
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub frame: u64,
    /// Whether the proposed position was kept.
    pub moved: bool,
    pub blocker: Option<Blocker>,
    pub event: Option<TaskEvent>,
}

/// Complete mutable state of a run. Snapshots encode exactly this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Current frame/tick number.
    pub frame: u64,
    /// Episodes started so far, counting the first.
    pub episode: u32,
    pub rng: SeededRandom,
    pub world: World,
    pub vehicle: VehicleState,
    pub task: TaskState,
    /// Input of the previous tick, for edge-triggered actions.
    pub previous_input: FlightInput,
}

/// The main episode simulation.
#[derive(Debug)]
pub struct Simulation {
    pub config: SimulationConfig,
    state: SimulationState,
}

impl Simulation {
    /// Start the first episode from `seed`.
    pub fn new(config: SimulationConfig, seed: u32) -> Result<Self> {
        let mut rng = SeededRandom::new(seed);
        let world = build_world(&config, &mut rng)?;
        let vehicle = VehicleState::new(config.spawn_point(), 0.0);
        let task = TaskState::new(config.params.deliveries());

        tracing::info!(seed, terrain_seed = world.terrain.seed, "simulation started");

        Ok(Self {
            config,
            state: SimulationState {
                frame: 0,
                episode: 1,
                rng,
                world,
                vehicle,
                task,
                previous_input: FlightInput::default(),
            },
        })
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn world(&self) -> &World {
        &self.state.world
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.state.vehicle
    }

    pub fn task(&self) -> TaskState {
        self.state.task
    }

    pub fn frame(&self) -> u64 {
        self.state.frame
    }

    pub fn episode(&self) -> u32 {
        self.state.episode
    }

    /// Advance the simulation by one tick of `dt` seconds.
    ///
    /// The flight model proposes a new pose; its attitude always commits,
    /// its position only if the collision battery accepts it. A fresh press
    /// of `ACTION` then picks up or drops, and a fresh press of `RESTART`
    /// abandons the episode before anything moves.
    pub fn tick(&mut self, input: FlightInput, dt: f32) -> Result<StepReport> {
        let previous = self.state.previous_input;
        self.state.previous_input = input;
        self.state.frame += 1;
        let frame = self.state.frame;

        if input.just_pressed(previous, FlightInput::RESTART) {
            self.restart()?;
            return Ok(StepReport {
                frame,
                moved: false,
                blocker: None,
                event: Some(TaskEvent::Restarted {
                    episode: self.state.episode,
                }),
            });
        }

        let proposal = flight::propose(&self.state.vehicle, input, dt, &self.config.flight);
        let outcome = world::try_move(
            &self.state.world,
            self.state.task,
            proposal.position,
            proposal.tilt,
        )?;

        let vehicle = &mut self.state.vehicle;
        vehicle.attitude = proposal.attitude;
        vehicle.tilt = proposal.tilt;
        vehicle.position = outcome.resolve(vehicle.position);
        self.state.task = outcome.task;

        let event = if input.just_pressed(previous, FlightInput::ACTION) {
            self.act()?
        } else {
            None
        };

        Ok(StepReport {
            frame,
            moved: outcome.accepted(),
            blocker: outcome.blocker,
            event,
        })
    }

    /// Pickup or drop, whichever the task state allows.
    fn act(&mut self) -> Result<Option<TaskEvent>> {
        match self.state.task.status {
            TaskStatus::Colliding => Ok(self.pickup().then_some(TaskEvent::PickedUp {
                package: self.state.task.package_index,
            })),
            TaskStatus::Attached => {
                let total = self.state.task.deliveries;
                let delivery = self.deliver()?;
                Ok(match delivery {
                    Delivery {
                        episode_complete: true,
                        ..
                    } => Some(TaskEvent::EpisodeComplete {
                        episode: self.state.episode,
                    }),
                    Delivery {
                        delivered: true,
                        task,
                        ..
                    } => Some(TaskEvent::Delivered {
                        delivered: task.delivered(),
                        total,
                    }),
                    _ => None,
                })
            }
            TaskStatus::Free => {
                tracing::debug!("action ignored, nothing to pick up or drop");
                Ok(None)
            }
        }
    }

    /// Attach the active package if the drone is touching it.
    pub fn pickup(&mut self) -> bool {
        let before = self.state.task;
        self.state.task = before.on_pickup_attempt();
        self.state.task != before
    }

    /// Drop the carried package into the active zone. Finishing the last
    /// zone starts a new episode.
    pub fn deliver(&mut self) -> Result<Delivery> {
        let task = self.state.task;
        let zone = self.state.world.layout.zone(task.zone_index)?.position;
        let delivery = task.on_deliver_attempt(
            self.state.vehicle.position,
            zone,
            &self.state.world.config,
        )?;
        self.state.task = delivery.task;

        if delivery.episode_complete {
            tracing::info!(episode = self.state.episode, "all packages delivered, restarting");
            self.restart()?;
        }
        Ok(delivery)
    }

    /// Generate a fresh field and terrain, respawn the drone and reset the
    /// task. Nothing changes if generation fails.
    pub fn restart(&mut self) -> Result<()> {
        let mut rng = self.state.rng.clone();
        let world = build_world(&self.config, &mut rng)?;

        self.state.rng = rng;
        self.state.world = world;
        self.state.vehicle = VehicleState::new(self.config.spawn_point(), 0.0);
        self.state.task = TaskState::new(self.config.params.deliveries());
        self.state.episode += 1;

        tracing::info!(
            episode = self.state.episode,
            terrain_seed = self.state.world.terrain.seed,
            "episode started"
        );
        Ok(())
    }

    /// Marker the drone should head for, at marker height.
    pub fn target_position(&self) -> Result<Vec3> {
        let target = self.state.task.target;
        let layout = &self.state.world.layout;
        let marker = match target.kind {
            TargetKind::Package => layout.package(target.index)?,
            TargetKind::Zone => layout.zone(target.index)?,
        };
        Ok(marker.at_height(self.state.world.config.marker_height))
    }

    /// Heading from the drone to the active marker.
    pub fn heading_to_target(&self) -> Result<f32> {
        Ok(flight::heading_to(
            self.state.vehicle.position,
            self.target_position()?,
        ))
    }

    /// Encode the full state.
    pub fn snapshot(&self) -> Result<Vec<u8>> {
        Ok(bincode::serde::encode_to_vec(
            &self.state,
            bincode::config::standard(),
        )?)
    }

    /// Rebuild a simulation from a snapshot.
    pub fn restore(config: SimulationConfig, bytes: &[u8]) -> Result<Self> {
        let (state, _) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(Self { config, state })
    }
}

fn build_world(config: &SimulationConfig, rng: &mut SeededRandom) -> Result<World> {
    let layout = layout::generate(&config.params, &config.world, &config.layout, rng)?;
    let (lo, hi) = config.terrain_seed_range;
    let terrain_seed = rng.next_range(lo, hi);
    Ok(World::new(config.world.clone(), layout, terrain_seed))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::obstacle::{Obstacle, ObstacleKind};
    use glam::Vec2;

    fn sim(seed: u32) -> Simulation {
        Simulation::new(SimulationConfig::default(), seed).unwrap()
    }

    /// Park the drone just above the active package with nothing else around.
    fn over_package(sim: &mut Simulation) -> Vec3 {
        let index = sim.task().package_index;
        let package = sim.world().layout.package(index).unwrap().position;
        sim.state.world.layout.obstacles.clear();
        let top = sim.config.world.marker_height + sim.config.world.package_side;
        let hover = Vec3::new(package.x, top + 0.02, package.y);
        sim.state.vehicle.position = hover;
        hover
    }

    #[test]
    fn test_simulation_creation() {
        let sim = sim(42);
        assert_eq!(sim.frame(), 0);
        assert_eq!(sim.episode(), 1);
        assert_eq!(sim.vehicle().position, Vec3::new(0.0, 6.0, 20.0));
        assert_eq!(sim.task(), TaskState::new(3));
        let seed = sim.world().terrain.seed;
        assert!((0.25..2.0).contains(&seed));
    }

    #[test]
    fn test_simulation_without_packages_fails_fast() {
        let mut config = SimulationConfig::default();
        config.params.package_count = 0;
        let err = Simulation::new(config, 42).unwrap_err();
        assert!(matches!(
            err,
            GameError::NoDeliveries {
                packages: 0,
                zones: 3
            }
        ));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_delta_time() {
        let config = SimulationConfig::default();
        assert!((config.delta_time() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_idle_tick_stays_put() {
        let mut sim = sim(7);
        let start = sim.vehicle().position;
        let report = sim.tick(FlightInput::default(), 1.0 / 60.0).unwrap();
        assert_eq!(report.frame, 1);
        assert!(report.moved);
        assert_eq!(sim.vehicle().position, start);
    }

    #[test]
    fn test_blocked_move_keeps_attitude() {
        let mut sim = sim(7);
        sim.state.world.bounds = skydrop_physics::FieldBounds::centered(4.0, 100.0);
        sim.state.vehicle.position = Vec3::new(0.0, 6.5, 0.0);
        sim.state.world.layout.obstacles.clear();

        let input = FlightInput::with(
            FlightInput::THROTTLE | FlightInput::STRAFE_RIGHT | FlightInput::YAW_LEFT,
        );
        // Each step moves 1/12 m; the footprint starts 0.98 m from the edge.
        let mut blocked = None;
        for _ in 0..20 {
            let report = sim.tick(input, 1.0 / 60.0).unwrap();
            if !report.moved {
                blocked = Some(report);
                break;
            }
        }
        let report = blocked.expect("edge must stop the drone");
        assert!(matches!(report.blocker, Some(Blocker::Ground(_))));
        assert!(sim.vehicle().attitude.yaw > 0.0);
        assert!(sim.vehicle().attitude.roll < 0.0);
    }

    #[test]
    fn test_descend_pickup_with_action_edge() {
        let mut sim = sim(11);
        over_package(&mut sim);
        let dt = 1.0 / 60.0;

        let report = sim.tick(FlightInput::with(FlightInput::DESCEND), dt).unwrap();
        assert_eq!(report.blocker, Some(Blocker::Package { index: 0 }));
        assert_eq!(sim.task().status, TaskStatus::Colliding);

        let grab = FlightInput::with(FlightInput::DESCEND | FlightInput::ACTION);
        let report = sim.tick(grab, dt).unwrap();
        assert_eq!(report.event, Some(TaskEvent::PickedUp { package: 0 }));
        assert_eq!(sim.task().status, TaskStatus::Attached);

        // Holding the key does not fire again.
        let report = sim.tick(grab, dt).unwrap();
        assert_eq!(report.event, None);
    }

    #[test]
    fn test_pickup_needs_contact() {
        let mut sim = sim(3);
        assert!(!sim.pickup());
        assert_eq!(sim.task().status, TaskStatus::Free);
    }

    #[test]
    fn test_delivery_round_and_episode_restart() {
        let mut sim = sim(21);
        let deliveries = sim.task().deliveries;

        for round in 0..deliveries {
            over_package(&mut sim);
            sim.tick(FlightInput::with(FlightInput::DESCEND), 1.0 / 60.0).unwrap();
            assert!(sim.pickup());

            let zone = sim.world().layout.zone(round).unwrap().position;
            assert_eq!(sim.target_position().unwrap(), Vec3::new(zone.x, 1.0, zone.y));
            sim.state.vehicle.position = Vec3::new(zone.x, 8.0, zone.y);

            let delivery = sim.deliver().unwrap();
            assert!(delivery.delivered);
            assert_eq!(delivery.episode_complete, round + 1 == deliveries);
        }

        assert_eq!(sim.episode(), 2);
        assert_eq!(sim.task(), TaskState::new(deliveries));
        assert_eq!(sim.vehicle().position, sim.config.spawn_point());
    }

    #[test]
    fn test_delivery_outside_zone_refused() {
        let mut sim = sim(5);
        over_package(&mut sim);
        sim.tick(FlightInput::with(FlightInput::DESCEND), 1.0 / 60.0).unwrap();
        assert!(sim.pickup());

        let zone = sim.world().layout.zone(0).unwrap().position;
        sim.state.vehicle.position = Vec3::new(zone.x + 1.5, 8.0, zone.y);
        let delivery = sim.deliver().unwrap();
        assert!(!delivery.delivered);
        assert_eq!(sim.task().status, TaskStatus::Attached);
    }

    #[test]
    fn test_restart_input() {
        let mut sim = sim(9);
        let before = sim.world().clone();
        let report = sim
            .tick(FlightInput::with(FlightInput::RESTART), 1.0 / 60.0)
            .unwrap();
        assert_eq!(report.event, Some(TaskEvent::Restarted { episode: 2 }));
        assert_ne!(sim.world(), &before);
    }

    #[test]
    fn test_target_follows_task() {
        let mut sim = sim(13);
        let package = sim.world().layout.package(0).unwrap().position;
        assert_eq!(sim.target_position().unwrap(), Vec3::new(package.x, 1.0, package.y));

        sim.state.task.target.index = 9;
        assert!(matches!(
            sim.target_position(),
            Err(GameError::TargetOutOfRange { kind: TargetKind::Package, .. })
        ));
    }

    #[test]
    fn test_heading_points_at_target() {
        let mut sim = sim(17);
        sim.state.world.layout.packages[0] =
            Obstacle::new(Vec2::new(0.0, 0.0), 1.0, ObstacleKind::Package);
        // Spawn is on +Z, so the package lies straight ahead at yaw 0.
        assert!(sim.heading_to_target().unwrap().abs() < 1e-5);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = sim(1234);
        let mut b = sim(1234);
        let inputs = [
            FlightInput::with(FlightInput::THROTTLE),
            FlightInput::with(FlightInput::THROTTLE | FlightInput::FORWARD),
            FlightInput::with(FlightInput::YAW_LEFT | FlightInput::STRAFE_LEFT),
        ];
        for i in 0..300 {
            let input = inputs[i % inputs.len()];
            a.tick(input, 1.0 / 60.0).unwrap();
            b.tick(input, 1.0 / 60.0).unwrap();
        }
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_snapshot_restore_replays() {
        let mut sim = sim(555);
        let climb = FlightInput::with(FlightInput::THROTTLE);
        for _ in 0..30 {
            sim.tick(climb, 1.0 / 60.0).unwrap();
        }

        let bytes = sim.snapshot().unwrap();
        let mut copy = Simulation::restore(sim.config.clone(), &bytes).unwrap();
        assert_eq!(copy.state(), sim.state());

        let cruise = FlightInput::with(FlightInput::THROTTLE | FlightInput::FORWARD);
        for _ in 0..60 {
            sim.tick(cruise, 1.0 / 60.0).unwrap();
            copy.tick(cruise, 1.0 / 60.0).unwrap();
        }
        assert_eq!(copy.state(), sim.state());
    }

    #[test]
    fn test_restore_rejects_garbage() {
        let err = Simulation::restore(SimulationConfig::default(), &[]).unwrap_err();
        assert!(matches!(err, GameError::SnapshotDecode(_)));
    }
}
