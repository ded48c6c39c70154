//! Skydrop - Main Entry Point
//!
//! Headless delivery run: generates a field, lets the autopilot fly every
//! delivery and logs the task events.
//!
//! Usage: `skydrop [seed] [episodes]`

use anyhow::bail;
use clap::Parser;
use skydrop_game::{Autopilot, Simulation, SimulationConfig, TaskEvent};

/// Skydrop headless delivery run
#[derive(Parser, Debug)]
#[command(name = "skydrop")]
#[command(version, about = "Fly seeded delivery episodes with the autopilot", long_about = None)]
struct Args {
    /// Layout seed; random when omitted
    seed: Option<u32>,

    /// Episodes to complete before exiting
    #[arg(default_value_t = 1)]
    episodes: u32,
}

/// Upper bound on ticks per episode before the run is declared stuck.
const MAX_TICKS_PER_EPISODE: u64 = 60 * 60 * 10;

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("skydrop=debug".parse()?))
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let episodes = args.episodes;

    tracing::info!(seed, episodes, "Starting Skydrop");

    let config = SimulationConfig::default();
    let dt = config.delta_time();
    let mut sim = Simulation::new(config, seed)?;
    let mut pilot = Autopilot::default();

    let mut completed = 0;
    let mut episode_start = sim.frame();
    while completed < episodes {
        if sim.frame() - episode_start > MAX_TICKS_PER_EPISODE {
            bail!(
                "episode {} stuck after {} ticks at {:?}",
                sim.episode(),
                MAX_TICKS_PER_EPISODE,
                sim.vehicle().position
            );
        }

        let input = pilot.control(&sim, dt)?;
        let report = sim.tick(input, dt)?;

        match report.event {
            Some(TaskEvent::PickedUp { package }) => {
                let heading = sim.heading_to_target()?.to_degrees();
                tracing::info!(frame = report.frame, package, heading, "package picked up");
            }
            Some(TaskEvent::Delivered { delivered, total }) => {
                tracing::info!(frame = report.frame, "delivered {delivered} of {total}");
            }
            Some(TaskEvent::EpisodeComplete { episode }) => {
                completed += 1;
                let seconds = (report.frame - episode_start) as f32 * dt;
                tracing::info!(seconds, next = episode, "episode complete");
                episode_start = report.frame;
            }
            Some(TaskEvent::Restarted { .. }) | None => {}
        }
    }

    let snapshot = sim.snapshot()?;
    tracing::info!(
        frames = sim.frame(),
        snapshot_bytes = snapshot.len(),
        "run finished"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{error::ErrorKind, CommandFactory};

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["skydrop"]).unwrap();
        assert_eq!(args.seed, None);
        assert_eq!(args.episodes, 1);

        let args = Args::try_parse_from(["skydrop", "42", "3"]).unwrap();
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.episodes, 3);
    }

    #[test]
    fn test_help_is_not_a_seed() {
        let err = Args::try_parse_from(["skydrop", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = Args::try_parse_from(["skydrop", "north"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }
}
