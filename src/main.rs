//! Headless runner that plays a scenario through the enemy perception
//! systems and logs where every enemy ended up.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use log::info;
use lurker::{init_logging, DiagnosticHistory, EnemyAiPlugin, EnemyBrain, EnemyHealth, Scenario};

/// Simulates patrolling enemies hunting a scripted player
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file to run instead of the built-in demo
    #[arg(short, long)]
    scenario: Option<PathBuf>,
    /// Number of frames to simulate, overriding the scenario
    #[arg(short, long)]
    frames: Option<u32>,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn report(world: &World, enemies: &[Entity]) {
    for (index, enemy) in enemies.iter().enumerate() {
        let Some(brain) = world.get::<EnemyBrain>(*enemy) else {
            info!("enemy {index}: despawned");
            continue;
        };
        let position = world
            .get::<Transform>(*enemy)
            .map_or(Vec3::ZERO, |transform| transform.translation);
        let health = world.get::<EnemyHealth>(*enemy).map_or(0, EnemyHealth::current);
        info!(
            "enemy {index}: {:?} ({:?}) at {position}, waypoint {}, health {health}",
            brain.state(),
            brain.lifecycle(),
            brain.waypoint_index(),
        );
    }
    if let Some(history) = world.get_resource::<DiagnosticHistory>() {
        info!("{} diagnostics raised", history.len());
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let scenario = match &args.scenario {
        Some(path) => Scenario::from_path(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => Scenario::demo(),
    };
    let frames = args.frames.unwrap_or(scenario.frames);
    let frame = Duration::try_from_secs_f32(scenario.frame_seconds)
        .context("frame_seconds is not a valid duration")?;

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(EnemyAiPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(frame));
    let spawned = scenario
        .spawn_into(app.world_mut())
        .context("spawning scenario")?;

    info!("running {frames} frames of {}s", scenario.frame_seconds);
    for _ in 0..frames {
        app.update();
    }
    report(app.world(), &spawned.enemies);
    Ok(())
}
