//! Headless Bevy apps stepped with a fixed frame length.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use lurker::enemy_sync::{enemy_bundle, player_bundle};
use lurker::perception::duration_from_secs;
use lurker::{EnemyAiPlugin, EnemyConfig, EnemyHealth, PerceptionStateMachine};

/// An app with [`EnemyAiPlugin`] whose every frame after the first lasts
/// `frame_seconds`.
///
/// Bevy reports a zero delta on the very first update. The frame length is
/// rounded to whole microseconds; negative or non-finite lengths give
/// zero-length frames.
pub fn headless_app(frame_seconds: f32) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(EnemyAiPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(duration_from_secs(
            frame_seconds,
        )));
    app
}

/// Runs `frames` updates.
pub fn step(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

/// Spawns an enemy at `transform` with full default health.
///
/// # Panics
/// Panics if `config` is rejected.
pub fn spawn_enemy(app: &mut App, config: EnemyConfig, transform: Transform) -> Entity {
    let machine = PerceptionStateMachine::new(config).expect("enemy config should be valid");
    app.world_mut()
        .spawn(enemy_bundle(
            machine,
            transform,
            lurker::DEFAULT_STOPPING_DISTANCE,
            EnemyHealth::default(),
        ))
        .id()
}

/// Spawns the player at `position`.
pub fn spawn_player(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn(player_bundle(Transform::from_translation(position)))
        .id()
}
