//! Hosting perception machines inside a Bevy world.
//!
//! This module re-exports the plugin, the components standing in for engine
//! services, and the systems that drive each enemy's machine once per frame.

mod components;
mod damage_inbox;
mod plugin;
mod systems;
mod world_view;

use bevy::prelude::{Bundle, Transform};

pub use components::{
    Animator, AudioEmitter, Collider, DespawnAfter, EnemyBrain, NavAgent, NavHandle, Player,
    PlayerRoute,
};
pub use damage_inbox::{DamageInbox, EnemyDamage};
pub use plugin::{
    DiagnosticHistory, EnemyAiPlugin, PerceptionDiagnostic, DIAGNOSTIC_HISTORY_CAPACITY,
};
pub use systems::{
    advance_player_routes, apply_enemy_damage, despawn_fallen_enemies, drive_enemy_brains,
    start_enemy_brains, steer_nav_agents,
};
pub use world_view::{PlayerTracker, SpatialIndex};

use crate::health::EnemyHealth;
use crate::perception::{ColliderTag, PerceptionStateMachine};

/// Radius of the sphere collider given to enemies and players.
pub const BODY_RADIUS: f32 = 0.5;

/// Components making up a patrolling enemy.
pub fn enemy_bundle(
    machine: PerceptionStateMachine,
    transform: Transform,
    stopping_distance: f32,
    health: EnemyHealth,
) -> impl Bundle {
    (
        EnemyBrain(machine),
        transform,
        NavAgent::with_stopping_distance(stopping_distance),
        Animator::default(),
        AudioEmitter::default(),
        health,
        Collider::sphere(BODY_RADIUS, ColliderTag::Enemy),
    )
}

/// Components making up the player.
pub fn player_bundle(transform: Transform) -> impl Bundle {
    (
        Player,
        transform,
        Collider::sphere(BODY_RADIUS, ColliderTag::Player),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnemyConfig;
    use bevy::prelude::World;
    use glam::Vec3;
    use rstest::rstest;

    #[rstest]
    fn enemy_bundle_carries_every_collaborator() {
        let mut world = World::new();
        let machine = PerceptionStateMachine::new(EnemyConfig::with_waypoints(vec![Vec3::X]))
            .expect("valid config");
        let enemy = world
            .spawn(enemy_bundle(
                machine,
                Transform::default(),
                0.25,
                EnemyHealth::new(10),
            ))
            .id();
        let entity = world.entity(enemy);
        assert!(entity.contains::<EnemyBrain>());
        assert!(entity.contains::<Animator>());
        assert!(entity.contains::<AudioEmitter>());
        assert_eq!(
            entity.get::<NavAgent>().map(|agent| agent.stopping_distance),
            Some(0.25)
        );
        assert_eq!(
            entity.get::<Collider>().map(|collider| collider.tag),
            Some(ColliderTag::Enemy)
        );
    }
}
