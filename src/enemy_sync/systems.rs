//! Systems driving perception machines from the Bevy frame loop.

use bevy::prelude::*;
use glam::Vec3;
use log::{debug, info, warn};

use super::components::{
    Animator, AudioEmitter, Collider, DespawnAfter, EnemyBrain, NavAgent, NavHandle, Player,
    PlayerRoute,
};
use super::damage_inbox::{DamageInbox, EnemyDamage};
use super::plugin::PerceptionDiagnostic;
use super::world_view::{PlayerTracker, SpatialIndex};
use crate::health::{DamageOutcome, EnemyHealth};
use crate::perception::{AudioCue, Collaborators, Diagnostic, Pose};
use crate::DIRECTION_EPSILON;

// Per-enemy components handed to the machine each frame.
type BrainRow<'w> = (
    Entity,
    &'w mut EnemyBrain,
    &'w Transform,
    &'w mut NavAgent,
    &'w mut Animator,
    &'w mut AudioEmitter,
);

/// Player position and collider layout as seen at the start of a system run.
struct FrameView {
    player: PlayerTracker,
    space: SpatialIndex,
}

impl FrameView {
    fn capture(
        players: &Query<&Transform, With<Player>>,
        colliders: &Query<(&Transform, &Collider)>,
    ) -> Self {
        Self {
            player: PlayerTracker(players.single().ok().map(|t| t.translation)),
            space: SpatialIndex::gather(colliders.iter()),
        }
    }
}

struct EnemyRig<'a> {
    transform: &'a Transform,
    nav: &'a mut NavAgent,
    animator: &'a mut Animator,
    audio: &'a mut AudioEmitter,
}

fn pose_of(transform: &Transform) -> Pose {
    Pose::new(transform.translation, transform.forward().as_vec3())
}

/// Lends the rig to `step` as collaborators, then raises any diagnostics the
/// machine reported as [`PerceptionDiagnostic`] events.
fn run_brain<R>(
    enemy: Entity,
    rig: EnemyRig<'_>,
    view: &FrameView,
    commands: &mut Commands,
    step: impl FnOnce(&mut Collaborators<'_>, Pose) -> R,
) -> R {
    let pose = pose_of(rig.transform);
    let mut navigator = NavHandle {
        agent: rig.nav,
        position: rig.transform.translation,
    };
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let result = {
        let mut host = Collaborators {
            navigator: &mut navigator,
            animation: rig.animator,
            audio: rig.audio,
            player: &view.player,
            space: &view.space,
            diagnostics: &mut diagnostics,
        };
        step(&mut host, pose)
    };
    for diagnostic in diagnostics {
        commands.trigger(PerceptionDiagnostic { enemy, diagnostic });
    }
    result
}

/// Starts machines on enemies spawned since the last run.
///
/// Enemies whose machine faults on start have their navigation agent
/// disabled so they never move.
pub fn start_enemy_brains(
    mut commands: Commands,
    mut enemies: Query<BrainRow<'_>, Added<EnemyBrain>>,
    players: Query<&Transform, With<Player>>,
    colliders: Query<(&Transform, &Collider)>,
) {
    if enemies.is_empty() {
        return;
    }
    let view = FrameView::capture(&players, &colliders);
    for (entity, mut brain, transform, mut nav, mut animator, mut audio) in &mut enemies {
        let rig = EnemyRig {
            transform,
            nav: &mut nav,
            animator: &mut animator,
            audio: &mut audio,
        };
        let started = run_brain(entity, rig, &view, &mut commands, |host, _| {
            brain.start(host).is_ok()
        });
        if started {
            debug!("enemy {entity:?} started patrolling");
        } else {
            nav.enabled = false;
        }
    }
}

/// Ticks every running machine with the frame delta.
pub fn drive_enemy_brains(
    mut commands: Commands,
    time: Res<Time>,
    mut enemies: Query<BrainRow<'_>>,
    players: Query<&Transform, With<Player>>,
    colliders: Query<(&Transform, &Collider)>,
) {
    let view = FrameView::capture(&players, &colliders);
    let delta = time.delta_secs();
    for (entity, mut brain, transform, mut nav, mut animator, mut audio) in &mut enemies {
        if !brain.is_running() {
            continue;
        }
        let rig = EnemyRig {
            transform,
            nav: &mut nav,
            animator: &mut animator,
            audio: &mut audio,
        };
        run_brain(entity, rig, &view, &mut commands, |host, pose| {
            brain.tick(delta, pose, host);
        });
    }
}

/// Moves enabled agents in a straight line towards their destination and
/// turns them to face the direction of travel.
///
/// Agents halt once within their stopping distance.
pub fn steer_nav_agents(time: Res<Time>, mut agents: Query<(&mut Transform, &NavAgent)>) {
    let delta = time.delta_secs();
    for (mut transform, agent) in &mut agents {
        if !agent.enabled {
            continue;
        }
        let Some(destination) = agent.destination else {
            continue;
        };
        let offset = destination - transform.translation;
        let distance = offset.length();
        if distance <= agent.stopping_distance.max(DIRECTION_EPSILON) {
            continue;
        }
        let direction = offset / distance;
        transform.translation += direction * (agent.speed * delta).min(distance);
        let heading = Vec3::new(direction.x, 0.0, direction.z);
        if heading.length_squared() > DIRECTION_EPSILON {
            transform.look_to(heading, Vec3::Y);
        }
    }
}

/// Walks scripted players along their routes.
pub fn advance_player_routes(
    time: Res<Time>,
    mut players: Query<(&mut Transform, &mut PlayerRoute), With<Player>>,
) {
    let delta = time.delta_secs();
    for (mut transform, mut route) in &mut players {
        let Some(&target) = route.points.get(route.next) else {
            continue;
        };
        let offset = target - transform.translation;
        let budget = route.speed * delta;
        if offset.length() <= budget {
            transform.translation = target;
            route.next += 1;
        } else {
            transform.translation += offset.normalize_or_zero() * budget;
        }
    }
}

/// Applies queued hits. A killing blow stops the enemy's machine, disables
/// its navigation and collider, plays the death cue, and schedules the
/// despawn.
pub fn apply_enemy_damage(
    mut commands: Commands,
    mut inbox: ResMut<DamageInbox>,
    mut enemies: Query<(
        &mut EnemyHealth,
        &mut EnemyBrain,
        &mut NavAgent,
        &mut Animator,
        &mut AudioEmitter,
        Option<&mut Collider>,
    )>,
) {
    for EnemyDamage { enemy, amount } in inbox.drain() {
        let Ok((mut health, mut brain, mut nav, mut animator, mut audio, collider)) =
            enemies.get_mut(enemy)
        else {
            warn!("damage for unknown enemy {enemy:?} dropped");
            continue;
        };
        match health.take_damage(amount) {
            DamageOutcome::Ignored => {}
            DamageOutcome::Hurt { remaining } => {
                animator.hits += 1;
                debug!("enemy {enemy:?} hit for {amount}, {remaining} left");
            }
            DamageOutcome::Killed => {
                animator.hits += 1;
                animator.dead = true;
                audio.stop();
                audio.play_one_shot(AudioCue::Death);
                brain.stop();
                nav.enabled = false;
                nav.destination = None;
                if let Some(mut collider) = collider {
                    collider.enabled = false;
                }
                commands.entity(enemy).insert(DespawnAfter::default());
                info!("enemy {enemy:?} died");
            }
        }
    }
}

/// Removes dead enemies once their despawn delay has elapsed.
pub fn despawn_fallen_enemies(
    mut commands: Commands,
    time: Res<Time>,
    mut fallen: Query<(Entity, &mut DespawnAfter)>,
) {
    for (entity, mut delay) in &mut fallen {
        if delay.tick(time.delta()).just_finished() {
            commands.entity(entity).despawn();
        }
    }
}
