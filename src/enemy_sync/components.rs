//! ECS components hosting the perception machine and its collaborators.
//!
//! Each collaborator trait is implemented by a plain component so the Bevy
//! world stands in for the engine services the machine expects: navigation,
//! animation parameters, audio playback, and collision shapes.

use bevy::prelude::*;
use glam::Vec3;

use crate::perception::{
    AnimationFlags, AnimationSink, AudioCue, AudioSink, ColliderTag, Navigator,
    PerceptionStateMachine,
};
use crate::{DEFAULT_STOPPING_DISTANCE, DESPAWN_DELAY_SECS};

/// The perception machine of one enemy.
#[derive(Component, Debug, Clone, Deref, DerefMut)]
pub struct EnemyBrain(pub PerceptionStateMachine);

/// Marker for the tracked player.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct Player;

/// Straight-line navigation agent.
///
/// Stores the intents the machine issues; `steer_nav_agents` turns them into
/// movement.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct NavAgent {
    /// Where the agent is heading, if anywhere.
    pub destination: Option<Vec3>,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Arrival threshold.
    pub stopping_distance: f32,
    /// Disabled agents neither move nor accept new work from the steering
    /// system.
    pub enabled: bool,
}

impl Default for NavAgent {
    fn default() -> Self {
        Self::with_stopping_distance(DEFAULT_STOPPING_DISTANCE)
    }
}

impl NavAgent {
    /// An idle, enabled agent with the given arrival threshold.
    #[must_use]
    pub const fn with_stopping_distance(stopping_distance: f32) -> Self {
        Self {
            destination: None,
            speed: 0.0,
            stopping_distance,
            enabled: true,
        }
    }
}

/// A [`NavAgent`] paired with the position of the entity that owns it.
pub struct NavHandle<'a> {
    /// The agent receiving commands.
    pub agent: &'a mut NavAgent,
    /// Current world position of the agent's entity.
    pub position: Vec3,
}

impl Navigator for NavHandle<'_> {
    fn set_destination(&mut self, destination: Vec3) {
        self.agent.destination = Some(destination);
    }

    fn set_speed(&mut self, speed: f32) {
        self.agent.speed = speed;
    }

    fn remaining_distance(&self) -> f32 {
        self.agent
            .destination
            .map_or(0.0, |destination| self.position.distance(destination))
    }

    fn stopping_distance(&self) -> f32 {
        self.agent.stopping_distance
    }
}

/// Animation parameters of an enemy rig.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Animator {
    /// Walking locomotion.
    pub walking: bool,
    /// Chase locomotion.
    pub chasing: bool,
    /// Death pose; once set the rig stops reacting to locomotion flags.
    pub dead: bool,
    /// Number of times the hit reaction was triggered.
    pub hits: u32,
}

impl AnimationSink for Animator {
    fn apply(&mut self, flags: AnimationFlags) {
        if self.dead {
            return;
        }
        self.walking = flags.walking;
        self.chasing = flags.chasing;
    }
}

/// Single-channel audio source.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioEmitter {
    /// Clip loaded on the channel.
    pub clip: Option<AudioCue>,
    /// Whether the channel is currently playing.
    pub playing: bool,
    /// How many times playback was (re)started.
    pub starts: u32,
    /// One-shot clips fired on top of the channel, oldest first.
    pub one_shots: Vec<AudioCue>,
}

impl AudioEmitter {
    /// Fires `cue` without touching the looping channel.
    pub fn play_one_shot(&mut self, cue: AudioCue) {
        self.one_shots.push(cue);
    }

    /// Halts the looping channel.
    pub fn stop(&mut self) {
        self.playing = false;
    }
}

impl AudioSink for AudioEmitter {
    fn play(&mut self, cue: AudioCue) {
        if !self.playing || self.clip != Some(cue) {
            self.clip = Some(cue);
            self.playing = true;
            self.starts += 1;
        }
    }
}

/// Sphere collider visible to ray casts.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    /// Sphere radius around the entity's translation.
    pub radius: f32,
    /// What a ray reports when it hits this collider.
    pub tag: ColliderTag,
    /// Disabled colliders are invisible to ray casts.
    pub enabled: bool,
}

impl Collider {
    /// An enabled sphere collider.
    #[must_use]
    pub const fn sphere(radius: f32, tag: ColliderTag) -> Self {
        Self {
            radius,
            tag,
            enabled: true,
        }
    }
}

/// Scripted path the player walks along, stopping at the last point.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerRoute {
    /// Points to visit in order.
    pub points: Vec<Vec3>,
    /// Walking speed in world units per second.
    pub speed: f32,
    /// Index of the next point to reach.
    pub next: usize,
}

impl PlayerRoute {
    /// A route starting at its first point.
    #[must_use]
    pub const fn new(points: Vec<Vec3>, speed: f32) -> Self {
        Self {
            points,
            speed,
            next: 0,
        }
    }

    /// Whether every point has been reached.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.next >= self.points.len()
    }
}

/// Removes the entity once the timer completes.
#[derive(Component, Debug, Clone, Deref, DerefMut)]
pub struct DespawnAfter(pub Timer);

impl Default for DespawnAfter {
    fn default() -> Self {
        Self(Timer::from_seconds(DESPAWN_DELAY_SECS, TimerMode::Once))
    }
}
