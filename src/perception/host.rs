//! Capabilities the perception machine borrows from its host engine.
//!
//! The machine never looks collaborators up on its own. Each call receives a
//! [`Collaborators`] bundle of trait objects, so the same machine runs inside
//! the Bevy plugin, under hand-written fakes, or against `mockall` mocks.

use std::fmt;

use glam::Vec3;

use super::state::{AnimationFlags, AudioCue, ConfigFault};

/// Navigation agent that walks the enemy through the world.
pub trait Navigator {
    /// Requests a path to `destination`.
    fn set_destination(&mut self, destination: Vec3);
    /// Sets the movement speed in world units per second.
    fn set_speed(&mut self, speed: f32);
    /// Distance left along the current path.
    fn remaining_distance(&self) -> f32;
    /// Remaining distance at or below which the agent counts as arrived.
    fn stopping_distance(&self) -> f32;
}

/// Receives animation parameters; applying the same flags twice is a no-op.
pub trait AnimationSink {
    /// Applies the locomotion flags.
    fn apply(&mut self, flags: AnimationFlags);
}

/// Plays looping cues, restarting only when the cue changes or playback
/// stopped.
pub trait AudioSink {
    /// Requests that `cue` be the playing clip.
    fn play(&mut self, cue: AudioCue);
}

/// Resolves the tracked player's current position.
pub trait PlayerLocator {
    /// Current player position, or `None` if the player cannot be found.
    fn player_position(&self) -> Option<Vec3>;
}

/// Tag attached to anything a ray can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColliderTag {
    /// The tracked player.
    Player,
    /// Another enemy.
    Enemy,
    /// Walls, props, and other static geometry.
    Scenery,
}

/// A ray with a normalised direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

/// Nearest hit reported by a [`SpatialQuery`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Tag of the collider that was hit.
    pub tag: ColliderTag,
    /// Distance from the ray origin to the hit.
    pub distance: f32,
}

/// Physics ray-casting.
pub trait SpatialQuery {
    /// Nearest hit along `ray` within `max_distance`, if any.
    fn raycast(&self, ray: Ray, max_distance: f32) -> Option<RayHit>;
}

/// Advisory messages raised by the machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Diagnostic {
    /// Start-up validation failed.
    Misconfigured(ConfigFault),
    /// The player was seen and a chase began.
    PlayerDetected {
        /// Where the player was seen.
        at: Vec3,
    },
    /// The player moved out of range and the chase ended.
    PlayerLost {
        /// Distance to the player when the chase ended, if it was known.
        distance: Option<f32>,
    },
}

impl Diagnostic {
    /// Whether the message describes a fault rather than a routine event.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Misconfigured(_))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Misconfigured(fault) => write!(f, "configuration error: {fault}"),
            Self::PlayerDetected { at } => write!(f, "player detected at {at}"),
            Self::PlayerLost {
                distance: Some(distance),
            } => write!(f, "player lost at distance {distance:.2}"),
            Self::PlayerLost { distance: None } => write!(f, "player lost"),
        }
    }
}

/// One-line diagnostic output.
pub trait DiagnosticSink {
    /// Records a diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Borrowed collaborators for one call into the machine.
pub struct Collaborators<'a> {
    /// Navigation agent.
    pub navigator: &'a mut dyn Navigator,
    /// Animation parameters.
    pub animation: &'a mut dyn AnimationSink,
    /// Audio playback.
    pub audio: &'a mut dyn AudioSink,
    /// Player lookup.
    pub player: &'a dyn PlayerLocator,
    /// Ray casting.
    pub space: &'a dyn SpatialQuery,
    /// Diagnostic output.
    pub diagnostics: &'a mut dyn DiagnosticSink,
}
