//! Value types describing the machine's state and the intents it emits.

use glam::Vec3;
use serde::Serialize;
use thiserror::Error;

/// Behaviour mode of an enemy. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum BehaviourState {
    /// Lingering at the current waypoint.
    #[default]
    Idle,
    /// Walking to the current destination.
    Walking,
    /// Pursuing the player.
    Chasing,
}

/// Animation parameters emitted every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AnimationFlags {
    /// Walking locomotion is playing.
    pub walking: bool,
    /// Chase locomotion is playing.
    pub chasing: bool,
}

impl AnimationFlags {
    /// Both locomotion flags cleared.
    pub const IDLE: Self = Self {
        walking: false,
        chasing: false,
    };
    /// Walking locomotion.
    pub const WALKING: Self = Self {
        walking: true,
        chasing: false,
    };
    /// Chase locomotion.
    pub const CHASING: Self = Self {
        walking: false,
        chasing: true,
    };
}

/// Sound clips the enemy can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AudioCue {
    /// Ambient breathing while lingering.
    Idle,
    /// Footsteps while patrolling.
    Walking,
    /// Pursuit loop.
    Chasing,
    /// One-shot played when the enemy dies.
    Death,
}

impl BehaviourState {
    /// Animation flags shown while in this state.
    #[must_use]
    pub const fn animation(self) -> AnimationFlags {
        match self {
            Self::Idle => AnimationFlags::IDLE,
            Self::Walking => AnimationFlags::WALKING,
            Self::Chasing => AnimationFlags::CHASING,
        }
    }

    /// Looping audio cue played while in this state.
    #[must_use]
    pub const fn audio_cue(self) -> AudioCue {
        match self {
            Self::Idle => AudioCue::Idle,
            Self::Walking => AudioCue::Walking,
            Self::Chasing => AudioCue::Chasing,
        }
    }
}

/// Configuration problems detected when the machine starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigFault {
    /// The patrol route is empty.
    #[error("waypoints not assigned to enemy controller")]
    NoWaypoints,
    /// The tracked player could not be resolved.
    #[error("tracked player could not be located")]
    PlayerNotFound,
}

/// Where the machine is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Constructed but not yet started.
    #[default]
    Pending,
    /// Updating and polling for the player.
    Running,
    /// Start-up validation failed; the machine idles forever.
    Faulted(ConfigFault),
    /// Disabled by the host, typically because the enemy died.
    Stopped,
}

/// World-space pose of the agent, owned by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Agent position.
    pub position: Vec3,
    /// Direction the agent faces. Need not be normalised.
    pub forward: Vec3,
}

impl Pose {
    /// Creates a pose from a position and facing direction.
    #[must_use]
    pub const fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }
}
