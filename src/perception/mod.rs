//! Enemy perception and behaviour.
//!
//! [`PerceptionStateMachine`] owns the enemy's behaviour mode, patrol cursor,
//! idle timer, and detection cadence. It emits navigation, animation, audio,
//! and diagnostic intents through the host traits in this module and never
//! touches engine state directly.

mod cadence;
mod detection;
mod host;
mod machine;
mod state;

pub use cadence::{duration_from_secs, DetectionCadence};
pub use detection::{player_in_sight, SightCone};
pub use host::{
    AnimationSink, AudioSink, ColliderTag, Collaborators, Diagnostic, DiagnosticSink, Navigator,
    PlayerLocator, Ray, RayHit, SpatialQuery,
};
pub use machine::PerceptionStateMachine;
pub use state::{AnimationFlags, AudioCue, BehaviourState, ConfigFault, Lifecycle, Pose};
