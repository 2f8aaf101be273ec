#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate providing perception-driven enemy behaviour.
//!
//! Each enemy runs a [`PerceptionStateMachine`] that idles at waypoints,
//! walks a cyclic patrol route, and chases the player once they enter a
//! sight cone with a clear line of sight. The machine talks to the world only
//! through the collaborator traits in [`perception`]; [`enemy_sync`] hosts it
//! inside a Bevy app.
pub mod config;
pub mod constants;
pub mod enemy_sync;
pub mod health;
pub mod logging;
pub mod perception;
pub mod scenario;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use config::{ConfigError, EnemyConfig};
pub use enemy_sync::{
    DamageInbox, DiagnosticHistory, EnemyAiPlugin, EnemyBrain, EnemyDamage, PerceptionDiagnostic,
    Player,
};
pub use health::{DamageOutcome, EnemyHealth};
pub use logging::init as init_logging;
pub use perception::{
    BehaviourState, Collaborators, ConfigFault, Diagnostic, Lifecycle, PerceptionStateMachine,
    Pose,
};
pub use scenario::{Scenario, ScenarioError};
pub use vector_math::{angle_between_degrees, direction_to};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use lurker::prelude::*;
    //! ```

    pub use crate::perception::{
        AnimationSink, AudioSink, DiagnosticSink, Navigator, PlayerLocator, SpatialQuery,
    };
    pub use crate::BehaviourState;
    pub use crate::Collaborators;
    pub use crate::EnemyAiPlugin;
    pub use crate::EnemyConfig;
    pub use crate::PerceptionStateMachine;
    pub use crate::Pose;
    pub use glam::Vec3;
}
