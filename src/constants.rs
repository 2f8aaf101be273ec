//! Behaviour constants shared by the perception machine and its host.
//!
//! These mirror the defaults the enemy controller shipped with; scenario files
//! may override the per-enemy values.

/// Seconds an enemy lingers at a waypoint before walking to the next one.
pub const DEFAULT_IDLE_TIME: f32 = 2.0;
/// Patrol movement speed in world units per second.
pub const DEFAULT_WALK_SPEED: f32 = 2.0;
/// Pursuit movement speed in world units per second.
pub const DEFAULT_CHASE_SPEED: f32 = 4.0;
/// Maximum detection range and the range beyond which a chase is abandoned.
pub const DEFAULT_SIGHT_DISTANCE: f32 = 10.0;
/// Half-angle of the detection cone.
pub const DEFAULT_FIELD_OF_VIEW_DEGREES: f32 = 45.0;
/// Seconds between player-visibility checks (five checks per second).
pub const DETECTION_INTERVAL_SECS: f32 = 0.2;
/// Distance from a destination at which a navigation agent counts as arrived.
pub const DEFAULT_STOPPING_DISTANCE: f32 = 0.5;
/// Starting hit points for enemies spawned without an explicit value.
pub const DEFAULT_ENEMY_HEALTH: i32 = 100;
/// Delay between an enemy's death and its removal from the world.
pub const DESPAWN_DELAY_SECS: f32 = 2.0;
/// Length of one frame in the headless runner when a scenario omits it.
pub const DEFAULT_FRAME_SECONDS: f32 = 1.0 / 60.0;
/// Below this length a direction vector is treated as undefined.
pub const DIRECTION_EPSILON: f32 = 1e-6;
