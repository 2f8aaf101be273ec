//! Per-enemy behaviour configuration.
//!
//! [`EnemyConfig`] carries the tunables the perception machine reads: patrol
//! route, idle time, speeds, sight distance, field of view, and the detection
//! cadence. Scalars are validated up front; an empty patrol route is not a
//! validation error because the machine degrades to permanent idling instead
//! of refusing to exist.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    DEFAULT_CHASE_SPEED, DEFAULT_FIELD_OF_VIEW_DEGREES, DEFAULT_IDLE_TIME,
    DEFAULT_SIGHT_DISTANCE, DEFAULT_WALK_SPEED, DETECTION_INTERVAL_SECS,
};

/// Scalar configuration rejected by [`EnemyConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A movement speed was zero, negative, or not finite.
    #[error("{field} must be a positive finite speed, got {value}")]
    NonPositiveSpeed {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied.
        value: f32,
    },
    /// The idle time was negative or not finite.
    #[error("idle_time must be a non-negative number of seconds, got {0}")]
    NegativeIdleTime(f32),
    /// The sight distance was zero, negative, or not finite.
    #[error("sight_distance must be positive, got {0}")]
    NonPositiveSightDistance(f32),
    /// The detection half-angle fell outside `[0, 180]` degrees.
    #[error("field_of_view_degrees must lie within [0, 180], got {0}")]
    FieldOfViewOutOfRange(f32),
    /// The detection interval was zero, negative, or not finite.
    #[error("detection_interval must be positive, got {0}")]
    NonPositiveDetectionInterval(f32),
    /// A waypoint contained NaN or infinite components.
    #[error("waypoint {index} is not finite: {position:?}")]
    NonFiniteWaypoint {
        /// Position of the waypoint in the patrol route.
        index: usize,
        /// The rejected coordinates.
        position: Vec3,
    },
}

/// Behaviour tunables for one enemy.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use lurker::EnemyConfig;
///
/// let config = EnemyConfig::with_waypoints(vec![Vec3::ZERO, Vec3::X * 4.0]);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.waypoints.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnemyConfig {
    /// Patrol route, visited cyclically.
    pub waypoints: Vec<Vec3>,
    /// Seconds spent idling at each waypoint.
    pub idle_time: f32,
    /// Movement speed while patrolling.
    pub walk_speed: f32,
    /// Movement speed while chasing.
    pub chase_speed: f32,
    /// Maximum detection range; chases end beyond it.
    pub sight_distance: f32,
    /// Half-angle of the detection cone, in degrees.
    pub field_of_view_degrees: f32,
    /// Seconds between visibility checks.
    pub detection_interval: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            waypoints: Vec::new(),
            idle_time: DEFAULT_IDLE_TIME,
            walk_speed: DEFAULT_WALK_SPEED,
            chase_speed: DEFAULT_CHASE_SPEED,
            sight_distance: DEFAULT_SIGHT_DISTANCE,
            field_of_view_degrees: DEFAULT_FIELD_OF_VIEW_DEGREES,
            detection_interval: DETECTION_INTERVAL_SECS,
        }
    }
}

impl EnemyConfig {
    /// Default tunables with the given patrol route.
    #[must_use]
    pub fn with_waypoints(waypoints: Vec<Vec3>) -> Self {
        Self {
            waypoints,
            ..Self::default()
        }
    }

    /// Checks every scalar against its permitted range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, checking speeds, idle time,
    /// sight distance, field of view, detection interval, then waypoints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_speed("walk_speed", self.walk_speed)?;
        check_speed("chase_speed", self.chase_speed)?;
        if !self.idle_time.is_finite() || self.idle_time < 0.0 {
            return Err(ConfigError::NegativeIdleTime(self.idle_time));
        }
        if !self.sight_distance.is_finite() || self.sight_distance <= 0.0 {
            return Err(ConfigError::NonPositiveSightDistance(self.sight_distance));
        }
        if !(0.0..=180.0).contains(&self.field_of_view_degrees) {
            return Err(ConfigError::FieldOfViewOutOfRange(
                self.field_of_view_degrees,
            ));
        }
        if !self.detection_interval.is_finite() || self.detection_interval <= 0.0 {
            return Err(ConfigError::NonPositiveDetectionInterval(
                self.detection_interval,
            ));
        }
        if let Some((index, position)) = self
            .waypoints
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite())
        {
            return Err(ConfigError::NonFiniteWaypoint {
                index,
                position: *position,
            });
        }
        Ok(())
    }
}

fn check_speed(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveSpeed { field, value })
    }
}
