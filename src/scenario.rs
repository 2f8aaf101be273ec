//! Scenario files for the headless runner.
//!
//! A scenario is a JSON document naming the player, the enemies with their
//! behaviour configuration, and any obstacles that block line of sight.
//! [`Scenario::spawn_into`] turns it into entities ready for
//! [`EnemyAiPlugin`](crate::enemy_sync::EnemyAiPlugin).

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::{Entity, Transform, World};
use glam::Vec3;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, EnemyConfig};
use crate::enemy_sync::{enemy_bundle, player_bundle, Collider, PlayerRoute};
use crate::health::EnemyHealth;
use crate::perception::{ColliderTag, PerceptionStateMachine};
use crate::{DEFAULT_ENEMY_HEALTH, DEFAULT_FRAME_SECONDS, DEFAULT_STOPPING_DISTANCE};

/// Errors raised while loading or spawning a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The file could not be read.
    #[error("failed to read scenario {}: {source}", path.display())]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The document was not valid scenario JSON.
    #[error("invalid scenario JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// An enemy's behaviour configuration was rejected.
    #[error("enemy {index}: {source}")]
    Enemy {
        /// Position of the enemy in the `enemies` list.
        index: usize,
        /// Why its configuration was rejected.
        #[source]
        source: ConfigError,
    },
    /// The frame length was zero, negative, or not finite.
    #[error("frame_seconds must be positive, got {0}")]
    InvalidFrameSeconds(f32),
}

/// The tracked player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerSpec {
    /// Starting position.
    pub position: Vec3,
    /// Points the player walks through in order; empty means standing still.
    pub route: Vec<Vec3>,
    /// Walking speed along the route.
    pub speed: f32,
}

impl Default for PlayerSpec {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            route: Vec::new(),
            speed: 1.5,
        }
    }
}

/// One patrolling enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnemySpec {
    /// Starting position.
    pub position: Vec3,
    /// Initial facing direction.
    pub facing: Vec3,
    /// Navigation arrival threshold.
    pub stopping_distance: f32,
    /// Starting hit points.
    pub health: i32,
    /// Behaviour tunables and patrol route.
    pub config: EnemyConfig,
}

impl Default for EnemySpec {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            facing: Vec3::NEG_Z,
            stopping_distance: DEFAULT_STOPPING_DISTANCE,
            health: DEFAULT_ENEMY_HEALTH,
            config: EnemyConfig::default(),
        }
    }
}

/// A spherical obstacle that blocks line of sight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObstacleSpec {
    /// Centre of the sphere.
    pub position: Vec3,
    /// Radius of the sphere.
    pub radius: f32,
}

/// A complete headless run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    /// Length of one simulated frame in seconds.
    pub frame_seconds: f32,
    /// Number of frames to simulate.
    pub frames: u32,
    /// The player.
    pub player: PlayerSpec,
    /// Every enemy, in spawn order.
    pub enemies: Vec<EnemySpec>,
    /// Line-of-sight blockers.
    pub obstacles: Vec<ObstacleSpec>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            frame_seconds: DEFAULT_FRAME_SECONDS,
            frames: 600,
            player: PlayerSpec::default(),
            enemies: Vec::new(),
            obstacles: Vec::new(),
        }
    }
}

/// Entities created by [`Scenario::spawn_into`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnedScenario {
    /// The player entity.
    pub player: Entity,
    /// Enemy entities in the order they appear in the scenario.
    pub enemies: Vec<Entity>,
}

impl Scenario {
    /// Reads and validates a scenario file.
    ///
    /// # Errors
    ///
    /// Returns a [`ScenarioError`] if the file cannot be read, is not valid
    /// JSON, or describes an invalid scenario.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_json_str(&json)?;
        info!(
            "loaded scenario {} with {} enemies",
            path.display(),
            scenario.enemies.len()
        );
        Ok(scenario)
    }

    /// Parses and validates a scenario document.
    ///
    /// # Errors
    ///
    /// Returns a [`ScenarioError`] if the JSON is malformed or the scenario
    /// is invalid.
    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Checks the frame length and every enemy configuration.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if !self.frame_seconds.is_finite() || self.frame_seconds <= 0.0 {
            return Err(ScenarioError::InvalidFrameSeconds(self.frame_seconds));
        }
        for (index, enemy) in self.enemies.iter().enumerate() {
            enemy
                .config
                .validate()
                .map_err(|source| ScenarioError::Enemy { index, source })?;
        }
        Ok(())
    }

    /// A small courtyard: one guard patrolling a square, one sentry behind a
    /// pillar, and a player walking in from the north.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            player: PlayerSpec {
                position: Vec3::new(0.0, 0.0, -30.0),
                route: vec![Vec3::new(0.0, 0.0, -6.0), Vec3::new(12.0, 0.0, -6.0)],
                speed: 1.5,
            },
            enemies: vec![
                EnemySpec {
                    config: EnemyConfig::with_waypoints(vec![
                        Vec3::new(0.0, 0.0, -4.0),
                        Vec3::new(4.0, 0.0, -4.0),
                        Vec3::new(4.0, 0.0, 0.0),
                        Vec3::ZERO,
                    ]),
                    ..EnemySpec::default()
                },
                EnemySpec {
                    position: Vec3::new(12.0, 0.0, 4.0),
                    config: EnemyConfig::with_waypoints(vec![Vec3::new(12.0, 0.0, 4.0)]),
                    ..EnemySpec::default()
                },
            ],
            obstacles: vec![ObstacleSpec {
                position: Vec3::new(12.0, 0.0, 0.0),
                radius: 1.5,
            }],
            ..Self::default()
        }
    }

    /// Spawns the player, enemies, and obstacles into `world`.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Enemy`] if an enemy's configuration is
    /// rejected; entities spawned before the failure are left in place.
    pub fn spawn_into(&self, world: &mut World) -> Result<SpawnedScenario, ScenarioError> {
        let player = world
            .spawn(player_bundle(Transform::from_translation(
                self.player.position,
            )))
            .id();
        if !self.player.route.is_empty() {
            world.entity_mut(player).insert(PlayerRoute::new(
                self.player.route.clone(),
                self.player.speed,
            ));
        }

        let mut enemies = Vec::with_capacity(self.enemies.len());
        for (index, spec) in self.enemies.iter().enumerate() {
            let machine = PerceptionStateMachine::new(spec.config.clone())
                .map_err(|source| ScenarioError::Enemy { index, source })?;
            let transform =
                Transform::from_translation(spec.position).looking_to(spec.facing, Vec3::Y);
            let enemy = world
                .spawn(enemy_bundle(
                    machine,
                    transform,
                    spec.stopping_distance,
                    EnemyHealth::new(spec.health),
                ))
                .id();
            debug!("spawned enemy {index} as {enemy:?}");
            enemies.push(enemy);
        }

        for obstacle in &self.obstacles {
            world.spawn((
                Transform::from_translation(obstacle.position),
                Collider::sphere(obstacle.radius, ColliderTag::Scenery),
            ));
        }

        Ok(SpawnedScenario { player, enemies })
    }
}
