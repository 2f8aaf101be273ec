//! The enemy's Idle → Walking → Chasing state machine.

use glam::Vec3;
use log::debug;

use super::cadence::{duration_from_secs, DetectionCadence};
use super::detection::{player_in_sight, SightCone};
use super::host::{Collaborators, Diagnostic};
use super::state::{BehaviourState, ConfigFault, Lifecycle, Pose};
use crate::config::{ConfigError, EnemyConfig};

/// Patrol, idle, and chase behaviour for one enemy.
///
/// The host calls [`tick`](Self::tick) once per frame. Each call dispatches
/// to the handler for the current state and, on the detection cadence, checks
/// whether the player has come into view. All effects flow out through the
/// [`Collaborators`] passed in.
#[derive(Debug, Clone)]
pub struct PerceptionStateMachine {
    config: EnemyConfig,
    state: BehaviourState,
    waypoint_index: usize,
    idle_timer: f32,
    cadence: DetectionCadence,
    lifecycle: Lifecycle,
}

impl PerceptionStateMachine {
    /// Builds an idle machine that has not yet started.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any scalar in `config` is out of range.
    pub fn new(config: EnemyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let cadence = DetectionCadence::new(config.detection_interval);
        Ok(Self {
            config,
            state: BehaviourState::Idle,
            waypoint_index: 0,
            idle_timer: 0.0,
            cadence,
            lifecycle: Lifecycle::Pending,
        })
    }

    /// Validates collaborators and heads for the first waypoint.
    ///
    /// A machine with no waypoints, or one that cannot locate the player,
    /// reports the fault once through the diagnostic sink and stays idle for
    /// the rest of its life. Calling `start` on a machine that is no longer
    /// pending does nothing.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigFault`] that disabled the machine.
    pub fn start(&mut self, host: &mut Collaborators<'_>) -> Result<(), ConfigFault> {
        if self.lifecycle != Lifecycle::Pending {
            return Ok(());
        }
        if let Err(fault) = self.check_collaborators(host) {
            self.lifecycle = Lifecycle::Faulted(fault);
            self.cadence.stop();
            host.diagnostics.report(Diagnostic::Misconfigured(fault));
            return Err(fault);
        }
        self.lifecycle = Lifecycle::Running;
        self.head_to_current_waypoint(host);
        Ok(())
    }

    fn check_collaborators(&self, host: &Collaborators<'_>) -> Result<(), ConfigFault> {
        if self.config.waypoints.is_empty() {
            return Err(ConfigFault::NoWaypoints);
        }
        if host.player.player_position().is_none() {
            return Err(ConfigFault::PlayerNotFound);
        }
        Ok(())
    }

    /// Runs one frame: the state handler, then the visibility check if it is
    /// due.
    pub fn tick(&mut self, delta_secs: f32, pose: Pose, host: &mut Collaborators<'_>) {
        if !self.is_running() {
            return;
        }
        self.update(delta_secs, pose, host);
        let delta = duration_from_secs(delta_secs);
        if self.cadence.poll(delta) {
            self.detect(pose, host);
        }
    }

    /// Runs the handler for the current state only.
    pub fn update(&mut self, delta_secs: f32, pose: Pose, host: &mut Collaborators<'_>) {
        if !self.is_running() {
            return;
        }
        match self.state {
            BehaviourState::Idle => self.handle_idle(delta_secs, host),
            BehaviourState::Walking => self.handle_walking(host),
            BehaviourState::Chasing => self.handle_chasing(pose, host),
        }
    }

    /// Looks for the player and starts a chase if they are visible.
    ///
    /// Returns whether the player was seen. Seeing the player while already
    /// chasing changes nothing; this check never ends a chase.
    pub fn detect(&mut self, pose: Pose, host: &mut Collaborators<'_>) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(player) = host.player.player_position() else {
            return false;
        };
        let cone = SightCone {
            range: self.config.sight_distance,
            half_angle_degrees: self.config.field_of_view_degrees,
        };
        if !player_in_sight(pose, player, cone, host.space) {
            return false;
        }
        if self.state != BehaviourState::Chasing {
            self.state = BehaviourState::Chasing;
            host.navigator.set_speed(self.config.chase_speed);
            host.navigator.set_destination(player);
            host.diagnostics.report(Diagnostic::PlayerDetected { at: player });
        }
        true
    }

    /// Disables the machine and cancels the visibility check.
    pub fn stop(&mut self) {
        self.lifecycle = Lifecycle::Stopped;
        self.cadence.stop();
    }

    fn handle_idle(&mut self, delta_secs: f32, host: &mut Collaborators<'_>) {
        self.idle_timer += delta_secs;
        host.animation.apply(self.state.animation());
        host.audio.play(self.state.audio_cue());
        if self.idle_timer >= self.config.idle_time {
            self.advance_waypoint(host);
        }
    }

    fn handle_walking(&mut self, host: &mut Collaborators<'_>) {
        self.idle_timer = 0.0;
        host.animation.apply(self.state.animation());
        host.audio.play(self.state.audio_cue());
        if host.navigator.remaining_distance() <= host.navigator.stopping_distance() {
            debug!("arrived at waypoint {}", self.waypoint_index);
            self.enter(BehaviourState::Idle);
        }
    }

    fn handle_chasing(&mut self, pose: Pose, host: &mut Collaborators<'_>) {
        let player = host.player.player_position();
        host.navigator.set_speed(self.config.chase_speed);
        if let Some(target) = player {
            host.navigator.set_destination(target);
        }
        host.animation.apply(self.state.animation());
        host.audio.play(self.state.audio_cue());

        let distance = player.map(|target| pose.position.distance(target));
        if distance.is_none_or(|d| d > self.config.sight_distance) {
            self.enter(BehaviourState::Walking);
            host.navigator.set_speed(self.config.walk_speed);
            host.diagnostics.report(Diagnostic::PlayerLost { distance });
        }
    }

    fn advance_waypoint(&mut self, host: &mut Collaborators<'_>) {
        self.waypoint_index = (self.waypoint_index + 1) % self.config.waypoints.len();
        self.head_to_current_waypoint(host);
    }

    fn head_to_current_waypoint(&mut self, host: &mut Collaborators<'_>) {
        let Some(&waypoint) = self.config.waypoints.get(self.waypoint_index) else {
            return;
        };
        host.navigator.set_destination(waypoint);
        host.navigator.set_speed(self.config.walk_speed);
        self.enter(BehaviourState::Walking);
    }

    fn enter(&mut self, state: BehaviourState) {
        if matches!(state, BehaviourState::Idle | BehaviourState::Walking) {
            self.idle_timer = 0.0;
        }
        debug!("{:?} -> {:?}", self.state, state);
        self.state = state;
    }

    /// Current behaviour mode.
    #[must_use]
    pub const fn state(&self) -> BehaviourState {
        self.state
    }

    /// Index of the waypoint being walked to or lingered at.
    #[must_use]
    pub const fn waypoint_index(&self) -> usize {
        self.waypoint_index
    }

    /// The waypoint at [`Self::waypoint_index`], if the route is non-empty.
    #[must_use]
    pub fn current_waypoint(&self) -> Option<Vec3> {
        self.config.waypoints.get(self.waypoint_index).copied()
    }

    /// Seconds spent in the current idle episode.
    #[must_use]
    pub const fn idle_timer(&self) -> f32 {
        self.idle_timer
    }

    /// Where the machine is in its life.
    #[must_use]
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Whether the machine is started and neither faulted nor stopped.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }
}
