//! Recording collaborators for driving a machine without a Bevy world.
use bevy::prelude::Transform;
use glam::Vec3;
use lurker::enemy_sync::{Animator, AudioEmitter, Collider, PlayerTracker, SpatialIndex};
use lurker::enemy_sync::BODY_RADIUS;
use lurker::perception::{ColliderTag, Collaborators, Diagnostic, Navigator};

/// Navigation agent whose remaining distance is set by the test.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeNavigator {
    /// Last destination set.
    pub destination: Option<Vec3>,
    /// Last speed set.
    pub speed: f32,
    /// Value reported by `remaining_distance`.
    pub remaining: f32,
    /// Value reported by `stopping_distance`.
    pub stopping: f32,
    /// Every destination set, oldest first.
    pub destinations: Vec<Vec3>,
    /// Every speed set, oldest first.
    pub speeds: Vec<f32>,
}

impl Default for FakeNavigator {
    fn default() -> Self {
        Self {
            destination: None,
            speed: 0.0,
            remaining: 100.0,
            stopping: 0.5,
            destinations: Vec::new(),
            speeds: Vec::new(),
        }
    }
}

impl FakeNavigator {
    /// Reports the agent as having reached its destination.
    pub fn arrive(&mut self) {
        self.remaining = 0.0;
    }
}

impl Navigator for FakeNavigator {
    fn set_destination(&mut self, destination: Vec3) {
        self.destination = Some(destination);
        self.destinations.push(destination);
        self.remaining = 100.0;
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
        self.speeds.push(speed);
    }

    fn remaining_distance(&self) -> f32 {
        self.remaining
    }

    fn stopping_distance(&self) -> f32 {
        self.stopping
    }
}

/// Every collaborator a machine needs, with the player and obstacles laid
/// out in a real [`SpatialIndex`].
#[derive(Debug, Default)]
pub struct FakeHost {
    /// Navigation intents.
    pub navigator: FakeNavigator,
    /// Latest animation flags.
    pub animator: Animator,
    /// Audio channel state.
    pub audio: AudioEmitter,
    /// Diagnostics reported, oldest first.
    pub diagnostics: Vec<Diagnostic>,
    player: PlayerTracker,
    obstacles: Vec<(Transform, Collider)>,
    space: SpatialIndex,
}

impl FakeHost {
    /// A host with the player standing at `player`.
    pub fn with_player(player: Vec3) -> Self {
        let mut host = Self::default();
        host.place_player(Some(player));
        host
    }

    /// Moves the player, or removes them with `None`.
    pub fn place_player(&mut self, player: Option<Vec3>) {
        self.player = PlayerTracker(player);
        self.rebuild_space();
    }

    /// Adds a line-of-sight blocker.
    pub fn add_obstacle(&mut self, centre: Vec3, radius: f32) {
        self.obstacles.push((
            Transform::from_translation(centre),
            Collider::sphere(radius, ColliderTag::Scenery),
        ));
        self.rebuild_space();
    }

    fn rebuild_space(&mut self) {
        let player = self.player.0.map(|position| {
            (
                Transform::from_translation(position),
                Collider::sphere(BODY_RADIUS, ColliderTag::Player),
            )
        });
        self.space = SpatialIndex::gather(
            self.obstacles
                .iter()
                .chain(player.iter())
                .map(|(transform, collider)| (transform, collider)),
        );
    }

    /// Lends every collaborator for one call into the machine.
    pub fn host(&mut self) -> Collaborators<'_> {
        Collaborators {
            navigator: &mut self.navigator,
            animation: &mut self.animator,
            audio: &mut self.audio,
            player: &self.player,
            space: &self.space,
            diagnostics: &mut self.diagnostics,
        }
    }
}
