//! Field-of-view and line-of-sight test for spotting the player.

use glam::Vec3;

use super::host::{ColliderTag, Ray, SpatialQuery};
use super::state::Pose;
use crate::vector_math::{angle_between_degrees, direction_to};

/// Geometry of the detection cone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SightCone {
    /// Longest distance a ray is cast.
    pub range: f32,
    /// Half-angle in degrees.
    pub half_angle_degrees: f32,
}

/// Whether the player at `player` is visible from `pose`.
///
/// The player must lie within the cone's half-angle of the agent's forward
/// direction, and the first thing a ray cast towards them (no further than
/// the cone's range) hits must be tagged [`ColliderTag::Player`]. An angle
/// exactly on the cone boundary counts as inside. A player standing at the
/// agent's position, or an agent with no facing, is never seen.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use lurker::perception::{player_in_sight, ColliderTag, Pose, Ray, RayHit, SightCone, SpatialQuery};
///
/// struct Open;
/// impl SpatialQuery for Open {
///     fn raycast(&self, _ray: Ray, _max: f32) -> Option<RayHit> {
///         Some(RayHit { tag: ColliderTag::Player, distance: 5.0 })
///     }
/// }
///
/// let pose = Pose::new(Vec3::ZERO, Vec3::NEG_Z);
/// let cone = SightCone { range: 10.0, half_angle_degrees: 45.0 };
/// assert!(player_in_sight(pose, Vec3::new(0.0, 0.0, -5.0), cone, &Open));
/// assert!(!player_in_sight(pose, Vec3::new(5.0, 0.0, 0.0), cone, &Open));
/// ```
#[must_use]
pub fn player_in_sight(
    pose: Pose,
    player: Vec3,
    cone: SightCone,
    space: &dyn SpatialQuery,
) -> bool {
    let to_player = player - pose.position;
    let Some(angle) = angle_between_degrees(pose.forward, to_player) else {
        return false;
    };
    if angle > cone.half_angle_degrees {
        return false;
    }
    let Some(direction) = direction_to(pose.position, player) else {
        return false;
    };
    let ray = Ray {
        origin: pose.position,
        direction,
    };
    space
        .raycast(ray, cone.range)
        .is_some_and(|hit| hit.tag == ColliderTag::Player)
}
