//! Per-frame snapshots of the world that the machine reads.

use bevy::prelude::*;
use glam::Vec3;

use super::components::Collider;
use crate::perception::{ColliderTag, PlayerLocator, Ray, RayHit, SpatialQuery};
use crate::vector_math::ray_sphere_entry;

/// Player position captured at the start of a system run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerTracker(pub Option<Vec3>);

impl PlayerLocator for PlayerTracker {
    fn player_position(&self) -> Option<Vec3> {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SphereShape {
    centre: Vec3,
    radius: f32,
    tag: ColliderTag,
}

/// Enabled colliders captured for ray casts.
///
/// Rays report the nearest sphere they enter. Spheres enclosing the ray
/// origin are skipped so an enemy never sees its own collider.
#[derive(Debug, Clone, Default)]
pub struct SpatialIndex {
    shapes: Vec<SphereShape>,
}

impl SpatialIndex {
    /// Collects every enabled collider.
    pub fn gather<'a, I>(colliders: I) -> Self
    where
        I: IntoIterator<Item = (&'a Transform, &'a Collider)>,
    {
        let shapes = colliders
            .into_iter()
            .filter(|(_, collider)| collider.enabled)
            .map(|(transform, collider)| SphereShape {
                centre: transform.translation,
                radius: collider.radius,
                tag: collider.tag,
            })
            .collect();
        Self { shapes }
    }

    /// Number of colliders captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether no colliders were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl SpatialQuery for SpatialIndex {
    fn raycast(&self, ray: Ray, max_distance: f32) -> Option<RayHit> {
        self.shapes
            .iter()
            .filter_map(|shape| {
                ray_sphere_entry(ray.origin, ray.direction, shape.centre, shape.radius)
                    .filter(|distance| *distance <= max_distance)
                    .map(|distance| RayHit {
                        tag: shape.tag,
                        distance,
                    })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn corridor() -> Vec<(Transform, Collider)> {
        vec![
            (
                Transform::from_xyz(0.0, 0.0, 0.0),
                Collider::sphere(0.5, ColliderTag::Enemy),
            ),
            (
                Transform::from_xyz(0.0, 0.0, -8.0),
                Collider::sphere(0.5, ColliderTag::Player),
            ),
            (
                Transform::from_xyz(0.0, 0.0, -4.0),
                Collider::sphere(1.0, ColliderTag::Scenery),
            ),
        ]
    }

    fn north() -> Ray {
        Ray {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
        }
    }

    #[rstest]
    fn nearest_blocker_wins(corridor: Vec<(Transform, Collider)>) {
        let index = SpatialIndex::gather(corridor.iter().map(|(t, c)| (t, c)));
        let hit = index.raycast(north(), 20.0).expect("wall in the way");
        assert_eq!(hit.tag, ColliderTag::Scenery);
        assert!((hit.distance - 3.0).abs() < 1e-5);
    }

    #[rstest]
    fn disabled_colliders_are_transparent(mut corridor: Vec<(Transform, Collider)>) {
        if let Some((_, wall)) = corridor.get_mut(2) {
            wall.enabled = false;
        }
        let index = SpatialIndex::gather(corridor.iter().map(|(t, c)| (t, c)));
        assert_eq!(index.len(), 2);
        let hit = index.raycast(north(), 20.0).expect("player visible");
        assert_eq!(hit.tag, ColliderTag::Player);
    }

    #[rstest]
    fn range_limits_the_cast(corridor: Vec<(Transform, Collider)>) {
        let index = SpatialIndex::gather(corridor.iter().map(|(t, c)| (t, c)));
        assert!(index.raycast(north(), 2.5).is_none());
    }
}
