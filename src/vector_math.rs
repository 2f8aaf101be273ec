//! Basic vector math helper functions.
//! Angles, directions, and ray intersection used by the perception checks.
use glam::Vec3;

use crate::DIRECTION_EPSILON;

/// Returns the unit vector pointing from `from` towards `to`.
///
/// Returns `None` when either point is not finite or the points coincide,
/// since no direction is defined in that case.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use lurker::vector_math::direction_to;
/// let dir = direction_to(Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0)).unwrap();
/// assert!((dir.z + 1.0).abs() < 1e-6);
/// assert!(direction_to(Vec3::ONE, Vec3::ONE).is_none());
/// ```
#[must_use]
pub fn direction_to(from: Vec3, to: Vec3) -> Option<Vec3> {
    let offset = to - from;
    if !offset.is_finite() || offset.length() < DIRECTION_EPSILON {
        return None;
    }
    offset.try_normalize()
}

/// Returns the unsigned angle between two vectors in degrees, in `[0, 180]`.
///
/// Returns `None` if either vector is non-finite or too short to define a
/// direction.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use lurker::vector_math::angle_between_degrees;
/// let angle = angle_between_degrees(Vec3::X, Vec3::Z).unwrap();
/// assert!((angle - 90.0).abs() < 1e-4);
/// assert!(angle_between_degrees(Vec3::X, Vec3::ZERO).is_none());
/// ```
#[must_use]
pub fn angle_between_degrees(from: Vec3, to: Vec3) -> Option<f32> {
    if !from.is_finite() || !to.is_finite() {
        return None;
    }
    if from.length() < DIRECTION_EPSILON || to.length() < DIRECTION_EPSILON {
        return None;
    }
    let a = from.try_normalize()?;
    let b = to.try_normalize()?;
    Some(a.dot(b).clamp(-1.0, 1.0).acos().to_degrees())
}

/// Distance along a ray at which it first enters a sphere.
///
/// `direction` must be normalised. Rays starting inside the sphere report no
/// hit, matching physics engines that ignore colliders enclosing the origin.
/// Intersections behind the origin are ignored as well.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use lurker::vector_math::ray_sphere_entry;
/// let hit = ray_sphere_entry(Vec3::ZERO, Vec3::X, Vec3::new(5.0, 0.0, 0.0), 1.0);
/// assert_eq!(hit, Some(4.0));
/// assert!(ray_sphere_entry(Vec3::ZERO, Vec3::X, Vec3::ZERO, 1.0).is_none());
/// ```
#[must_use]
pub fn ray_sphere_entry(origin: Vec3, direction: Vec3, centre: Vec3, radius: f32) -> Option<f32> {
    let to_centre = centre - origin;
    let radius_sq = radius * radius;
    if to_centre.length_squared() <= radius_sq {
        return None;
    }
    let along = to_centre.dot(direction);
    if along < 0.0 {
        return None;
    }
    let closest_sq = to_centre.length_squared() - along * along;
    if closest_sq > radius_sq {
        return None;
    }
    Some(along - (radius_sq - closest_sq).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::ahead(Vec3::NEG_Z, Vec3::new(0.0, 0.0, -5.0), 0.0)]
    #[case::right_angle(Vec3::NEG_Z, Vec3::new(5.0, 0.0, 0.0), 90.0)]
    #[case::behind(Vec3::NEG_Z, Vec3::new(0.0, 0.0, 2.0), 180.0)]
    #[case::diagonal(Vec3::X, Vec3::new(1.0, 1.0, 0.0), 45.0)]
    fn angle_cases(#[case] forward: Vec3, #[case] to_target: Vec3, #[case] expected: f32) {
        let angle = angle_between_degrees(forward, to_target).expect("angle defined");
        assert_relative_eq!(angle, expected, epsilon = 1e-3);
    }

    #[rstest]
    fn angle_rejects_non_finite_input() {
        assert!(angle_between_degrees(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::X).is_none());
    }

    #[rstest]
    fn grazing_ray_touches_sphere() {
        let hit = ray_sphere_entry(Vec3::ZERO, Vec3::X, Vec3::new(3.0, 1.0, 0.0), 1.0)
            .expect("tangent ray should touch");
        assert_relative_eq!(hit, 3.0, epsilon = 1e-5);
    }

    #[rstest]
    fn sphere_behind_origin_is_missed() {
        assert!(ray_sphere_entry(Vec3::ZERO, Vec3::X, Vec3::new(-4.0, 0.0, 0.0), 1.0).is_none());
    }
}
