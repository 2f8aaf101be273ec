//! Vector math helpers: directions, angles, and ray/sphere entry.

use approx::assert_relative_eq;
use glam::Vec3;
use lurker::vector_math::ray_sphere_entry;
use lurker::{angle_between_degrees, direction_to};

#[test]
fn angle_is_none_for_nan() {
    assert!(angle_between_degrees(Vec3::new(f32::NAN, 1.0, 0.0), Vec3::X).is_none());
}

#[test]
fn opposite_vectors_are_half_a_turn_apart() {
    let angle = angle_between_degrees(Vec3::NEG_Z, Vec3::new(0.0, 0.0, 4.0))
        .expect("both vectors are usable");
    assert_relative_eq!(angle, 180.0, epsilon = 1e-3);
}

#[test]
fn direction_ignores_distance() {
    let near = direction_to(Vec3::ZERO, Vec3::new(0.0, 3.0, 4.0)).expect("distinct points");
    let far = direction_to(Vec3::ZERO, Vec3::new(0.0, 30.0, 40.0)).expect("distinct points");
    assert_relative_eq!(near.y, 0.6, epsilon = 1e-6);
    assert_relative_eq!(near.z, far.z, epsilon = 1e-6);
}

#[test]
fn ray_misses_sphere_behind_it() {
    assert!(ray_sphere_entry(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, 5.0), 1.0).is_none());
}
