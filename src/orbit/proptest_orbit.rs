//! Property-based tests for the orbit calculator using proptest.
//!
//! These check geometric invariants that must hold for every finite body
//! definition and time, not just the built-in solar system.

use proptest::prelude::*;

use super::{compute_position, local_offset};
use crate::catalog::BodyDefinition;
use bevy::math::DVec3;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A body never leaves its circle, whatever the speed or time.
    #[test]
    fn prop_distance_from_center_is_constant(
        distance in 0.1f64..1000.0,
        speed in -10.0f64..10.0,
        time in 0.0f64..1e7,
    ) {
        let body = BodyDefinition::orbiting("Probe", 1.0, distance, speed, 0.0);
        let pos = compute_position(&body, time, None).unwrap();

        let error = (pos.length() - distance).abs() / distance;
        prop_assert!(
            error < 1e-9,
            "Radius drift: |p|={} vs d={} (t={}, w={})",
            pos.length(), distance, time, speed
        );
        prop_assert_eq!(pos.y, 0.0);
    }

    /// Small time steps produce small moves (no jumps at the 2π wrap).
    #[test]
    fn prop_motion_is_continuous(
        distance in 0.1f64..100.0,
        speed in -5.0f64..5.0,
        time in 0.0f64..1e5,
    ) {
        let body = BodyDefinition::orbiting("Probe", 1.0, distance, speed, 0.0);
        let dt = 1e-4;
        let a = compute_position(&body, time, None).unwrap();
        let b = compute_position(&body, time + dt, None).unwrap();

        // Chord length is bounded by arc length
        let max_step = distance * speed.abs() * dt + 1e-9 * distance;
        prop_assert!(
            a.distance(b) <= max_step * 1.001 + 1e-9,
            "Jump of {} exceeds {} at t={}",
            a.distance(b), max_step, time
        );
    }

    /// A moon is its parent's position plus its own local offset.
    #[test]
    fn prop_moon_tracks_parent(
        px in -100.0f64..100.0,
        pz in -100.0f64..100.0,
        distance in 0.0f64..10.0,
        speed in -10.0f64..10.0,
        time in 0.0f64..1e5,
    ) {
        let parent = DVec3::new(px, 0.0, pz);
        let moon = BodyDefinition::orbiting("Moon", 0.2, distance, speed, 0.0).around("Planet");
        let pos = compute_position(&moon, time, Some(parent)).unwrap();
        let expected = parent + local_offset(distance, speed, time);

        prop_assert!(
            pos.distance(expected) < 1e-9,
            "Moon at {:?}, expected {:?}",
            pos, expected
        );
        prop_assert!((pos.distance(parent) - distance).abs() < 1e-9);
    }
}
