//! End-to-end tests of the per-frame pipeline.

mod common;

use approx::assert_relative_eq;
use bevy::math::DVec3;
use orrery::error::SimError;
use orrery::scene::FrameSnapshot;

use common::{mini_scene, run, solar_scene};

#[test]
fn test_sun_stays_at_origin() {
    let mut scene = solar_scene();
    for frame in run(&mut scene, 120, 1.0 / 60.0) {
        let sun = frame.body("sun").unwrap();
        assert_eq!(sun.position, DVec3::ZERO);
    }
}

#[test]
fn test_every_orbit_keeps_its_radius() {
    let mut scene = solar_scene();
    let frames = run(&mut scene, 200, 0.05);
    let catalog = scene.registry().catalog();

    for frame in frames.iter().step_by(20) {
        for (i, body) in catalog.bodies().iter().enumerate() {
            let center = catalog
                .parent_index(i)
                .map_or(DVec3::ZERO, |p| frame.bodies[p].position);
            let r = frame.bodies[i].position.distance(center);
            assert_relative_eq!(r, body.orbital_distance, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_mercury_after_one_second() {
    let mut scene = solar_scene();
    let frames = run(&mut scene, 1, 1.0);
    let mercury = frames[0].body("Mercury").unwrap();

    // Speed 4 rad/s at distance 10
    assert_relative_eq!(mercury.position.x, 10.0 * 4.0_f64.cos(), epsilon = 1e-9);
    assert_relative_eq!(mercury.position.z, 10.0 * 4.0_f64.sin(), epsilon = 1e-9);
    assert_relative_eq!(mercury.position.y, 0.0);
}

#[test]
fn test_moon_rides_on_earth() {
    let mut scene = mini_scene();
    let frames = run(&mut scene, 30, 0.1);
    let last = frames.last().unwrap();
    let t = last.sim_time;

    let earth = last.body("Earth").unwrap().position;
    let moon = last.body("Moon").unwrap().position;
    let offset = DVec3::new(2.5 * (3.0 * t).cos(), 0.0, 2.5 * (3.0 * t).sin());
    assert_relative_eq!(moon.x, earth.x + offset.x, epsilon = 1e-9);
    assert_relative_eq!(moon.z, earth.z + offset.z, epsilon = 1e-9);
}

#[test]
fn test_pause_freezes_positions_but_not_frames() {
    let mut scene = mini_scene();
    run(&mut scene, 10, 0.1);
    scene.set_paused(true);
    scene.set_paused(true);

    let frames = run(&mut scene, 10, 0.1);
    let first = &frames[0];
    for frame in &frames {
        assert!(frame.paused);
        assert_eq!(frame.sim_time, first.sim_time);
        assert_eq!(frame.bodies, first.bodies);
    }
    assert_eq!(frames.last().unwrap().frame, first.frame + 9);
}

#[test]
fn test_speed_change_keeps_positions_continuous() {
    let mut scene = mini_scene();
    run(&mut scene, 10, 0.1);
    let before = scene.snapshot();

    scene.set_speed(10.0).unwrap();
    let after = scene.snapshot();
    assert_eq!(before.bodies, after.bodies);

    let frames = run(&mut scene, 1, 0.1);
    assert_relative_eq!(frames[0].sim_time, before.sim_time + 1.0, epsilon = 1e-12);
}

#[test]
fn test_invalid_delta_is_a_zero_tick() {
    let mut scene = mini_scene();
    run(&mut scene, 5, 0.1);
    let before = scene.snapshot();

    let mut frames: Vec<FrameSnapshot> = Vec::new();
    let errors = scene.tick(f64::NAN, &mut frames);

    assert!(matches!(errors.as_slice(), [SimError::InvalidInput { .. }]));
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].sim_time, before.sim_time);
    assert_eq!(frames[0].bodies, before.bodies);
}

#[test]
fn test_bad_speed_is_rejected_and_ignored() {
    let mut scene = mini_scene();
    assert!(scene.set_speed(-1.0).is_err());
    assert!(scene.set_speed(f64::INFINITY).is_err());
    assert_eq!(scene.clock().speed(), 1.0);
}

#[test]
fn test_reset_rewinds_to_start_positions() {
    let mut scene = mini_scene();
    let start = scene.snapshot();
    run(&mut scene, 25, 0.2);
    scene.reset_clock();

    let frames = run(&mut scene, 1, 0.0);
    assert_eq!(frames[0].sim_time, 0.0);
    assert_eq!(frames[0].bodies, start.bodies);
}

#[test]
fn test_snapshot_lists_bodies_in_catalog_order() {
    let scene = solar_scene();
    let snapshot = scene.snapshot();
    let names: Vec<&str> = snapshot
        .bodies
        .iter()
        .map(|b| b.name.as_str())
        .collect();
    let expected: Vec<&str> = scene
        .registry()
        .catalog()
        .bodies()
        .iter()
        .map(|b| b.name.as_str())
        .collect();
    assert_eq!(names, expected);
}
