//! Selection and camera focus driven through the scene.

mod common;

use approx::assert_relative_eq;
use bevy::math::DVec3;
use orrery::error::SimError;
use orrery::selection::{SelectionEffect, SelectionState};

use common::{mini_scene, run};

#[test]
fn test_focus_flight_lands_beside_target() {
    let mut scene = mini_scene();
    scene.select(Some("earth")).unwrap();
    assert!(matches!(scene.selection().state(), SelectionState::Focusing { .. }));

    // Default flight lasts 1.5 real seconds
    let frames = run(&mut scene, 4, 0.5);
    assert!(matches!(
        scene.selection().state(),
        SelectionState::Focused { target } if target == "Earth"
    ));

    let last = frames.last().unwrap();
    let earth = last.body("Earth").unwrap().position;
    assert_eq!(last.camera.look_at, earth);
    assert_relative_eq!(last.camera.position.x, earth.x, epsilon = 1e-9);
    assert_relative_eq!(last.camera.position.z, earth.z + 5.0, epsilon = 1e-9);
}

#[test]
fn test_effects_announce_flight_then_arrival() {
    let mut scene = mini_scene();
    scene.select(Some("Moon")).unwrap();
    run(&mut scene, 4, 0.5);

    assert_eq!(
        scene.drain_effects(),
        vec![
            SelectionEffect::ShowInfo("Moon".into()),
            SelectionEffect::DragEnabled(false),
            SelectionEffect::DragEnabled(true),
        ]
    );
    assert!(scene.drain_effects().is_empty());
}

#[test]
fn test_camera_locked_during_flight() {
    let mut scene = mini_scene();
    scene.select(Some("Earth")).unwrap();
    run(&mut scene, 1, 0.5);

    assert!(!scene.orbit_camera(0.1, 0.0));
    assert!(!scene.zoom_camera(0.5));

    run(&mut scene, 3, 0.5);
    assert!(scene.orbit_camera(0.1, 0.0));
    assert!(scene.zoom_camera(1.2));
}

#[test]
fn test_flight_finishes_while_paused() {
    let mut scene = mini_scene();
    scene.set_paused(true);
    scene.select(Some("Earth")).unwrap();
    run(&mut scene, 4, 0.5);

    assert!(matches!(scene.selection().state(), SelectionState::Focused { .. }));
}

#[test]
fn test_focused_camera_follows_moving_target() {
    let mut scene = mini_scene();
    scene.select(Some("Earth")).unwrap();
    run(&mut scene, 4, 0.5);

    for frame in run(&mut scene, 10, 0.25) {
        let earth = frame.body("Earth").unwrap().position;
        assert_relative_eq!(frame.camera.position.distance(earth), 5.0, epsilon = 1e-9);
        assert_eq!(frame.camera.look_at, earth);
    }
}

#[test]
fn test_unknown_name_changes_nothing() {
    let mut scene = mini_scene();
    let camera = scene.selection().camera().clone();

    let result = scene.select(Some("Pluto"));
    assert_eq!(result, Err(SimError::NotFound("Pluto".into())));
    assert_eq!(scene.selection().state(), &SelectionState::Idle);
    assert_eq!(scene.selection().camera(), &camera);
    assert!(scene.drain_effects().is_empty());
}

#[test]
fn test_deselect_restores_default_view_and_keeps_camera() {
    let mut scene = mini_scene();
    scene.select(Some("Earth")).unwrap();
    run(&mut scene, 4, 0.5);
    scene.drain_effects();
    let camera = scene.selection().camera().position;

    scene.select(None).unwrap();
    assert_eq!(scene.selection().state(), &SelectionState::Idle);
    assert_eq!(scene.selection().camera().position, camera);
    assert_eq!(
        scene.drain_effects(),
        vec![SelectionEffect::ShowDefaultView, SelectionEffect::DragEnabled(true)]
    );
}

#[test]
fn test_retarget_mid_flight_starts_from_current_camera() {
    let mut scene = mini_scene();
    scene.select(Some("Earth")).unwrap();
    run(&mut scene, 1, 0.5);
    let mid = scene.selection().camera().position;

    scene.select(Some("Sun")).unwrap();
    match scene.selection().state() {
        SelectionState::Focusing {
            target,
            start_camera,
            ..
        } => {
            assert_eq!(target, "Sun");
            assert_eq!(*start_camera, mid);
        }
        other => panic!("expected a flight, got {other:?}"),
    }

    let frames = run(&mut scene, 4, 0.5);
    let last = frames.last().unwrap();
    assert_eq!(last.camera.look_at, DVec3::ZERO);
    assert_relative_eq!(last.camera.position.z, 25.0, epsilon = 1e-9);
}

#[test]
fn test_scroll_toward_small_target_does_not_back_away() {
    let mut scene = mini_scene();
    scene.select(Some("Moon")).unwrap();
    run(&mut scene, 4, 0.5);

    let frame = scene.snapshot();
    let before = frame.camera.position.distance(frame.camera.look_at);
    assert!(before < 5.0, "arrival sits inside the usual zoom floor");

    assert!(scene.zoom_camera(0.9));
    let frame = scene.snapshot();
    let after = frame.camera.position.distance(frame.camera.look_at);
    assert!(after <= before + 1e-12, "zoom in moved from {before} to {after}");
}
