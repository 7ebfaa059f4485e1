//! Input handling for keyboard shortcuts and body picking.
//!
//! Keyboard maps onto the orchestrator's input entry points. A left click that
//! does not turn into a drag picks the body under the cursor, or clears the
//! selection when it hits empty space.

use bevy::math::DVec3;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::camera::MainCamera;
use crate::render::OrbitPathSettings;
use crate::scene::{LatestFrame, SceneOrchestrator};
use crate::time::SPEED_PRESETS;
use crate::types::SceneSet;

/// Cursor travel (pixels) after which a press counts as a drag, not a click.
pub const CLICK_SLOP: f32 = 4.0;

/// Smallest radius used for picking so tiny moons stay clickable.
pub const MIN_PICK_RADIUS: f64 = 0.5;

/// Resource tracking the current left-button press.
#[derive(Resource, Default)]
pub struct DragState {
    /// Cursor position at press, if the press started over the scene.
    pub pressed_at: Option<Vec2>,
    /// Whether the cursor has moved past [`CLICK_SLOP`] since the press.
    pub dragged: bool,
}

/// Plugin providing keyboard input handling and click picking.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DragState>().add_systems(
            Update,
            (keyboard_shortcuts, handle_click_picking).in_set(SceneSet::Input),
        );
    }
}

/// Handle keyboard shortcuts for simulation control.
fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut scene: ResMut<SceneOrchestrator>,
    mut orbit_paths: ResMut<OrbitPathSettings>,
    mut contexts: EguiContexts,
) {
    // Typing into a text field should not drive the simulation
    if contexts
        .ctx_mut()
        .is_ok_and(|ctx| ctx.wants_keyboard_input())
    {
        return;
    }

    // Space: toggle pause
    if keys.just_pressed(KeyCode::Space) {
        scene.toggle_pause();
    }

    // Bracket keys: halve or double the speed
    if keys.just_pressed(KeyCode::BracketLeft) {
        scene.slower();
    }
    if keys.just_pressed(KeyCode::BracketRight) {
        scene.faster();
    }

    // Quick speed selection with number keys
    let preset_keys = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4];
    for (key, speed) in preset_keys.into_iter().zip(SPEED_PRESETS) {
        if keys.just_pressed(key)
            && let Err(e) = scene.set_speed(speed)
        {
            warn!("{}", e);
        }
    }

    // Escape: back to the overview
    if keys.just_pressed(KeyCode::Escape) {
        scene.select(None).ok();
    }

    // R: rewind simulation time
    if keys.just_pressed(KeyCode::KeyR) {
        scene.reset_clock();
    }

    // O: orbit path overlay
    if keys.just_pressed(KeyCode::KeyO) {
        orbit_paths.visible = !orbit_paths.visible;
        info!("Orbit paths {}", if orbit_paths.visible { "on" } else { "off" });
    }
}

/// Nearest body hit by a ray, by catalog index.
///
/// `bodies` holds each body's center and pick radius. Bodies behind the ray
/// origin are ignored.
pub fn pick_body(origin: DVec3, direction: DVec3, bodies: &[(DVec3, f64)]) -> Option<usize> {
    let dir = direction.try_normalize()?;
    let mut best: Option<(usize, f64)> = None;

    for (index, &(center, radius)) in bodies.iter().enumerate() {
        let to_center = center - origin;
        let along = to_center.dot(dir);
        let miss_sq = to_center.length_squared() - along * along;
        let radius_sq = radius * radius;
        if miss_sq > radius_sq {
            continue;
        }
        // Entry point, or the exit point when starting inside the sphere
        let half_chord = (radius_sq - miss_sq).sqrt();
        let t = if along - half_chord >= 0.0 {
            along - half_chord
        } else {
            along + half_chord
        };
        if t < 0.0 {
            continue;
        }
        if best.is_none_or(|(_, best_t)| t < best_t) {
            best = Some((index, t));
        }
    }

    best.map(|(index, _)| index)
}

/// Turn a left click (press and release without dragging) into a pick.
fn handle_click_picking(
    mouse: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    latest: Res<LatestFrame>,
    mut scene: ResMut<SceneOrchestrator>,
    mut drag_state: ResMut<DragState>,
    mut contexts: EguiContexts,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let cursor = window.cursor_position();

    if mouse.just_pressed(MouseButton::Left) {
        // Presses that land on egui belong to egui
        let over_ui = contexts
            .ctx_mut()
            .is_ok_and(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area());
        drag_state.pressed_at = if over_ui { None } else { cursor };
        drag_state.dragged = false;
    }

    if mouse.pressed(MouseButton::Left)
        && let (Some(start), Some(now)) = (drag_state.pressed_at, cursor)
        && start.distance(now) > CLICK_SLOP
    {
        drag_state.dragged = true;
    }

    if !mouse.just_released(MouseButton::Left) {
        return;
    }
    let pressed_at = drag_state.pressed_at.take();
    if pressed_at.is_none() || drag_state.dragged {
        return;
    }

    let Some(cursor) = cursor else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };
    let Some(frame) = &latest.0 else {
        return;
    };

    let catalog = scene.registry().catalog();
    let targets: Vec<(DVec3, f64)> = frame
        .bodies
        .iter()
        .zip(catalog.bodies())
        .map(|(body, def)| (body.position, def.radius.max(MIN_PICK_RADIUS)))
        .collect();

    let picked = pick_body(
        ray.origin.as_dvec3(),
        Vec3::from(ray.direction).as_dvec3(),
        &targets,
    )
    .map(|index| catalog.bodies()[index].name.clone());

    match picked {
        Some(name) => {
            if let Err(e) = scene.select(Some(&name)) {
                warn!("Pick failed: {}", e);
            }
        }
        None => {
            scene.select(None).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_nearest_of_two_in_line() {
        let bodies = [(DVec3::new(0.0, 0.0, -20.0), 1.0), (DVec3::new(0.0, 0.0, -10.0), 1.0)];
        let hit = pick_body(DVec3::ZERO, DVec3::NEG_Z, &bodies);
        assert_eq!(hit, Some(1));
    }

    #[test]
    fn test_pick_misses_off_axis_body() {
        let bodies = [(DVec3::new(5.0, 0.0, -10.0), 1.0)];
        assert_eq!(pick_body(DVec3::ZERO, DVec3::NEG_Z, &bodies), None);
    }

    #[test]
    fn test_pick_ignores_bodies_behind_camera() {
        let bodies = [(DVec3::new(0.0, 0.0, 10.0), 1.0)];
        assert_eq!(pick_body(DVec3::ZERO, DVec3::NEG_Z, &bodies), None);
    }

    #[test]
    fn test_pick_from_inside_a_sphere() {
        let bodies = [(DVec3::ZERO, 5.0)];
        assert_eq!(pick_body(DVec3::new(1.0, 0.0, 0.0), DVec3::X, &bodies), Some(0));
    }

    #[test]
    fn test_pick_with_zero_direction_is_none() {
        let bodies = [(DVec3::ZERO, 5.0)];
        assert_eq!(pick_body(DVec3::new(0.0, 0.0, 10.0), DVec3::ZERO, &bodies), None);
    }

    #[test]
    fn test_grazing_ray_hits() {
        let bodies = [(DVec3::new(1.0, 0.0, -10.0), 1.0)];
        assert_eq!(pick_body(DVec3::ZERO, DVec3::NEG_Z, &bodies), Some(0));
    }
}
