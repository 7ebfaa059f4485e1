//! Camera system for the orrery.
//!
//! The camera transform is owned by the selection controller; this module only
//! feeds it mouse orbit/zoom input and copies its intent onto the Bevy camera.

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    prelude::*,
};
use bevy_egui::EguiContexts;

use crate::config::OrreryConfig;
use crate::scene::{InfoRequest, LatestFrame, SceneOrchestrator};
use crate::types::{to_render, SceneSet};

/// Zoom speed multiplier for scroll wheel.
pub const ZOOM_SPEED: f64 = 0.1;

/// Radians of orbit per pixel of drag.
pub const ORBIT_SPEED: f64 = 0.005;

/// Near and far clip planes.
const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (camera_zoom, camera_orbit).in_set(SceneSet::Input),
            )
            .add_systems(Update, sync_camera.in_set(SceneSet::Present));
    }
}

/// Spawn the main camera with a perspective projection at the overview spot.
fn setup_camera(mut commands: Commands, config: Res<OrreryConfig>) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: config.camera_fov_deg.to_radians(),
            near: NEAR,
            far: FAR,
            ..default()
        }),
        Transform::from_translation(to_render(config.camera_start())).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));
}

fn pointer_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .is_ok_and(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
}

/// Scroll wheel zoom toward the look-at point.
fn camera_zoom(
    mouse_scroll: Res<AccumulatedMouseScroll>,
    request: Res<InfoRequest>,
    mut scene: ResMut<SceneOrchestrator>,
    mut contexts: EguiContexts,
) {
    // Skip if no scroll input
    if mouse_scroll.delta.y == 0.0 || !request.drag_enabled {
        return;
    }
    if pointer_over_ui(&mut contexts) {
        return;
    }

    // Logarithmic zoom: scroll up moves closer
    let factor = (1.0 - mouse_scroll.delta.y as f64 * ZOOM_SPEED).max(0.1);
    scene.zoom_camera(factor);
}

/// Left-button drag orbits the camera around the look-at point.
fn camera_orbit(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    request: Res<InfoRequest>,
    mut scene: ResMut<SceneOrchestrator>,
    mut contexts: EguiContexts,
) {
    if !mouse_buttons.pressed(MouseButton::Left) || mouse_motion.delta == Vec2::ZERO {
        return;
    }
    if !request.drag_enabled || pointer_over_ui(&mut contexts) {
        return;
    }

    // Dragging right swings the camera left around the target
    let yaw = -mouse_motion.delta.x as f64 * ORBIT_SPEED;
    let pitch = mouse_motion.delta.y as f64 * ORBIT_SPEED;
    scene.orbit_camera(yaw, pitch);
}

/// Copy the latest camera intent onto the Bevy camera.
pub fn sync_camera(
    latest: Res<LatestFrame>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Some(frame) = &latest.0 else {
        return;
    };
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    let eye = to_render(frame.camera.position);
    let target = to_render(frame.camera.look_at);
    *transform = Transform::from_translation(eye).looking_at(target, Vec3::Y);
}
