//! Orbit path rendering using Bevy Gizmos.
//!
//! Each orbiting body gets a faint circle around its orbit center. Moon
//! circles are re-centered on the parent's current position every frame.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::orbit::orbit_ring;
use crate::scene::{InfoRequest, LatestFrame, SceneOrchestrator};
use crate::types::{name_key, to_render};

/// Orbits smaller than this are not drawn.
const MIN_DRAWN_DISTANCE: f64 = 0.1;

/// Plugin providing orbit path visualization.
pub struct OrbitPathPlugin;

impl Plugin for OrbitPathPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitPathSettings>();
    }
}

/// Settings for orbit path rendering.
#[derive(Resource)]
pub struct OrbitPathSettings {
    /// Whether to show orbit paths.
    pub visible: bool,
    /// Number of segments per circle (higher = smoother).
    pub segments: usize,
    /// Alpha value for orbit path color.
    pub alpha: f32,
}

impl Default for OrbitPathSettings {
    fn default() -> Self {
        Self {
            visible: true,
            segments: 128,
            alpha: 0.3,
        }
    }
}

/// Draw a circle for every body with a real orbit.
///
/// The selected body's path is drawn brighter.
pub fn draw_orbit_paths(
    mut gizmos: Gizmos,
    settings: Res<OrbitPathSettings>,
    latest: Res<LatestFrame>,
    scene: Res<SceneOrchestrator>,
    request: Res<InfoRequest>,
) {
    if !settings.visible {
        return;
    }
    let Some(frame) = &latest.0 else {
        return;
    };

    let catalog = scene.registry().catalog();
    let selected = request.shown.as_deref().map(name_key);
    let dim = Color::srgba(0.27, 0.27, 0.27, settings.alpha);
    let lit = Color::srgba(0.6, 0.7, 0.9, (settings.alpha * 2.0).min(1.0));

    for (index, body) in catalog.bodies().iter().enumerate() {
        if body.orbital_distance <= MIN_DRAWN_DISTANCE {
            continue;
        }
        let center = catalog
            .parent_index(index)
            .and_then(|p| frame.bodies.get(p))
            .map_or(DVec3::ZERO, |parent| parent.position);

        let color = if selected.as_deref() == Some(name_key(&body.name).as_str()) {
            lit
        } else {
            dim
        };
        let points = orbit_ring(center, body.orbital_distance, settings.segments);
        gizmos.linestrip(points.into_iter().map(to_render), color);
    }
}
