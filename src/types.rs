//! Shared types, constants and small helpers for the orrery.

use bevy::math::DVec3;
use bevy::prelude::*;

/// System sets that pin the per-frame order.
///
/// Input must be applied before the simulation steps, and the renderer must
/// only ever see the snapshot produced by the step of the same frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneSet {
    /// Keyboard, mouse and picking (mutates the orchestrator's inputs)
    Input,
    /// Clock, positions and selection transition
    Step,
    /// Copy the latest snapshot onto meshes and the camera
    Present,
}

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Scene origin; the central body always sits here.
pub const ORIGIN: DVec3 = DVec3::ZERO;

/// Wrap an unbounded angle into `[0, 2π)` for display.
///
/// Stored angles are never wrapped; wrapping repeatedly loses precision.
pub fn display_angle(angle: f64) -> f64 {
    angle.rem_euclid(std::f64::consts::TAU)
}

/// Case-insensitive lookup key for a body name.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Convert an f64 simulation position to f32 render space (1 unit = 1 unit).
pub fn to_render(v: DVec3) -> Vec3 {
    v.as_vec3()
}

/// Format simulation seconds as `Dd HH:MM:SS`.
pub fn format_sim_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "--:--:--".to_string();
    }
    let total = seconds.floor() as u64;
    let days = total / 86_400;
    let hours = (total % 86_400) / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if days > 0 {
        format!("{days}d {hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    }
}
