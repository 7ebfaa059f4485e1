//! Selection and camera focus.
//!
//! Picking a body starts an eased camera flight toward it. The flight is
//! re-targeted every tick because the body keeps moving, and a new pick
//! cancels it immediately. Once arrived, the camera follows the body and the
//! user may orbit and zoom around it.
//!
//! Only [`SelectionController`] writes the [`CameraRig`].

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::config::OrreryConfig;
use crate::error::SimError;
use crate::registry::BodyRegistry;
use crate::types::ORIGIN;

/// Pitch limit for camera orbiting, just short of straight up/down.
const MAX_PITCH: f64 = 1.5;

/// Quadratic ease-in/ease-out on `[0, 1]`.
pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Focus flight parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusSettings {
    /// Seconds of real time per flight
    pub duration: f64,
    /// Final distance from the target as a multiple of its radius
    pub distance_factor: f64,
    /// Zoom bounds for the user camera
    pub min_distance: f64,
    pub max_distance: f64,
}

impl FocusSettings {
    pub fn new(duration: f64, distance_factor: f64) -> Result<Self, SimError> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(SimError::InvalidInput {
                operation: "focus duration",
                value: duration,
            });
        }
        if !(distance_factor.is_finite() && distance_factor > 0.0) {
            return Err(SimError::InvalidInput {
                operation: "focus distance factor",
                value: distance_factor,
            });
        }
        Ok(Self {
            duration,
            distance_factor,
            min_distance: 5.0,
            max_distance: 100.0,
        })
    }

    pub fn from_config(config: &OrreryConfig) -> Result<Self, SimError> {
        let mut settings = Self::new(config.focus_duration, config.focus_distance_factor)?;
        settings.min_distance = config.camera_min_distance;
        settings.max_distance = config.camera_max_distance;
        Ok(settings)
    }
}

/// Where the selection state machine is.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionState {
    Idle,
    Focusing {
        target: String,
        /// Real time the flight began
        start_time: f64,
        start_camera: DVec3,
        /// Destination as computed when the flight began
        end_camera_at_start: DVec3,
    },
    Focused {
        target: String,
    },
}

/// Camera intent consumed by the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraRig {
    pub position: DVec3,
    pub look_at: DVec3,
    /// User orbit/zoom allowed
    pub drag_enabled: bool,
}

impl CameraRig {
    /// Free camera at `position` looking at the origin.
    pub fn overview(position: DVec3) -> Self {
        Self {
            position,
            look_at: ORIGIN,
            drag_enabled: true,
        }
    }
}

/// Requests for the info panel and input layer.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionEffect {
    ShowInfo(String),
    ShowDefaultView,
    DragEnabled(bool),
}

/// Turns picks into camera flights and panel requests.
#[derive(Clone, Debug)]
pub struct SelectionController {
    settings: FocusSettings,
    state: SelectionState,
    camera: CameraRig,
    /// Camera position relative to the target while focused
    follow_offset: DVec3,
    progress: f64,
    effects: Vec<SelectionEffect>,
}

impl SelectionController {
    pub fn new(settings: FocusSettings, camera: CameraRig) -> Self {
        Self {
            settings,
            state: SelectionState::Idle,
            camera,
            follow_offset: DVec3::ZERO,
            progress: 0.0,
            effects: Vec::new(),
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn settings(&self) -> &FocusSettings {
        &self.settings
    }

    /// Un-eased flight progress in `[0, 1]`; 1 once focused, 0 when idle.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Name of the focused or focusing body.
    pub fn target(&self) -> Option<&str> {
        match &self.state {
            SelectionState::Idle => None,
            SelectionState::Focusing { target, .. } | SelectionState::Focused { target } => {
                Some(target)
            }
        }
    }

    /// Camera offset from a target of `radius` at the end of a flight.
    pub fn focus_offset(&self, radius: f64) -> DVec3 {
        DVec3::new(0.0, 0.0, radius * self.settings.distance_factor)
    }

    /// Start focusing `name`, or deselect on `None`.
    ///
    /// Unknown names leave everything untouched.
    pub fn select(
        &mut self,
        name: Option<&str>,
        registry: &BodyRegistry,
        now: f64,
    ) -> Result<(), SimError> {
        let Some(name) = name else {
            self.deselect();
            return Ok(());
        };

        let definition = registry.definition(name)?;
        let body = registry.get(name)?;
        let target = definition.name.clone();

        if matches!(&self.state, SelectionState::Focused { target: t } if *t == target) {
            self.effects.push(SelectionEffect::ShowInfo(target));
            return Ok(());
        }

        let end = body.position + self.focus_offset(definition.radius);
        info!("Focusing on {}", target);
        self.state = SelectionState::Focusing {
            target: target.clone(),
            start_time: now,
            start_camera: self.camera.position,
            end_camera_at_start: end,
        };
        self.progress = 0.0;
        self.camera.drag_enabled = false;
        self.effects.push(SelectionEffect::ShowInfo(target));
        self.effects.push(SelectionEffect::DragEnabled(false));
        Ok(())
    }

    /// Drop the current target. The camera stays where it is.
    pub fn deselect(&mut self) {
        if self.state == SelectionState::Idle {
            return;
        }
        debug!("Selection cleared");
        self.state = SelectionState::Idle;
        self.progress = 0.0;
        self.camera.drag_enabled = true;
        self.effects.push(SelectionEffect::ShowDefaultView);
        self.effects.push(SelectionEffect::DragEnabled(true));
    }

    /// Advance the flight or keep following the target.
    ///
    /// `now` is real (unscaled) time, so pausing does not stall the camera.
    pub fn tick(&mut self, now: f64, registry: &BodyRegistry) -> Result<(), SimError> {
        match &self.state {
            SelectionState::Idle => Ok(()),
            SelectionState::Focusing {
                target,
                start_time,
                start_camera,
                ..
            } => {
                let radius = registry.definition(target)?.radius;
                let body = registry.get(target)?.position;

                let t = ((now - start_time) / self.settings.duration).clamp(0.0, 1.0);
                let end = body + self.focus_offset(radius);
                self.progress = t;
                self.camera.position = start_camera.lerp(end, ease_in_out_quad(t));
                self.camera.look_at = body;

                if t >= 1.0 {
                    let target = target.clone();
                    debug!("Arrived at {}", target);
                    self.follow_offset = end - body;
                    self.camera.position = end;
                    self.camera.drag_enabled = true;
                    self.state = SelectionState::Focused { target };
                    self.effects.push(SelectionEffect::DragEnabled(true));
                }
                Ok(())
            }
            SelectionState::Focused { target } => {
                let body = registry.get(target)?.position;
                self.camera.position = body + self.follow_offset;
                self.camera.look_at = body;
                Ok(())
            }
        }
    }

    /// Orbit the camera around `look_at` by yaw/pitch radians.
    ///
    /// Returns `false` (and does nothing) while drag is disabled.
    pub fn orbit_camera(&mut self, yaw: f64, pitch: f64) -> bool {
        if !self.camera.drag_enabled || !yaw.is_finite() || !pitch.is_finite() {
            return false;
        }
        let offset = self.camera.position - self.camera.look_at;
        let r = offset.length();
        if r <= f64::EPSILON {
            return false;
        }

        let yaw = offset.x.atan2(offset.z) + yaw;
        let pitch = ((offset.y / r).clamp(-1.0, 1.0).asin() + pitch).clamp(-MAX_PITCH, MAX_PITCH);
        let offset = r * DVec3::new(pitch.cos() * yaw.sin(), pitch.sin(), pitch.cos() * yaw.cos());
        self.apply_offset(offset);
        true
    }

    /// Scale the camera distance from `look_at` by `factor`, within the zoom bounds.
    ///
    /// A camera already outside the bounds (focused on a small body, say) may
    /// keep its distance but is never pushed the opposite way.
    pub fn zoom_camera(&mut self, factor: f64) -> bool {
        if !self.camera.drag_enabled || !(factor.is_finite() && factor > 0.0) {
            return false;
        }
        let offset = self.camera.position - self.camera.look_at;
        let r = offset.length();
        if r <= f64::EPSILON {
            return false;
        }
        let lower = self.settings.min_distance.min(r);
        let upper = self.settings.max_distance.max(r);
        let distance = (r * factor).clamp(lower, upper);
        self.apply_offset(offset * (distance / r));
        true
    }

    fn apply_offset(&mut self, offset: DVec3) {
        self.camera.position = self.camera.look_at + offset;
        if matches!(self.state, SelectionState::Focused { .. }) {
            self.follow_offset = offset;
        }
    }

    /// Hand queued effects to the caller, oldest first.
    pub fn drain_effects(&mut self) -> Vec<SelectionEffect> {
        std::mem::take(&mut self.effects)
    }
}
