//! Per-frame orchestration.
//!
//! [`SceneOrchestrator`] owns the clock, the registry and the selection
//! controller, and runs them in a fixed order once per tick before handing a
//! [`FrameSnapshot`] to whatever presents it. [`ScenePlugin`] drives it from
//! Bevy's `Update` schedule.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::catalog::BodyCatalog;
use crate::config::OrreryConfig;
use crate::error::SimError;
use crate::registry::BodyRegistry;
use crate::selection::{CameraRig, FocusSettings, SelectionController, SelectionEffect};
use crate::time::SimulationClock;
use crate::types::{name_key, SceneSet};

/// One body's transform in a snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyTransform {
    pub name: String,
    pub position: DVec3,
    pub rotation_angle: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CameraTransform {
    pub position: DVec3,
    pub look_at: DVec3,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub sim_time: f64,
    pub paused: bool,
    pub speed: f64,
    /// In catalog order
    pub bodies: Vec<BodyTransform>,
    pub camera: CameraTransform,
}

impl FrameSnapshot {
    /// Find a body by case-insensitive name.
    pub fn body(&self, name: &str) -> Option<&BodyTransform> {
        let key = name_key(name);
        self.bodies.iter().find(|b| name_key(&b.name) == key)
    }
}

/// Receiver of one snapshot per tick.
pub trait FrameSink {
    fn present(&mut self, frame: &FrameSnapshot);
}

/// Collects every frame; handy for tests and recording.
impl FrameSink for Vec<FrameSnapshot> {
    fn present(&mut self, frame: &FrameSnapshot) {
        self.push(frame.clone());
    }
}

/// The simulation core, stored as a resource.
#[derive(Resource, Clone, Debug)]
pub struct SceneOrchestrator {
    clock: SimulationClock,
    registry: BodyRegistry,
    selection: SelectionController,
    frame: u64,
    min_speed: f64,
    max_speed: f64,
}

impl SceneOrchestrator {
    pub fn new(catalog: BodyCatalog, config: &OrreryConfig) -> Result<Self, SimError> {
        config.validate()?;
        let clock = SimulationClock::new(config.initial_speed)?;
        let settings = FocusSettings::from_config(config)?;
        let selection = SelectionController::new(settings, CameraRig::overview(config.camera_start()));
        info!("Scene ready with {} bodies", catalog.len());

        Ok(Self {
            clock,
            registry: BodyRegistry::new(catalog),
            selection,
            frame: 0,
            min_speed: config.min_speed,
            max_speed: config.max_speed,
        })
    }

    /// Run one frame: clock, positions, selection, then present.
    ///
    /// Returns the non-fatal problems of this frame. Never blocks.
    pub fn tick(&mut self, delta: f64, sink: &mut impl FrameSink) -> Vec<SimError> {
        let mut errors = Vec::new();

        if let Err(err) = self.clock.tick(delta) {
            warn!("{}; treating as a zero-length tick", err);
            errors.push(err);
        }
        errors.extend(self.registry.update_all(&self.clock));
        if let Err(err) = self.selection.tick(self.clock.real_elapsed(), &self.registry) {
            warn!("Focus update failed: {}", err);
            errors.push(err);
        }

        self.frame += 1;
        sink.present(&self.snapshot());
        errors
    }

    /// Current state as a snapshot, without advancing anything.
    pub fn snapshot(&self) -> FrameSnapshot {
        let camera = self.selection.camera();
        FrameSnapshot {
            frame: self.frame,
            sim_time: self.clock.elapsed(),
            paused: self.clock.is_paused(),
            speed: self.clock.speed(),
            bodies: self
                .registry
                .iter()
                .map(|(def, state)| BodyTransform {
                    name: def.name.clone(),
                    position: state.position,
                    rotation_angle: state.rotation_angle,
                })
                .collect(),
            camera: CameraTransform {
                position: camera.position,
                look_at: camera.look_at,
            },
        }
    }

    /// Focus a body, or clear the selection with `None`.
    pub fn select(&mut self, name: Option<&str>) -> Result<(), SimError> {
        let now = self.clock.real_elapsed();
        self.selection.select(name, &self.registry, now)
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<(), SimError> {
        self.clock.set_speed(speed)?;
        info!("Speed: {}x", speed);
        Ok(())
    }

    pub fn toggle_pause(&mut self) -> bool {
        let paused = self.clock.toggle_pause();
        info!("Simulation {}", if paused { "paused" } else { "running" });
        paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.clock.set_paused(paused);
    }

    pub fn faster(&mut self) -> f64 {
        let speed = self.clock.faster(self.max_speed);
        info!("Speed: {}x", speed);
        speed
    }

    pub fn slower(&mut self) -> f64 {
        let speed = self.clock.slower(self.min_speed);
        info!("Speed: {}x", speed);
        speed
    }

    /// Rewind simulation time to zero.
    pub fn reset_clock(&mut self) {
        self.clock.reset();
        info!("Simulation time reset");
    }

    pub fn orbit_camera(&mut self, yaw: f64, pitch: f64) -> bool {
        self.selection.orbit_camera(yaw, pitch)
    }

    pub fn zoom_camera(&mut self, factor: f64) -> bool {
        self.selection.zoom_camera(factor)
    }

    pub fn drain_effects(&mut self) -> Vec<SelectionEffect> {
        self.selection.drain_effects()
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn speed_bounds(&self) -> (f64, f64) {
        (self.min_speed, self.max_speed)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// Most recent snapshot, read by the render and camera systems.
#[derive(Resource, Default, Debug)]
pub struct LatestFrame(pub Option<FrameSnapshot>);

impl FrameSink for LatestFrame {
    fn present(&mut self, frame: &FrameSnapshot) {
        match &mut self.0 {
            Some(latest) => latest.clone_from(frame),
            None => self.0 = Some(frame.clone()),
        }
    }
}

/// What the info panel should show, fed by selection effects.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct InfoRequest {
    /// Body whose card is open
    pub shown: Option<String>,
    /// Whether mouse drag may move the camera
    pub drag_enabled: bool,
}

impl Default for InfoRequest {
    fn default() -> Self {
        Self {
            shown: None,
            drag_enabled: true,
        }
    }
}

/// Plugin stepping the [`SceneOrchestrator`] once per frame.
///
/// The orchestrator resource itself is inserted by the app, since building it
/// can fail.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LatestFrame>()
            .init_resource::<InfoRequest>()
            .configure_sets(
                Update,
                (SceneSet::Input, SceneSet::Step, SceneSet::Present).chain(),
            )
            .add_systems(
                Update,
                (step_scene, publish_selection_effects)
                    .chain()
                    .in_set(SceneSet::Step),
            );
    }
}

/// Advance the scene by the frame's real delta.
pub fn step_scene(
    mut scene: ResMut<SceneOrchestrator>,
    mut latest: ResMut<LatestFrame>,
    time: Res<Time>,
) {
    let errors = scene.tick(time.delta_secs_f64(), &mut *latest);
    if !errors.is_empty() {
        debug!("Frame {} had {} problem(s)", scene.frame(), errors.len());
    }
}

/// Fold queued selection effects into [`InfoRequest`].
pub fn publish_selection_effects(
    mut scene: ResMut<SceneOrchestrator>,
    mut request: ResMut<InfoRequest>,
) {
    for effect in scene.drain_effects() {
        match effect {
            SelectionEffect::ShowInfo(name) => request.shown = Some(name),
            SelectionEffect::ShowDefaultView => request.shown = None,
            SelectionEffect::DragEnabled(enabled) => request.drag_enabled = enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    fn scene() -> SceneOrchestrator {
        SceneOrchestrator::new(fixtures::mini_catalog(), &OrreryConfig::default()).unwrap()
    }

    #[test]
    fn test_tick_presents_one_frame() {
        let mut scene = scene();
        let mut frames: Vec<FrameSnapshot> = Vec::new();
        assert!(scene.tick(0.1, &mut frames).is_empty());
        assert!(scene.tick(0.1, &mut frames).is_empty());

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].frame, 2);
        assert!((frames[1].sim_time - 0.2).abs() < 1e-12);
        let names: Vec<&str> = frames[1].bodies.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Sun", "Earth", "Moon"]);
    }

    #[test]
    fn test_invalid_delta_is_a_zero_tick() {
        let mut scene = scene();
        let mut frames: Vec<FrameSnapshot> = Vec::new();
        scene.tick(0.5, &mut frames);
        let errors = scene.tick(-1.0, &mut frames);

        assert!(matches!(errors.as_slice(), [SimError::InvalidInput { .. }]));
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].bodies, frames[1].bodies);
        assert_eq!(frames[1].sim_time, frames[0].sim_time);
    }

    #[test]
    fn test_latest_frame_keeps_only_newest() {
        let mut scene = scene();
        let mut latest = LatestFrame::default();
        scene.tick(0.1, &mut latest);
        scene.tick(0.1, &mut latest);
        assert_eq!(latest.0.as_ref().map(|f| f.frame), Some(2));
    }

    #[test]
    fn test_snapshot_body_lookup_is_case_insensitive() {
        let scene = scene();
        let snapshot = scene.snapshot();
        assert_eq!(snapshot.body("MOON").map(|b| b.name.as_str()), Some("Moon"));
        assert!(snapshot.body("Pluto").is_none());
    }

    #[test]
    fn test_speed_controls_respect_config_bounds() {
        let mut scene = scene();
        for _ in 0..20 {
            scene.faster();
        }
        assert_eq!(scene.clock().speed(), 100.0);
        for _ in 0..40 {
            scene.slower();
        }
        assert_eq!(scene.clock().speed(), 0.001);
        assert!(scene.set_speed(0.0).is_err());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = OrreryConfig {
            focus_duration: 0.0,
            ..OrreryConfig::default()
        };
        assert!(SceneOrchestrator::new(fixtures::mini_catalog(), &config).is_err());
    }
}
