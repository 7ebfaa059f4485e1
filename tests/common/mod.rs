//! Common test utilities for integration tests.

#![allow(dead_code)]

use orrery::catalog::{BodyCatalog, BodyDefinition};
use orrery::config::OrreryConfig;
use orrery::scene::{FrameSnapshot, SceneOrchestrator};

/// Sun, Earth and Moon with round numbers.
pub fn mini_catalog() -> BodyCatalog {
    BodyCatalog::new(vec![
        BodyDefinition::central("Sun", 5.0),
        BodyDefinition::orbiting("Earth", 1.0, 20.0, 1.0, 0.01),
        BodyDefinition::orbiting("Moon", 0.27, 2.5, 3.0, 0.005).around("Earth"),
    ])
    .expect("mini catalog is valid")
}

pub fn mini_scene() -> SceneOrchestrator {
    SceneOrchestrator::new(mini_catalog(), &OrreryConfig::default()).expect("scene builds")
}

pub fn solar_scene() -> SceneOrchestrator {
    let catalog = BodyCatalog::solar_system().expect("built-in catalog is valid");
    SceneOrchestrator::new(catalog, &OrreryConfig::default()).expect("scene builds")
}

/// Tick `steps` times by `delta` and return every presented frame.
pub fn run(scene: &mut SceneOrchestrator, steps: usize, delta: f64) -> Vec<FrameSnapshot> {
    let mut frames = Vec::with_capacity(steps);
    for _ in 0..steps {
        let errors = scene.tick(delta, &mut frames);
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    }
    frames
}
