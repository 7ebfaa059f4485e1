//! Orrery - Interactive Solar System Model
//!
//! A desktop application showing the Sun, planets and moons on animated
//! circular orbits, with click-to-focus and a time-controlled clock.

use std::sync::Arc;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use orrery::camera::CameraPlugin;
use orrery::catalog::BodyCatalog;
use orrery::config::OrreryConfig;
use orrery::facts::{AssetFactSource, FactsPlugin};
use orrery::input::InputPlugin;
use orrery::render::RenderPlugin;
use orrery::scene::{SceneOrchestrator, ScenePlugin};
use orrery::ui::UiPlugin;

fn main() -> AppExit {
    let config = OrreryConfig::load_or_default(OrreryConfig::DEFAULT_PATH);

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Orrery".into(),
            ..default()
        }),
        ..default()
    }))
    .add_plugins(EguiPlugin::default());

    let scene = match BodyCatalog::solar_system()
        .and_then(|catalog| SceneOrchestrator::new(catalog, &config))
    {
        Ok(scene) => scene,
        Err(err) => {
            error!("Cannot build the scene: {}", err);
            return AppExit::error();
        }
    };

    let facts = FactsPlugin {
        source: Arc::new(AssetFactSource::new(config.facts_dir.clone())),
    };

    // Insert resources before plugins that depend on them
    app.insert_resource(config)
        .insert_resource(scene)
        .add_plugins((ScenePlugin, CameraPlugin, InputPlugin, RenderPlugin, facts, UiPlugin))
        .run()
}
