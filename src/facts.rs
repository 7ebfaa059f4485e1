//! Optional extra facts about bodies.
//!
//! Facts come from a [`FactSource`] in the le-systeme-solaire `bodies/<name>`
//! JSON shape. Fetching runs on the async compute pool; results are polled
//! once per frame and never awaited, so a slow or missing source only means
//! the info card shows less.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use bevy::prelude::*;
use bevy::tasks::{block_on, futures_lite::future, AsyncComputeTaskPool, Task};
use serde::Deserialize;

use crate::scene::SceneOrchestrator;
use crate::types::name_key;

/// Errors from a fact source. Never fatal.
#[derive(thiserror::Error, Debug)]
pub enum FactsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed facts: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no facts for `{0}`")]
    Unavailable(String),
}

/// Mantissa/exponent pair as used for mass and volume.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mass {
    pub mass_value: f64,
    pub mass_exponent: i32,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub vol_value: f64,
    pub vol_exponent: i32,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct MoonRef {
    pub moon: String,
}

/// Physical data for one body. Every field is optional.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BodyFacts {
    pub english_name: Option<String>,
    /// km
    pub mean_radius: Option<f64>,
    /// km
    pub semimajor_axis: Option<f64>,
    /// days
    pub sideral_orbit: Option<f64>,
    /// hours
    pub sideral_rotation: Option<f64>,
    pub mass: Option<Mass>,
    pub vol: Option<Volume>,
    /// g/cm³
    pub density: Option<f64>,
    /// m/s²
    pub gravity: Option<f64>,
    /// K
    pub avg_temp: Option<f64>,
    pub discovered_by: Option<String>,
    pub discovery_date: Option<String>,
    pub moons: Option<Vec<MoonRef>>,
}

impl BodyFacts {
    pub fn from_json_str(json: &str) -> Result<Self, FactsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Label/value rows for the info card. Absent or empty fields are skipped.
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = Vec::new();
        let mut number = |label, value: Option<f64>, unit: &str| {
            if let Some(v) = value.filter(|v| *v != 0.0) {
                rows.push((label, format!("{v} {unit}").trim_end().to_string()));
            }
        };

        number("Mean radius", self.mean_radius, "km");
        number("Semi-major axis", self.semimajor_axis, "km");
        number("Sidereal orbit", self.sideral_orbit, "days");
        number("Sidereal rotation", self.sideral_rotation, "h");
        number("Density", self.density, "g/cm³");
        number("Surface gravity", self.gravity, "m/s²");
        number("Mean temperature", self.avg_temp, "K");

        if let Some(mass) = &self.mass {
            rows.push(("Mass", format!("{} × 10^{} kg", mass.mass_value, mass.mass_exponent)));
        }
        if let Some(vol) = &self.vol {
            rows.push(("Volume", format!("{} × 10^{} km³", vol.vol_value, vol.vol_exponent)));
        }
        if let Some(moons) = self.moons.as_ref().filter(|m| !m.is_empty()) {
            rows.push(("Moons", moons.len().to_string()));
        }
        if let Some(by) = self.discovered_by.as_ref().filter(|s| !s.is_empty()) {
            let when = self
                .discovery_date
                .as_ref()
                .filter(|s| !s.is_empty())
                .map(|d| format!(" ({d})"))
                .unwrap_or_default();
            rows.push(("Discovered by", format!("{by}{when}")));
        }
        rows
    }
}

/// Where facts come from.
pub trait FactSource: Send + Sync {
    fn fetch(&self, name: &str) -> Result<BodyFacts, FactsError>;
}

/// Reads `<dir>/<lowercase name>.json`.
#[derive(Clone, Debug)]
pub struct AssetFactSource {
    dir: PathBuf,
}

impl AssetFactSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FactSource for AssetFactSource {
    fn fetch(&self, name: &str) -> Result<BodyFacts, FactsError> {
        let path = self.dir.join(format!("{}.json", name_key(name)));
        let text = std::fs::read_to_string(&path)?;
        BodyFacts::from_json_str(&text)
    }
}

/// Shared handle to the active source.
#[derive(Resource, Clone)]
pub struct FactProvider(pub Arc<dyn FactSource>);

/// Facts that have arrived so far, keyed by body.
#[derive(Resource, Default, Debug)]
pub struct FactSheet {
    facts: HashMap<String, BodyFacts>,
}

impl FactSheet {
    pub fn insert(&mut self, name: &str, facts: BodyFacts) {
        self.facts.insert(name_key(name), facts);
    }

    pub fn get(&self, name: &str) -> Option<&BodyFacts> {
        self.facts.get(&name_key(name))
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

/// In-flight fetches.
#[derive(Resource, Default)]
pub struct PendingFacts(Vec<(String, Task<Result<BodyFacts, FactsError>>)>);

impl PendingFacts {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Plugin fetching facts for every catalog body in the background.
pub struct FactsPlugin {
    pub source: Arc<dyn FactSource>,
}

impl Plugin for FactsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(FactProvider(self.source.clone()))
            .init_resource::<FactSheet>()
            .init_resource::<PendingFacts>()
            .add_systems(Startup, request_facts)
            .add_systems(Update, collect_facts);
    }
}

/// Spawn one fetch per body.
fn request_facts(
    scene: Res<SceneOrchestrator>,
    provider: Res<FactProvider>,
    mut pending: ResMut<PendingFacts>,
) {
    let pool = AsyncComputeTaskPool::get();
    for body in scene.registry().catalog().bodies() {
        let source = provider.0.clone();
        let name = body.name.clone();
        let task = pool.spawn(async move { source.fetch(&name) });
        pending.0.push((body.name.clone(), task));
    }
    debug!("Requested facts for {} bodies", pending.0.len());
}

/// Move finished fetches into the [`FactSheet`].
fn collect_facts(mut pending: ResMut<PendingFacts>, mut sheet: ResMut<FactSheet>) {
    if pending.0.is_empty() {
        return;
    }
    pending.0.retain_mut(|(name, task)| {
        let Some(result) = block_on(future::poll_once(task)) else {
            return true;
        };
        match result {
            Ok(facts) => {
                debug!("Facts loaded for {}", name);
                sheet.insert(name, facts);
            }
            Err(e) => debug!("No facts for {}: {}", name, e),
        }
        false
    });
    if pending.0.is_empty() {
        info!("Fact loading finished ({} bodies)", sheet.len());
    }
}
