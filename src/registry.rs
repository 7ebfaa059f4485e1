//! Live state of every body.
//!
//! The registry is the only writer of [`BodyState`]. Each update walks the
//! catalog's resolution order, so a parent's position for the current time is
//! always known before its moons are placed.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::catalog::{BodyCatalog, BodyDefinition};
use crate::error::SimError;
use crate::orbit::{compute_position, compute_rotation};
use crate::time::SimulationClock;
use crate::types::display_angle;

/// Current transform of one body.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyState {
    pub position: DVec3,
    /// Radians, unbounded
    pub rotation_angle: f64,
    /// Simulation time of the last update
    pub orbital_time: f64,
    /// Frozen at its last good transform
    pub degenerate: bool,
}

impl BodyState {
    /// Rotation wrapped into `[0, 2π)`.
    pub fn display_rotation(&self) -> f64 {
        display_angle(self.rotation_angle)
    }
}

/// Owns one [`BodyState`] per catalog entry, indexed like the catalog.
#[derive(Clone, Debug)]
pub struct BodyRegistry {
    catalog: BodyCatalog,
    states: Vec<BodyState>,
}

impl BodyRegistry {
    /// Build the registry with every body placed at time zero.
    pub fn new(catalog: BodyCatalog) -> Self {
        let states = vec![
            BodyState {
                position: DVec3::ZERO,
                rotation_angle: 0.0,
                orbital_time: 0.0,
                degenerate: false,
            };
            catalog.len()
        ];
        let mut registry = Self { catalog, states };
        for err in registry.update_at(0.0) {
            warn!("{}", err);
        }
        registry
    }

    /// Recompute every body for the clock's current simulation time.
    ///
    /// Failures keep the body's previous transform and are returned. They are
    /// logged once when a body becomes degenerate, not on every frame.
    pub fn update_all(&mut self, clock: &SimulationClock) -> Vec<SimError> {
        self.update_at(clock.elapsed())
    }

    fn update_at(&mut self, time: f64) -> Vec<SimError> {
        let mut errors = Vec::new();

        for &index in self.catalog.resolution_order() {
            let body = &self.catalog.bodies()[index];
            let parent_position = self
                .catalog
                .parent_index(index)
                .map(|p| self.states[p].position);

            let result = compute_position(body, time, parent_position)
                .and_then(|pos| compute_rotation(body, time).map(|rot| (pos, rot)));

            let state = &mut self.states[index];
            state.orbital_time = time;
            match result {
                Ok((position, rotation_angle)) => {
                    if state.degenerate {
                        info!("{} recovered at t={:.3}", body.name, time);
                    }
                    state.position = position;
                    state.rotation_angle = rotation_angle;
                    state.degenerate = false;
                }
                Err(err) => {
                    if !state.degenerate {
                        warn!("{}; keeping last transform", err);
                    }
                    state.degenerate = true;
                    errors.push(err);
                }
            }
        }

        errors
    }

    /// State of `name` (case-insensitive).
    pub fn get(&self, name: &str) -> Result<&BodyState, SimError> {
        self.catalog
            .index_of(name)
            .map(|i| &self.states[i])
            .ok_or_else(|| SimError::NotFound(name.to_string()))
    }

    pub fn definition(&self, name: &str) -> Result<&BodyDefinition, SimError> {
        self.catalog.get(name)
    }

    /// State by catalog index.
    pub fn state(&self, index: usize) -> Option<&BodyState> {
        self.states.get(index)
    }

    /// Definitions paired with their states, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&BodyDefinition, &BodyState)> {
        self.catalog.bodies().iter().zip(&self.states)
    }

    pub fn catalog(&self) -> &BodyCatalog {
        &self.catalog
    }
}
