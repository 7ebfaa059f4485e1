//! Orrery - Interactive Solar System Model
//!
//! A library crate providing the body catalog, orbit math, simulation
//! clock, selection/focus logic and the Bevy plugins that present them.

pub mod camera;
pub mod catalog;
pub mod config;
pub mod error;
pub mod facts;
pub mod input;
pub mod orbit;
pub mod registry;
pub mod render;
pub mod scene;
pub mod selection;
pub mod time;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
