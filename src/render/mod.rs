//! Rendering systems for the orrery.
//!
//! This module provides visual representation of bodies and their
//! attachments, orbit paths, and background elements. Everything here reads
//! the latest frame snapshot; nothing writes back into the simulation.

mod background;
pub mod bodies;
mod orbits;
mod sync;

use bevy::prelude::*;

use crate::types::SceneSet;

use self::background::BackgroundPlugin;
use self::bodies::BodyVisualPlugin;
use self::orbits::{draw_orbit_paths, OrbitPathPlugin};
use self::sync::sync_body_transforms;

// Re-export for use in other modules
pub use self::background::{generate_stars, Star, StarfieldRoot};
pub use self::bodies::{AttachmentVisual, BodyVisual};
pub use self::orbits::OrbitPathSettings;
pub use self::sync::attachment_rotation;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((BodyVisualPlugin, BackgroundPlugin, OrbitPathPlugin))
            // Positions first, then the orbit overlay that depends on them
            .add_systems(
                Update,
                (sync_body_transforms, draw_orbit_paths)
                    .chain()
                    .in_set(SceneSet::Present),
            );
    }
}
