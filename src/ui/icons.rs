//! Phosphor icon definitions for the UI.
//!
//! Provides icon constants using the Phosphor icon font.
//! Icons are initialized via `setup_fonts` when the app starts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// System to initialize Phosphor icon fonts.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

// Browse all icons at https://phosphoricons.com/

/// Play icon (triangle pointing right)
pub const PLAY: &str = egui_phosphor::regular::PLAY;
/// Pause icon (two vertical bars)
pub const PAUSE: &str = egui_phosphor::regular::PAUSE;
/// Rewind simulation time
pub const RESET: &str = egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE;
pub const SLOWER: &str = egui_phosphor::regular::REWIND;
pub const FASTER: &str = egui_phosphor::regular::FAST_FORWARD;
/// Close/X icon
pub const CLOSE: &str = egui_phosphor::regular::X;
/// Orbit path overlay toggle
pub const ORBIT: &str = egui_phosphor::regular::CIRCLE_DASHED;
pub const CLOCK: &str = egui_phosphor::regular::CLOCK;
pub const INFO: &str = egui_phosphor::regular::INFO;

// Body icons
pub const SUN: &str = egui_phosphor::regular::SUN;
pub const PLANET: &str = egui_phosphor::regular::GLOBE;
pub const MOON: &str = egui_phosphor::regular::MOON;
