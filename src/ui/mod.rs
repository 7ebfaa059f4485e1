//! UI module providing the egui-based interface.
//!
//! A right side panel lists the bodies and shows the info card for the
//! selected one; a bottom bar holds the clock controls.

pub mod icons;
mod info_panel;
mod time_controls;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub use info_panel::{body_list_rows, BodyListRow};

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiState>()
            .init_resource::<icons::FontsInitialized>()
            // Font initialization MUST run before any UI systems that use icons
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                // Bottom bar first so the side panel stops above it
                (time_controls::time_controls, info_panel::info_panel)
                    .chain()
                    .after(icons::setup_fonts)
                    .run_if(|init: Res<icons::FontsInitialized>| init.0),
            );
    }
}

/// Global UI state.
#[derive(Resource)]
pub struct UiState {
    /// Whether the side panel is expanded.
    pub info_panel_open: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            info_panel_open: true,
        }
    }
}

/// Colors shared by the panels.
mod colors {
    use bevy_egui::egui::Color32;

    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(20, 20, 30, 220);
    pub const ACTIVE: Color32 = Color32::from_rgb(85, 221, 136);
    pub const INACTIVE: Color32 = Color32::from_rgb(120, 120, 130);
    pub const PLAY_ICON: Color32 = Color32::from_rgb(85, 221, 136);
    pub const PAUSE_ICON: Color32 = Color32::from_rgb(221, 170, 85);
    pub const TEXT: Color32 = Color32::from_rgb(220, 220, 230);
    pub const MUTED: Color32 = Color32::from_rgb(140, 140, 155);
}
