//! Bottom bar with the simulation clock controls.
//!
//! Play/pause, a logarithmic speed slider, speed presets, reset, the
//! elapsed simulation time and the orbit path toggle.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::render::OrbitPathSettings;
use crate::scene::SceneOrchestrator;
use crate::time::SPEED_PRESETS;
use crate::types::format_sim_time;

use super::{colors, icons};

/// System that renders the time controls bar.
pub fn time_controls(
    mut contexts: EguiContexts,
    mut scene: ResMut<SceneOrchestrator>,
    mut orbit_paths: ResMut<OrbitPathSettings>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::TopBottomPanel::bottom("time_controls")
        .exact_height(52.0)
        .frame(
            egui::Frame::new()
                .fill(colors::PANEL_BG)
                .inner_margin(egui::Margin::symmetric(20, 8)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 12.0;

                render_play_pause(ui, &mut scene);
                ui.separator();
                render_clock(ui, scene.clock().elapsed());
                ui.separator();
                render_speed_slider(ui, &mut scene);
                render_presets(ui, &mut scene);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.spacing_mut().item_spacing.x = 10.0;
                    render_orbit_toggle(ui, &mut orbit_paths);
                    render_reset_button(ui, &mut scene);
                });
            });
        });
}

fn render_play_pause(ui: &mut egui::Ui, scene: &mut SceneOrchestrator) {
    let (icon, color, tooltip) = if scene.clock().is_paused() {
        (icons::PLAY, colors::PLAY_ICON, "Play (Space)")
    } else {
        (icons::PAUSE, colors::PAUSE_ICON, "Pause (Space)")
    };

    let button = egui::Button::new(egui::RichText::new(icon).size(22.0).color(color))
        .min_size(egui::vec2(40.0, 34.0));

    if ui.add(button).on_hover_text(tooltip).clicked() {
        scene.toggle_pause();
    }
}

fn render_clock(ui: &mut egui::Ui, sim_seconds: f64) {
    ui.label(egui::RichText::new(icons::CLOCK).size(16.0).color(colors::MUTED));
    ui.label(
        egui::RichText::new(format_sim_time(sim_seconds))
            .monospace()
            .size(14.0)
            .color(colors::TEXT),
    );
}

fn render_speed_slider(ui: &mut egui::Ui, scene: &mut SceneOrchestrator) {
    let (min, max) = scene.speed_bounds();
    let mut speed = scene.clock().speed();

    if ui
        .small_button(icons::SLOWER)
        .on_hover_text("Half speed ([)")
        .clicked()
    {
        scene.slower();
        speed = scene.clock().speed();
    }

    let slider = egui::Slider::new(&mut speed, min..=max)
        .logarithmic(true)
        .custom_formatter(|v, _| format_speed(v))
        .text("speed");
    if ui.add(slider).changed() {
        // Slider values stay inside the configured bounds
        if let Err(err) = scene.set_speed(speed) {
            warn!("Speed slider rejected: {}", err);
        }
    }

    if ui
        .small_button(icons::FASTER)
        .on_hover_text("Double speed (])")
        .clicked()
    {
        scene.faster();
    }
}

fn render_presets(ui: &mut egui::Ui, scene: &mut SceneOrchestrator) {
    let current = scene.clock().speed();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        for (i, &preset) in SPEED_PRESETS.iter().enumerate() {
            let is_active = (current - preset).abs() < preset * 1e-6;
            let color = if is_active { colors::ACTIVE } else { colors::INACTIVE };
            let mut text = egui::RichText::new(format_speed(preset)).size(13.0).color(color);
            if is_active {
                text = text.strong();
            }

            let button = egui::Button::new(text)
                .frame(is_active)
                .min_size(egui::vec2(40.0, 26.0));
            let tooltip = format!("{} speed (press {})", format_speed(preset), i + 1);

            if ui.add(button).on_hover_text(tooltip).clicked()
                && let Err(err) = scene.set_speed(preset)
            {
                warn!("Preset rejected: {}", err);
            }
        }
    });
}

fn render_reset_button(ui: &mut egui::Ui, scene: &mut SceneOrchestrator) {
    let button = egui::Button::new(egui::RichText::new(icons::RESET).size(18.0))
        .min_size(egui::vec2(32.0, 30.0));

    if ui.add(button).on_hover_text("Reset clock (R)").clicked() {
        scene.reset_clock();
    }
}

fn render_orbit_toggle(ui: &mut egui::Ui, settings: &mut OrbitPathSettings) {
    let color = if settings.visible { colors::ACTIVE } else { colors::INACTIVE };
    let button = egui::Button::new(egui::RichText::new(icons::ORBIT).size(18.0).color(color))
        .frame(settings.visible)
        .min_size(egui::vec2(32.0, 30.0));

    if ui.add(button).on_hover_text("Orbit paths (O)").clicked() {
        settings.visible = !settings.visible;
    }
}

/// Speed multiplier label: `0.01x`, `1x`, `12.5x`.
pub fn format_speed(speed: f64) -> String {
    if speed >= 10.0 {
        format!("{:.0}x", speed)
    } else if speed >= 1.0 {
        let text = format!("{:.1}", speed);
        format!("{}x", text.trim_end_matches(".0"))
    } else {
        let text = format!("{:.3}", speed);
        format!("{}x", text.trim_end_matches('0').trim_end_matches('.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_speed_presets() {
        let labels: Vec<String> = SPEED_PRESETS.iter().map(|&s| format_speed(s)).collect();
        assert_eq!(labels, vec!["0.01x", "0.1x", "1x", "10x"]);
    }

    #[test]
    fn test_format_speed_fractions() {
        assert_eq!(format_speed(2.5), "2.5x");
        assert_eq!(format_speed(0.001), "0.001x");
        assert_eq!(format_speed(100.0), "100x");
    }
}
