//! Info panel showing the body list and the selected body's card.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::catalog::{BodyCatalog, BodyDefinition};
use crate::facts::FactSheet;
use crate::orbit::orbital_period;
use crate::scene::{BodyTransform, InfoRequest, LatestFrame, SceneOrchestrator};
use crate::types::{display_angle, format_sim_time, RAD_TO_DEG};

use super::{colors, icons, UiState};

/// One line of the body list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BodyListRow {
    /// Catalog index
    pub index: usize,
    /// 0 for bodies without a parent, +1 per parent hop
    pub depth: usize,
}

/// Body list order: central bodies, then every other root followed by its
/// satellites, depth first. Siblings keep catalog order.
pub fn body_list_rows(catalog: &BodyCatalog) -> Vec<BodyListRow> {
    fn push_tree(catalog: &BodyCatalog, index: usize, depth: usize, rows: &mut Vec<BodyListRow>) {
        rows.push(BodyListRow { index, depth });
        for child in (0..catalog.len()).filter(|&c| catalog.parent_index(c) == Some(index)) {
            push_tree(catalog, child, depth + 1, rows);
        }
    }

    let bodies = catalog.bodies();
    let mut roots: Vec<usize> = (0..bodies.len())
        .filter(|&i| catalog.parent_index(i).is_none())
        .collect();
    roots.sort_by_key(|&i| !bodies[i].is_central());

    let mut rows = Vec::with_capacity(bodies.len());
    for root in roots {
        push_tree(catalog, root, 0, &mut rows);
    }
    rows
}

/// Label/value rows for a body's card, before any fetched facts.
pub fn card_rows(
    body: &BodyDefinition,
    transform: Option<&BodyTransform>,
) -> Vec<(String, String)> {
    let mut rows: Vec<(String, String)> = body
        .info
        .iter()
        .map(|(key, value)| (sentence_case(key), value.to_string()))
        .collect();

    rows.push(("Diameter".into(), format!("{:.2} units", body.radius * 2.0)));
    if !body.is_central() {
        let around = body.parent.as_deref().unwrap_or("origin");
        rows.push((
            "Orbit".into(),
            format!("{:.1} units around {}", body.orbital_distance, around),
        ));
    }
    if let Some(period) = orbital_period(body) {
        rows.push(("Period".into(), format_sim_time(period)));
    }
    if let Some(t) = transform {
        rows.push((
            "Position".into(),
            format!("({:.1}, {:.1}, {:.1})", t.position.x, t.position.y, t.position.z),
        ));
        rows.push((
            "Rotation".into(),
            format!("{:.0}°", display_angle(t.rotation_angle) * RAD_TO_DEG),
        ));
    }
    rows
}

fn sentence_case(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// System that renders the info panel.
pub fn info_panel(
    mut contexts: EguiContexts,
    mut scene: ResMut<SceneOrchestrator>,
    mut ui_state: ResMut<UiState>,
    request: Res<InfoRequest>,
    latest: Res<LatestFrame>,
    facts: Option<Res<FactSheet>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let panel_frame = egui::Frame::new()
        .fill(colors::PANEL_BG)
        .inner_margin(egui::Margin::same(12));

    if !ui_state.info_panel_open {
        egui::SidePanel::right("info_expand")
            .resizable(false)
            .exact_width(28.0)
            .frame(panel_frame)
            .show(ctx, |ui| {
                if ui.button("\u{25C0}").on_hover_text("Expand panel").clicked() {
                    ui_state.info_panel_open = true;
                }
            });
        return;
    }

    // Clicks are applied after the panel closure releases the scene borrow
    let mut clicked: Option<Option<String>> = None;

    egui::SidePanel::right("info_panel")
        .resizable(false)
        .default_width(240.0)
        .frame(panel_frame)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("\u{25B6}").on_hover_text("Collapse panel").clicked() {
                    ui_state.info_panel_open = false;
                }
                ui.heading("Bodies");
            });
            ui.separator();

            let catalog = scene.registry().catalog();
            let selected = scene.selection().target();
            if let Some(name) = render_body_list(ui, catalog, selected) {
                clicked = Some(Some(name));
            }

            ui.separator();

            let shown = request
                .shown
                .as_deref()
                .and_then(|name| catalog.get(name).ok());
            match shown {
                Some(body) => {
                    ui.horizontal(|ui| {
                        ui.heading(&body.name);
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button(icons::CLOSE).on_hover_text("Close (Esc)").clicked() {
                                clicked = Some(None);
                            }
                        });
                    });
                    ui.add_space(4.0);

                    let transform = latest.0.as_ref().and_then(|frame| frame.body(&body.name));
                    render_rows(ui, "card", &card_rows(body, transform));

                    let fetched = facts.as_ref().and_then(|sheet| sheet.get(&body.name));
                    ui.add_space(8.0);
                    match fetched {
                        Some(facts) => {
                            egui::CollapsingHeader::new(format!("{} Reference data", icons::INFO))
                                .default_open(true)
                                .show(ui, |ui| {
                                    let rows: Vec<(String, String)> = facts
                                        .display_rows()
                                        .into_iter()
                                        .map(|(label, value)| (label.to_string(), value))
                                        .collect();
                                    render_rows(ui, "facts", &rows);
                                });
                        }
                        None => {
                            ui.label(
                                egui::RichText::new("No reference data")
                                    .italics()
                                    .color(colors::MUTED),
                            );
                        }
                    }
                }
                None => {
                    ui.label(
                        egui::RichText::new("Click a body or pick one from the list.")
                            .color(colors::MUTED),
                    );
                }
            }
        });

    if let Some(target) = clicked
        && let Err(err) = scene.select(target.as_deref())
    {
        warn!("Selection from panel failed: {}", err);
    }
}

/// Render the body list with moons indented under their parents.
/// Returns the clicked body's name.
fn render_body_list(
    ui: &mut egui::Ui,
    catalog: &BodyCatalog,
    selected: Option<&str>,
) -> Option<String> {
    let mut clicked = None;
    let bodies = catalog.bodies();

    for row in body_list_rows(catalog) {
        let body = &bodies[row.index];
        let icon = if body.is_central() {
            icons::SUN
        } else if row.depth == 0 {
            icons::PLANET
        } else {
            icons::MOON
        };
        let is_selected = selected.is_some_and(|s| s.eq_ignore_ascii_case(&body.name));
        let color = if is_selected { colors::ACTIVE } else { colors::TEXT };

        ui.horizontal(|ui| {
            ui.add_space(16.0 * row.depth as f32);
            let text = egui::RichText::new(format!("{} {}", icon, body.name))
                .size(14.0)
                .color(color);
            if ui.add(egui::Button::new(text).frame(is_selected)).clicked() {
                clicked = Some(body.name.clone());
            }
        });
    }
    clicked
}

fn render_rows(ui: &mut egui::Ui, id: &str, rows: &[(String, String)]) {
    egui::Grid::new(id)
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            for (label, value) in rows {
                ui.label(egui::RichText::new(label).color(colors::MUTED));
                ui.label(egui::RichText::new(value).color(colors::TEXT));
                ui.end_row();
            }
        });
}
