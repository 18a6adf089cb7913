use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::color;
use crate::data::aggregate::Kpis;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🚲 Bike Sharing Dashboard");
    ui.add_space(8.0);
    ui.strong("Filter Data");
    ui.separator();

    // Snapshots so the widgets can mutate `state` while we read these.
    let (Some(dataset), Some(filters)) = (state.dataset.clone(), state.filters.clone()) else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::CollapsingHeader::new(RichText::new("📅 Date Range").strong())
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    let mut start = filters.date_range.start;
                    let mut end = filters.date_range.end;
                    let mut changed = false;
                    egui::Grid::new("date_range").num_columns(2).show(ui, |ui: &mut Ui| {
                        ui.label("From");
                        changed |= ui
                            .add(DatePickerButton::new(&mut start).id_salt("start_date"))
                            .changed();
                        ui.end_row();
                        ui.label("To");
                        changed |= ui
                            .add(DatePickerButton::new(&mut end).id_salt("end_date"))
                            .changed();
                        ui.end_row();
                    });
                    if changed {
                        state.set_date_range(start, end);
                    }
                    if let (Some(first), Some(last)) = (dataset.first_date(), dataset.last_date()) {
                        ui.small(format!("Available: {first} to {last}"));
                    }
                });

            egui::CollapsingHeader::new(RichText::new("🍂 Season").strong())
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    let mut all = filters.seasons.all;
                    if ui.checkbox(&mut all, "Select all seasons").changed() {
                        state.set_all_seasons(all);
                    }
                    if !all {
                        ui.indent("season_multiselect", |ui: &mut Ui| {
                            for season in &dataset.seasons {
                                let mut checked = filters.seasons.selected.contains(season);
                                if ui.checkbox(&mut checked, season.as_str()).changed() {
                                    state.toggle_season(season);
                                }
                            }
                        });
                    }
                });

            ui.separator();
            ui.label(format!(
                "{} of {} rows selected",
                format_thousands(state.visible_rows as u64),
                format_thousands(dataset.len() as u64)
            ));
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(path) = &state.source {
            ui.label(path.display().to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Main area pieces
// ---------------------------------------------------------------------------

/// Shown instead of the charts when the filters leave no rows.
pub fn empty_warning(ui: &mut Ui) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.colored_label(
            color::WARNING,
            "⚠ No data for this selection. Pick another season or date range.",
        );
    });
}

/// The four KPI tiles.
pub fn kpi_tiles(ui: &mut Ui, kpis: Kpis) {
    ui.heading("📈 Key Performance Indicators");
    ui.columns(4, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Rentals", kpis.total_rentals);
        metric(&mut cols[1], "Daily Average", kpis.mean_daily_rentals);
        metric(&mut cols[2], "Registered Members", kpis.total_registered);
        metric(&mut cols[3], "Casual Users", kpis.total_casual);
    });
}

fn metric(ui: &mut Ui, label: &str, value: u64) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(label);
        ui.label(RichText::new(format_thousands(value)).size(28.0).strong());
    });
}

pub const FOOTER_CAPTION: &str = "Copyright © 2026 Naufal Daffa Erlangga";

pub fn footer(ui: &mut Ui) {
    ui.separator();
    ui.small(FOOTER_CAPTION);
}

/// `1234567` → `"1,234,567"`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open bike-sharing data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_or_report(&path);
    }
}
