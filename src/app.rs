use eframe::egui::{self, ScrollArea, Ui};

use crate::report::DashboardView;
use crate::state::{AppState, Tab};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BikeDashboardApp {
    pub state: AppState,
}

impl BikeDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for BikeDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs + charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &mut self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.heading("📊 Bike Sharing Analytics");
    ui.label("Interactive analysis of bike rental performance.");
    ui.add_space(8.0);

    if state.dataset.is_some() && state.view.is_empty() {
        panels::empty_warning(ui);
        ui.add_space(8.0);
    }

    panels::kpi_tiles(ui, state.view.kpis());
    ui.add_space(12.0);

    // EMPTY stops here: no tabs, no charts.
    if let DashboardView::Populated(report) = &state.view {
        ui.horizontal(|ui: &mut Ui| {
            for tab in Tab::ALL {
                ui.selectable_value(&mut state.active_tab, tab, tab.title());
            }
        });
        ui.separator();

        match state.active_tab {
            Tab::Trend => plot::trend_tab(ui, report),
            Tab::Weather => plot::weather_tab(ui, report),
            Tab::Users => plot::users_tab(ui, report),
        }
    }

    panels::footer(ui);
}
