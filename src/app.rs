use eframe::egui::{self, Ui};

use crate::config::Settings;
use crate::state::{AppState, Page};
use crate::ui::{map, panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HousingExplorerApp {
    pub state: AppState,
}

impl HousingExplorerApp {
    /// Build the app and try the configured dataset path.
    ///
    /// A missing default file is not fatal: the window opens empty with the
    /// error in the status line and File → Open… still works.
    pub fn new(settings: Settings) -> Self {
        let mut state = AppState::new(settings);
        let path = state.settings.data_path.clone();
        if let Err(e) = state.open_path(&path) {
            log::warn!("Startup dataset not loaded: {e:#}");
        }
        Self { state }
    }
}

impl eframe::App for HousingExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters and navigation ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: current page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central_panel(ui, &self.state);
        });
    }
}

fn central_panel(ui: &mut Ui, state: &AppState) {
    let Some(subset) = state.subset() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a listings CSV to begin  (File → Open…)");
        });
        return;
    };

    match state.page {
        Page::Data => tables::data_page(ui, state, &subset),
        Page::Charts => plot::charts_page(ui, state, &subset),
        Page::Map => map::map_page(ui, &subset),
    }
}
