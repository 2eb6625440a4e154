use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::{boroughs_present, BoroughFilter};
use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- Borough selector ----
    ui.strong("Borough");
    let mut selected = state.borough;
    egui::ComboBox::from_id_salt("borough")
        .selected_text(selected.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut selected, BoroughFilter::All, BoroughFilter::All.to_string());
            for b in boroughs_present(&dataset) {
                ui.selectable_value(&mut selected, BoroughFilter::Only(b), b.name());
            }
        });
    if selected != state.borough {
        state.set_borough(selected);
    }
    ui.add_space(8.0);

    // ---- Price ceiling ----
    ui.strong("Max Price");
    let (lo, hi) = state.price_range;
    let mut max_price = state.max_price;
    let slider = egui::Slider::new(&mut max_price, lo.floor()..=hi.ceil())
        .prefix("$")
        .step_by(1.0);
    if ui.add(slider).changed() {
        state.set_max_price(max_price);
    }
    ui.separator();

    // ---- Page navigation ----
    ui.strong("Navigate to");
    for page in Page::ALL {
        ui.radio_value(&mut state.page, page, page.label());
    }
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

        if let (Some(ds), Some(subset)) = (&state.dataset, state.subset()) {
            ui.label(format!(
                "{} listings loaded, {} match the filters",
                ds.len(),
                subset.len()
            ));
        }

        if let Some(path) = &state.source_path {
            ui.separator();
            ui.label(RichText::new(path.display().to_string()).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open housing listings")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.open_path(&path) {
            log::error!("Failed to load file: {e:#}");
        }
    }
}
