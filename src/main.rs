mod app;
mod color;
mod state;
mod ui;

use app::HousingExplorerApp;
use eframe::egui;
// UI modules reach these as `crate::data` / `crate::config`.
use ny_housing_explorer::{config, data};

fn main() -> eframe::Result {
    env_logger::init();

    let settings = config::Settings::from_env();
    log::info!("Starting with {settings:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "NY Housing Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(HousingExplorerApp::new(settings)))),
    )
}
