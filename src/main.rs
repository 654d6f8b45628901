mod app;
mod color;
mod state;
mod ui;

use app::OutlookApp;
use eframe::egui;
use occupation_outlook::Config;

fn main() -> eframe::Result {
    env_logger::init();

    let (config, startup_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => {
            log::error!("{e}; falling back to defaults");
            (Config::default(), Some(format!("Error: {e}")))
        }
    };
    log::info!("Data directory: {}", config.data_dir.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Occupation Automation Probability Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(OutlookApp::new(config, startup_error)))),
    )
}
