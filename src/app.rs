use eframe::egui;

use occupation_outlook::Config;

use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct OutlookApp {
    pub state: AppState,
}

impl OutlookApp {
    /// Build the app and try the configured data directory straight away.
    pub fn new(config: Config, startup_error: Option<String>) -> Self {
        let mut state = AppState::new(config);
        let data_dir = state.config.data_dir.clone();
        state.load_from_dir(&data_dir);
        if let Some(msg) = startup_error {
            state.push_status(msg);
        }
        Self { state }
    }
}

impl eframe::App for OutlookApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: overview and downloads ----
        egui::SidePanel::left("overview_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: search / browse / charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::central_panel(ui, &mut self.state);
        });
    }
}
