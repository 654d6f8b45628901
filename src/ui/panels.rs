use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use occupation_outlook::data::{loader::year_span, SeriesKind};
use occupation_outlook::export::{file_name, ExportFormat, ExportScope};

use crate::state::{AppState, Tab};
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let enabled = state.can_open_data();
            if ui
                .add_enabled(enabled, egui::Button::new("Open data folder…"))
                .on_disabled_hover_text("Data is loaded once per run")
                .clicked()
            {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} occupations loaded, {} selected",
                ds.len(),
                state.session.selection.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – overview and full-dataset downloads
// ---------------------------------------------------------------------------

pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Data Overview");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No data loaded.");
        ui.label(format!(
            "Looked in {}. Use File → Open data folder…",
            state.config.data_dir.display()
        ));
        return;
    };

    ui.label(format!("Total occupations: {}", dataset.len()));
    ui.label(format!(
        "Time range: {}",
        year_span(dataset.years(SeriesKind::Cdf))
    ));

    ui.add_space(12.0);
    ui.heading("Download Full Datasets");
    ui.separator();
    for kind in SeriesKind::ALL {
        ui.horizontal(|ui: &mut Ui| {
            for format in ExportFormat::ALL {
                let label = format!("{} {}", kind.label(), format.label());
                if ui.button(label).clicked() {
                    save_dialog(state, ExportScope::Full, kind, format);
                }
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Central panel – tabs
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Data files not found  (File → Open data folder…)");
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.tab, Tab::Search, "Search & Analyze");
        ui.selectable_value(&mut state.tab, Tab::Browse, "Browse All Occupations");
    });
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.tab {
            Tab::Search => search_tab(ui, state),
            Tab::Browse => browse_tab(ui, state),
        });
}

fn search_tab(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Search by SOC Code or Occupation Title:");
    let mut query = state.session.query.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut query)
            .hint_text("e.g. 'Chief Executive', '11-1011', 'Software Developer'")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        state.set_query(query);
    }

    if !state.session.query.trim().is_empty() {
        if state.search_hits.is_empty() {
            ui.label(
                RichText::new("No occupations found matching your search term.")
                    .color(Color32::from_rgb(200, 140, 0)),
            );
        } else {
            ui.label(format!(
                "Found {} matching occupation(s)",
                state.search_hits.len()
            ));
            let hits = state.search_hits.clone();
            occupation_table(ui, state, "search_results", &hits);
        }
    }

    if state.session.selection.is_empty() {
        return;
    }

    ui.add_space(12.0);
    selected_section(ui, state);
}

fn browse_tab(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        return;
    };
    let page = match dataset.page(state.session.page, state.config.page_size) {
        Ok(page) => page,
        Err(e) => {
            ui.label(e.to_string());
            return;
        }
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select page:");
        let mut current = page.index;
        egui::ComboBox::from_id_salt("page_selector")
            .selected_text(format!("{}", current + 1))
            .show_ui(ui, |ui: &mut Ui| {
                for p in 0..page.total_pages {
                    ui.selectable_value(&mut current, p, format!("{}", p + 1));
                }
            });
        if ui
            .add_enabled(page.index > 0, egui::Button::new("◀"))
            .clicked()
        {
            current = page.index - 1;
        }
        if ui
            .add_enabled(page.index + 1 < page.total_pages, egui::Button::new("▶"))
            .clicked()
        {
            current = page.index + 1;
        }
        state.session.page = current;
    });

    ui.label(format!(
        "Showing occupations {}-{} of {}",
        page.start + 1,
        page.end,
        page.total
    ));

    let codes: Vec<String> = page.records.iter().map(|r| r.code.clone()).collect();
    occupation_table(ui, state, "browse_table", &codes);
}

/// Table of occupations with an Add/Remove toggle per row.
fn occupation_table(ui: &mut Ui, state: &mut AppState, id: &str, codes: &[String]) {
    let Some(dataset) = state.dataset.clone() else {
        return;
    };
    let mut toggled: Option<String> = None;

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::exact(80.0))
            .column(Column::remainder().at_least(200.0))
            .column(Column::exact(80.0))
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("SOC Code");
                });
                header.col(|ui| {
                    ui.strong("Title");
                });
                header.col(|_| {});
            })
            .body(|mut body| {
                for code in codes {
                    let Some(record) = dataset.get(code) else {
                        continue;
                    };
                    let selected = state.session.selection.contains(code);
                    body.row(22.0, |mut row| {
                        row.col(|ui| {
                            ui.label(record.code.as_str());
                        });
                        row.col(|ui| {
                            let text = RichText::new(record.title.as_str());
                            ui.label(if selected { text.strong() } else { text });
                        });
                        row.col(|ui| {
                            let label = if selected { "Remove" } else { "Add" };
                            if ui.button(label).clicked() {
                                toggled = Some(record.code.clone());
                            }
                        });
                    });
                }
            });
    });

    if let Some(code) = toggled {
        state.toggle_selected(&code);
    }
}

/// Selected list, charts and selection downloads.
fn selected_section(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        return;
    };

    ui.heading("Selected Occupations Analysis");
    ui.separator();

    let mut removed: Option<String> = None;
    for (i, code) in state.session.selection.list().iter().enumerate() {
        let title = dataset.get(code).map(|r| r.title.as_str()).unwrap_or("?");
        ui.horizontal(|ui: &mut Ui| {
            let swatch = RichText::new("■").color(state.color_map.color_for(code));
            ui.label(swatch);
            ui.label(format!("{}. {title} ({code})", i + 1));
            if ui.small_button("❌").on_hover_text("Remove from selection").clicked() {
                removed = Some(code.clone());
            }
        });
    }
    if let Some(code) = removed {
        state.remove_selected(&code);
    }

    if ui.button("🗑 Clear All Selections").clicked() {
        state.clear_selection();
        return;
    }

    ui.add_space(8.0);
    plot::probability_plot(ui, state, SeriesKind::Cdf);
    ui.add_space(8.0);
    plot::probability_plot(ui, state, SeriesKind::Pdf);

    ui.add_space(8.0);
    ui.strong("Export Selected Occupations Data");
    ui.horizontal(|ui: &mut Ui| {
        for kind in SeriesKind::ALL {
            for format in ExportFormat::ALL {
                let label = format!("Selected {} {}", kind.label(), format.label());
                if ui.button(label).clicked() {
                    save_dialog(state, ExportScope::Selection, kind, format);
                }
            }
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open folder with the CDF / PDF spreadsheets")
        .set_directory(&state.config.data_dir)
        .pick_folder();

    if let Some(dir) = folder {
        state.load_from_dir(&dir);
    }
}

fn save_dialog(state: &mut AppState, scope: ExportScope, kind: SeriesKind, format: ExportFormat) {
    let name = file_name(scope, kind, format);
    let mut dialog = rfd::FileDialog::new()
        .set_title(format!("Save {name}"))
        .set_file_name(name.as_str())
        .add_filter(format.label(), &[format.extension()]);
    if let Some(dir) = &state.config.export_dir {
        dialog = dialog.set_directory(dir);
    }

    let Some(path) = dialog.save_file() else {
        return;
    };

    match state.export_to(&path, scope, kind, format) {
        Ok(()) => state.status_message = None,
        Err(e) => {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

