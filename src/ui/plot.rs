use eframe::egui::{RichText, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use occupation_outlook::data::SeriesKind;

use crate::state::AppState;

const LEGEND_MAX_CHARS: usize = 30;

// ---------------------------------------------------------------------------
// Probability charts (central panel)
// ---------------------------------------------------------------------------

/// Render one line chart of `kind` with a line per selected occupation.
pub fn probability_plot(ui: &mut Ui, state: &AppState, kind: SeriesKind) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    let series = match state.session.selected_series(dataset) {
        Ok(series) => series,
        Err(e) => {
            log::error!("Cannot plot selection: {e}");
            ui.colored_label(ui.visuals().error_fg_color, e.to_string());
            return;
        }
    };

    ui.label(RichText::new(kind.chart_title()).heading());

    Plot::new(("probability_plot", kind.label()))
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label(kind.y_axis_label())
        .height(320.0)
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for bundle in series.iter() {
                let ts = match kind {
                    SeriesKind::Cdf => bundle.cdf,
                    SeriesKind::Pdf => bundle.pdf,
                };
                let points: PlotPoints = ts.iter().map(|(year, v)| [f64::from(year), v]).collect();

                let line = Line::new(points)
                    .name(legend_name(bundle.title))
                    .color(state.color_map.color_for(bundle.code))
                    .width(2.5);

                plot_ui.line(line);
            }
        });
}

/// Long titles are cut to keep the legend readable.
fn legend_name(title: &str) -> String {
    if title.chars().count() > LEGEND_MAX_CHARS {
        let short: String = title.chars().take(LEGEND_MAX_CHARS).collect();
        format!("{short}...")
    } else {
        title.to_string()
    }
}
