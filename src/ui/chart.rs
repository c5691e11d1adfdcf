use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Foreclosures bar chart (central panel)
// ---------------------------------------------------------------------------

const CHART_HEIGHT: f32 = 300.0;

/// Render the counts-by-category bar chart of the current selection.
pub fn bar_chart(ui: &mut Ui, state: &AppState) {
    let series = &state.view.chart;

    let bars: Vec<Bar> = series
        .points
        .iter()
        .enumerate()
        .map(|(i, (category, count))| {
            Bar::new(i as f64, *count as f64)
                .name(category)
                .fill(state.color_map.color_for(category))
                .width(0.7)
        })
        .collect();

    // Bars sit at x = 0, 1, 2, … so integer grid marks map back to categories.
    let labels = series.categories();

    Plot::new("foreclosure_chart")
        .height(CHART_HEIGHT)
        .x_axis_label(series.group_by.label())
        .y_axis_label("Foreclosures")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Foreclosures"));
        });
}
