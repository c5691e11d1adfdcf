use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use foreclosure_dashboard::data::display::format_count;
use foreclosure_dashboard::data::{GroupBy, Metrics};

use crate::state::{AppState, Dimension};
use crate::ui::{chart, table};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters:");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // Clone the options so we can mutate state inside the loops.
    let locations = state.options.locations.clone();
    let years = state.options.years.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let header = format!(
                "Select Location  ({}/{})",
                state.selection.locations.len(),
                locations.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("locations")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    all_none_buttons(ui, state, Dimension::Location);
                    for loc in &locations {
                        let mut checked = state.is_location_selected(loc);
                        if ui.checkbox(&mut checked, loc.as_str()).changed() {
                            state.toggle_location(loc);
                        }
                    }
                });

            ui.separator();

            let header = format!("Select Year  ({}/{})", state.selection.years.len(), years.len());
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("years")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    all_none_buttons(ui, state, Dimension::Year);
                    for &year in &years {
                        let mut checked = state.is_year_selected(year);
                        if ui.checkbox(&mut checked, year.to_string()).changed() {
                            state.toggle_year(year);
                        }
                    }
                });
        });
}

fn all_none_buttons(ui: &mut Ui, state: &mut AppState, dimension: Dimension) {
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all(dimension);
        }
        if ui.small_button("None").clicked() {
            state.select_none(dimension);
        }
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

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} cases loaded, {} shown",
                format_count(ds.len() as u64),
                format_count(state.view.shown as u64)
            ));
            ui.separator();
        }

        ui.label("Chart by");
        egui::ComboBox::from_id_salt("group_by")
            .selected_text(state.group_by.label())
            .show_ui(ui, |ui: &mut Ui| {
                for group_by in GroupBy::ALL {
                    if ui
                        .selectable_label(state.group_by == group_by, group_by.label())
                        .clicked()
                    {
                        state.set_group_by(group_by);
                    }
                }
            });

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – cards, chart, details
// ---------------------------------------------------------------------------

/// Render the dashboard body for the current selection.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    ui.heading(RichText::new(&state.title).size(26.0).strong());
    ui.add_space(6.0);

    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a foreclosures CSV to begin  (File → Open…)");
        });
        return;
    }

    let Some(metrics) = &state.view.metrics else {
        ui.label(
            RichText::new("No data available for the selected filters. Please adjust your selection.")
                .color(Color32::from_rgb(230, 160, 0)),
        );
        return;
    };

    metric_cards(ui, metrics);
    ui.add_space(8.0);

    chart::bar_chart(ui, state);

    ui.separator();
    ui.heading("Foreclosure Details");
    table::details_table(ui, &state.view.table);
}

fn metric_cards(ui: &mut Ui, m: &Metrics) {
    let missing = "–".to_string();
    ui.columns(5, |cols: &mut [Ui]| {
        metric_card(&mut cols[0], "Total Foreclosures", &format_count(m.total_foreclosures as u64));
        metric_card(&mut cols[1], "Top Zip Code", &m.popular_zip);
        metric_card(&mut cols[2], "Peak Filing Month", &m.popular_foreclosure_month);
        metric_card(
            &mut cols[3],
            "Peak Sale Month",
            m.popular_sale_month.as_ref().unwrap_or(&missing),
        );
        metric_card(
            &mut cols[4],
            "Top Purchaser",
            m.popular_purchaser.as_ref().unwrap_or(&missing),
        );
    });
}

fn metric_card(ui: &mut Ui, label: &str, value: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).heading().strong());
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open foreclosures data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        if !state.load_path(&path) {
            return;
        }
        if let Some(report) = &state.load_report {
            log::info!(
                "Opened {}: {} of {} rows usable",
                path.display(),
                report.rows_kept,
                report.rows_read
            );
        }
    }
}
