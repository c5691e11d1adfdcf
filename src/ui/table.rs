use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};
use foreclosure_dashboard::data::DisplayTable;

const ROW_HEIGHT: f32 = 18.0;

/// Render the details table; rows are laid out lazily so large selections stay cheap.
pub fn details_table(ui: &mut Ui, table: &DisplayTable) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(60.0).clip(true), table.columns.len())
        .header(20.0, |mut header| {
            for name in &table.columns {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, table.rows.len(), |mut row| {
                let cells = &table.rows[row.index()];
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
