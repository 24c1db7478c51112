use eframe::egui::{self, Color32, Hyperlink, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::Column;
use crate::presenter::{TableRow, TableView, LINK_LABEL};

const ROW_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Data table (central panel, below the chart)
// ---------------------------------------------------------------------------

/// Render the current table view.
pub fn data_table(ui: &mut Ui, table: &TableView) {
    if let TableView::Loading = table {
        ui.horizontal(|ui: &mut Ui| {
            ui.spinner();
            ui.label("Loading data…");
        });
        return;
    }

    if let Some(message) = table.records_message() {
        ui.label(RichText::new(message).italics());
    }

    let builder = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(TableColumn::initial(160.0).at_least(80.0))
        .column(TableColumn::initial(160.0).at_least(80.0))
        .column(TableColumn::initial(130.0).at_least(80.0))
        .column(TableColumn::initial(90.0).at_least(60.0))
        .column(TableColumn::initial(180.0).at_least(80.0))
        .column(TableColumn::remainder().at_least(90.0))
        .min_scrolled_height(0.0);

    let builder = builder.header(ROW_HEIGHT, |mut header| {
        for column in Column::ALL {
            header.col(|ui: &mut Ui| {
                ui.strong(column.label());
            });
        }
    });

    match table {
        TableView::Rows { rows, .. } => {
            builder.body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let record = &rows[row.index()];
                    for text in text_cells(record) {
                        row.col(|ui: &mut Ui| {
                            ui.label(text);
                        });
                    }
                    row.col(|ui: &mut Ui| {
                        if record.link.is_empty() {
                            ui.label(RichText::new("-").color(Color32::DARK_GRAY));
                        } else {
                            ui.add(
                                Hyperlink::from_label_and_url(LINK_LABEL, &record.link)
                                    .open_in_new_tab(true),
                            )
                            .on_hover_text(record.link.as_str());
                        }
                    });
                });
            });
        }
        other => {
            let message = other.placeholder().unwrap_or_default();
            builder.body(|mut body| {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(RichText::new(message).color(Color32::GRAY));
                    });
                    for _ in 1..Column::ALL.len() {
                        row.col(|_ui: &mut Ui| {});
                    }
                });
            });
        }
    }
}

fn text_cells(record: &TableRow) -> [&str; 5] {
    [
        &record.contaminant,
        &record.commodity,
        &record.level_type,
        &record.level,
        &record.reference,
    ]
}
