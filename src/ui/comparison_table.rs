use eframe::egui;
use egui_extras::{Column, TableBuilder};
use simplify_results::report::ComparisonReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    None,
    Download,
    CopyToClipboard,
}

const HEADERS: [&str; 4] = ["", "Original", "Simplified", "Difference"];

/// Comparison table with the download button on the file-name row.
pub fn show_comparison_table(
    ui: &mut egui::Ui,
    report: &ComparisonReport,
    can_download: bool,
) -> TableAction {
    let mut action = TableAction::None;

    ui.push_id("comparison_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::exact(200.0))
            .columns(Column::remainder().at_least(140.0), 3)
            .header(30.0, |mut header| {
                for title in HEADERS {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for row in &report.rows {
                    body.row(28.0, |mut table_row| {
                        table_row.col(|ui| {
                            ui.label(egui::RichText::new(row.title).strong());
                        });
                        table_row.col(|ui| {
                            ui.label(&row.original);
                        });
                        table_row.col(|ui| {
                            ui.label(&row.simplified);
                        });
                        table_row.col(|ui| {
                            ui.label(&row.difference);
                        });
                    });
                }

                body.row(38.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(egui::RichText::new("File name").strong());
                    });
                    table_row.col(|ui| {
                        ui.label(&report.file_name);
                    });
                    table_row.col(|ui| {
                        let btn = egui::Button::new(egui::RichText::new("Download File").strong())
                            .min_size(egui::vec2(130.0, 28.0));
                        if ui.add_enabled(can_download, btn).clicked() {
                            action = TableAction::Download;
                        }
                    });
                    table_row.col(|ui| {
                        if ui.small_button("Copy table").clicked() {
                            action = TableAction::CopyToClipboard;
                        }
                    });
                });
            });
    });

    action
}
