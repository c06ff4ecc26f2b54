use eframe::egui;

use crate::state::app_state::LoadedResults;
use crate::state::theme::Theme;
use crate::ui::chart;
use crate::ui::comparison_table::{self, TableAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    None,
    OpenFile,
    Download,
    CopyTable,
}

const CHART_HEIGHT: f32 = 380.0;

/// The results page: spinner until results arrive, then the chart, the
/// heading and the comparison table.
pub fn show_results_page(
    ui: &mut egui::Ui,
    results: Option<&LoadedResults>,
    loading: bool,
    theme: &Theme,
) -> PageAction {
    let mut action = PageAction::None;

    let Some(loaded) = results.filter(|_| !loading) else {
        ui.add_space(120.0);
        ui.vertical_centered(|ui| {
            if loading {
                ui.add(egui::Spinner::new().size(64.0));
                ui.add_space(12.0);
                ui.label(egui::RichText::new("Loading results...").weak());
            } else {
                ui.heading("No results loaded");
                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new(
                        "Open or drag-and-drop a results file (JSON) or a table (CSV / Excel).",
                    )
                    .weak(),
                );
                ui.add_space(12.0);
                if ui.button("Open File...").clicked() {
                    action = PageAction::OpenFile;
                }
            }
        });
        return action;
    };

    egui::Frame::group(ui.style())
        .fill(theme.panel_bg())
        .corner_radius(egui::CornerRadius::same(12))
        .inner_margin(egui::Margin::symmetric(24, 16))
        .show(ui, |ui| {
            chart::show_chart(ui, &loaded.payload, theme, CHART_HEIGHT);
        });

    ui.add_space(32.0);
    ui.vertical_centered(|ui| {
        ui.heading("Compare Line Simplification Results");
        ui.add_space(8.0);
        ui.label(
            egui::RichText::new(
                "Check out the difference between the original and the simplified \
                 resulting version, which you can download.",
            )
            .weak(),
        );
        if let Some(summary) = &loaded.summary {
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(format!(
                    "{} points kept, {}% fewer than the original",
                    summary.count, summary.reduction_percent
                ))
                .small(),
            );
        }
    });
    ui.add_space(16.0);

    let can_download = loaded.summary.is_some();
    match comparison_table::show_comparison_table(ui, &loaded.report, can_download) {
        TableAction::None => {}
        TableAction::Download => action = PageAction::Download,
        TableAction::CopyToClipboard => action = PageAction::CopyTable,
    }

    action
}
