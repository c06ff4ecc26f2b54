use eframe::egui;
use egui_plot::{Corner, Legend, Line, Plot, PlotPoints};
use simplify_results::ResultsPayload;

use crate::state::theme::Theme;

/// Plot points for a series, x = position. Gaps are left out so the line
/// spans them.
pub fn series_points(series: &[Option<f64>]) -> Vec<[f64; 2]> {
    series
        .iter()
        .enumerate()
        .filter_map(|(i, sample)| {
            sample
                .filter(|v| v.is_finite())
                .map(|v| [i as f64, v])
        })
        .collect()
}

/// Axis text for a grid mark: the label at that position, or nothing between
/// positions.
pub fn label_at(labels: &[String], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Original and simplified series on one plot, titled with the file name.
pub fn show_chart(ui: &mut egui::Ui, payload: &ResultsPayload, theme: &Theme, height: f32) {
    let data = &payload.data;
    let title = payload
        .file
        .as_ref()
        .map(|f| f.name.as_str())
        .unwrap_or("Results");

    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new(title).strong().size(16.0));
    });
    ui.add_space(4.0);

    let simplified = Line::new(PlotPoints::new(series_points(&data.simplified)))
        .name(format!("Simplified {}", data.series_name()))
        .color(theme.simplified_color())
        .width(2.5);
    let original = Line::new(PlotPoints::new(series_points(&data.original)))
        .name(format!("Original {}", data.series_name()))
        .color(theme.original_color())
        .width(1.5);

    let labels = data.labels.clone();
    Plot::new("results_chart")
        .height(height)
        .legend(Legend::default().position(Corner::LeftTop))
        .x_axis_formatter(move |mark, _range| label_at(&labels, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(simplified);
            plot_ui.line(original);
        });
}
