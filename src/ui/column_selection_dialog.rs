use eframe::egui;
use simplify_results::data::loader::{ColumnSelection, LoadedData};

/// State for the column selection dialog, created when a CSV or Excel table
/// is loaded and the user must say which columns hold the two series.
pub struct ColumnSelectionState {
    pub loaded_data: LoadedData,
    /// Index into `loaded_data.columns`; `None` labels points by row number.
    pub selected_label: Option<usize>,
    /// Indices into `numeric_columns`.
    pub selected_original: usize,
    pub selected_simplified: usize,
    pub numeric_columns: Vec<usize>,
}

impl ColumnSelectionState {
    pub fn new(loaded_data: LoadedData) -> Self {
        let numeric = loaded_data.numeric_columns();
        // Fall back to all columns if none look numeric.
        let numeric_columns: Vec<usize> = if numeric.is_empty() {
            (0..loaded_data.columns.len()).collect()
        } else {
            numeric
        };

        let is_simplified_name = |i: usize| {
            let name = loaded_data.columns[i].to_lowercase();
            name.contains("rdp") || name.contains("simpl")
        };

        // First non-numeric column; with three or more all-numeric columns the
        // first one is taken as the X axis.
        let all_numeric = numeric_columns.len() == loaded_data.columns.len();
        let selected_label = (0..loaded_data.columns.len())
            .find(|i| !numeric_columns.contains(i))
            .or_else(|| {
                if all_numeric && numeric_columns.len() >= 3 {
                    numeric_columns.first().copied()
                } else {
                    None
                }
            });

        let selected_simplified = numeric_columns
            .iter()
            .position(|&i| is_simplified_name(i))
            .unwrap_or_else(|| numeric_columns.len().saturating_sub(1));
        let selected_original = (0..numeric_columns.len())
            .find(|&k| {
                let col = numeric_columns[k];
                k != selected_simplified && !is_simplified_name(col) && Some(col) != selected_label
            })
            .unwrap_or(0);

        Self {
            loaded_data,
            selected_label,
            selected_original,
            selected_simplified,
            numeric_columns,
        }
    }

    pub fn selection(&self) -> Option<ColumnSelection> {
        let original_col = *self.numeric_columns.get(self.selected_original)?;
        let simplified_col = *self.numeric_columns.get(self.selected_simplified)?;
        Some(ColumnSelection {
            label_col: self.selected_label,
            original_col,
            simplified_col,
        })
    }

    fn column_name(&self, idx: usize) -> &str {
        self.loaded_data.columns.get(idx).map(String::as_str).unwrap_or("?")
    }
}

/// Result of the column selection dialog interaction each frame.
pub enum DialogResult {
    Ok(ColumnSelection),
    Cancel,
}

fn numeric_combo(
    ui: &mut egui::Ui,
    id: &str,
    state: &ColumnSelectionState,
    selected: &mut usize,
) {
    let current = state
        .numeric_columns
        .get(*selected)
        .map(|&i| state.column_name(i))
        .unwrap_or("?")
        .to_string();
    egui::ComboBox::from_id_salt(id)
        .selected_text(current)
        .width(300.0)
        .show_ui(ui, |ui| {
            for (k, &col_idx) in state.numeric_columns.iter().enumerate() {
                ui.selectable_value(selected, k, state.column_name(col_idx));
            }
        });
}

/// Show the column selection dialog as an egui window.
///
/// Returns `Some(DialogResult)` when the user presses OK or Cancel,
/// or `None` while the dialog is still open.
pub fn show_column_selection_dialog(
    ctx: &egui::Context,
    state: &mut ColumnSelectionState,
) -> Option<DialogResult> {
    let mut result = None;

    egui::Window::new("Select Columns")
        .collapsible(false)
        .resizable(true)
        .default_width(480.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!(
                    "'{}' contains {} columns and {} rows.",
                    state.loaded_data.file.name,
                    state.loaded_data.columns.len(),
                    state.loaded_data.row_count,
                ))
                .weak(),
            );

            ui.add_space(12.0);

            // --- Labels ---
            ui.label(egui::RichText::new("Labels (X axis)").strong());
            ui.add_space(2.0);
            let label_text = match state.selected_label {
                Some(i) => state.column_name(i).to_string(),
                None => "Row number".to_string(),
            };
            let mut label_choice = state.selected_label;
            egui::ComboBox::from_id_salt("label_selector")
                .selected_text(label_text)
                .width(300.0)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut label_choice, None, "Row number");
                    for (i, name) in state.loaded_data.columns.iter().enumerate() {
                        ui.selectable_value(&mut label_choice, Some(i), name);
                    }
                });
            state.selected_label = label_choice;

            ui.add_space(12.0);

            // --- Series ---
            let mut original = state.selected_original;
            let mut simplified = state.selected_simplified;
            ui.label(egui::RichText::new("Original series").strong());
            ui.add_space(2.0);
            numeric_combo(ui, "original_selector", state, &mut original);

            ui.add_space(12.0);

            ui.label(egui::RichText::new("Simplified series").strong());
            ui.add_space(2.0);
            numeric_combo(ui, "simplified_selector", state, &mut simplified);
            state.selected_original = original;
            state.selected_simplified = simplified;

            ui.add_space(16.0);

            // --- OK / Cancel buttons ---
            let distinct = state.selected_original != state.selected_simplified;
            ui.horizontal(|ui| {
                let ok_btn = ui.add_enabled(
                    distinct,
                    egui::Button::new(egui::RichText::new("OK").strong())
                        .min_size(egui::vec2(100.0, 32.0)),
                );
                if ok_btn.clicked() {
                    if let Some(selection) = state.selection() {
                        result = Some(DialogResult::Ok(selection));
                    }
                }

                if ui
                    .add(egui::Button::new("Cancel").min_size(egui::vec2(100.0, 32.0)))
                    .clicked()
                {
                    result = Some(DialogResult::Cancel);
                }

                if !distinct {
                    ui.label(egui::RichText::new("Pick two different series").weak());
                }
            });
        });

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplify_results::FileMeta;

    fn table(columns: &[&str], data: &[&[&str]]) -> LoadedData {
        LoadedData {
            columns: columns.iter().map(|s| s.to_string()).collect(),
            column_data: data
                .iter()
                .map(|col| col.iter().map(|s| s.to_string()).collect())
                .collect(),
            row_count: data.first().map(|c| c.len()).unwrap_or(0),
            file: FileMeta {
                name: "t.csv".to_string(),
                size: 0.1,
            },
        }
    }

    #[test]
    fn test_guesses_columns_by_name() {
        let data = table(
            &["date", "reading", "reading_rdp"],
            &[&["d1", "d2"], &["1", "2"], &["1", ""]],
        );
        let state = ColumnSelectionState::new(data);
        assert_eq!(
            state.selection(),
            Some(ColumnSelection {
                label_col: Some(0),
                original_col: 1,
                simplified_col: 2,
            })
        );
    }

    #[test]
    fn test_numeric_label_column() {
        let data = table(
            &["t", "simplified", "value"],
            &[&["0", "1"], &["5", ""], &["5", "6"]],
        );
        let state = ColumnSelectionState::new(data);
        assert_eq!(
            state.selection(),
            Some(ColumnSelection {
                label_col: Some(0),
                original_col: 2,
                simplified_col: 1,
            })
        );
    }

    #[test]
    fn test_two_columns_use_row_numbers() {
        let data = table(&["a", "b"], &[&["1", "2"], &["1", "2"]]);
        let state = ColumnSelectionState::new(data);
        assert_eq!(
            state.selection(),
            Some(ColumnSelection {
                label_col: None,
                original_col: 0,
                simplified_col: 1,
            })
        );
    }
}
