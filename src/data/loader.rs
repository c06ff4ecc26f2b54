use std::path::Path;

use crate::data::parser;
use crate::data::payload::{self, FileMeta, ResultsData, ResultsPayload};
use crate::error::{Error, Result};

/// File extensions the viewer can open.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["json", "csv", "xls", "xlsx"];

/// A table read from CSV or Excel: column names and column data as strings.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub columns: Vec<String>,
    pub column_data: Vec<Vec<String>>, // column-major: column_data[col_idx][row_idx]
    pub row_count: usize,
    pub file: FileMeta,
}

/// What a file turned out to hold.
#[derive(Debug, Clone)]
pub enum LoadedFile {
    /// A complete results payload, ready to display.
    Results(ResultsPayload),
    /// A table whose columns still need to be picked.
    Table(LoadedData),
}

/// Columns picked from a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSelection {
    /// `None` labels points by row number.
    pub label_col: Option<usize>,
    pub original_col: usize,
    pub simplified_col: usize,
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

pub fn is_supported(path: &Path) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension_of(path).as_str())
}

/// Load a results payload (JSON) or a table (CSV, XLS, XLSX).
pub fn load_file(path: &Path) -> Result<LoadedFile> {
    let ext = extension_of(path);
    match ext.as_str() {
        "json" => payload::load_payload(path).map(LoadedFile::Results),
        "csv" => load_csv(path).map(LoadedFile::Table),
        "xls" | "xlsx" => load_excel(path).map(LoadedFile::Table),
        _ => Err(Error::unsupported_format(ext)),
    }
}

fn load_csv(path: &Path) -> Result<LoadedData> {
    let content = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    // Not UTF-8: read as latin1, each byte maps to the same code point.
    let text = match String::from_utf8(content) {
        Ok(text) => text,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut all_rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => all_rows.push(record.iter().map(|s| s.to_string()).collect()),
            Err(e) => tracing::debug!("Skipping unreadable CSV record: {e}"),
        }
    }

    rows_to_table(all_rows, FileMeta::from_path(path)?)
}

fn load_excel(path: &Path) -> Result<LoadedData> {
    use calamine::{open_workbook_auto, Data, Reader};

    let mut workbook =
        open_workbook_auto(path).map_err(|e| Error::excel(format!("Cannot open workbook: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| Error::no_data("workbook has no sheets"))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| Error::excel(format!("Cannot read sheet '{sheet_name}': {e}")))?;

    let all_rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => String::new(),
                    Data::String(s) => s.clone(),
                    Data::Float(f) => f.to_string(),
                    Data::Int(i) => i.to_string(),
                    Data::Bool(b) => b.to_string(),
                    Data::DateTime(dt) => dt.to_string(),
                    Data::DateTimeIso(s) => s.clone(),
                    Data::DurationIso(s) => s.clone(),
                    Data::Error(e) => format!("{e:?}"),
                })
                .collect()
        })
        .collect();

    rows_to_table(all_rows, FileMeta::from_path(path)?)
}

/// Split row-major cells at the detected header into a column-major table.
fn rows_to_table(all_rows: Vec<Vec<String>>, file: FileMeta) -> Result<LoadedData> {
    let header_row = parser::detect_header_row(&all_rows);
    if all_rows.is_empty() || header_row >= all_rows.len() {
        return Err(Error::no_data(format!("'{}' has no rows", file.name)));
    }

    let columns: Vec<String> = all_rows[header_row]
        .iter()
        .map(|s| s.trim().to_string())
        .collect();
    let data_rows = &all_rows[header_row + 1..];
    if data_rows.is_empty() {
        return Err(Error::no_data(format!("'{}' has a header but no data", file.name)));
    }

    let mut column_data: Vec<Vec<String>> = vec![Vec::with_capacity(data_rows.len()); columns.len()];
    for row in data_rows {
        for (col_idx, col_data) in column_data.iter_mut().enumerate() {
            col_data.push(row.get(col_idx).cloned().unwrap_or_default());
        }
    }

    tracing::info!(
        "Loaded table '{}': {} columns, {} rows (header at row {header_row})",
        file.name,
        columns.len(),
        data_rows.len()
    );

    Ok(LoadedData {
        columns,
        column_data,
        row_count: data_rows.len(),
        file,
    })
}

/// Parse a string column into samples. Empty and non-numeric cells become
/// gaps. Also returns the fraction of non-empty cells that parsed.
pub fn column_to_samples(data: &[String]) -> (Vec<Option<f64>>, f64) {
    let mut non_empty = 0usize;
    let mut valid = 0usize;
    let values: Vec<Option<f64>> = data
        .iter()
        .map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            non_empty += 1;
            let parsed = trimmed.parse::<f64>().ok().filter(|v| v.is_finite());
            if parsed.is_some() {
                valid += 1;
            }
            parsed
        })
        .collect();
    let frac = if non_empty == 0 {
        0.0
    } else {
        valid as f64 / non_empty as f64
    };
    (values, frac)
}

impl LoadedData {
    /// Columns whose non-empty cells are mostly numeric, judged on the first
    /// 100 rows. Gaps are ignored so a sparse simplified column still counts.
    pub fn numeric_columns(&self) -> Vec<usize> {
        (0..self.columns.len())
            .filter(|&i| {
                let sample: Vec<String> = self.column_data[i].iter().take(100).cloned().collect();
                let (_, frac) = column_to_samples(&sample);
                frac >= 0.5
            })
            .collect()
    }

    /// Build a results payload from the picked columns.
    pub fn to_payload(&self, selection: ColumnSelection) -> Result<ResultsPayload> {
        let n = self.columns.len();
        let check = |idx: usize, role: &str| {
            if idx < n {
                Ok(idx)
            } else {
                Err(Error::column_selection(format!(
                    "{role} column {idx} out of range ({n} columns)"
                )))
            }
        };
        let original_col = check(selection.original_col, "original")?;
        let simplified_col = check(selection.simplified_col, "simplified")?;
        let label_col = selection.label_col.map(|i| check(i, "label")).transpose()?;

        let labels = match label_col {
            Some(idx) => self.column_data[idx].iter().map(|s| s.trim().to_string()).collect(),
            None => (1..=self.row_count).map(|i| i.to_string()).collect(),
        };
        let label_name = label_col
            .map(|idx| self.columns[idx].clone())
            .unwrap_or_else(|| "row".to_string());

        let (original, _) = column_to_samples(&self.column_data[original_col]);
        let (simplified, _) = column_to_samples(&self.column_data[simplified_col]);

        let data = ResultsData {
            labels,
            original,
            simplified,
            columns: vec![label_name, self.columns[original_col].clone()],
        };
        Ok(ResultsPayload::new(data, Some(self.file.clone())))
    }
}
