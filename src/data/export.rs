use std::io::Write;
use std::path::Path;

use crate::data::payload::{FileMeta, ResultsData};
use crate::error::{Error, Result};

/// Suggested download name: `<stem>_simplified.csv`.
pub fn default_export_name(file: Option<&FileMeta>) -> String {
    let stem = file
        .and_then(|f| Path::new(&f.name).file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "results".to_string());
    format!("{stem}_simplified.csv")
}

/// Write the retained points of the simplified series as CSV. Gaps are
/// skipped. Returns the number of data rows written.
pub fn write_simplified_csv<W: Write>(data: &ResultsData, writer: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    let label_header = data.columns.first().map(String::as_str).unwrap_or("label");
    wtr.write_record([label_header, data.series_name()])?;

    let mut written = 0usize;
    for (i, sample) in data.simplified.iter().enumerate() {
        let Some(value) = sample.filter(|v| v.is_finite()) else {
            continue;
        };
        let label = data.labels.get(i).map(String::as_str).unwrap_or("");
        wtr.write_record([label, value.to_string().as_str()])?;
        written += 1;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(written)
}

pub fn export_simplified(data: &ResultsData, path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path).map_err(|e| Error::io(path, e))?;
    let written = write_simplified_csv(data, file)?;
    tracing::info!("Exported {written} simplified points to {:?}", path);
    Ok(written)
}
