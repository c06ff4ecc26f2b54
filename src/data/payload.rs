use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// The uploaded file the results were computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    /// Size in megabytes.
    pub size: f64,
}

impl FileMeta {
    /// Name and size of a file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| Error::io(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            size: metadata.len() as f64 / BYTES_PER_MB,
        })
    }
}

/// Wall-clock time of the original processing and of the simplified run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timings {
    pub original_secs: f64,
    pub simplified_secs: f64,
}

/// Labels and the two series, position-aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsData {
    #[serde(rename = "row_1", deserialize_with = "deserialize_labels")]
    pub labels: Vec<String>,
    #[serde(rename = "row_2", deserialize_with = "deserialize_samples")]
    pub original: Vec<Option<f64>>,
    #[serde(rename = "row_2_rdp", deserialize_with = "deserialize_samples")]
    pub simplified: Vec<Option<f64>>,
    #[serde(default)]
    pub columns: Vec<String>,
}

impl ResultsData {
    /// Name of the plotted value column (`columns[1]`).
    pub fn series_name(&self) -> &str {
        self.columns.get(1).map(String::as_str).unwrap_or("values")
    }

    /// Pad or cut `simplified` and `labels` to the length of `original`.
    pub fn align(&mut self) {
        let len = self.original.len();
        if self.simplified.len() != len {
            tracing::warn!(
                "Simplified series has {} points, original has {len}; aligning",
                self.simplified.len()
            );
            self.simplified.resize(len, None);
        }
        if self.labels.len() < len {
            let start = self.labels.len();
            self.labels.extend((start..len).map(|i| i.to_string()));
        }
    }
}

/// Everything the results page shows, passed explicitly to the report, chart
/// and export code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsPayload {
    #[serde(flatten)]
    pub data: ResultsData,
    #[serde(default)]
    pub file: Option<FileMeta>,
    /// Size of the simplified output in megabytes.
    #[serde(default)]
    pub simplified_file_size: Option<f64>,
    #[serde(default)]
    pub timings: Option<Timings>,
}

impl ResultsPayload {
    pub fn new(data: ResultsData, file: Option<FileMeta>) -> Self {
        let mut payload = Self {
            data,
            file,
            simplified_file_size: None,
            timings: None,
        };
        payload.data.align();
        payload
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut payload: ResultsPayload = serde_json::from_str(json)?;
        payload.data.align();
        Ok(payload)
    }
}

/// Load a JSON results payload. File metadata defaults to the payload file
/// itself when the payload does not name the uploaded file.
pub fn load_payload(path: &Path) -> Result<ResultsPayload> {
    let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let mut payload = ResultsPayload::from_json_str(&json)?;
    if payload.file.is_none() {
        payload.file = Some(FileMeta::from_path(path)?);
    }
    tracing::info!(
        "Loaded results payload from {:?}: {} points",
        path,
        payload.data.original.len()
    );
    Ok(payload)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Text(String),
    Number(serde_json::Number),
    Other(serde_json::Value),
}

fn deserialize_labels<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<RawLabel> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|label| match label {
            RawLabel::Text(s) => s,
            RawLabel::Number(n) => n.to_string(),
            RawLabel::Other(serde_json::Value::Null) => String::new(),
            RawLabel::Other(v) => v.to_string(),
        })
        .collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSample {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Numbers are kept; `null`, booleans and unparseable strings become gaps.
fn deserialize_samples<'de, D>(deserializer: D) -> std::result::Result<Vec<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<RawSample> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|sample| match sample {
            RawSample::Number(v) => Some(v),
            RawSample::Text(s) => s.trim().parse::<f64>().ok(),
            RawSample::Other(_) => None,
        })
        .collect())
}
