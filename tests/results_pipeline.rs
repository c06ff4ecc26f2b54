//! End-to-end: payload file on disk -> statistics -> comparison table -> export.

use std::io::Write;

use simplify_results::data::export;
use simplify_results::data::loader::{self, ColumnSelection, LoadedFile};
use simplify_results::processing::statistics;
use simplify_results::report::{ComparisonReport, NOT_AVAILABLE};
use simplify_results::{MissingPolicy, StatsError, Summary};

const PAYLOAD: &str = r#"{
    "row_1": ["08:00", "08:10", "08:20", "08:30", "08:40"],
    "row_2": [1, 2, 3, 4, 5],
    "row_2_rdp": [1, null, 3, null, 5],
    "columns": ["time", "flow"],
    "file": {"name": "flow.csv", "size": 22},
    "simplified_file_size": 2,
    "timings": {"original_secs": 24.76, "simplified_secs": 0.4}
}"#;

fn temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_json_payload_pipeline() {
    let file = temp_file(".json", PAYLOAD);
    let payload = match loader::load_file(file.path()).unwrap() {
        LoadedFile::Results(payload) => payload,
        LoadedFile::Table(_) => panic!("expected a results payload"),
    };

    let summary = Summary::compute(
        &payload.data.original,
        &payload.data.simplified,
        MissingPolicy::Explicit,
    )
    .unwrap();
    assert_eq!(summary.count, 3);
    assert_eq!(summary.reduction_percent, 40);
    assert_eq!(summary.mean, 3.0);
    assert_eq!(summary.std_dev, 1.63);

    let report = ComparisonReport::build(&payload, MissingPolicy::Explicit);
    assert_eq!(report.file_name, "flow.csv");
    assert_eq!(report.rows[0].difference, "40% less");
    assert_eq!(report.rows[3].difference, "24.36 s faster");
    assert_eq!(report.rows[4].difference, "20.00 mb less");

    let mut out = Vec::new();
    let written = export::write_simplified_csv(&payload.data, &mut out).unwrap();
    assert_eq!(written, 3);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "time,flow\n08:00,1\n08:20,3\n08:40,5\n"
    );
}

#[test]
fn test_csv_table_pipeline() {
    let file = temp_file(
        ".csv",
        "time,flow,flow_rdp\n0,2,2\n1,4,\n2,4,\n3,4,4\n4,5,\n5,5,5\n6,7,\n7,9,9\n",
    );
    let table = match loader::load_file(file.path()).unwrap() {
        LoadedFile::Table(table) => table,
        LoadedFile::Results(_) => panic!("expected a table"),
    };
    let payload = table
        .to_payload(ColumnSelection {
            label_col: Some(0),
            original_col: 1,
            simplified_col: 2,
        })
        .unwrap();

    assert_eq!(statistics::mean(&payload.data.original), Ok(5.0));
    assert_eq!(statistics::standard_deviation(&payload.data.original), Ok(2.0));
    assert_eq!(
        statistics::reduction_percent(&payload.data.original, &payload.data.simplified),
        Ok(50)
    );

    let report = ComparisonReport::build(&payload, MissingPolicy::Explicit);
    assert_eq!(report.rows[3].original, NOT_AVAILABLE);
}

#[test]
fn test_empty_series_errors() {
    assert_eq!(statistics::mean(&[]), Err(StatsError::EmptyInput));
    assert_eq!(statistics::standard_deviation(&[]), Err(StatsError::EmptyInput));
    assert_eq!(
        statistics::reduction_percent(&[], &[]),
        Err(StatsError::DivisionByZero)
    );
}
