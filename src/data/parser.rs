use std::collections::HashMap;

/// How many leading rows are scanned for a header.
pub const HEADER_SCAN_ROWS: usize = 50;

/// Find the header row among the first [`HEADER_SCAN_ROWS`] rows.
///
/// The header is the last row, scanning upwards, that has the most common
/// column count and whose cells are all non-empty text (no numbers, no
/// dates). Falls back to row 0.
pub fn detect_header_row(rows: &[Vec<String>]) -> usize {
    let scanned = &rows[..rows.len().min(HEADER_SCAN_ROWS)];
    if scanned.is_empty() {
        return 0;
    }

    // Trailing empty cells count, so sparse simplified columns keep their width.
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for row in scanned.iter().filter(|row| !row.is_empty()) {
        *counts.entry(row.len()).or_insert(0) += 1;
    }
    // Ties go to the wider row so a lone title line does not win.
    let most_common = counts
        .into_iter()
        .max_by_key(|&(len, c)| (c, len))
        .map(|(len, _)| len)
        .unwrap_or(0);

    for i in (0..scanned.len()).rev() {
        let row = &scanned[i];
        if row.len() != most_common {
            continue;
        }
        if row.iter().all(|cell| is_header_cell(cell)) {
            return i;
        }
    }

    0
}

fn is_header_cell(cell: &str) -> bool {
    let trimmed = cell.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().is_err() && !is_date_like(trimmed)
}

fn is_date_like(s: &str) -> bool {
    let has_separators = s.contains('/') || s.contains(':') || s.contains('-');
    if !has_separators {
        return false;
    }

    use chrono::{NaiveDate, NaiveDateTime};
    const FORMATS: [&str; 5] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
    ];
    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d"];

    FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(s, fmt).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(lines: &[&[&str]]) -> Vec<Vec<String>> {
        lines
            .iter()
            .map(|l| l.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_header_on_first_row() {
        let data = rows(&[&["time", "value", "value_rdp"], &["1", "2.5", "2.5"], &["2", "3", ""]]);
        assert_eq!(detect_header_row(&data), 0);
    }

    #[test]
    fn test_header_after_preamble() {
        let data = rows(&[
            &["Exported readings"],
            &["station", "north"],
            &["date", "reading", "simplified"],
            &["2024-01-01", "1.0", "1.0"],
            &["2024-01-02", "2.0", ""],
            &["2024-01-03", "3.0", "3.0"],
        ]);
        assert_eq!(detect_header_row(&data), 2);
    }

    #[test]
    fn test_date_rows_are_not_headers() {
        let data = rows(&[&["2024-01-01", "2024-01-02"], &["2024-02-01", "2024-02-02"]]);
        assert_eq!(detect_header_row(&data), 0);
        assert!(is_date_like("2024-01-01 10:00:00"));
        assert!(is_date_like("01/31/2024"));
        assert!(!is_date_like("pressure"));
    }

    #[test]
    fn test_title_line_above_sparse_simplified_column() {
        let data = rows(&[
            &["Export of station 4"],
            &["time", "flow", "flow_rdp"],
            &["t0", "1", "1"],
            &["t1", "2", ""],
            &["t2", "3", ""],
            &["t3", "4", ""],
            &["t4", "5", ""],
            &["t5", "6", "6"],
        ]);
        assert_eq!(detect_header_row(&data), 1);
    }

    #[test]
    fn test_padded_title_row_is_not_a_header() {
        // Spreadsheet rows all share the sheet width.
        let data = rows(&[
            &["Station report", "", ""],
            &["time", "flow", "flow_rdp"],
            &["t0", "1", ""],
            &["t1", "2", ""],
        ]);
        assert_eq!(detect_header_row(&data), 1);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(detect_header_row(&[]), 0);
    }
}
