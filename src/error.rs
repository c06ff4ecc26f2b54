use std::path::PathBuf;

use crate::processing::statistics::StatsError;

/// Result type alias for loading, reporting and exporting results.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while getting results in and out of the viewer.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV reading or writing failed
    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// Results payload is not valid JSON or has the wrong shape
    #[error("Invalid results payload: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Excel workbook could not be opened or read
    #[error("Excel error: {message}")]
    Excel { message: String },

    #[error("Unsupported file format: .{extension}")]
    UnsupportedFormat { extension: String },

    /// File parsed but held nothing usable
    #[error("No data found: {message}")]
    NoData { message: String },

    /// Column index out of range for the loaded table
    #[error("Invalid column selection: {message}")]
    ColumnSelection { message: String },

    #[error(transparent)]
    Stats(#[from] StatsError),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn excel(message: impl Into<String>) -> Self {
        Self::Excel {
            message: message.into(),
        }
    }

    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self::NoData {
            message: message.into(),
        }
    }

    pub fn column_selection(message: impl Into<String>) -> Self {
        Self::ColumnSelection {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::unsupported_format("txt");
        assert_eq!(err.to_string(), "Unsupported file format: .txt");

        let err = Error::no_data("empty sheet");
        assert_eq!(err.to_string(), "No data found: empty sheet");

        let err: Error = StatsError::EmptyInput.into();
        assert_eq!(err.to_string(), StatsError::EmptyInput.to_string());
    }

    #[test]
    fn test_io_error_keeps_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::io("results.json", source);
        assert!(err.to_string().contains("results.json"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
