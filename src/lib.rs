//! Results viewer for line simplification.
//!
//! Loads an original series and its simplified counterpart, computes the
//! descriptive statistics shown on the results page (point reduction, mean,
//! population standard deviation) and builds the comparison table. The
//! simplification itself happens upstream.

pub mod config;
pub mod error;
pub mod report;

pub mod data {
    pub mod export;
    pub mod loader;
    pub mod parser;
    pub mod payload;
}

pub mod processing;

pub use config::ViewerConfig;
pub use data::payload::{FileMeta, ResultsData, ResultsPayload};
pub use error::{Error, Result};
pub use processing::statistics::{MissingPolicy, StatsError, Summary};
