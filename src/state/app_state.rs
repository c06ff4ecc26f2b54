use simplify_results::processing::statistics::{MissingPolicy, SeriesSummary, Summary};
use simplify_results::report::ComparisonReport;
use simplify_results::{ResultsPayload, ViewerConfig};

use crate::state::theme::Theme;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A loaded payload together with the figures derived from it. Derived
/// values are rebuilt whenever the payload or the missing policy changes,
/// never per frame.
#[derive(Debug, Clone)]
pub struct LoadedResults {
    pub payload: ResultsPayload,
    pub report: ComparisonReport,
    pub summary: Option<Summary>,
}

impl LoadedResults {
    pub fn new(payload: ResultsPayload, policy: MissingPolicy) -> Self {
        let report = ComparisonReport::build(&payload, policy);
        let summary = match Summary::compute(&payload.data.original, &payload.data.simplified, policy) {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!("No summary for loaded results: {e}");
                None
            }
        };

        for (label, series) in [
            ("Original", &payload.data.original),
            ("Simplified", &payload.data.simplified),
        ] {
            if let Ok(stats) = SeriesSummary::compute(series, policy) {
                tracing::debug!("{}", stats.report(label));
            }
        }

        Self {
            payload,
            report,
            summary,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub results: Option<LoadedResults>,
    pub config: ViewerConfig,
    pub theme: Theme,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            results: None,
            config,
            theme: Theme::from_dark(config.dark_theme),
        }
    }

    pub fn set_results(&mut self, payload: ResultsPayload) {
        self.results = Some(LoadedResults::new(payload, self.config.missing_policy));
    }

    pub fn set_missing_policy(&mut self, policy: MissingPolicy) {
        if self.config.missing_policy == policy {
            return;
        }
        self.config.missing_policy = policy;
        if let Some(loaded) = self.results.take() {
            self.results = Some(LoadedResults::new(loaded.payload, policy));
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        self.config.dark_theme = self.theme == Theme::Dark;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}
