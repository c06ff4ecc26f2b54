use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use simplify_results::{MissingPolicy, ViewerConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
}

/// Compare an original series with its simplified version.
#[derive(Parser, Debug)]
#[command(name = "simplify-results", version, about)]
pub struct Args {
    /// Results payload (JSON) or table (CSV, XLS, XLSX) to open at start-up
    pub path: Option<PathBuf>,

    /// Treat numeric zero as a missing point, like truthiness-based gap detection
    #[arg(long)]
    pub zero_is_missing: bool,

    /// Colour theme
    #[arg(long, value_enum, default_value_t = ThemeArg::Dark)]
    pub theme: ThemeArg,
}

impl Args {
    pub fn config(&self) -> ViewerConfig {
        ViewerConfig {
            missing_policy: if self.zero_is_missing {
                MissingPolicy::Falsy
            } else {
                MissingPolicy::Explicit
            },
            dark_theme: self.theme == ThemeArg::Dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["simplify-results"]).unwrap();
        assert!(args.path.is_none());
        assert_eq!(args.config(), ViewerConfig::default());
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "simplify-results",
            "results.json",
            "--zero-is-missing",
            "--theme",
            "light",
        ])
        .unwrap();
        assert_eq!(args.path, Some(PathBuf::from("results.json")));
        let config = args.config();
        assert_eq!(config.missing_policy, MissingPolicy::Falsy);
        assert!(!config.dark_theme);
    }

    #[test]
    fn test_rejects_unknown_theme() {
        assert!(Args::try_parse_from(["simplify-results", "--theme", "sepia"]).is_err());
    }
}
