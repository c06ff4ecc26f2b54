use serde::{Deserialize, Serialize};

use crate::processing::statistics::MissingPolicy;

/// Viewer settings resolved from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    pub missing_policy: MissingPolicy,
    pub dark_theme: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            missing_policy: MissingPolicy::default(),
            dark_theme: true,
        }
    }
}
