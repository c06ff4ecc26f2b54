use egui::{Color32, Visuals};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn visuals(&self) -> Visuals {
        match self {
            Theme::Dark => Visuals::dark(),
            Theme::Light => Visuals::light(),
        }
    }

    /// Line colour of the original series (cyan).
    pub fn original_color(&self) -> Color32 {
        Color32::from_rgb(6, 182, 212)
    }

    /// Line colour of the simplified series (indigo, lifted on dark backgrounds).
    pub fn simplified_color(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(129, 140, 248),
            Theme::Light => Color32::from_rgb(79, 70, 229),
        }
    }

    pub fn panel_bg(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(28, 28, 32),
            Theme::Light => Color32::WHITE,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}
