//! Generation request types — theme and layout selections plus the idea text

use serde::{Deserialize, Serialize};

/// Visual theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Minimal,
    Playful,
    Professional,
    Artistic,
    Techy,
}

impl Theme {
    /// Parse a theme name leniently: unrecognized non-empty names map to the
    /// default so a typo in the UI never blocks generation.
    pub fn parse(name: &str) -> Theme {
        match name.trim().to_lowercase().as_str() {
            "minimal" => Theme::Minimal,
            "playful" => Theme::Playful,
            "professional" => Theme::Professional,
            "artistic" => Theme::Artistic,
            "techy" => Theme::Techy,
            _ => Theme::Minimal,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Minimal => "minimal",
            Theme::Playful => "playful",
            Theme::Professional => "professional",
            Theme::Artistic => "artistic",
            Theme::Techy => "techy",
        }
    }
}

/// Column layout selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Single,
    Dual,
    Triple,
    Quad,
}

impl Layout {
    pub fn parse(name: &str) -> Layout {
        match name.trim().to_lowercase().as_str() {
            "single" => Layout::Single,
            "dual" => Layout::Dual,
            "triple" => Layout::Triple,
            "quad" => Layout::Quad,
            _ => Layout::Single,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Layout::Single => "single",
            Layout::Dual => "dual",
            Layout::Triple => "triple",
            Layout::Quad => "quad",
        }
    }

    /// Number of content columns the layout renders.
    pub fn columns(&self) -> u8 {
        match self {
            Layout::Single => 1,
            Layout::Dual => 2,
            Layout::Triple => 3,
            Layout::Quad => 4,
        }
    }
}

/// One inbound generation request. Immutable for its lifetime.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub idea: String,
    pub theme: Theme,
    pub layout: Layout,
}

impl GenerationRequest {
    pub fn new(idea: impl Into<String>, theme: Theme, layout: Layout) -> Self {
        Self {
            idea: idea.into(),
            theme,
            layout,
        }
    }
}
