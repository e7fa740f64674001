use std::path::PathBuf;

use serde::Deserialize;

use crate::color::Color;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub defaults: Defaults,
    pub github: GithubConfig,
    pub theme: Theme,
    /// Path to a JSON board fixture served by the engine.
    pub fixture: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub date_format: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            date_format: "relative".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// Login shown in the footer; falls back to `$USER` when unset.
    pub username: Option<String>,
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub ui: UiTheme,
    pub colors: ColorsTheme,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiTheme {
    pub table: TableTheme,
}

impl Default for UiTheme {
    fn default() -> Self {
        Self {
            table: TableTheme::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TableTheme {
    pub show_separator: bool,
}

impl Default for TableTheme {
    fn default() -> Self {
        Self {
            show_separator: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

// `Color` deserializes from its string form ("245", "#c0caf5"), so the color
// sections are plain optional fields: anything unset falls back to the
// background-specific default at resolution time.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColorsTheme {
    pub text: TextColors,
    pub background: BgColors,
    pub border: BorderColors,
    pub search: SearchColors,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TextColors {
    pub primary: Option<Color>,
    pub secondary: Option<Color>,
    pub faint: Option<Color>,
    pub warning: Option<Color>,
    pub success: Option<Color>,
    pub error: Option<Color>,
    pub actor: Option<Color>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BgColors {
    pub selected: Option<Color>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BorderColors {
    pub primary: Option<Color>,
    pub secondary: Option<Color>,
    pub faint: Option<Color>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchColors {
    /// Field placeholder / label color.
    pub prompt: Option<Color>,
    /// Highlighted suggestion row color.
    pub highlight: Option<Color>,
}
