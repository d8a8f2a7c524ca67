//! Theme resolution: selector to color tokens
//!
//! Pure mapping from a theme selector (plus optional custom overrides) to
//! the color-token record every pane renders from. Theming never touches
//! business logic; a bad override is ignored, not an error.

use serde::{Deserialize, Serialize};

/// The theme selector the dashboard toggles between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    Colored,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::Colored];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::Colored => "colored",
        }
    }

    pub fn parse(s: &str) -> Option<ThemeMode> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            "colored" => Some(ThemeMode::Colored),
            _ => None,
        }
    }
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Light
    }
}

/// Color tokens consumed by the dashboard panes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub sidebar_bg: String,
    pub middle_pane_bg: String,
    pub right_pane_bg: String,
    pub text_main: String,
    pub text_muted: String,
    pub border: String,
    pub item_bg: String,
    pub item_active_bg: String,
    pub primary: String,
    pub unread: String,
    pub attachment_bg: String,
    pub input_bg: String,
}

/// Optional user-picked hex colors layered over the base palette
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeOverrides {
    /// Replaces the main text color
    pub text: Option<String>,
    /// Replaces the pane background colors
    pub background: Option<String>,
}

/// The base palette for a theme selector
fn palette(mode: ThemeMode) -> ThemeColors {
    match mode {
        ThemeMode::Light => ThemeColors {
            sidebar_bg: "#F1F3F5".into(),
            middle_pane_bg: "#FFFFFF".into(),
            right_pane_bg: "#F8F9FA".into(),
            text_main: "#1A1D1F".into(),
            text_muted: "#6F767E".into(),
            border: "#E9ECEF".into(),
            item_bg: "transparent".into(),
            item_active_bg: "#FFFFFF".into(),
            primary: "#2D62ED".into(),
            unread: "#2D62ED".into(),
            attachment_bg: "#F8F9FA".into(),
            input_bg: "#F8F9FA".into(),
        },
        ThemeMode::Dark => ThemeColors {
            sidebar_bg: "#0B0C0D".into(),
            middle_pane_bg: "#131416".into(),
            right_pane_bg: "#1A1B1E".into(),
            text_main: "#ECEEF2".into(),
            text_muted: "#9499A1".into(),
            border: "#25282B".into(),
            item_bg: "transparent".into(),
            item_active_bg: "#25282B".into(),
            primary: "#4D7FFF".into(),
            unread: "#4D7FFF".into(),
            attachment_bg: "#25282B".into(),
            input_bg: "#1A1B1E".into(),
        },
        ThemeMode::Colored => ThemeColors {
            sidebar_bg: "#F1F3F5".into(),
            middle_pane_bg: "#FFFFFF".into(),
            right_pane_bg: "#F8F9FA".into(),
            text_main: "#1A1D1F".into(),
            text_muted: "#64748b".into(),
            border: "#E2E8F0".into(),
            item_bg: "transparent".into(),
            item_active_bg: "#FFFFFF".into(),
            primary: "#2D62ED".into(),
            unread: "#2D62ED".into(),
            attachment_bg: "#F1F5F9".into(),
            input_bg: "#F1F5F9".into(),
        },
    }
}

/// Resolve a selector and overrides to the final token record.
///
/// Overrides apply only when they are well-formed hex colors; anything else
/// leaves the base palette untouched.
pub fn resolve(mode: ThemeMode, overrides: &ThemeOverrides) -> ThemeColors {
    let mut colors = palette(mode);

    if let Some(text) = &overrides.text
        && is_hex_color(text)
    {
        colors.text_main = text.clone();
    }
    if let Some(background) = &overrides.background
        && is_hex_color(background)
    {
        colors.sidebar_bg = background.clone();
        colors.middle_pane_bg = background.clone();
        colors.right_pane_bg = background.clone();
    }

    colors
}

/// Whether a string is a `#RGB` or `#RRGGBB` hex color
pub fn is_hex_color(s: &str) -> bool {
    let Some(digits) = s.strip_prefix('#') else {
        return false;
    };
    (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}
