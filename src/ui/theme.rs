//! Theme management and ANSI escape sequence generation.
//!
//! Two themes ship with the plugin and custom themes load from TOML files.
//! Every color key is optional in a custom file; missing keys fall back to
//! the dark palette.
//!
//! # Built-in Themes
//!
//! - `zentask-dark`: Slate background, blue accents (default)
//! - `zentask-light`: Light counterpart, toggled with `t`
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e2e8f0"
//! selection_fg = "#0f172a"
//! selection_bg = "#93c5fd"
//! accent = "#60a5fa"
//! danger = "#f87171"
//! ```
//!
//! # Example
//!
//! ```rust
//! use zentask::ui::theme::Theme;
//!
//! let theme = Theme::from_name("zentask-dark").unwrap();
//! assert_eq!(theme.toggled().name, "zentask-light");
//! println!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::error::{Result, ZenTaskError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DARK_THEME: &str = "zentask-dark";
pub const LIGHT_THEME: &str = "zentask-light";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeColors {
    /// Title bar text.
    pub header_fg: String,
    /// Title bar background; transparent when absent.
    pub header_bg: Option<String>,

    /// Selected row, active chip and focused field.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    pub text_dim: String,

    /// Separators and table rules.
    pub border: String,

    /// Search box frame while typing.
    pub search_bar_border: String,
    /// Global search hits inside cells.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Active tab, sort arrows and section titles.
    pub accent: String,
    /// Pill labels such as status and role.
    pub badge_fg: String,
    pub badge_bg: String,
    /// Urgent rows, errors and the delete dialog.
    pub danger: String,
    pub success: String,
    /// Sheet, popover and dialog frames.
    pub panel_border: String,
    /// Loading placeholder bars.
    pub skeleton: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            header_fg: "#e2e8f0".to_string(),
            header_bg: Some("#1e293b".to_string()),
            selection_fg: "#0f172a".to_string(),
            selection_bg: "#93c5fd".to_string(),
            text_normal: "#e2e8f0".to_string(),
            text_dim: "#94a3b8".to_string(),
            border: "#334155".to_string(),
            search_bar_border: "#3b82f6".to_string(),
            match_highlight_fg: "#0f172a".to_string(),
            match_highlight_bg: "#facc15".to_string(),
            empty_state_fg: "#64748b".to_string(),
            accent: "#60a5fa".to_string(),
            badge_fg: "#e2e8f0".to_string(),
            badge_bg: "#334155".to_string(),
            danger: "#f87171".to_string(),
            success: "#4ade80".to_string(),
            panel_border: "#60a5fa".to_string(),
            skeleton: "#1e293b".to_string(),
        }
    }
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            DARK_THEME => include_str!("../../themes/zentask-dark.toml"),
            LIGHT_THEME => include_str!("../../themes/zentask-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a custom theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ZenTaskError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ZenTaskError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| ZenTaskError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// The other built-in theme: light for anything dark, dark for light.
    #[must_use]
    pub fn toggled(&self) -> Self {
        let target = if self.name.contains("light") {
            DARK_THEME
        } else {
            LIGHT_THEME
        };
        Self::from_name(target).unwrap_or_else(|| self.clone())
    }

    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// Foreground (text) color escape sequence.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// Background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(DARK_THEME).unwrap_or_else(|| Self {
            name: DARK_THEME.to_string(),
            colors: ThemeColors::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        let dark = Theme::from_name(DARK_THEME).unwrap();
        let light = Theme::from_name(LIGHT_THEME).unwrap();
        assert_eq!(dark.colors, ThemeColors::default());
        assert_ne!(light.colors.text_normal, dark.colors.text_normal);
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn toggling_flips_between_builtins() {
        let theme = Theme::default();
        assert_eq!(theme.toggled().name, LIGHT_THEME);
        assert_eq!(theme.toggled().toggled().name, DARK_THEME);
    }

    #[test]
    fn custom_file_fills_missing_colors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"mine\"\n[colors]\naccent = \"#ff0000\"").unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "mine");
        assert_eq!(theme.colors.accent, "#ff0000");
        assert_eq!(theme.colors.danger, ThemeColors::default().danger);
    }

    #[test]
    fn unreadable_file_is_a_theme_error() {
        let err = Theme::from_file("/nonexistent/theme.toml").unwrap_err();
        assert!(matches!(err, ZenTaskError::Theme(_)));
    }

    #[test]
    fn escape_sequences() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("bad"), "\u{1b}[48;2;255;255;255m");
    }
}
