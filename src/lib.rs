//! ZenTask: field-service administration as a Zellij plugin.
//!
//! ZenTask manages interventions, clients, activities, workflow states and
//! users from the terminal:
//! - Filterable, sortable, paginated tables with a debounced global search
//! - Faceted filter, column and sort popovers
//! - Side sheets for creating and editing records
//! - Account and company settings pages gated by role
//! - A background worker serving records and journaling submissions

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Input modes
//! │  - Event handling, toasts, worker replies           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Screens       │   │ UI Layer      │   │ Worker Layer  │
//! │ (screens/)    │   │ (ui/)         │   │ (worker/)     │
//! │ - Pages       │   │ - Grid        │   │ - Fixtures    │
//! │ - Forms       │   │ - Components  │   │ - Submissions │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │
//! ┌─────────────────────────────────────────────────────┐
//! │  table/ + sheet/                                    │  ← Engines
//! │  - Filter/sort/pagination model                     │
//! │  - Form sessions, fields, uploads                   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │  ← Records, errors
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zentask.wasm" {
//!         theme "zentask-light"
//!         role "operatore"
//!         user_name "Giulia Bianchi"
//!         page_size "20"
//!         card_breakpoint "90"
//!         search_debounce_ms "250"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use zentask::{handle_event, initialize, Config, Event};
//! use std::time::Instant;
//!
//! let mut state = initialize(&Config::default());
//! let (render, actions) = handle_event(&mut state, &Event::NextRoute, Instant::now())?;
//! assert!(render);
//! assert!(actions.is_empty());
//! # Ok::<(), zentask::ZenTaskError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod screens;
pub mod sheet;
pub mod table;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{AuthContext, Result, Role, ZenTaskError};
pub use ui::Theme;

use crate::screens::PageSettings;
use crate::table::{DEFAULT_DEBOUNCE, DEFAULT_PAGE_SIZE};
use crate::ui::grid::DEFAULT_CARD_BREAKPOINT;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

/// Plugin configuration parsed from the Zellij layout.
#[derive(Debug, Clone)]
pub struct Config {
    /// Built-in theme, `zentask-dark` or `zentask-light`. Ignored if
    /// `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a TOML theme file; `~` is the host home.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive. Default: `"info"`
    pub trace_level: Option<String>,

    pub role: Role,

    /// Display name in the header.
    pub user_name: String,

    /// Rows per table page, always > 0.
    pub page_size: usize,

    /// Viewport width in columns below which tables turn into cards.
    pub card_breakpoint: usize,

    pub search_debounce: Duration,
}

impl Default for Config {
    fn default() -> Self {
        let auth = AuthContext::default();
        Self {
            theme_name: None,
            theme_file: None,
            trace_level: None,
            role: auth.role,
            user_name: auth.display_name,
            page_size: DEFAULT_PAGE_SIZE,
            card_breakpoint: DEFAULT_CARD_BREAKPOINT,
            search_debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl Config {
    /// Reads the plugin configuration map, keeping defaults for missing or
    /// malformed values.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zentask::{Config, Role};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("role".to_string(), "operatore".to_string());
    /// map.insert("page_size".to_string(), "0".to_string());
    /// map.insert("search_debounce_ms".to_string(), "150".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.role, Role::Operator);
    /// assert_eq!(config.page_size, 10);
    /// assert_eq!(config.search_debounce.as_millis(), 150);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let role = config.get("role").map_or(defaults.role, |raw| {
            Role::from_str(raw).unwrap_or_else(|e| {
                tracing::debug!(role = %raw, error = %e, "unknown role, using default");
                defaults.role
            })
        });

        let user_name = config
            .get("user_name")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.user_name);

        let page_size = parse_positive(config, "page_size").unwrap_or(defaults.page_size);
        let card_breakpoint = parse_positive(config, "card_breakpoint").unwrap_or(defaults.card_breakpoint);
        let search_debounce = config
            .get("search_debounce_ms")
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(ms) => Some(Duration::from_millis(ms)),
                Err(e) => {
                    tracing::debug!(value = %raw, error = %e, "invalid search_debounce_ms, using default");
                    None
                }
            })
            .unwrap_or(defaults.search_debounce);

        Self {
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
            role,
            user_name,
            page_size,
            card_breakpoint,
            search_debounce,
        }
    }

    #[must_use]
    pub fn auth(&self) -> AuthContext {
        AuthContext::new(self.role, self.user_name.clone())
    }

    #[must_use]
    pub const fn page_settings(&self) -> PageSettings {
        PageSettings {
            page_size: self.page_size,
            debounce: self.search_debounce,
        }
    }
}

fn parse_positive(config: &BTreeMap<String, String>, key: &str) -> Option<usize> {
    let raw = config.get(key)?;
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            tracing::debug!(key, value = %raw, "expected a positive integer, using default");
            None
        }
    }
}

/// Builds the initial [`AppState`]: theme from file, then name, then the
/// default dark theme.
///
/// Records are not loaded yet; every table starts in its loading state until
/// the worker answers.
///
/// ```rust
/// use zentask::{initialize, Config, InputMode};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.input_mode, InputMode::Normal);
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing zentask plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            let path = infrastructure::expand_tilde(theme_file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(theme, config.auth(), &config.page_settings(), config.card_breakpoint)
}
