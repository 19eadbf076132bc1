//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the ZenTask library and the Zellij plugin
//! system: it maps host events to library [`Event`]s, runs the returned
//! [`Action`]s and forwards rendering.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, event handling
//! │  └──────────────────┘   │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │  ZenTaskWorker   │   │  ← Records, submission journal
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Key, Mouse, Timer, `CustomMessage`, permission results
//! 3. **Permissions granted**: Post `LoadRecords` to the worker
//! 4. **Update**: Map events, delegate to `handle_event`, run actions
//! 5. **Render**: Call the library render function
//!
//! # Keybindings
//!
//! Normal mode:
//! - `j`/`k`/`↓`/`↑`: Rows
//! - `h`/`l`/`←`/`→`/`[`/`]`: Pages
//! - `/`: Search, `f`: Filters, `c`: Columns, `o`: Sort, `r`: Reset
//! - `n`: New, `e`/`Enter`: Edit, `d`: Delete
//! - `Tab`/`Shift+Tab`/`1`-`8`: Screens
//! - `t`: Theme, `q`: Close
//!
//! Search, popover, sheet and form modes take printable characters as text;
//! `Esc` backs out and `Ctrl+s` submits.

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
use plugin::State;
#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;
#[cfg(target_family = "wasm")]
use zentask::worker::ZenTaskWorker;

#[cfg(target_family = "wasm")]
register_plugin!(State);
#[cfg(target_family = "wasm")]
register_worker!(ZenTaskWorker, zentask_worker, ZENTASK_WORKER);

#[cfg(target_family = "wasm")]
mod plugin {
    use std::collections::BTreeMap;
    use std::time::Instant;
    use zellij_tile::prelude::*;
    use zellij_tile::shim::post_message_to;

    use zentask::screens::Route;
    use zentask::worker::{WorkerMessage, WorkerResponse};
    use zentask::{handle_event, Action, Config, Event, InputMode};

    /// Worker name on the IPC channel, in both directions.
    const WORKER_NAME: &str = "zentask";

    /// Plugin state wrapper.
    pub struct State {
        app: zentask::app::AppState,

        /// Width of the last render, for mapping mouse clicks.
        cols: usize,
    }

    impl Default for State {
        fn default() -> Self {
            Self {
                app: zentask::initialize(&Config::default()),
                cols: 0,
            }
        }
    }

    impl ZellijPlugin for State {
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            zentask::observability::init_tracing(&config);

            let span = tracing::debug_span!("plugin_load");
            let _guard = span.entered();

            tracing::debug!(
                role = %config.role,
                page_size = config.page_size,
                card_breakpoint = config.card_breakpoint,
                "parsed configuration"
            );
            self.app = zentask::initialize(&config);

            request_permission(&[
                PermissionType::ReadApplicationState,
                PermissionType::ChangeApplicationState,
            ]);

            subscribe(&[
                EventType::Key,
                EventType::Mouse,
                EventType::Timer,
                EventType::CustomMessage,
                EventType::PermissionRequestResult,
            ]);

            tracing::debug!("plugin load complete - waiting for permissions");
        }

        fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
            let event_name = Self::get_event_name(&event);
            let span_name = format!("plugin_update::{event_name}");
            let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
            let _guard = span.entered();

            let our_event = match event {
                zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                    Some(event) => event,
                    None => return false,
                },
                zellij_tile::prelude::Event::Mouse(mouse) => match self.map_mouse_event(mouse) {
                    Some(event) => event,
                    None => return false,
                },
                zellij_tile::prelude::Event::Timer(_) => Event::Timer,
                zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                    match Self::map_custom_message_event(&message, &payload) {
                        Some(event) => event,
                        None => return false,
                    }
                }
                zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                    Self::handle_permission_result(permissions);
                    return false;
                }
                _ => return false,
            };

            match handle_event(&mut self.app, &our_event, Instant::now()) {
                Ok((should_render, actions)) => {
                    tracing::debug!(
                        action_count = actions.len(),
                        should_render = should_render,
                        "event handled successfully"
                    );
                    for a in actions {
                        Self::execute_action(&a);
                    }
                    should_render
                }
                Err(e) => {
                    tracing::warn!(error = %e, "error handling event");
                    false
                }
            }
        }

        fn render(&mut self, rows: usize, cols: usize) {
            self.cols = cols;
            zentask::ui::render(&self.app, rows, cols);
        }
    }

    impl State {
        fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
            match event {
                zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
                zellij_tile::prelude::Event::Mouse(..) => "Mouse".to_string(),
                zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
                zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
                zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                    "PermissionRequestResult".to_string()
                }
                _ => "Other".to_string(),
            }
        }

        /// Maps keyboard events to application events for the current mode.
        fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
            tracing::debug!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

            let ctrl = key.has_modifiers(&[KeyModifier::Ctrl]);
            let shift = key.has_modifiers(&[KeyModifier::Shift]);
            let mode = self.app.input_mode;

            if ctrl {
                return match key.bare_key {
                    BareKey::Char('s') if matches!(mode, InputMode::Sheet | InputMode::Form) => {
                        Some(Event::Submit)
                    }
                    BareKey::Char('n') => Some(Event::Down),
                    BareKey::Char('p') => Some(Event::Up),
                    _ => None,
                };
            }

            Some(match key.bare_key {
                BareKey::Esc => Event::Escape,
                BareKey::Enter => Event::Enter,
                BareKey::Backspace => Event::Backspace,
                BareKey::Down => Event::Down,
                BareKey::Up => Event::Up,
                BareKey::Tab if matches!(mode, InputMode::Sheet | InputMode::Form) => {
                    if shift {
                        Event::PreviousField
                    } else {
                        Event::NextField
                    }
                }
                BareKey::Tab if mode == InputMode::Normal => {
                    if shift {
                        Event::PreviousRoute
                    } else {
                        Event::NextRoute
                    }
                }
                BareKey::PageDown if mode == InputMode::Form => Event::NextSection,
                BareKey::PageDown if mode == InputMode::Normal => Event::NextPage,
                BareKey::PageUp if mode == InputMode::Normal => Event::PreviousPage,
                BareKey::Left => match mode {
                    InputMode::Normal => Event::PreviousPage,
                    _ => Event::Left,
                },
                BareKey::Right => match mode {
                    InputMode::Normal => Event::NextPage,
                    _ => Event::Right,
                },
                BareKey::Char(c) if mode.captures_text() => Event::Char(c),
                BareKey::Char(c) => return Self::map_command_key(mode, c),
                _ => return None,
            })
        }

        /// Single-key commands outside of text entry.
        fn map_command_key(mode: InputMode, c: char) -> Option<Event> {
            match mode {
                InputMode::Toolbar => match c {
                    'h' => Some(Event::Left),
                    'l' => Some(Event::Right),
                    'f' => Some(Event::Escape),
                    _ => None,
                },
                InputMode::ConfirmDelete => Some(Event::Char(c)),
                _ => Some(match c {
                    'j' => Event::Down,
                    'k' => Event::Up,
                    'h' | '[' => Event::PreviousPage,
                    'l' | ']' => Event::NextPage,
                    '/' => Event::StartSearch,
                    'f' => Event::FocusToolbar,
                    'c' => Event::OpenColumns,
                    'o' => Event::OpenSort,
                    'r' => Event::ResetFilters,
                    'n' => Event::NewRecord,
                    'e' => Event::EditRecord,
                    'd' => Event::DeleteRecord,
                    't' => Event::ToggleTheme,
                    'q' => Event::CloseFocus,
                    digit => Event::Navigate(Route::from_digit(digit)?),
                }),
            }
        }

        /// Clicks left of an open sheet dismiss it.
        fn map_mouse_event(&self, mouse: Mouse) -> Option<Event> {
            let Mouse::LeftClick(_line, col) = mouse else {
                return None;
            };
            let edge = self.app.sheet_left_edge(self.cols)?;
            (col + 1 < edge).then_some(Event::ClickOutside)
        }

        fn handle_permission_result(permissions: PermissionStatus) {
            match permissions {
                PermissionStatus::Granted => {
                    tracing::debug!("permissions granted - loading records");
                    Self::post_worker_message(&WorkerMessage::load_records());
                }
                PermissionStatus::Denied => {
                    tracing::warn!("permissions denied - plugin functionality limited");
                }
            }
        }

        fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
            tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

            if message != WORKER_NAME {
                tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
                return None;
            }
            match serde_json::from_str::<WorkerResponse>(payload) {
                Ok(response) => Some(Event::WorkerResponse(response)),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to deserialize worker response");
                    None
                }
            }
        }

        fn post_worker_message(message: &WorkerMessage) {
            match serde_json::to_string(message) {
                Ok(payload) => {
                    tracing::debug!(kind = message.kind(), payload_len = payload.len(), "posting message to worker");
                    post_message_to(PluginMessage {
                        worker_name: Some(WORKER_NAME.to_string()),
                        name: WORKER_NAME.to_string(),
                        payload,
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to serialize worker message");
                }
            }
        }

        #[tracing::instrument(level = "debug")]
        fn execute_action(action: &Action) {
            match action {
                Action::CloseFocus => {
                    tracing::debug!("closing plugin focus");
                    hide_self();
                }
                Action::PostToWorker(message) => Self::post_worker_message(message),
                Action::ScheduleTimer(delay) => set_timeout(delay.as_secs_f64()),
            }
        }
    }
}

#[cfg(not(target_family = "wasm"))]
fn main() {}
