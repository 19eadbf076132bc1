//! Event handling and state transition logic.
//!
//! The plugin runtime turns keys, timers and worker replies into [`Event`]s;
//! [`handle_event`] applies them to [`AppState`] and returns whether a render
//! is needed plus the side effects to run.
//!
//! # Event Types
//!
//! - **Navigation**: `Navigate`, `NextRoute`, `PreviousRoute`, `Up`, `Down`,
//!   `NextPage`, `PreviousPage`
//! - **Table commands**: `StartSearch`, `FocusToolbar`, `OpenColumns`,
//!   `OpenSort`, `ResetFilters`, `NewRecord`, `EditRecord`, `DeleteRecord`
//! - **Input**: `Char`, `Backspace`, `Enter`, `Escape`, `Left`, `Right`,
//!   `NextField`, `PreviousField`, `NextSection`, `Submit`, `ClickOutside`
//! - **System**: `Timer`, `WorkerResponse`
//!
//! The meaning of an input event depends on [`InputMode`]: `Down` moves the
//! row selection in normal mode, the popover cursor in a popover and the
//! field focus in a sheet.
//!
//! # Example
//!
//! ```rust
//! use zentask::app::{handle_event, AppState, Event};
//! use zentask::domain::AuthContext;
//! use zentask::screens::PageSettings;
//! use zentask::ui::theme::Theme;
//! use std::time::Instant;
//!
//! let mut state = AppState::new(Theme::default(), AuthContext::default(), &PageSettings::default(), 100);
//! let (render, actions) = handle_event(&mut state, &Event::NextRoute, Instant::now())?;
//! assert!(render && actions.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::modes::InputMode;
use crate::app::{Action, AppState};
use crate::domain::error::{Result, ZenTaskError};
use crate::screens::page::{PopoverKind, ToolbarOutcome};
use crate::screens::{Route, TableScreen};
use crate::sheet::{FormSession, SubmitOutcome};
use crate::ui::viewmodel::Toast;
use crate::worker::{SheetKind, WorkerResponse};
use std::time::{Duration, Instant};

/// Events triggered by user input, timers or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Jumps to a screen (digit shortcuts).
    Navigate(Route),
    NextRoute,
    PreviousRoute,

    /// Row, popover item or form field below.
    Down,
    /// Row, popover item or form field above.
    Up,
    NextPage,
    PreviousPage,

    /// Focuses the global search box.
    StartSearch,
    /// Moves focus to the filter chips.
    FocusToolbar,
    OpenColumns,
    OpenSort,
    ResetFilters,

    NewRecord,
    /// Opens the edit sheet for the selected row.
    EditRecord,
    /// Asks for confirmation before deleting the selected row.
    DeleteRecord,

    Char(char),
    Backspace,
    /// Confirms the focused element; meaning depends on the mode.
    Enter,
    /// Backs out of the current mode.
    Escape,
    /// Toolbar focus or select option to the left.
    Left,
    /// Toolbar focus or select option to the right.
    Right,
    NextField,
    PreviousField,
    /// Moves to the next section of an Account or Settings form.
    NextSection,
    /// Submits the open sheet or the focused page form.
    Submit,
    /// Mouse press outside the open sheet.
    ClickOutside,

    ToggleTheme,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,

    /// Host timer fired; settles the debounced search.
    Timer,

    /// Wraps a response from the background worker.
    WorkerResponse(WorkerResponse),
}

impl Event {
    /// Events caused by the user, as opposed to timers and the worker.
    #[must_use]
    pub const fn is_input(&self) -> bool {
        !matches!(self, Self::Timer | Self::WorkerResponse(_))
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// `now` drives the search debounce and is passed in so tests control time.
///
/// # Returns
///
/// `(render, actions)`: whether the UI changed, and the side effects to run in
/// order.
///
/// # Errors
///
/// Returns [`ZenTaskError::Worker`] when a worker reply names a screen that
/// cannot take it.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event, now: Instant) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event, mode = ?state.input_mode).entered();

    let cleared_toast = event.is_input() && state.toast.take().is_some();

    let (render, actions) = match event {
        Event::Navigate(route) => (state.navigate(*route), vec![]),
        Event::NextRoute => (state.navigate(state.route.next()), vec![]),
        Event::PreviousRoute => (state.navigate(state.route.previous()), vec![]),

        Event::Down | Event::Up => {
            let forward = *event == Event::Down;
            match state.input_mode {
                InputMode::Popover => table_action(state, |t| t.popover_move(forward)),
                InputMode::Sheet | InputMode::Form => move_field(state, forward),
                InputMode::Normal => table_action(state, |t| {
                    if forward {
                        t.select_next();
                    } else {
                        t.select_previous();
                    }
                }),
                _ => (false, vec![]),
            }
        }
        Event::NextPage => (state.table_mut().is_some_and(|t| t.next_page()), vec![]),
        Event::PreviousPage => (state.table_mut().is_some_and(|t| t.previous_page()), vec![]),

        Event::StartSearch => {
            if state.table().is_some_and(|t| !t.is_loading()) {
                tracing::debug!("entering search mode");
                state.input_mode = InputMode::Search;
                (true, vec![])
            } else {
                (false, vec![])
            }
        }
        Event::FocusToolbar => {
            if state.table().is_some_and(|t| !t.is_loading()) {
                state.input_mode = InputMode::Toolbar;
                (true, vec![])
            } else {
                (false, vec![])
            }
        }
        Event::OpenColumns => open_popover(state, PopoverKind::Columns),
        Event::OpenSort => open_popover(state, PopoverKind::Sort),
        Event::ResetFilters => (state.table_mut().is_some_and(|t| t.reset_filters()), vec![]),

        Event::NewRecord => open_sheet(state, |t| t.open_create()),
        Event::EditRecord if state.input_mode == InputMode::Normal => handle_enter(state),
        Event::EditRecord => (false, vec![]),
        Event::DeleteRecord => {
            if state.table_mut().is_some_and(|t| t.request_delete()) {
                state.input_mode = InputMode::ConfirmDelete;
                (true, vec![])
            } else {
                (false, vec![])
            }
        }

        Event::Char(c) => handle_char(state, *c, now),
        Event::Backspace => match state.input_mode {
            InputMode::Search => search_edit(state, now, |t, now| t.search_backspace(now)),
            InputMode::Popover => table_action(state, |t| t.popover_backspace()),
            InputMode::Sheet | InputMode::Form => session_action(state, |s| s.backspace()),
            _ => (false, vec![]),
        },
        Event::Enter => handle_enter(state),
        Event::Escape => handle_escape(state),
        Event::Left | Event::Right => {
            let forward = *event == Event::Right;
            match state.input_mode {
                InputMode::Toolbar => table_action(state, |t| t.move_toolbar_focus(forward)),
                InputMode::Sheet | InputMode::Form => session_action(state, |s| s.cycle(forward)),
                _ => (false, vec![]),
            }
        }
        Event::NextField => move_field(state, true),
        Event::PreviousField => move_field(state, false),
        Event::NextSection => {
            if state.input_mode == InputMode::Form {
                match state.form_mut() {
                    Some(form) => {
                        form.focus_section(true);
                        (true, vec![])
                    }
                    None => (false, vec![]),
                }
            } else {
                (false, vec![])
            }
        }
        Event::Submit => submit(state),
        Event::ClickOutside => {
            if state.input_mode != InputMode::Sheet {
                return Ok((cleared_toast, vec![]));
            }
            let closed = state.table_mut().is_some_and(|t| t.dismiss_sheet());
            if closed {
                tracing::debug!("sheet dismissed by outside click");
                state.input_mode = InputMode::Normal;
            }
            (closed, vec![])
        }

        Event::ToggleTheme => {
            state.toggle_theme();
            (true, vec![])
        }
        Event::CloseFocus => (false, vec![Action::CloseFocus]),

        Event::Timer => {
            let Some(table) = state.table_mut() else {
                return Ok((false, vec![]));
            };
            let applied = table.poll_search(now);
            let actions = table
                .search_remaining(now)
                .map(Action::ScheduleTimer)
                .into_iter()
                .collect();
            (applied, actions)
        }

        Event::WorkerResponse(response) => handle_worker_response(state, response)?,
    };

    Ok((render || cleared_toast, actions))
}

fn table_action(
    state: &mut AppState,
    f: impl FnOnce(&mut (dyn TableScreen + 'static)),
) -> (bool, Vec<Action>) {
    match state.table_mut() {
        Some(table) => {
            f(table);
            (true, vec![])
        }
        None => (false, vec![]),
    }
}

fn session_action(state: &mut AppState, f: impl FnOnce(&mut FormSession)) -> (bool, Vec<Action>) {
    match state.focused_session_mut() {
        Some(session) => {
            f(session);
            (true, vec![])
        }
        None => (false, vec![]),
    }
}

fn move_field(state: &mut AppState, forward: bool) -> (bool, Vec<Action>) {
    session_action(state, |s| {
        if forward {
            s.focus_next();
        } else {
            s.focus_previous();
        }
    })
}

fn open_popover(state: &mut AppState, kind: PopoverKind) -> (bool, Vec<Action>) {
    let origin = state.input_mode;
    if state.table_mut().is_some_and(|t| t.open_popover(kind)) {
        tracing::debug!(?kind, "popover opened");
        state.popover_origin = origin;
        state.input_mode = InputMode::Popover;
        (true, vec![])
    } else {
        (false, vec![])
    }
}

fn open_sheet(
    state: &mut AppState,
    open: impl FnOnce(&mut (dyn TableScreen + 'static)) -> bool,
) -> (bool, Vec<Action>) {
    let Some(table) = state.table_mut() else {
        return (false, vec![]);
    };
    if open(table) {
        state.input_mode = InputMode::Sheet;
        (true, vec![])
    } else {
        (false, vec![])
    }
}

fn search_edit(
    state: &mut AppState,
    now: Instant,
    edit: impl FnOnce(&mut (dyn TableScreen + 'static), Instant) -> Duration,
) -> (bool, Vec<Action>) {
    match state.table_mut() {
        Some(table) => {
            let delay = edit(&mut *table, now);
            tracing::trace!(query = %table.search_query(), "search query updated");
            (true, vec![Action::ScheduleTimer(delay)])
        }
        None => (false, vec![]),
    }
}

fn handle_char(state: &mut AppState, c: char, now: Instant) -> (bool, Vec<Action>) {
    match state.input_mode {
        InputMode::Search => search_edit(state, now, |t, now| t.search_input(c, now)),
        InputMode::Popover => table_action(state, |t| t.popover_input(c)),
        InputMode::Sheet | InputMode::Form => session_action(state, |s| s.input(c)),
        InputMode::ConfirmDelete => match c {
            'y' | 'Y' => confirm_delete(state),
            'n' | 'N' => cancel_delete(state),
            _ => (false, vec![]),
        },
        InputMode::Normal | InputMode::Toolbar => (false, vec![]),
    }
}

fn handle_enter(state: &mut AppState) -> (bool, Vec<Action>) {
    match state.input_mode {
        InputMode::Normal => {
            if state.table().is_some() {
                return open_sheet(state, |t| t.open_edit());
            }
            if state.form().is_some_and(|f| f.restricted().is_none()) {
                tracing::debug!(screen = %state.route, "editing page form");
                state.input_mode = InputMode::Form;
                return (true, vec![]);
            }
            (false, vec![])
        }
        InputMode::Search => {
            if let Some(table) = state.table_mut() {
                table.commit_search();
            }
            state.input_mode = InputMode::Normal;
            (true, vec![])
        }
        InputMode::Toolbar => {
            let outcome = state
                .table_mut()
                .map_or(ToolbarOutcome::Nothing, |t| t.activate_toolbar());
            match outcome {
                ToolbarOutcome::OpenedPopover => {
                    state.popover_origin = InputMode::Toolbar;
                    state.input_mode = InputMode::Popover;
                    (true, vec![])
                }
                ToolbarOutcome::Changed => (true, vec![]),
                ToolbarOutcome::Nothing => (false, vec![]),
            }
        }
        InputMode::Popover => (state.table_mut().is_some_and(|t| t.popover_activate(false)), vec![]),
        InputMode::Sheet | InputMode::Form => session_action(state, |s| s.confirm()),
        InputMode::ConfirmDelete => confirm_delete(state),
    }
}

fn handle_escape(state: &mut AppState) -> (bool, Vec<Action>) {
    match state.input_mode {
        InputMode::Normal => (false, vec![]),
        InputMode::Search => {
            tracing::debug!("exiting search mode");
            if let Some(table) = state.table_mut() {
                table.clear_search();
            }
            state.input_mode = InputMode::Normal;
            (true, vec![])
        }
        InputMode::Toolbar | InputMode::Form => {
            state.input_mode = InputMode::Normal;
            (true, vec![])
        }
        InputMode::Popover => {
            if let Some(table) = state.table_mut() {
                table.close_popover();
            }
            state.input_mode = state.popover_origin;
            (true, vec![])
        }
        InputMode::Sheet => {
            let closed = state.table_mut().is_some_and(|t| t.cancel_sheet());
            if closed {
                state.input_mode = InputMode::Normal;
            }
            (closed, vec![])
        }
        InputMode::ConfirmDelete => cancel_delete(state),
    }
}

fn confirm_delete(state: &mut AppState) -> (bool, Vec<Action>) {
    let message = state.table_mut().and_then(|t| t.confirm_delete());
    state.input_mode = InputMode::Normal;
    (true, message.map(Action::PostToWorker).into_iter().collect())
}

fn cancel_delete(state: &mut AppState) -> (bool, Vec<Action>) {
    if let Some(table) = state.table_mut() {
        table.cancel_delete();
    }
    state.input_mode = InputMode::Normal;
    (true, vec![])
}

fn submit(state: &mut AppState) -> (bool, Vec<Action>) {
    let result = match state.input_mode {
        InputMode::Sheet => state.table_mut().map(|t| t.submit_sheet()),
        InputMode::Form => state.form_mut().map(|f| f.submit()),
        _ => None,
    };
    match result {
        Some(Ok(message)) => (true, vec![Action::PostToWorker(message)]),
        Some(Err(rejected)) => {
            tracing::debug!(reason = %rejected, "submit ignored");
            (false, vec![])
        }
        None => (false, vec![]),
    }
}

/// Routes a submission result to the sheet or page form that issued it.
fn complete_submission(
    state: &mut AppState,
    route: Route,
    sheet: SheetKind,
    ticket: u64,
    result: std::result::Result<(), String>,
) -> Result<SubmitOutcome> {
    let outcome = match sheet {
        SheetKind::Page => state
            .screens
            .form_mut(route)
            .map(|f| f.complete(ticket, result)),
        SheetKind::Create | SheetKind::Edit => state
            .screens
            .table_mut(route)
            .map(|t| t.complete_submission(sheet, ticket, result)),
    };
    let outcome = outcome.ok_or_else(|| {
        ZenTaskError::Worker(format!("no {sheet:?} form on the {route} screen"))
    })?;

    let sheet_closed = state
        .screens
        .table(route)
        .map_or(true, |t| t.sheet().is_none());
    if route == state.route && state.input_mode == InputMode::Sheet && sheet_closed {
        state.input_mode = InputMode::Normal;
    }
    Ok(outcome)
}

fn success_message(route: Route, sheet: SheetKind) -> String {
    match sheet {
        SheetKind::Create => format!("{route}: record created"),
        SheetKind::Edit => format!("{route}: changes saved"),
        SheetKind::Page => format!("{route} updated"),
    }
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::RecordsLoaded { records } => {
            tracing::debug!(
                interventions = records.interventions.len(),
                clients = records.clients.len(),
                users = records.users.len(),
                "records loaded"
            );
            state.screens.load(records);
            Ok((true, vec![]))
        }
        WorkerResponse::FormSubmitted { route, sheet, ticket } => {
            let outcome = complete_submission(state, *route, *sheet, *ticket, Ok(()))?;
            if outcome == SubmitOutcome::Succeeded {
                state.toast = Some(Toast::success(success_message(*route, *sheet)));
            }
            Ok((true, vec![]))
        }
        WorkerResponse::SubmitFailed {
            route,
            sheet,
            ticket,
            message,
        } => {
            let outcome = complete_submission(state, *route, *sheet, *ticket, Err(message.clone()))?;
            if let SubmitOutcome::Failed(message) = outcome {
                state.toast = Some(Toast::error(message));
            }
            Ok((true, vec![]))
        }
        WorkerResponse::RecordDeleted { route, id, label } => {
            tracing::info!(screen = %route, record_id = %id, "record deleted");
            state.toast = Some(Toast::success(format!("Deleted {label}")));
            Ok((true, vec![]))
        }
        WorkerResponse::Error { message } => {
            tracing::error!(error = %message, "worker error");
            state.toast = Some(Toast::error(message.clone()));
            Ok((true, vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{fixtures, AuthContext};
    use crate::screens::PageSettings;
    use crate::ui::theme::Theme;
    use crate::worker::WorkerMessage;

    fn loaded_on(route: Route) -> AppState {
        let mut state = AppState::new(
            Theme::default(),
            AuthContext::default(),
            &PageSettings::default(),
            100,
        );
        state.screens.load(&fixtures::record_set());
        state.navigate(route);
        state
    }

    fn send(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event, Instant::now()).unwrap()
    }

    fn submitted_ticket(actions: &[Action]) -> (SheetKind, u64) {
        match actions {
            [Action::PostToWorker(WorkerMessage::SubmitForm { sheet, ticket, .. })] => (*sheet, *ticket),
            other => panic!("unexpected actions {other:?}"),
        }
    }

    #[test]
    fn search_schedules_debounce_timer_then_applies_on_timer() {
        let mut state = loaded_on(Route::Clients);
        let start = Instant::now();
        handle_event(&mut state, &Event::StartSearch, start).unwrap();
        assert_eq!(state.input_mode, InputMode::Search);

        let (_, actions) = handle_event(&mut state, &Event::Char('t'), start).unwrap();
        let [Action::ScheduleTimer(delay)] = actions.as_slice() else {
            panic!("expected a timer, got {actions:?}");
        };
        let before = state.table().unwrap().page_info().filtered;

        let (applied, _) = handle_event(&mut state, &Event::Timer, start + *delay + Duration::from_millis(1)).unwrap();
        assert!(applied);
        assert!(state.table().unwrap().page_info().filtered <= before);
    }

    #[test]
    fn escape_from_search_clears_query() {
        let mut state = loaded_on(Route::Clients);
        send(&mut state, Event::StartSearch);
        send(&mut state, Event::Char('z'));
        send(&mut state, Event::Escape);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.table().unwrap().search_query(), "");
    }

    #[test]
    fn create_sheet_round_trip_through_worker() {
        let mut state = loaded_on(Route::Activities);
        send(&mut state, Event::NewRecord);
        assert_eq!(state.input_mode, InputMode::Sheet);

        for c in "Collaudo".chars() {
            send(&mut state, Event::Char(c));
        }
        let (_, actions) = send(&mut state, Event::Submit);
        let (sheet, ticket) = submitted_ticket(&actions);
        assert_eq!(sheet, SheetKind::Create);

        let (_, again) = send(&mut state, Event::Submit);
        assert!(again.is_empty(), "second submit is refused while pending");

        send(
            &mut state,
            Event::WorkerResponse(WorkerResponse::FormSubmitted {
                route: Route::Activities,
                sheet,
                ticket,
            }),
        );
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.table().unwrap().sheet().is_none());
        assert!(state.toast.as_ref().is_some_and(|t| t.message.contains("created")));
    }

    #[test]
    fn failed_submission_keeps_sheet_open() {
        let mut state = loaded_on(Route::Activities);
        send(&mut state, Event::NewRecord);
        let (_, actions) = send(&mut state, Event::Submit);
        let (sheet, ticket) = submitted_ticket(&actions);

        send(
            &mut state,
            Event::WorkerResponse(WorkerResponse::SubmitFailed {
                route: Route::Activities,
                sheet,
                ticket,
                message: "name already exists".into(),
            }),
        );
        assert_eq!(state.input_mode, InputMode::Sheet);
        assert!(state.table().unwrap().sheet().is_some());
        assert_eq!(state.toast, Some(Toast::error("name already exists")));

        send(&mut state, Event::Escape);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.toast.is_none());
    }

    #[test]
    fn delete_asks_for_confirmation() {
        let mut state = loaded_on(Route::Clients);
        send(&mut state, Event::DeleteRecord);
        assert_eq!(state.input_mode, InputMode::ConfirmDelete);

        send(&mut state, Event::Char('n'));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.table().unwrap().pending_delete().is_none());

        send(&mut state, Event::DeleteRecord);
        let (_, actions) = send(&mut state, Event::Enter);
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::DeleteRecord { route: Route::Clients, .. })]
        ));
    }

    #[test]
    fn popover_returns_to_origin_mode() {
        let mut state = loaded_on(Route::Interventions);
        send(&mut state, Event::FocusToolbar);
        send(&mut state, Event::Right);
        send(&mut state, Event::Enter);
        assert_eq!(state.input_mode, InputMode::Popover);
        send(&mut state, Event::Escape);
        assert_eq!(state.input_mode, InputMode::Toolbar);

        send(&mut state, Event::Escape);
        send(&mut state, Event::OpenSort);
        send(&mut state, Event::Escape);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn page_form_submits_with_page_kind() {
        let mut state = loaded_on(Route::Account);
        send(&mut state, Event::Enter);
        assert_eq!(state.input_mode, InputMode::Form);

        let (_, actions) = send(&mut state, Event::Submit);
        let (sheet, ticket) = submitted_ticket(&actions);
        assert_eq!(sheet, SheetKind::Page);

        send(
            &mut state,
            Event::WorkerResponse(WorkerResponse::FormSubmitted {
                route: Route::Account,
                sheet,
                ticket,
            }),
        );
        assert_eq!(state.input_mode, InputMode::Form);
        assert_eq!(state.toast, Some(Toast::success("Account updated")));
    }

    #[test]
    fn reply_for_screen_without_form_is_an_error() {
        let mut state = loaded_on(Route::Dashboard);
        let event = Event::WorkerResponse(WorkerResponse::FormSubmitted {
            route: Route::Dashboard,
            sheet: SheetKind::Page,
            ticket: 1,
        });
        assert!(matches!(
            handle_event(&mut state, &event, Instant::now()),
            Err(ZenTaskError::Worker(_))
        ));
    }

    #[test]
    fn quit_closes_focus() {
        let mut state = loaded_on(Route::Dashboard);
        assert_eq!(send(&mut state, Event::CloseFocus), (false, vec![Action::CloseFocus]));
    }
}
