//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for everything transient: the
//! current route, the input mode, the theme and the toast line. Per-screen
//! state (filters, selection, open sheets) lives in [`Screens`]; the app
//! state only decides which screen receives input.
//!
//! # Example
//!
//! ```rust
//! use zentask::app::AppState;
//! use zentask::domain::AuthContext;
//! use zentask::screens::{PageSettings, Route};
//! use zentask::ui::theme::Theme;
//!
//! let mut state = AppState::new(Theme::default(), AuthContext::default(), &PageSettings::default(), 100);
//! state.navigate(Route::Clients);
//! let viewmodel = state.compute_viewmodel(24, 120);
//! assert_eq!(viewmodel.header.crumbs, ["Home", "Clients"]);
//! ```

use super::modes::InputMode;
use crate::domain::AuthContext;
use crate::screens::page::SheetView;
use crate::screens::{breadcrumbs, FormScreen, PageSettings, Route, Screens, TableScreen};
use crate::sheet::{format_file_size, FieldKind, FormSession};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BodyView, ConfirmDialog, DashboardView, FieldControl, FieldView, FooterInfo, FormScreenView,
    HeaderInfo, NavItem, RecentItem, SectionView, SheetPanel, TableScreenView, Toast, UIViewModel,
};
use std::time::Instant;

const APP_TITLE: &str = "ZenTask";

/// Rows taken by header, tabs, separators and footer.
const CHROME_ROWS: usize = 6;

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Screen receiving input.
    pub route: Route,

    /// Current input handling mode.
    ///
    /// Every overlay has its own mode, so an open sheet or popover always
    /// implies the matching mode.
    pub input_mode: InputMode,

    /// Color scheme for UI rendering, swapped by the theme toggle.
    pub theme: Theme,

    pub screens: Screens,

    /// Signed-in user, resolved once from configuration.
    pub auth: AuthContext,

    /// Viewport width, in columns, below which tables render as cards.
    pub card_breakpoint: usize,

    /// Outcome of the last submission or deletion, cleared on the next key.
    pub toast: Option<Toast>,

    /// Mode to return to when the open popover closes.
    pub popover_origin: InputMode,
}

impl AppState {
    #[must_use]
    pub fn new(
        theme: Theme,
        auth: AuthContext,
        page_settings: &PageSettings,
        card_breakpoint: usize,
    ) -> Self {
        let screens = Screens::new(page_settings, &auth);
        Self {
            route: Route::default(),
            input_mode: InputMode::Normal,
            theme,
            screens,
            auth,
            card_breakpoint,
            toast: None,
            popover_origin: InputMode::Normal,
        }
    }

    /// Switches screens.
    ///
    /// Returns `false` when `route` is already current.
    pub fn navigate(&mut self, route: Route) -> bool {
        if self.route == route {
            return false;
        }
        tracing::debug!(from = %self.route, to = %route, "navigating");
        self.route = route;
        self.input_mode = InputMode::Normal;
        true
    }

    /// Table screen of the current route.
    #[must_use]
    pub fn table(&self) -> Option<&(dyn TableScreen + 'static)> {
        self.screens.table(self.route)
    }

    pub fn table_mut(&mut self) -> Option<&mut (dyn TableScreen + 'static)> {
        self.screens.table_mut(self.route)
    }

    /// Form screen of the current route.
    #[must_use]
    pub fn form(&self) -> Option<&FormScreen> {
        self.screens.form(self.route)
    }

    pub fn form_mut(&mut self) -> Option<&mut FormScreen> {
        self.screens.form_mut(self.route)
    }

    /// Form receiving typed characters: the open sheet or the focused section.
    pub fn focused_session_mut(&mut self) -> Option<&mut FormSession> {
        match self.input_mode {
            InputMode::Sheet => self.table_mut()?.sheet_session_mut(),
            InputMode::Form => self.form_mut()?.session_mut(),
            _ => None,
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        tracing::debug!(theme = %self.theme.name, "theme toggled");
    }

    /// First column of the open sheet panel, one-based.
    ///
    /// Clicks left of it dismiss the sheet.
    #[must_use]
    pub fn sheet_left_edge(&self, cols: usize) -> Option<usize> {
        let sheet = self.table()?.sheet()?;
        Some(cols.saturating_sub(sheet.size.width(cols)) + 1)
    }

    /// Transforms state into a renderable view model.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body = if let Some(table) = self.table() {
            BodyView::Table(Box::new(self.compute_table(table, cols, Instant::now())))
        } else if let Some(form) = self.form() {
            BodyView::Form(self.compute_form(form))
        } else {
            BodyView::Dashboard(self.compute_dashboard(rows))
        };

        UIViewModel {
            header: self.compute_header(),
            nav: self.compute_nav(),
            body,
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: APP_TITLE.to_string(),
            crumbs: breadcrumbs(self.route.path())
                .into_iter()
                .map(|c| c.label)
                .collect(),
            user: format!("{} · {}", self.auth.display_name, self.auth.role.label()),
        }
    }

    fn compute_nav(&self) -> Vec<NavItem> {
        Route::ALL
            .iter()
            .zip('1'..='8')
            .map(|(route, key)| NavItem {
                key,
                label: route.title(),
                active: *route == self.route,
            })
            .collect()
    }

    fn compute_table(&self, table: &dyn TableScreen, cols: usize, now: Instant) -> TableScreenView {
        let meta = table.meta();
        let confirm = table.pending_delete().map(|pending| ConfirmDialog {
            title: format!("Delete {}?", pending.label),
            message: "This action cannot be undone.".to_string(),
            detail: pending.detail.clone(),
        });

        TableScreenView {
            title: meta.title.to_string(),
            description: meta.description.to_string(),
            new_label: meta.new_label.to_string(),
            toolbar: table.toolbar(),
            search_focused: self.input_mode == InputMode::Search,
            toolbar_focused: self.input_mode == InputMode::Toolbar,
            search_pending: table.search_remaining(now).is_some(),
            grid: table.grid(cols, self.card_breakpoint),
            page: table.page_info(),
            popover: table.popover(),
            sheet: table.sheet().map(|sheet| sheet_panel(&sheet, cols)),
            confirm,
        }
    }

    fn compute_form(&self, form: &FormScreen) -> FormScreenView {
        let editing = self.input_mode == InputMode::Form;
        let sections = form
            .sections()
            .iter()
            .enumerate()
            .map(|(index, session)| {
                let focused = index == form.focus();
                let spec = session.spec();
                SectionView {
                    title: spec.title.clone(),
                    description: spec.description.clone(),
                    fields: field_views(session, editing && focused),
                    submit_label: form.submit_label(index).to_string(),
                    error: session.last_error().map(str::to_string),
                    focused,
                    pending: session.is_pending(),
                }
            })
            .collect();

        FormScreenView {
            title: form.title().to_string(),
            description: form.description().to_string(),
            restricted: form.restricted().copied(),
            sections,
            editing,
        }
    }

    fn compute_dashboard(&self, rows: usize) -> DashboardView {
        let dashboard = self.screens.dashboard();
        let room = rows.saturating_sub(CHROME_ROWS + 6);
        DashboardView {
            tiles: dashboard.stats().map(|s| s.tiles().to_vec()),
            recent: dashboard
                .recent()
                .iter()
                .take(room)
                .map(|i| RecentItem {
                    code: i.code.clone(),
                    description: i.description.clone(),
                    client: i.client.clone(),
                    status: i.status.clone(),
                    urgent: i.urgent,
                })
                .collect(),
        }
    }

    /// Keybinding hints for the current mode and screen.
    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search => "Type to search  Enter: apply  Esc: clear",
            InputMode::Toolbar => "←/→: move  Enter: open/toggle  Esc: back",
            InputMode::Popover => "Type to filter  ↑/↓: move  Enter: select  Space: add sort  Esc: close",
            InputMode::Sheet => {
                "Tab: next field  ←/→: choose  Enter: attach/next  Ctrl+s: submit  Esc: cancel"
            }
            InputMode::Form => {
                "Tab: next field  PgDn: next section  Ctrl+s: save  Esc: stop editing"
            }
            InputMode::ConfirmDelete => "y/Enter: delete  n/Esc: keep",
            InputMode::Normal if self.table().is_some() => {
                "j/k: rows  h/l: pages  /: search  f: filters  c: columns  o: sort  r: reset  n: new  e: edit  d: delete  q: quit"
            }
            InputMode::Normal if self.form().is_some_and(|f| f.restricted().is_none()) => {
                "Enter: edit  Tab/1-8: screens  t: theme  q: quit"
            }
            InputMode::Normal => "Tab/1-8: screens  t: theme  q: quit",
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
            toast: self.toast.clone(),
        }
    }
}

fn sheet_panel(sheet: &SheetView<'_>, cols: usize) -> SheetPanel {
    SheetPanel {
        title: sheet.title.to_string(),
        description: sheet.description.map(str::to_string),
        width: sheet.size.width(cols),
        fields: field_views(sheet.session, true),
        error: sheet.session.last_error().map(str::to_string),
        submit_label: sheet.submit_label.to_string(),
        cancel_label: sheet.cancel_label.to_string(),
        pending: sheet.session.is_pending(),
    }
}

fn field_views(session: &FormSession, active: bool) -> Vec<FieldView> {
    session
        .fields()
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let spec = field.spec();
            let (control, hint) = match &spec.kind {
                FieldKind::Select(_) => (FieldControl::Select, None),
                FieldKind::Upload(policy) => (FieldControl::Upload, Some(policy.hint())),
                _ => (FieldControl::Input, None),
            };
            FieldView {
                label: spec.display_label(),
                value: field.display(),
                placeholder: spec.placeholder.clone(),
                control,
                focused: active && index == session.focus(),
                hint,
                files: field
                    .uploads()
                    .files()
                    .iter()
                    .map(|f| format!("{} ({})", f.name, format_file_size(f.size)))
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{fixtures, Role};

    fn loaded() -> AppState {
        let mut state = AppState::new(
            Theme::default(),
            AuthContext::default(),
            &PageSettings::default(),
            100,
        );
        state.screens.load(&fixtures::record_set());
        state
    }

    #[test]
    fn dashboard_is_the_landing_screen() {
        let state = loaded();
        let vm = state.compute_viewmodel(30, 120);
        assert_eq!(vm.header.crumbs, ["Home"]);
        assert!(vm.nav[0].active);
        let BodyView::Dashboard(dashboard) = vm.body else {
            panic!("expected dashboard");
        };
        assert_eq!(dashboard.tiles.unwrap()[0], ("Interventions", 5));
        assert!(!dashboard.recent.is_empty());
    }

    #[test]
    fn navigation_resets_mode() {
        let mut state = loaded();
        state.input_mode = InputMode::Toolbar;
        assert!(state.navigate(Route::Users));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(!state.navigate(Route::Users));
    }

    #[test]
    fn table_view_carries_sheet_panel() {
        let mut state = loaded();
        state.navigate(Route::Activities);
        state.table_mut().unwrap().open_create();
        state.input_mode = InputMode::Sheet;

        let vm = state.compute_viewmodel(30, 120);
        let BodyView::Table(table) = vm.body else {
            panic!("expected table");
        };
        let sheet = table.sheet.unwrap();
        assert!(sheet.fields[0].focused);
        assert!(!sheet.pending);
        assert_eq!(state.sheet_left_edge(120), Some(120 - sheet.width + 1));
    }

    #[test]
    fn restricted_settings_for_operators() {
        let mut state = AppState::new(
            Theme::default(),
            AuthContext::new(Role::Operator, "Luigi Verdi"),
            &PageSettings::default(),
            100,
        );
        state.navigate(Route::Settings);
        let vm = state.compute_viewmodel(30, 120);
        let BodyView::Form(form) = vm.body else {
            panic!("expected form");
        };
        assert!(form.restricted.is_some());
        assert_eq!(vm.footer.keybindings, "Tab/1-8: screens  t: theme  q: quit");
    }
}
