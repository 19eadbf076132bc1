//! Composable UI component renderers.
//!
//! Every component prints ANSI-styled text at explicit cursor positions and
//! returns the next free row, so layouts read top to bottom.
//!
//! # Components
//!
//! - [`header`]: Title bar with breadcrumbs, screen tabs and page heading
//! - [`toolbar`]: Search box and filter chips
//! - [`table`]: Column headers and rows
//! - [`cards`]: Narrow-viewport record cards
//! - [`empty`]: Empty state and loading skeleton
//! - [`pagination`]: Row counts and page controls
//! - [`popover`]: Facet, column and sort checklists
//! - [`sheet`]: Side sheet and form fields
//! - [`dialog`]: Delete confirmation
//! - [`dashboard`]: Landing tiles
//! - [`form`]: Account and Settings pages
//! - [`footer`]: Keybinding hints and toasts
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Tabs]
//! [Border]
//! [Body: table screen, form page or dashboard]
//! [Border]
//! [Footer]
//! ```
//!
//! Overlays (popover, sheet, dialog) are drawn last, over the body.

mod cards;
mod dashboard;
mod dialog;
mod empty;
mod footer;
mod form;
mod header;
mod pagination;
mod popover;
mod sheet;
mod table;
mod toolbar;

use crate::ui::grid::GridView;
use crate::ui::helpers::{clear_span, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyView, DashboardView, FormScreenView, TableScreenView, UIViewModel};

/// First body row, below header, tabs and border.
const BODY_TOP: usize = 4;

/// Renders a horizontal border line at the specified row.
///
/// Returns the next available row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole screen for `vm`.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 1;
    current_row = header::render_header(current_row, &vm.header, theme, cols);
    current_row = header::render_nav(current_row, &vm.nav, theme, cols);
    render_border(current_row, &theme.colors.border, cols);

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);
    let body_bottom = border_row.saturating_sub(1);

    for row in BODY_TOP..=body_bottom {
        clear_span(row, 1, cols);
    }

    match &vm.body {
        BodyView::Table(view) => render_table_screen(view, theme, cols, body_bottom),
        BodyView::Form(view) => render_form_page(view, theme, cols, body_bottom),
        BodyView::Dashboard(view) => render_dashboard_page(view, theme, cols),
    }

    render_border(border_row, &theme.colors.border, cols);
    footer::render_footer(footer_start, &vm.footer, theme, cols);

    if let BodyView::Table(view) = &vm.body {
        if let Some(dialog) = &view.confirm {
            dialog::render_confirm(dialog, theme, rows, cols);
        }
    }
}

/// Heading, toolbar, grid and pagination, then any open overlay.
fn render_table_screen(view: &TableScreenView, theme: &Theme, cols: usize, body_bottom: usize) {
    let mut current_row = header::render_page_title(
        BODY_TOP,
        &view.title,
        &view.description,
        Some(&view.new_label),
        theme,
        cols,
    );
    current_row = toolbar::render_toolbar(current_row, view, theme, cols);
    let grid_top = current_row;
    let grid_bottom = body_bottom.saturating_sub(1);

    match &view.grid {
        GridView::Loading { rows, columns } => {
            empty::render_skeleton(grid_top, *rows, *columns, theme, cols);
        }
        GridView::Empty(state) => {
            empty::render_empty_state(grid_top, state, theme, cols);
        }
        GridView::Table(table) => {
            table::render_table(grid_top, table, theme, cols, grid_bottom);
        }
        GridView::Cards(cards) => {
            cards::render_cards(grid_top, cards, theme, cols, grid_bottom);
        }
    }

    if !view.grid.is_loading() {
        pagination::render_pagination(body_bottom, &view.page, theme, cols);
    }

    if let Some(popover) = &view.popover {
        popover::render_popover(popover, theme, grid_top.saturating_sub(1), 3, body_bottom, cols);
    }
    if let Some(panel) = &view.sheet {
        sheet::render_sheet(panel, theme, BODY_TOP, body_bottom, cols);
    }
}

fn render_form_page(view: &FormScreenView, theme: &Theme, cols: usize, body_bottom: usize) {
    let current_row = header::render_page_title(BODY_TOP, &view.title, &view.description, None, theme, cols);
    form::render_form_screen(current_row + 1, view, theme, cols, body_bottom);
}

fn render_dashboard_page(view: &DashboardView, theme: &Theme, cols: usize) {
    let current_row = header::render_page_title(
        BODY_TOP,
        "Dashboard",
        "Overview of interventions and clients",
        None,
        theme,
        cols,
    );
    dashboard::render_dashboard(current_row + 1, view, theme, cols);
}
