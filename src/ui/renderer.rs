//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute the [`UIViewModel`] from [`AppState`],
//! then hand it to the component layout.
//!
//! # Example
//!
//! ```rust,ignore
//! use zentask::ui::render;
//!
//! render(&state, 24, 120); // Render to stdout
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the complete UI for the current state.
///
/// # Parameters
///
/// * `state` - Current application state
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    components::render_layout(vm, theme, cols, rows);
}
