//! Toolbar: global search box followed by filter chips.
//!
//! ```text
//!  ┌────────────────────────────┐
//!  │ Search: rossi…             │  [+ Status] [Client: Rossi] [Reset ✕]
//!  └────────────────────────────┘
//! ```

use crate::screens::page::ToolbarItem;
use crate::ui::helpers::{fit, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TableScreenView;

const SEARCH_BOX_MARGIN: usize = 1;
const SEARCH_BOX_MAX: usize = 36;

pub fn render_toolbar(row: usize, view: &TableScreenView, theme: &Theme, cols: usize) -> usize {
    let box_width = SEARCH_BOX_MAX.min(cols / 2).max(12);
    let inner_width = box_width.saturating_sub(2);
    let border = if view.search_focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}┌{}┐{}", Theme::fg(border), "─".repeat(inner_width), Theme::reset());

    let cursor = if view.search_focused { "▏" } else { "" };
    let pending = if view.search_pending { "…" } else { "" };
    let search_text = if view.toolbar.query.is_empty() && !view.search_focused {
        " Search… (/)".to_string()
    } else {
        format!(" Search: {}{cursor}{pending}", view.toolbar.query)
    };

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}│", Theme::fg(border));
    if view.toolbar.query.is_empty() && !view.search_focused {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!("{}", fit(&search_text, inner_width));
    print!("{}│{}", Theme::fg(border), Theme::reset());

    render_chips(row + 1, SEARCH_BOX_MARGIN + box_width + 2, view, theme, cols);

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}└{}┘{}", Theme::fg(border), "─".repeat(inner_width), Theme::reset());

    row + 3
}

fn render_chips(row: usize, col: usize, view: &TableScreenView, theme: &Theme, cols: usize) {
    position_cursor(row, col);
    let mut used = col;
    for (index, item) in view.toolbar.items.iter().enumerate() {
        let chip = format!("[{}]", item.label());
        let width = text_width(&chip) + 1;
        if used + width > cols {
            print!("{}…{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
            break;
        }

        let focused = view.toolbar_focused && index == view.toolbar.focus;
        if focused {
            print!(
                "{}{}",
                Theme::fg(&theme.colors.selection_fg),
                Theme::bg(&theme.colors.selection_bg)
            );
        } else {
            let color = match item {
                ToolbarItem::Reset => &theme.colors.danger,
                ToolbarItem::Facet { selected, .. } if !selected.is_empty() => &theme.colors.accent,
                ToolbarItem::Toggle { on: true, .. } => &theme.colors.accent,
                _ => &theme.colors.text_dim,
            };
            print!("{}", Theme::fg(color));
        }
        print!("{chip}{} ", Theme::reset());
        used += width;
    }
}
