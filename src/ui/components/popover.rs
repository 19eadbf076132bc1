//! Floating checklist for facets, column visibility and sorting.
//!
//! ```text
//!  ┌ Status ──────────────────┐
//!  │ ⌕ cor▏                   │
//!  │ [x] ● In corso         2 │
//!  │ [ ] ✓ Completato       2 │
//!  │     Clear filter         │
//!  └──────────────────────────┘
//! ```

use crate::ui::helpers::{fit, position_cursor, render_frame, text_width};
use crate::screens::page::PopoverView;
use crate::ui::theme::Theme;

const POPOVER_WIDTH: usize = 40;

/// Draws the popover with its top-left corner at `(top, left)`, clipped at `bottom`.
pub fn render_popover(popover: &PopoverView, theme: &Theme, top: usize, left: usize, bottom: usize, cols: usize) {
    let width = POPOVER_WIDTH.min(cols.saturating_sub(left));
    let query_rows = usize::from(popover.query.is_some());
    let room = bottom.saturating_sub(top + 1 + query_rows);
    let visible = popover.items.len().max(1).min(room.max(1));
    let height = visible + query_rows + 2;

    let inner = render_frame(top, left, width, height, &theme.colors.panel_border, &popover.title);
    let content_width = inner.saturating_sub(2);
    let mut row = top + 1;

    if let Some(query) = &popover.query {
        position_cursor(row, left + 2);
        print!("{}{}{}", Theme::fg(&theme.colors.text_normal), fit(&format!("⌕ {query}▏"), content_width), Theme::reset());
        row += 1;
    }

    if popover.items.is_empty() {
        position_cursor(row, left + 2);
        print!("{}{}{}", Theme::fg(&theme.colors.text_dim), fit("No results found.", content_width), Theme::reset());
        return;
    }

    let first = popover.cursor.saturating_sub(visible.saturating_sub(1));
    for (index, item) in popover.items.iter().enumerate().skip(first).take(visible) {
        position_cursor(row, left + 1);
        let selected = index == popover.cursor;
        if selected {
            print!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }

        let check = if item.checked { "[x]" } else { "[ ]" };
        let icon = item.icon.as_deref().map(|i| format!("{i} ")).unwrap_or_default();
        let detail = item.detail.clone().unwrap_or_default();
        let label_width = content_width.saturating_sub(text_width(&detail) + 1);
        print!(" {}", fit(&format!("{check} {icon}{}", item.label), label_width));
        print!(" {detail} ");
        print!("{}", Theme::reset());
        row += 1;
    }
}
