//! Side sheet and the form fields it shares with full-page forms.
//!
//! The sheet is drawn over the right edge of the body:
//!
//! ```text
//!                    ┌ New Client ─────────────────┐
//!                    │ Add a new client            │
//!                    │                             │
//!                    │ Type *                      │
//!                    │ ‹ Company ›                 │
//!                    │ Name *                      │
//!                    │ › Tecnoservice▏             │
//!                    │                             │
//!                    │ [ Cancel ]  [ Add Client ]  │
//!                    └─────────────────────────────┘
//! ```

use crate::ui::helpers::{fit, position_cursor, render_frame, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FieldControl, FieldView, SheetPanel};

/// Draws the sheet between `top` and `bottom` (inclusive).
pub fn render_sheet(panel: &SheetPanel, theme: &Theme, top: usize, bottom: usize, cols: usize) {
    let width = panel.width.min(cols);
    let left = cols.saturating_sub(width) + 1;
    let height = bottom.saturating_sub(top) + 1;
    let inner = render_frame(top, left, width, height, &theme.colors.panel_border, &panel.title);
    let content_left = left + 2;
    let content_width = inner.saturating_sub(2);
    let buttons_row = bottom.saturating_sub(1);

    let mut row = top + 1;
    if let Some(description) = &panel.description {
        position_cursor(row, content_left);
        print!("{}{}{}", Theme::fg(&theme.colors.text_dim), fit(description, content_width), Theme::reset());
        row += 1;
    }
    row += 1;

    let last_field_row = buttons_row.saturating_sub(2);
    row = render_fields(row, content_left, content_width, &panel.fields, theme, last_field_row);

    if let Some(error) = &panel.error {
        let error_row = row.min(buttons_row.saturating_sub(1));
        position_cursor(error_row, content_left);
        print!("{}✕ {}{}", Theme::fg(&theme.colors.danger), truncate(error, content_width.saturating_sub(2)), Theme::reset());
    }

    render_buttons(
        buttons_row,
        content_left,
        &panel.cancel_label,
        &panel.submit_label,
        panel.pending,
        theme,
    );
}

/// Cancel and submit buttons; submit is dimmed while pending.
pub fn render_buttons(row: usize, col: usize, cancel: &str, submit: &str, pending: bool, theme: &Theme) {
    position_cursor(row, col);
    print!("{}[ {cancel} (Esc) ]{}  ", Theme::fg(&theme.colors.text_dim), Theme::reset());
    if pending {
        print!("{}{}[ {submit} ]", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    } else {
        print!(
            "{}{}{}[ {submit} (Ctrl+s) ]",
            Theme::bold(),
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.accent)
        );
    }
    print!("{}", Theme::reset());
}

/// Label, value and extras of each field, stopping before `last_row`.
pub fn render_fields(
    row: usize,
    col: usize,
    width: usize,
    fields: &[FieldView],
    theme: &Theme,
    last_row: usize,
) -> usize {
    let mut current_row = row;
    for field in fields {
        let needed = 2 + field.files.len() + usize::from(field.hint.is_some());
        if current_row + needed > last_row + 1 {
            position_cursor(current_row.min(last_row), col);
            print!("{}…{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
            return last_row + 1;
        }
        current_row = render_field(current_row, col, width, field, theme);
    }
    current_row
}

fn render_field(row: usize, col: usize, width: usize, field: &FieldView, theme: &Theme) -> usize {
    let mut current_row = row;

    position_cursor(current_row, col);
    let label_color = if field.focused {
        &theme.colors.accent
    } else {
        &theme.colors.text_normal
    };
    print!("{}{}{}", Theme::fg(label_color), fit(&field.label, width), Theme::reset());
    current_row += 1;

    position_cursor(current_row, col);
    let cursor = if field.focused { "▏" } else { "" };
    let (text, dim) = match field.control {
        FieldControl::Select if field.value.is_empty() => ("‹ Select… ›".to_string(), true),
        FieldControl::Select => (format!("‹ {} ›", field.value), false),
        FieldControl::Upload if field.value.is_empty() && !field.focused => {
            ("Type a path, Enter to attach".to_string(), true)
        }
        FieldControl::Input | FieldControl::Upload => match &field.placeholder {
            Some(placeholder) if field.value.is_empty() && !field.focused => {
                (format!("› {placeholder}"), true)
            }
            _ => (format!("› {}{cursor}", field.value), false),
        },
    };
    if field.focused {
        print!("{}", Theme::bg(&theme.colors.badge_bg));
    }
    let color = if dim {
        &theme.colors.text_dim
    } else {
        &theme.colors.text_normal
    };
    print!("{}{}{}", Theme::fg(color), fit(&text, width), Theme::reset());
    current_row += 1;

    for file in &field.files {
        position_cursor(current_row, col);
        print!("{}  📎 {}{}", Theme::fg(&theme.colors.text_normal), truncate(file, width.saturating_sub(5)), Theme::reset());
        current_row += 1;
    }
    if let Some(hint) = &field.hint {
        position_cursor(current_row, col);
        print!("{}{}{}", Theme::fg(&theme.colors.text_dim), fit(hint, width), Theme::reset());
        current_row += 1;
    }
    current_row
}
