//! Full-page forms (Account, Settings) and the restricted notice.

use super::sheet::{render_buttons, render_fields};
use crate::ui::helpers::{fit, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FormScreenView;

const FORM_MAX_WIDTH: usize = 64;

pub fn render_form_screen(row: usize, view: &FormScreenView, theme: &Theme, cols: usize, last_row: usize) -> usize {
    let width = FORM_MAX_WIDTH.min(cols.saturating_sub(4));
    let mut current_row = row;

    if let Some(notice) = &view.restricted {
        position_cursor(current_row + 1, 3);
        print!("{}{}⚠ {}{}", Theme::bold(), Theme::fg(&theme.colors.danger), notice.title, Theme::reset());
        position_cursor(current_row + 2, 3);
        print!("{}{}{}", Theme::fg(&theme.colors.text_dim), truncate(notice.message, cols.saturating_sub(4)), Theme::reset());
        return current_row + 3;
    }

    for section in &view.sections {
        if current_row + 4 > last_row {
            break;
        }
        position_cursor(current_row, 3);
        let title_color = if section.focused && view.editing {
            &theme.colors.accent
        } else {
            &theme.colors.text_normal
        };
        print!("{}{}{}{}", Theme::bold(), Theme::fg(title_color), fit(&section.title, width), Theme::reset());
        current_row += 1;
        if let Some(description) = &section.description {
            position_cursor(current_row, 3);
            print!("{}{}{}", Theme::fg(&theme.colors.text_dim), fit(description, width), Theme::reset());
            current_row += 1;
        }

        current_row = render_fields(current_row, 5, width.saturating_sub(2), &section.fields, theme, last_row.saturating_sub(2));

        if let Some(error) = &section.error {
            position_cursor(current_row, 5);
            print!("{}✕ {}{}", Theme::fg(&theme.colors.danger), truncate(error, width), Theme::reset());
            current_row += 1;
        }
        if section.focused && view.editing {
            render_buttons(current_row, 5, "Stop editing", &section.submit_label, section.pending, theme);
        } else {
            position_cursor(current_row, 5);
            print!("{}[ {} ]{}", Theme::fg(&theme.colors.text_dim), section.submit_label, Theme::reset());
        }
        current_row += 2;
    }
    current_row
}
