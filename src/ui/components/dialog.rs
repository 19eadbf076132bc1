//! Centered delete confirmation.

use crate::ui::helpers::{fit, position_cursor, render_frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ConfirmDialog;

const DIALOG_WIDTH: usize = 52;

pub fn render_confirm(dialog: &ConfirmDialog, theme: &Theme, rows: usize, cols: usize) {
    let width = DIALOG_WIDTH.min(cols);
    let height = 6 + usize::from(dialog.detail.is_some());
    let top = (rows.saturating_sub(height) / 2).max(1);
    let left = cols.saturating_sub(width) / 2 + 1;

    let inner = render_frame(top, left, width, height, &theme.colors.danger, &dialog.title);
    let content_width = inner.saturating_sub(2);
    let mut row = top + 2;

    position_cursor(row, left + 2);
    print!("{}{}{}", Theme::fg(&theme.colors.text_normal), fit(&dialog.message, content_width), Theme::reset());
    row += 1;
    if let Some(detail) = &dialog.detail {
        position_cursor(row, left + 2);
        print!("{}{}{}", Theme::fg(&theme.colors.text_dim), fit(detail, content_width), Theme::reset());
        row += 1;
    }

    position_cursor(row + 1, left + 2);
    print!("{}[ Cancel (n) ]{}  ", Theme::fg(&theme.colors.text_dim), Theme::reset());
    print!(
        "{}{}{}[ Delete (y) ]{}",
        Theme::bold(),
        Theme::fg(&theme.colors.selection_fg),
        Theme::bg(&theme.colors.danger),
        Theme::reset()
    );
}
