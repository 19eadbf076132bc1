//! Pagination bar: row counts on the left, page controls on the right.

use crate::screens::PageInfo;
use crate::ui::helpers::{position_cursor, spread};
use crate::ui::theme::Theme;

pub fn render_pagination(row: usize, page: &PageInfo, theme: &Theme, cols: usize) -> usize {
    let previous = if page.can_previous { "‹ h" } else { "   " };
    let next = if page.can_next { "l ›" } else { "   " };
    let left = format!(" {}", page.rows_label());
    let right = format!("{previous}  {}  {next} ", page.page_label());

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", spread(&left, &right, cols));
    print!("{}", Theme::reset());
    row + 1
}
