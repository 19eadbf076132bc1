//! Empty state and loading skeleton.

use crate::ui::grid::EmptyState;
use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;

const SKELETON_WIDTHS: [usize; 4] = [12, 20, 16, 10];

fn centered(row: usize, text: &str, cols: usize) {
    let text = truncate(text, cols);
    let len = text_width(&text);
    let padding = (cols.saturating_sub(len)) / 2;
    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
}

/// Icon, title and description centered a few rows below `row`.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row + 2;

    if let Some(icon) = &empty.icon {
        print!("{}", Theme::fg(&theme.colors.empty_state_fg));
        centered(current_row, icon, cols);
        print!("{}", Theme::reset());
        current_row += 1;
    }

    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.empty_state_fg));
    centered(current_row, &empty.title, cols);
    print!("{}", Theme::reset());
    current_row += 1;

    if let Some(description) = &empty.description {
        print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
        centered(current_row, description, cols);
        print!("{}", Theme::reset());
        current_row += 1;
    }
    current_row
}

/// Placeholder bars, one line per skeleton row.
pub fn render_skeleton(row: usize, rows: usize, columns: usize, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for line in 0..rows {
        position_cursor(current_row, 3);
        let mut used = 2;
        for column in 0..columns.max(1) {
            let width = SKELETON_WIDTHS[(column + line) % SKELETON_WIDTHS.len()];
            if used + width + 2 > cols {
                break;
            }
            print!("{}{}{}  ", Theme::bg(&theme.colors.skeleton), " ".repeat(width), Theme::reset());
            used += width + 2;
        }
        current_row += 1;
    }
    current_row
}
