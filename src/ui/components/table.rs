//! Table component renderer.
//!
//! Header row with sort arrows, then one line per visible record. Urgent rows
//! get a marker in the gutter.

use crate::table::SortDirection;
use crate::ui::grid::{HeaderCell, RowView, TableView};
use crate::ui::helpers::{fit, position_cursor, render_cell};
use crate::ui::theme::Theme;

const GUTTER: usize = 2;
const GAP: usize = 2;

pub fn render_table(row: usize, table: &TableView, theme: &Theme, cols: usize, last_row: usize) -> usize {
    let widths = column_widths(&table.headers, cols);
    let mut current_row = render_table_headers(row, &table.headers, &widths, theme, cols);
    for item in &table.rows {
        if current_row > last_row {
            break;
        }
        current_row = render_table_row(current_row, item, &widths, theme, cols);
    }
    current_row
}

/// Column widths clipped to the viewport; trailing columns may get zero.
fn column_widths(headers: &[HeaderCell], cols: usize) -> Vec<usize> {
    let mut left = cols.saturating_sub(GUTTER);
    headers
        .iter()
        .map(|h| {
            let width = h.width.min(left);
            left = left.saturating_sub(width + GAP);
            width
        })
        .collect()
}

fn render_table_headers(
    row: usize,
    headers: &[HeaderCell],
    widths: &[usize],
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", " ".repeat(GUTTER));
    let mut used = GUTTER;
    for (header, width) in headers.iter().zip(widths) {
        if *width == 0 {
            continue;
        }
        let arrow = match header.sort {
            Some(SortDirection::Ascending) => " ↑",
            Some(SortDirection::Descending) => " ↓",
            None => "",
        };
        print!("{}", fit(&format!("{}{arrow}", header.label.to_uppercase()), *width));
        print!("{}", " ".repeat(GAP));
        used += width + GAP;
    }
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());
    row + 1
}

fn render_table_row(row: usize, item: &RowView, widths: &[usize], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    if item.flagged {
        if !item.selected {
            print!("{}", Theme::fg(&theme.colors.danger));
        }
        print!("! ");
        if !item.selected {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
    } else {
        print!("{}", " ".repeat(GUTTER));
    }

    let mut used = GUTTER;
    for (i, cell) in item.cells.iter().enumerate() {
        let width = widths.get(i).copied().unwrap_or(0);
        if width == 0 {
            continue;
        }
        let ranges = item.highlights.get(i).map_or(&[][..], Vec::as_slice);
        render_cell(cell, ranges, width, theme, item.selected);
        print!("{}", " ".repeat(GAP));
        used += width + GAP;
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(width: usize) -> HeaderCell {
        HeaderCell {
            label: "X".into(),
            width,
            sort: None,
        }
    }

    #[test]
    fn widths_shrink_to_viewport() {
        let headers = [header(10), header(10), header(10)];
        assert_eq!(column_widths(&headers, 40), vec![10, 10, 10]);
        assert_eq!(column_widths(&headers, 20), vec![10, 6, 0]);
    }
}
