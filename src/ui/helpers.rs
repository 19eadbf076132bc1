//! Shared rendering utilities.
//!
//! Cursor placement, width-aware truncation and the styled cell printer used
//! by table rows, cards and the dashboard. Text is measured in terminal
//! columns; highlight ranges are character indices.
//!
//! # Example
//!
//! ```rust
//! use zentask::ui::helpers::fit;
//!
//! assert_eq!(fit("Tecnoservice S.r.l.", 8), "Tecnose…");
//! assert_eq!(fit("Ok", 4), "Ok  ");
//! ```

use crate::table::{Cell, CellStyle};
use crate::ui::theme::Theme;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Terminal columns taken by `text`.
#[must_use]
pub fn text_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Cuts `text` to at most `width` columns, ending in `…` when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// [`truncate`], then pads with spaces to exactly `width` columns.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let mut out = truncate(text, width);
    let used = text_width(&out);
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Left text and right text on one line of `width` columns.
///
/// The right side wins when both do not fit.
#[must_use]
pub fn spread(left: &str, right: &str, width: usize) -> String {
    let right = truncate(right, width);
    let room = width.saturating_sub(text_width(&right));
    format!("{}{right}", fit(left, room))
}

/// Blanks `width` columns starting at `(row, col)`.
pub fn clear_span(row: usize, col: usize, width: usize) {
    position_cursor(row, col);
    print!("{}{}", Theme::reset(), " ".repeat(width));
}

/// Prints text with highlighted character ranges.
///
/// Selected rows skip highlighting so the selection colors stay readable.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }
        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        let restore = Theme::fg(&theme.colors.text_normal);
        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}{restore}", Theme::reset());

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Prints one cell padded to `width` columns, styled by its [`CellStyle`].
///
/// Leaves the row's base colors active afterwards.
pub fn render_cell(cell: &Cell, ranges: &[(usize, usize)], width: usize, theme: &Theme, selected: bool) {
    let base = if selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    match &cell.style {
        CellStyle::Plain | CellStyle::Mono => {
            let text = truncate(&cell.text, width);
            let visible = text.chars().count();
            let clipped: Vec<(usize, usize)> = ranges
                .iter()
                .filter(|(start, _)| *start < visible)
                .map(|&(start, end)| (start, end.min(visible)))
                .collect();
            if cell.style == CellStyle::Mono && !selected {
                print!("{}", Theme::bold());
            }
            render_highlighted_text(&text, &clipped, theme, selected);
            print!("{}{base}", Theme::reset());
            print!("{}", " ".repeat(width.saturating_sub(text_width(&text))));
        }
        CellStyle::Dim => {
            if !selected {
                print!("{}", Theme::fg(&theme.colors.text_dim));
            }
            print!("{}", fit(&cell.text, width));
            print!("{base}");
        }
        CellStyle::Danger => {
            if !selected {
                print!("{}", Theme::fg(&theme.colors.danger));
            }
            print!("{}{}", Theme::bold(), fit(&cell.text, width));
            print!("{}{base}", Theme::reset());
        }
        CellStyle::Badge => {
            let label = truncate(&cell.text, width.saturating_sub(2));
            if !selected {
                print!(
                    "{}{}",
                    Theme::fg(&theme.colors.badge_fg),
                    Theme::bg(&theme.colors.badge_bg)
                );
            }
            print!(" {label} ");
            print!("{}{base}", Theme::reset());
            print!("{}", " ".repeat(width.saturating_sub(text_width(&label) + 2)));
        }
        CellStyle::Swatch(color) => {
            print!("{}●{base} ", Theme::fg(color));
            print!("{}", fit(&cell.text, width.saturating_sub(2)));
        }
    }
}

/// Draws a box outline and returns the inner width.
pub fn render_frame(top: usize, left: usize, width: usize, height: usize, color: &str, title: &str) -> usize {
    let inner = width.saturating_sub(2);
    position_cursor(top, left);
    print!("{}", Theme::fg(color));
    let title = truncate(title, inner.saturating_sub(2));
    if title.is_empty() {
        print!("┌{}┐", "─".repeat(inner));
    } else {
        let rest = inner.saturating_sub(text_width(&title) + 2);
        print!("┌ {}{title}{}{} ", Theme::bold(), Theme::reset(), Theme::fg(color));
        print!("{}┐", "─".repeat(rest));
    }
    for row in top + 1..top + height.saturating_sub(1) {
        position_cursor(row, left);
        print!("{}│{}{}", Theme::fg(color), Theme::reset(), " ".repeat(inner));
        print!("{}│", Theme::fg(color));
    }
    position_cursor(top + height.saturating_sub(1), left);
    print!("{}└{}┘{}", Theme::fg(color), "─".repeat(inner), Theme::reset());
    inner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_wide_characters() {
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
        assert_eq!(text_width(&fit("日本", 6)), 6);
    }

    #[test]
    fn truncate_edge_widths() {
        assert_eq!(truncate("abc", 0), "");
        assert_eq!(truncate("abc", 1), "…");
        assert_eq!(truncate("abc", 3), "abc");
    }

    #[test]
    fn spread_keeps_right_side() {
        assert_eq!(spread("left", "right", 12), "left   right");
        assert_eq!(spread("left", "right", 7), "l…right");
    }
}
