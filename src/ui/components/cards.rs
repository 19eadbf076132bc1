//! Card list for narrow viewports.
//!
//! ```text
//!  INT-00001                          [ In corso ]
//!  [Installazione] Installazione rete LAN
//!    Client     Rossi Mario
//!  ──────────────────────────────────────────────
//! ```

use crate::ui::grid::CardView;
use crate::ui::helpers::{fit, position_cursor, render_cell, text_width};
use crate::ui::theme::Theme;

const LABEL_WIDTH: usize = 11;

/// Renders as many whole cards as fit above `last_row`.
pub fn render_cards(row: usize, cards: &[CardView], theme: &Theme, cols: usize, last_row: usize) -> usize {
    let mut current_row = row;
    for view in cards {
        if current_row + view.card.height() > last_row + 1 {
            break;
        }
        current_row = render_card(current_row, view, theme, cols);
    }
    current_row
}

fn render_card(row: usize, view: &CardView, theme: &Theme, cols: usize) -> usize {
    let card = &view.card;
    let mut current_row = row;
    let inner = cols.saturating_sub(2);

    position_cursor(current_row, 1);
    let marker = if view.selected { "▌" } else { " " };
    print!("{}{marker}{}", Theme::fg(&theme.colors.accent), Theme::reset());
    let badge_width = card.badge.as_ref().map_or(0, |b| text_width(&b.text) + 2);
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal));
    if view.selected {
        print!("{}", Theme::fg(&theme.colors.accent));
    }
    print!("{}", fit(&card.title, inner.saturating_sub(badge_width)));
    print!("{}", Theme::reset());
    if let Some(badge) = &card.badge {
        render_cell(badge, &[], badge_width, theme, false);
        print!("{}", Theme::reset());
    }
    current_row += 1;

    if let Some(subtitle) = &card.subtitle {
        position_cursor(current_row, 1);
        print!("{}{marker}{}", Theme::fg(&theme.colors.accent), Theme::reset());
        print!("{}{}", Theme::fg(&theme.colors.text_dim), fit(subtitle, inner));
        print!("{}", Theme::reset());
        current_row += 1;
    }

    for (label, cell) in &card.fields {
        position_cursor(current_row, 1);
        print!("{}{marker}{}", Theme::fg(&theme.colors.accent), Theme::reset());
        print!("{}  {}", Theme::fg(&theme.colors.text_dim), fit(label, LABEL_WIDTH));
        print!("{}", Theme::fg(&theme.colors.text_normal));
        render_cell(cell, &[], inner.saturating_sub(LABEL_WIDTH + 2), theme, false);
        print!("{}", Theme::reset());
        current_row += 1;
    }

    position_cursor(current_row, 1);
    print!("{}{}{}", Theme::fg(&theme.colors.border), "─".repeat(cols), Theme::reset());
    current_row + 1
}
