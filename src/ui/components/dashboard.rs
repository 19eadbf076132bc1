//! Dashboard tiles and the recent interventions list.

use crate::ui::helpers::{fit, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DashboardView;

const TILE_WIDTH: usize = 18;

pub fn render_dashboard(row: usize, view: &DashboardView, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;

    match &view.tiles {
        None => {
            position_cursor(current_row + 1, 3);
            for _ in 0..(cols.saturating_sub(4) / TILE_WIDTH).min(5) {
                print!("{}{}{}  ", Theme::bg(&theme.colors.skeleton), " ".repeat(TILE_WIDTH - 2), Theme::reset());
            }
            return current_row + 4;
        }
        Some(tiles) => {
            let per_line = (cols.saturating_sub(2) / TILE_WIDTH).max(1);
            for chunk in tiles.chunks(per_line) {
                position_cursor(current_row, 3);
                for (label, _) in chunk {
                    print!("{}{}{}", Theme::fg(&theme.colors.text_dim), fit(label, TILE_WIDTH), Theme::reset());
                }
                position_cursor(current_row + 1, 3);
                for (label, value) in chunk {
                    let color = if *label == "Urgent" && *value > 0 {
                        &theme.colors.danger
                    } else {
                        &theme.colors.accent
                    };
                    print!("{}{}{}{}", Theme::bold(), Theme::fg(color), fit(&value.to_string(), TILE_WIDTH), Theme::reset());
                }
                current_row += 3;
            }
        }
    }

    position_cursor(current_row, 2);
    print!("{}{}Recent interventions{}", Theme::bold(), Theme::fg(&theme.colors.text_normal), Theme::reset());
    current_row += 1;

    for item in &view.recent {
        position_cursor(current_row, 2);
        let marker = if item.urgent { "!" } else { " " };
        print!("{}{marker}{} ", Theme::fg(&theme.colors.danger), Theme::reset());
        print!("{}{}{} ", Theme::bold(), fit(&item.code, 10), Theme::reset());
        let status = format!(" {} ", item.status);
        let room = cols.saturating_sub(15 + text_width(&status) + 22);
        print!("{}{}", Theme::fg(&theme.colors.text_normal), fit(&item.description, room));
        print!("{}{}", Theme::fg(&theme.colors.text_dim), fit(&item.client, 20));
        print!("{}{}{status}{}", Theme::fg(&theme.colors.badge_fg), Theme::bg(&theme.colors.badge_bg), Theme::reset());
        current_row += 1;
    }
    current_row
}
