//! Footer: keybinding hints, or the latest toast.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, ToastKind};

pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let (text, color) = match &footer.toast {
        Some(toast) => {
            let (icon, color) = match toast.kind {
                ToastKind::Success => ("✓", &theme.colors.success),
                ToastKind::Error => ("✕", &theme.colors.danger),
            };
            (format!("{icon} {}", toast.message), color)
        }
        None => (footer.keybindings.clone(), &theme.colors.text_dim),
    };

    let text = truncate(&text, cols);
    let text_len = text_width(&text);
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    if footer.toast.is_some() {
        print!("{}", Theme::bold());
    }
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}
