//! Title bar, screen tabs and page heading.

use crate::ui::helpers::{fit, position_cursor, spread, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HeaderInfo, NavItem};

const CRUMB_SEPARATOR: &str = " › ";

/// App name and breadcrumbs on the left, signed-in user on the right.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let left = format!(" {}  {}", header.title, header.crumbs.join(CRUMB_SEPARATOR));
    let right = format!("{} ", header.user);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", Theme::bold());
    print!("{}", spread(&left, &right, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// One tab per screen, shortcut digit first; the active tab is highlighted.
pub fn render_nav(row: usize, nav: &[NavItem], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let mut used = 0;
    for item in nav {
        let tab = format!(" {} {} ", item.key, item.label);
        let width = text_width(&tab);
        if used + width > cols {
            break;
        }
        if item.active {
            print!(
                "{}{}{}",
                Theme::bold(),
                Theme::fg(&theme.colors.selection_fg),
                Theme::bg(&theme.colors.accent)
            );
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{tab}{}", Theme::reset());
        used += width;
    }
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}

/// Screen title, description and the create hint.
pub fn render_page_title(
    row: usize,
    title: &str,
    description: &str,
    action: Option<&str>,
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(row, 1);
    let hint = action.map(|label| format!("n: {label} ")).unwrap_or_default();
    let room = cols.saturating_sub(text_width(&hint));
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal));
    print!("{}", fit(&format!(" {title}"), room));
    print!("{}{}{hint}", Theme::reset(), Theme::fg(&theme.colors.accent));
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", fit(&format!(" {}", truncate(description, cols.saturating_sub(1))), cols));
    print!("{}", Theme::reset());
    row + 2
}
