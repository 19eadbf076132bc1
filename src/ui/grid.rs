//! Grid renderer: decides between skeleton, empty state, table and cards.
//!
//! The decision is a pure function of the loading flag, the visible rows and
//! the viewport width, recomputed on every render:
//!
//! ```text
//! loading            → Loading (skeleton rows)
//! no visible rows    → Empty (caller-configured copy)
//! cols < breakpoint  → Cards (caller-supplied CardLayout)
//! otherwise          → Table
//! ```

use crate::table::{Cell, CellStyle, SortDirection, TableAdapter};
use unicode_width::UnicodeWidthStr;

/// Placeholder rows shown while loading.
pub const SKELETON_ROWS: usize = 5;

/// Viewport width, in columns, below which rows render as cards.
pub const DEFAULT_CARD_BREAKPOINT: usize = 100;

const MAX_AUTO_WIDTH: usize = 28;

/// Copy shown when no row is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self::new("No data available")
    }
}

impl EmptyState {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            icon: None,
        }
    }

    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// A record rendered for narrow viewports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub subtitle: Option<String>,
    pub badge: Option<Cell>,
    pub fields: Vec<(String, Cell)>,
}

impl Card {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            badge: None,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn subtitle(mut self, text: impl Into<String>) -> Self {
        self.subtitle = Some(text.into());
        self
    }

    #[must_use]
    pub fn badge(mut self, cell: Cell) -> Self {
        self.badge = Some(cell);
        self
    }

    #[must_use]
    pub fn field(mut self, label: impl Into<String>, cell: Cell) -> Self {
        self.fields.push((label.into(), cell));
        self
    }

    /// Lines the card occupies, including its separator.
    #[must_use]
    pub fn height(&self) -> usize {
        2 + usize::from(self.subtitle.is_some()) + self.fields.len()
    }
}

/// Card rendering strategy injected per record type.
pub trait CardLayout<T> {
    fn card(&self, record: &T) -> Card;
}

impl<T, F> CardLayout<T> for F
where
    F: Fn(&T) -> Card,
{
    fn card(&self, record: &T) -> Card {
        self(record)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub label: String,
    pub width: usize,
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub cells: Vec<Cell>,
    /// Character ranges of the global query, per cell.
    pub highlights: Vec<Vec<(usize, usize)>>,
    pub selected: bool,
    /// Row carries the urgent marker.
    pub flagged: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub card: Card,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridView {
    Loading { rows: usize, columns: usize },
    Empty(EmptyState),
    Table(TableView),
    Cards(Vec<CardView>),
}

impl GridView {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// Everything the grid needs from a page to lay itself out.
pub struct GridInput<'a, T> {
    pub adapter: &'a TableAdapter<T>,
    pub loading: bool,
    pub empty: &'a EmptyState,
    pub cards: &'a dyn CardLayout<T>,
    /// Viewport width in columns.
    pub cols: usize,
    pub breakpoint: usize,
    /// Selected row within the current page.
    pub selected: usize,
    /// Marks a row with the urgent indicator.
    pub flag: Option<fn(&T) -> bool>,
}

#[must_use]
pub fn layout_grid<T>(input: &GridInput<'_, T>) -> GridView {
    let adapter = input.adapter;
    if input.loading {
        return GridView::Loading {
            rows: SKELETON_ROWS,
            columns: adapter.visible_columns().count(),
        };
    }

    let rows = adapter.visible_rows();
    if rows.is_empty() {
        return GridView::Empty(input.empty.clone());
    }

    if input.cols < input.breakpoint {
        return GridView::Cards(
            rows.into_iter()
                .enumerate()
                .map(|(i, record)| CardView {
                    card: input.cards.card(record),
                    selected: i == input.selected,
                })
                .collect(),
        );
    }

    let query = adapter.filters().global();
    let columns: Vec<_> = adapter.visible_columns().collect();
    let body: Vec<RowView> = rows
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let cells: Vec<Cell> = columns.iter().map(|c| c.render(record)).collect();
            let highlights = columns
                .iter()
                .zip(&cells)
                .map(|(column, cell)| {
                    if column.searchable {
                        match_ranges(&cell.text, query)
                    } else {
                        Vec::new()
                    }
                })
                .collect();
            RowView {
                cells,
                highlights,
                selected: i == input.selected,
                flagged: input.flag.is_some_and(|flag| flag(record)),
            }
        })
        .collect();

    let headers = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let width = column.width.unwrap_or_else(|| {
                body.iter()
                    .map(|r| cell_width(&r.cells[i]))
                    .chain(std::iter::once(column.header.width() + 2))
                    .max()
                    .unwrap_or(0)
                    .min(MAX_AUTO_WIDTH)
            });
            HeaderCell {
                label: column.header.clone(),
                width,
                sort: adapter.sort().direction_of(column.id),
            }
        })
        .collect();

    GridView::Table(TableView { headers, rows: body })
}

fn cell_width(cell: &Cell) -> usize {
    let swatch = usize::from(matches!(cell.style, CellStyle::Swatch(_))) * 2;
    let badge = usize::from(cell.style == CellStyle::Badge) * 2;
    cell.text.width() + swatch + badge
}

/// Case-insensitive occurrences of `query` in `text`, as character ranges.
///
/// ```
/// use zentask::ui::grid::match_ranges;
///
/// assert_eq!(match_ranges("Mario Rossi", "ro"), vec![(6, 8)]);
/// assert_eq!(match_ranges("Anna", "an"), vec![(0, 2)]);
/// assert!(match_ranges("Anna", "").is_empty());
/// ```
#[must_use]
pub fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let fold = |c: char| c.to_lowercase().next().unwrap_or(c);
    let needle: Vec<char> = query.trim().chars().map(fold).collect();
    if needle.is_empty() {
        return Vec::new();
    }
    let hay: Vec<char> = text.chars().map(fold).collect();

    let mut ranges = Vec::new();
    let mut start = 0;
    while start + needle.len() <= hay.len() {
        if hay[start..start + needle.len()] == needle[..] {
            ranges.push((start, start + needle.len()));
            start += needle.len();
        } else {
            start += 1;
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{CellValue, Column, ColumnSchema};

    #[derive(Clone)]
    struct Row(&'static str);

    fn adapter(rows: &[&'static str]) -> TableAdapter<Row> {
        let schema = ColumnSchema::new(vec![
            Column::new("name", "Name", |r: &Row| CellValue::text(r.0)).searchable()
        ]);
        TableAdapter::new(schema, rows.iter().copied().map(Row).collect())
    }

    fn input<'a>(
        adapter: &'a TableAdapter<Row>,
        empty: &'a EmptyState,
        cards: &'a dyn CardLayout<Row>,
        loading: bool,
        cols: usize,
    ) -> GridInput<'a, Row> {
        GridInput {
            adapter,
            loading,
            empty,
            cards,
            cols,
            breakpoint: DEFAULT_CARD_BREAKPOINT,
            selected: 0,
            flag: None,
        }
    }

    #[test]
    fn loading_wins_over_rows() {
        let table = adapter(&["a", "b"]);
        let empty = EmptyState::default();
        let cards = |r: &Row| Card::new(r.0);
        let view = layout_grid(&input(&table, &empty, &cards, true, 120));
        assert_eq!(view, GridView::Loading { rows: SKELETON_ROWS, columns: 1 });
    }

    #[test]
    fn zero_rows_show_configured_empty_state() {
        let mut table = adapter(&["Mario"]);
        table.set_global_filter("zzz");
        let empty = EmptyState::new("No clients").description("Add one").icon("◇");
        let cards = |r: &Row| Card::new(r.0);
        for cols in [60, 160] {
            let view = layout_grid(&input(&table, &empty, &cards, false, cols));
            assert_eq!(view, GridView::Empty(empty.clone()));
        }
    }

    #[test]
    fn narrow_viewport_uses_cards() {
        let table = adapter(&["Mario", "Anna"]);
        let empty = EmptyState::default();
        let cards = |r: &Row| Card::new(format!("card {}", r.0));
        let GridView::Cards(cards) = layout_grid(&input(&table, &empty, &cards, false, 80)) else {
            panic!("expected cards");
        };
        assert_eq!(cards[0].card.title, "card Mario");
        assert!(cards[0].selected);
    }

    #[test]
    fn wide_viewport_highlights_query() {
        let mut table = adapter(&["Mario Rossi", "Anna"]);
        table.set_global_filter("ross");
        let empty = EmptyState::default();
        let cards = |r: &Row| Card::new(r.0);
        let GridView::Table(view) = layout_grid(&input(&table, &empty, &cards, false, 120)) else {
            panic!("expected table");
        };
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].highlights[0], vec![(6, 10)]);
        assert_eq!(view.headers[0].width, "Mario Rossi".len());
    }

    #[test]
    fn blank_query_keeps_rows_without_highlights() {
        let mut table = adapter(&["Mario Rossi", "Anna"]);
        table.set_global_filter("   ");
        let empty = EmptyState::default();
        let cards = |r: &Row| Card::new(r.0);
        let GridView::Table(view) = layout_grid(&input(&table, &empty, &cards, false, 120)) else {
            panic!("expected table");
        };
        assert_eq!(view.rows.len(), 2);
        assert!(view.rows.iter().flat_map(|r| &r.highlights).all(Vec::is_empty));
    }

    #[test]
    fn auto_width_counts_terminal_cells() {
        let table = adapter(&["東京支社", "Anna"]);
        let empty = EmptyState::default();
        let cards = |r: &Row| Card::new(r.0);
        let GridView::Table(view) = layout_grid(&input(&table, &empty, &cards, false, 120)) else {
            panic!("expected table");
        };
        assert_eq!(view.headers[0].width, 8);
    }
}
