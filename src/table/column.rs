//! Column schema: how a record type maps onto table columns.
//!
//! Each [`Column`] owns an accessor returning a [`CellValue`], an optional
//! custom cell renderer, an optional discrete filter, and sizing/visibility
//! flags. Accessors and renderers are plain function pointers so a schema is
//! a static description per record type.

use chrono::NaiveDate;
use std::cmp::Ordering;

/// Raw value a column extracts from a record.
///
/// Used for filtering, faceting and sorting. Display text for the grid comes
/// from [`Column::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Flag(bool),
    Date(NaiveDate),
    Empty,
}

impl CellValue {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Wraps optional text, mapping `None` to [`CellValue::Empty`].
    #[must_use]
    pub fn optional(value: Option<&str>) -> Self {
        value.map_or(Self::Empty, |v| Self::Text(v.to_string()))
    }

    /// True for `Empty` and for blank text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            Self::Flag(_) | Self::Date(_) => false,
        }
    }

    /// Text matched by the global search. Missing values search as `""`.
    #[must_use]
    pub fn search_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Flag(b) => b.to_string(),
            Self::Date(d) => d.format("%d/%m/%Y").to_string(),
            Self::Empty => String::new(),
        }
    }

    /// Value compared against a column's selected filter options.
    ///
    /// Flags facet as `"true"`/`"false"`. Missing values have no key and so
    /// never match a select filter.
    #[must_use]
    pub fn facet_key(&self) -> Option<String> {
        match self {
            Self::Text(s) if !s.is_empty() => Some(s.clone()),
            Self::Flag(b) => Some(b.to_string()),
            Self::Date(d) => Some(d.to_string()),
            Self::Text(_) | Self::Empty => None,
        }
    }

    /// Default cell text.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Flag(true) => "Yes".to_string(),
            Self::Flag(false) => "No".to_string(),
            other => other.search_text(),
        }
    }

    /// Natural ordering between two present values.
    ///
    /// Text compares case-insensitively first. Values of different kinds
    /// fall back to comparing their display text.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (Self::Flag(a), Self::Flag(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (a, b) => a.display().cmp(&b.display()),
        }
    }
}

/// Discrete filter behaviour a column can declare.
///
/// Free-text participation is separate: see [`Column::searchable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterVariant {
    /// At most one option selected; picking it again clears it.
    Select,
    /// Row passes if its value is in the selected set.
    MultiSelect,
    /// On/off switch; when on, only rows whose value is `true` pass.
    Toggle,
}

/// One choice in a select filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
    /// Single glyph shown before the label.
    pub icon: Option<String>,
}

impl FilterOption {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            icon: None,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Options whose label and value are the same string.
    #[must_use]
    pub fn same<I, S>(values: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values
            .into_iter()
            .map(|v| {
                let v = v.into();
                Self::new(v.clone(), v)
            })
            .collect()
    }
}

/// Filter declaration attached to a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    pub variant: FilterVariant,
    /// Toolbar label.
    pub title: String,
    pub options: Vec<FilterOption>,
}

/// Presentation hint for a rendered cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellStyle {
    #[default]
    Plain,
    /// Codes and identifiers.
    Mono,
    /// Secondary text.
    Dim,
    /// Pill-shaped label.
    Badge,
    /// Attention marker (urgent, destructive).
    Danger,
    /// Colour swatch followed by text; carries the `#rrggbb` colour.
    Swatch(String),
}

/// Display-ready cell produced by a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub style: CellStyle,
}

impl Cell {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: CellStyle::Plain,
        }
    }

    #[must_use]
    pub fn styled(text: impl Into<String>, style: CellStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

pub type Accessor<T> = fn(&T) -> CellValue;
pub type CellRenderer<T> = fn(&T) -> Cell;

/// One column of a table schema.
pub struct Column<T> {
    pub id: &'static str,
    pub header: String,
    accessor: Accessor<T>,
    renderer: Option<CellRenderer<T>>,
    pub filter: Option<ColumnFilter>,
    pub searchable: bool,
    pub sortable: bool,
    /// Fixed width in terminal cells; `None` shares the remaining width.
    pub width: Option<usize>,
    pub hideable: bool,
    pub initially_visible: bool,
}

impl<T> Column<T> {
    /// A visible, hideable, sortable column with no filter.
    #[must_use]
    pub fn new(id: &'static str, header: impl Into<String>, accessor: Accessor<T>) -> Self {
        Self {
            id,
            header: header.into(),
            accessor,
            renderer: None,
            filter: None,
            searchable: false,
            sortable: true,
            width: None,
            hideable: true,
            initially_visible: true,
        }
    }

    #[must_use]
    pub fn cell(mut self, renderer: CellRenderer<T>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Includes the column in global text search.
    #[must_use]
    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    #[must_use]
    pub const fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    #[must_use]
    pub const fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Always shown; not listed in the column visibility popover.
    #[must_use]
    pub const fn pinned(mut self) -> Self {
        self.hideable = false;
        self
    }

    /// Starts hidden; still filterable.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.initially_visible = false;
        self
    }

    #[must_use]
    pub fn multi_select(mut self, title: impl Into<String>, options: Vec<FilterOption>) -> Self {
        self.filter = Some(ColumnFilter {
            variant: FilterVariant::MultiSelect,
            title: title.into(),
            options,
        });
        self
    }

    #[must_use]
    pub fn select(mut self, title: impl Into<String>, options: Vec<FilterOption>) -> Self {
        self.filter = Some(ColumnFilter {
            variant: FilterVariant::Select,
            title: title.into(),
            options,
        });
        self
    }

    #[must_use]
    pub fn toggle(mut self, title: impl Into<String>) -> Self {
        self.filter = Some(ColumnFilter {
            variant: FilterVariant::Toggle,
            title: title.into(),
            options: Vec::new(),
        });
        self
    }

    #[must_use]
    pub fn value(&self, record: &T) -> CellValue {
        (self.accessor)(record)
    }

    /// Custom renderer output, or the value's default display text.
    #[must_use]
    pub fn render(&self, record: &T) -> Cell {
        self.renderer.map_or_else(
            || Cell::plain(self.value(record).display()),
            |render| render(record),
        )
    }

    #[must_use]
    pub fn filter_variant(&self) -> Option<FilterVariant> {
        self.filter.as_ref().map(|f| f.variant)
    }
}

impl<T> std::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("filter", &self.filter)
            .field("searchable", &self.searchable)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

/// Ordered list of columns for one record type.
#[derive(Debug)]
pub struct ColumnSchema<T> {
    columns: Vec<Column<T>>,
}

impl<T> ColumnSchema<T> {
    #[must_use]
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self { columns }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column<T>> {
        self.columns.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns that get a toolbar control, in schema order.
    pub fn filterable(&self) -> impl Iterator<Item = &Column<T>> {
        self.columns.iter().filter(|c| c.filter.is_some())
    }

    pub fn searchable(&self) -> impl Iterator<Item = &Column<T>> {
        self.columns.iter().filter(|c| c.searchable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_have_no_facet_key() {
        assert_eq!(CellValue::Empty.facet_key(), None);
        assert_eq!(CellValue::text("").facet_key(), None);
        assert_eq!(CellValue::Flag(true).facet_key().as_deref(), Some("true"));
    }

    #[test]
    fn text_compares_case_insensitively() {
        let a = CellValue::text("anna");
        let b = CellValue::text("Bruno");
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn render_falls_back_to_display_text() {
        let column: Column<bool> = Column::new("flag", "Flag", |b| CellValue::Flag(*b));
        assert_eq!(column.render(&true).text, "Yes");

        let custom = column.cell(|b| Cell::styled(if *b { "!" } else { "" }, CellStyle::Danger));
        assert_eq!(custom.render(&true), Cell::styled("!", CellStyle::Danger));
    }
}
