//! Generic table adapter: records + schema → derived row state.
//!
//! [`TableAdapter`] owns the records, the schema and every piece of
//! table state (filters, sort, visibility, pagination). The filtered and
//! sorted row model is recomputed eagerly after each mutation by
//! [`compute_row_model`], a pure function of `(records, filters, sort)`, so
//! there is no memoised state that could go stale between distinct inputs.

use super::column::{Column, ColumnSchema, FilterOption, FilterVariant};
use super::filter::FilterState;
use super::pagination::Pagination;
use super::sort::SortState;
use std::collections::BTreeMap;

/// Indices of `records` that pass `filters`, ordered by `sort`.
#[must_use]
pub fn compute_row_model<T>(
    records: &[T],
    schema: &ColumnSchema<T>,
    filters: &FilterState,
    sort: &SortState,
) -> Vec<usize> {
    let mut indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| filters.matches(schema, *record))
        .map(|(i, _)| i)
        .collect();
    sort.apply(schema, records, &mut indices);
    indices
}

/// A faceted filter option with its live match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionCount {
    pub option: FilterOption,
    pub count: usize,
    pub selected: bool,
}

pub struct TableAdapter<T> {
    records: Vec<T>,
    schema: ColumnSchema<T>,
    filters: FilterState,
    sort: SortState,
    visibility: BTreeMap<&'static str, bool>,
    pagination: Pagination,
    row_model: Vec<usize>,
}

impl<T> TableAdapter<T> {
    #[must_use]
    pub fn new(schema: ColumnSchema<T>, records: Vec<T>) -> Self {
        let visibility = schema
            .iter()
            .map(|c| (c.id, c.initially_visible))
            .collect();
        let mut adapter = Self {
            records,
            schema,
            filters: FilterState::default(),
            sort: SortState::default(),
            visibility,
            pagination: Pagination::default(),
            row_model: Vec::new(),
        };
        adapter.recompute();
        adapter
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.pagination = Pagination::new(page_size);
        self.recompute();
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self.recompute();
        self
    }

    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    #[must_use]
    pub const fn schema(&self) -> &ColumnSchema<T> {
        &self.schema
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub const fn sort(&self) -> &SortState {
        &self.sort
    }

    #[must_use]
    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Replaces the record list, keeping all table state.
    pub fn set_records(&mut self, records: Vec<T>) {
        self.records = records;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.row_model = compute_row_model(&self.records, &self.schema, &self.filters, &self.sort);
        self.pagination.clamp(self.row_model.len());
        tracing::trace!(
            total = self.records.len(),
            filtered = self.row_model.len(),
            "row model recomputed"
        );
    }

    /// Filtered and sorted rows across all pages.
    pub fn filtered_rows(&self) -> impl Iterator<Item = &T> {
        self.row_model.iter().map(|&i| &self.records[i])
    }

    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.row_model.len()
    }

    /// Rows on the current page.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<&T> {
        self.row_model[self.pagination.range(self.row_model.len())]
            .iter()
            .map(|&i| &self.records[i])
            .collect()
    }

    #[must_use]
    pub fn is_column_visible(&self, id: &str) -> bool {
        self.visibility.get(id).copied().unwrap_or(false)
    }

    pub fn visible_columns(&self) -> impl Iterator<Item = &Column<T>> {
        self.schema.iter().filter(|c| self.is_column_visible(c.id))
    }

    /// Flips a hideable column. Returns whether anything changed.
    pub fn toggle_column_visibility(&mut self, id: &str) -> bool {
        let Some(column) = self.schema.get(id).filter(|c| c.hideable) else {
            return false;
        };
        let visible = self.visibility.entry(column.id).or_insert(true);
        *visible = !*visible;
        true
    }

    pub fn set_global_filter(&mut self, query: impl Into<String>) {
        self.filters.set_global(query);
        self.recompute();
    }

    /// Applies an option pick according to the column's filter variant.
    ///
    /// Multi-select toggles membership, single-select replaces or clears.
    /// Columns without a select filter are left alone.
    pub fn pick_filter_option(&mut self, id: &str, value: &str) {
        match self.schema.get(id).and_then(Column::filter_variant) {
            Some(FilterVariant::MultiSelect) => self.filters.toggle_option(id, value),
            Some(FilterVariant::Select) => self.filters.choose_option(id, value),
            Some(FilterVariant::Toggle) | None => return,
        }
        self.recompute();
    }

    pub fn toggle_flag_filter(&mut self, id: &str) {
        if self.schema.get(id).and_then(Column::filter_variant) == Some(FilterVariant::Toggle) {
            self.filters.toggle_flag(id);
            self.recompute();
        }
    }

    pub fn clear_filter(&mut self, id: &str) {
        self.filters.clear_column(id);
        self.recompute();
    }

    /// Clears every filter; sort, visibility and page size are untouched.
    pub fn reset_filters(&mut self) {
        self.filters.reset();
        self.recompute();
    }

    pub fn cycle_sort(&mut self, id: &str, additive: bool) {
        if self.schema.get(id).is_some_and(|c| c.sortable) {
            self.sort.cycle(id, additive);
            self.recompute();
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.pagination.next(self.row_model.len())
    }

    pub fn previous_page(&mut self) -> bool {
        self.pagination.previous()
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.row_model.len())
    }

    /// Unique facet values of a column with counts.
    ///
    /// Counted over rows passing every active filter except the column's own,
    /// so the popover shows what selecting each option would add.
    #[must_use]
    pub fn facet_counts(&self, id: &str) -> BTreeMap<String, usize> {
        let Some(column) = self.schema.get(id) else {
            return BTreeMap::new();
        };
        let filters = self.filters.without(id);
        let mut counts = BTreeMap::new();
        for record in self.records.iter().filter(|r| filters.matches(&self.schema, *r)) {
            if let Some(key) = column.value(record).facet_key() {
                *counts.entry(key).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Declared options of a select column with live counts and selection.
    #[must_use]
    pub fn option_counts(&self, id: &str) -> Vec<OptionCount> {
        let Some(filter) = self.schema.get(id).and_then(|c| c.filter.as_ref()) else {
            return Vec::new();
        };
        let counts = self.facet_counts(id);
        let selected = self.filters.selected(id);
        filter
            .options
            .iter()
            .map(|option| OptionCount {
                count: counts.get(&option.value).copied().unwrap_or(0),
                selected: selected.contains(&option.value),
                option: option.clone(),
            })
            .collect()
    }
}

impl<T> std::fmt::Debug for TableAdapter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableAdapter")
            .field("records", &self.records.len())
            .field("filters", &self.filters)
            .field("sort", &self.sort)
            .field("pagination", &self.pagination)
            .field("filtered", &self.row_model.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::column::CellValue;
    use crate::table::sort::SortDirection;

    #[derive(Debug, Clone, PartialEq)]
    struct Ticket {
        code: String,
        status: &'static str,
        urgent: bool,
    }

    fn tickets(n: usize) -> Vec<Ticket> {
        (0..n)
            .map(|i| Ticket {
                code: format!("T{i:02}"),
                status: if i % 2 == 0 { "open" } else { "closed" },
                urgent: i % 3 == 0,
            })
            .collect()
    }

    fn schema() -> ColumnSchema<Ticket> {
        ColumnSchema::new(vec![
            Column::new("code", "Code", |t: &Ticket| CellValue::text(t.code.clone()))
                .searchable()
                .pinned(),
            Column::new("status", "Status", |t: &Ticket| CellValue::text(t.status))
                .multi_select("Status", FilterOption::same(["open", "closed", "parked"])),
            Column::new("urgent", "Urgent", |t: &Ticket| CellValue::Flag(t.urgent))
                .toggle("Urgent only")
                .hidden(),
        ])
    }

    #[test]
    fn twenty_five_rows_paginate_into_three_pages() {
        let mut table = TableAdapter::new(schema(), tickets(25));
        assert_eq!(table.page_count(), 3);
        table.next_page();
        table.next_page();
        assert_eq!(table.visible_rows().len(), 5);
        assert!(!table.next_page());
        assert_eq!(table.pagination().page_index(), 2);
    }

    #[test]
    fn toggle_twice_restores_rows() {
        let mut table = TableAdapter::new(schema(), tickets(12));
        let before: Vec<_> = table.filtered_rows().cloned().collect();
        table.toggle_flag_filter("urgent");
        assert_eq!(table.filtered_count(), 4);
        table.toggle_flag_filter("urgent");
        let after: Vec<_> = table.filtered_rows().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn facet_counts_ignore_own_filter() {
        let mut table = TableAdapter::new(schema(), tickets(6));
        table.pick_filter_option("status", "open");
        let counts = table.option_counts("status");
        assert_eq!(counts[0].count, 3);
        assert!(counts[0].selected);
        assert_eq!(counts[1].count, 3);
        assert_eq!(counts[2].count, 0);
        assert_eq!(table.filtered_count(), 3);
    }

    #[test]
    fn only_hideable_columns_toggle() {
        let mut table = TableAdapter::new(schema(), tickets(1));
        assert!(!table.is_column_visible("urgent"));
        assert!(!table.toggle_column_visibility("code"));
        assert!(table.toggle_column_visibility("urgent"));
        let ids: Vec<_> = table.visible_columns().map(|c| c.id).collect();
        assert_eq!(ids, vec!["code", "status", "urgent"]);
    }

    #[test]
    fn filter_shrink_clamps_page() {
        let mut table = TableAdapter::new(schema(), tickets(25));
        table.next_page();
        table.next_page();
        table.set_global_filter("T0");
        assert_eq!(table.filtered_count(), 10);
        assert_eq!(table.pagination().page_index(), 0);
    }

    #[test]
    fn reset_keeps_sort() {
        let mut table = TableAdapter::new(schema(), tickets(5))
            .with_sort(SortState::by("code", SortDirection::Descending));
        table.pick_filter_option("status", "closed");
        table.reset_filters();
        assert_eq!(table.filtered_count(), 5);
        assert_eq!(table.visible_rows()[0].code, "T04");
    }
}
