//! Filter state and the row predicate built from it.
//!
//! [`FilterState`] holds the global search query plus one entry per column
//! that has an active discrete filter. Evaluation is a pure function of the
//! state, the schema and a record.

use super::column::ColumnSchema;
use std::collections::{BTreeMap, BTreeSet};

/// Active filter on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Row passes if its facet key is in the set. An empty set is no filter.
    OneOf(BTreeSet<String>),
    /// Row passes if its value is `true`.
    Flag,
}

/// Global query plus per-column filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    global: String,
    columns: BTreeMap<String, FilterValue>,
}

impl FilterState {
    #[must_use]
    pub fn global(&self) -> &str {
        &self.global
    }

    pub fn set_global(&mut self, query: impl Into<String>) {
        self.global = query.into();
    }

    #[must_use]
    pub fn column(&self, id: &str) -> Option<&FilterValue> {
        self.columns.get(id)
    }

    /// Selected option values for a select column.
    #[must_use]
    pub fn selected(&self, id: &str) -> BTreeSet<String> {
        match self.columns.get(id) {
            Some(FilterValue::OneOf(set)) => set.clone(),
            _ => BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn is_flag_set(&self, id: &str) -> bool {
        matches!(self.columns.get(id), Some(FilterValue::Flag))
    }

    /// Adds or removes `value` from a multi-select set.
    ///
    /// Removing the last value drops the column's filter entirely.
    pub fn toggle_option(&mut self, id: &str, value: &str) {
        let mut set = self.selected(id);
        if !set.remove(value) {
            set.insert(value.to_string());
        }
        self.set_options(id, set);
    }

    /// Single-select: picking the current value clears it, anything else replaces it.
    pub fn choose_option(&mut self, id: &str, value: &str) {
        let current = self.selected(id);
        if current.len() == 1 && current.contains(value) {
            self.clear_column(id);
        } else {
            self.set_options(id, BTreeSet::from([value.to_string()]));
        }
    }

    pub fn set_options(&mut self, id: &str, values: BTreeSet<String>) {
        if values.is_empty() {
            self.columns.remove(id);
        } else {
            self.columns.insert(id.to_string(), FilterValue::OneOf(values));
        }
    }

    pub fn toggle_flag(&mut self, id: &str) {
        if self.columns.remove(id).is_none() {
            self.columns.insert(id.to_string(), FilterValue::Flag);
        }
    }

    pub fn clear_column(&mut self, id: &str) {
        self.columns.remove(id);
    }

    #[must_use]
    pub fn has_column_filters(&self) -> bool {
        !self.columns.is_empty()
    }

    /// Clears every column filter and the global query.
    pub fn reset(&mut self) {
        self.columns.clear();
        self.global.clear();
    }

    /// Copy with one column's filter removed, used for facet counts.
    #[must_use]
    pub fn without(&self, id: &str) -> Self {
        let mut copy = self.clone();
        copy.columns.remove(id);
        copy
    }

    /// Whether `record` satisfies every active predicate.
    ///
    /// Filters naming a column missing from the schema are ignored.
    #[must_use]
    pub fn matches<T>(&self, schema: &ColumnSchema<T>, record: &T) -> bool {
        let columns_pass = self.columns.iter().all(|(id, filter)| {
            let Some(column) = schema.get(id) else {
                return true;
            };
            let key = column.value(record).facet_key();
            match filter {
                FilterValue::OneOf(set) if set.is_empty() => true,
                FilterValue::OneOf(set) => key.is_some_and(|k| set.contains(&k)),
                FilterValue::Flag => key.as_deref() == Some("true"),
            }
        });

        columns_pass && self.matches_global(schema, record)
    }

    fn matches_global<T>(&self, schema: &ColumnSchema<T>, record: &T) -> bool {
        let needle = self.global.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        schema
            .searchable()
            .any(|c| c.value(record).search_text().to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::column::{CellValue, Column};

    struct Row {
        name: &'static str,
        kind: Option<&'static str>,
        urgent: bool,
    }

    fn schema() -> ColumnSchema<Row> {
        ColumnSchema::new(vec![
            Column::new("name", "Name", |r: &Row| CellValue::text(r.name)).searchable(),
            Column::new("kind", "Kind", |r: &Row| CellValue::optional(r.kind)),
            Column::new("urgent", "Urgent", |r: &Row| CellValue::Flag(r.urgent)),
        ])
    }

    const ROW: Row = Row {
        name: "Mario Rossi",
        kind: Some("company"),
        urgent: false,
    };

    #[test]
    fn empty_selection_is_no_filter() {
        let mut state = FilterState::default();
        state.set_options("kind", BTreeSet::new());
        assert!(state.matches(&schema(), &ROW));
        assert!(!state.has_column_filters());
    }

    #[test]
    fn toggle_option_twice_removes_filter() {
        let mut state = FilterState::default();
        state.toggle_option("kind", "private");
        assert!(!state.matches(&schema(), &ROW));
        state.toggle_option("kind", "private");
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn missing_value_never_matches_select() {
        let row = Row { kind: None, ..ROW };
        let mut state = FilterState::default();
        state.toggle_option("kind", "company");
        assert!(!state.matches(&schema(), &row));
    }

    #[test]
    fn choose_option_same_value_clears() {
        let mut state = FilterState::default();
        state.choose_option("kind", "company");
        state.choose_option("kind", "private");
        assert_eq!(state.selected("kind"), BTreeSet::from(["private".to_string()]));
        state.choose_option("kind", "private");
        assert!(state.column("kind").is_none());
    }

    #[test]
    fn flag_requires_true_value() {
        let mut state = FilterState::default();
        state.toggle_flag("urgent");
        assert!(!state.matches(&schema(), &ROW));
        assert!(state.matches(&schema(), &Row { urgent: true, ..ROW }));
    }

    #[test]
    fn global_search_is_case_insensitive_substring() {
        let mut state = FilterState::default();
        state.set_global("MARIO r");
        assert!(state.matches(&schema(), &ROW));
        state.set_global("company");
        assert!(!state.matches(&schema(), &ROW), "kind is not searchable");
    }

    #[test]
    fn blank_query_matches_everything() {
        let mut state = FilterState::default();
        state.set_global("   ");
        assert!(state.matches(&schema(), &ROW));
        state.set_global("  rossi ");
        assert!(state.matches(&schema(), &ROW));
    }

    #[test]
    fn unknown_column_filter_is_ignored() {
        let mut state = FilterState::default();
        state.toggle_option("missing", "x");
        assert!(state.matches(&schema(), &ROW));
    }

    #[test]
    fn reset_clears_global_and_columns() {
        let mut state = FilterState::default();
        state.set_global("abc");
        state.toggle_flag("urgent");
        state.reset();
        assert_eq!(state, FilterState::default());
    }
}
