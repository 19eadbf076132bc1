//! Multi-key sort state.

use super::column::{CellValue, ColumnSchema};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Arrow glyph for column headers.
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

/// Ordered list of `(column, direction)` pairs; earlier keys win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    keys: Vec<SortKey>,
}

impl SortState {
    /// Single-key sort.
    #[must_use]
    pub fn by(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            keys: vec![SortKey {
                column: column.into(),
                direction,
            }],
        }
    }

    #[must_use]
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[must_use]
    pub fn direction_of(&self, column: &str) -> Option<SortDirection> {
        self.keys
            .iter()
            .find(|k| k.column == column)
            .map(|k| k.direction)
    }

    /// Advances one column through none → ascending → descending → none.
    ///
    /// With `additive` the other keys are kept and a new key is appended;
    /// otherwise the column becomes the only key.
    pub fn cycle(&mut self, column: &str, additive: bool) {
        let next = match self.direction_of(column) {
            None => Some(SortDirection::Ascending),
            Some(SortDirection::Ascending) => Some(SortDirection::Descending),
            Some(SortDirection::Descending) => None,
        };

        if additive {
            match (next, self.keys.iter_mut().find(|k| k.column == column)) {
                (Some(direction), Some(key)) => key.direction = direction,
                (Some(direction), None) => self.keys.push(SortKey {
                    column: column.to_string(),
                    direction,
                }),
                (None, _) => self.keys.retain(|k| k.column != column),
            }
        } else {
            self.keys = next
                .map(|direction| SortKey {
                    column: column.to_string(),
                    direction,
                })
                .into_iter()
                .collect();
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Stable-sorts record indices by the active keys.
    ///
    /// Empty values sort after present ones in either direction. Keys naming
    /// an unknown or unsortable column are skipped.
    pub fn apply<T>(&self, schema: &ColumnSchema<T>, records: &[T], indices: &mut [usize]) {
        let columns: Vec<_> = self
            .keys
            .iter()
            .filter_map(|key| {
                schema
                    .get(&key.column)
                    .filter(|c| c.sortable)
                    .map(|c| (c, key.direction))
            })
            .collect();
        if columns.is_empty() {
            return;
        }

        indices.sort_by(|&a, &b| {
            columns
                .iter()
                .map(|(column, direction)| {
                    compare_cells(
                        &column.value(&records[a]),
                        &column.value(&records[b]),
                        *direction,
                    )
                })
                .find(|o| *o != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
    }
}

fn compare_cells(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = a.compare(b);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::column::Column;

    fn schema() -> ColumnSchema<(&'static str, u8)> {
        ColumnSchema::new(vec![
            Column::new("name", "Name", |r: &(&'static str, u8)| CellValue::text(r.0)),
            Column::new("group", "Group", |r: &(&'static str, u8)| {
                CellValue::text(r.1.to_string())
            }),
        ])
    }

    #[test]
    fn cycle_walks_three_states() {
        let mut sort = SortState::default();
        sort.cycle("name", false);
        assert_eq!(sort.direction_of("name"), Some(SortDirection::Ascending));
        sort.cycle("name", false);
        assert_eq!(sort.direction_of("name"), Some(SortDirection::Descending));
        sort.cycle("name", false);
        assert!(sort.is_empty());
    }

    #[test]
    fn non_additive_cycle_replaces_other_keys() {
        let mut sort = SortState::by("group", SortDirection::Ascending);
        sort.cycle("name", false);
        assert_eq!(sort.keys().len(), 1);
        sort.cycle("group", true);
        assert_eq!(sort.keys().len(), 2);
        assert_eq!(sort.keys()[1].column, "group");
    }

    #[test]
    fn empties_sort_last_in_both_directions() {
        let records = [("b", 1), ("", 1), ("a", 1)];
        let mut indices = vec![0, 1, 2];
        SortState::by("name", SortDirection::Descending).apply(&schema(), &records, &mut indices);
        assert_eq!(indices, vec![0, 2, 1]);

        let mut indices = vec![0, 1, 2];
        SortState::by("name", SortDirection::Ascending).apply(&schema(), &records, &mut indices);
        assert_eq!(indices, vec![2, 0, 1]);
    }

    #[test]
    fn later_keys_break_ties_and_sort_is_stable() {
        let records = [("x", 2), ("y", 1), ("x", 1), ("x", 2)];
        let mut sort = SortState::by("name", SortDirection::Ascending);
        sort.cycle("group", true);
        let mut indices = vec![0, 1, 2, 3];
        sort.apply(&schema(), &records, &mut indices);
        assert_eq!(indices, vec![2, 0, 3, 1]);
    }
}
