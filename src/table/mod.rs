//! Generic tabular model: column schema, filter/sort state, pagination and
//! the adapter that derives visible rows from them.
//!
//! Nothing here knows about rendering or about concrete record types.
//!
//! ```text
//! records + ColumnSchema ─┐
//! FilterState ────────────┼─► compute_row_model ─► Pagination ─► visible rows
//! SortState ──────────────┘
//! ```

pub mod adapter;
pub mod column;
pub mod debounce;
pub mod filter;
pub mod pagination;
pub mod sort;

pub use adapter::{compute_row_model, OptionCount, TableAdapter};
pub use column::{
    Cell, CellStyle, CellValue, Column, ColumnFilter, ColumnSchema, FilterOption, FilterVariant,
};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use filter::{FilterState, FilterValue};
pub use pagination::{Pagination, DEFAULT_PAGE_SIZE};
pub use sort::{SortDirection, SortKey, SortState};
