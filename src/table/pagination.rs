//! Fixed-size page window over the filtered row model.

use std::ops::Range;

/// Rows per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Zero-based page index and page size.
///
/// Moving past either end is a no-op. There is always at least one page,
/// even for zero rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_index: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// A size of zero is treated as one.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub const fn page_index(&self) -> usize {
        self.page_index
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub fn page_count(&self, total: usize) -> usize {
        ((total + self.page_size - 1) / self.page_size).max(1)
    }

    #[must_use]
    pub fn can_next(&self, total: usize) -> bool {
        self.page_index + 1 < self.page_count(total)
    }

    #[must_use]
    pub const fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    /// Returns whether the page changed.
    pub fn next(&mut self, total: usize) -> bool {
        if self.can_next(total) {
            self.page_index += 1;
            true
        } else {
            false
        }
    }

    /// Returns whether the page changed.
    pub fn previous(&mut self) -> bool {
        if self.can_previous() {
            self.page_index -= 1;
            true
        } else {
            false
        }
    }

    /// Pulls the index back inside `0..page_count(total)`.
    pub fn clamp(&mut self, total: usize) {
        self.page_index = self.page_index.min(self.page_count(total) - 1);
    }

    /// Row-model positions covered by the current page.
    #[must_use]
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.page_index * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rows_still_have_one_page() {
        let pagination = Pagination::default();
        assert_eq!(pagination.page_count(0), 1);
        assert_eq!(pagination.range(0), 0..0);
    }

    #[test]
    fn twenty_five_rows_make_three_pages() {
        let mut pagination = Pagination::new(10);
        assert_eq!(pagination.page_count(25), 3);
        assert!(pagination.next(25));
        assert!(pagination.next(25));
        assert_eq!(pagination.range(25), 20..25);
        assert!(!pagination.next(25));
        assert_eq!(pagination.page_index(), 2);
    }

    #[test]
    fn previous_on_first_page_is_noop() {
        let mut pagination = Pagination::new(10);
        assert!(!pagination.previous());
        assert_eq!(pagination.page_index(), 0);
    }

    #[test]
    fn clamp_after_shrink() {
        let mut pagination = Pagination::new(10);
        pagination.next(25);
        pagination.next(25);
        pagination.clamp(12);
        assert_eq!(pagination.page_index(), 1);
    }
}
