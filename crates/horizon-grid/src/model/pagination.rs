//! Page slicing with clamp-on-read.
//!
//! The stored page number may point past the end of the data after the
//! dataset, query or page size changes. It is never corrected on write;
//! every read clamps it into `[1, page_count]`.

use std::ops::Range;

/// The requested page position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageState {
    /// 1-based page number as last requested. May be out of range.
    pub current_page: usize,
    /// Rows per page. Always positive.
    pub items_per_page: usize,
}

impl PageState {
    /// Creates a page state.
    pub fn new(current_page: usize, items_per_page: usize) -> Self {
        Self {
            current_page,
            items_per_page,
        }
    }

    /// Returns the page number clamped for a sequence of `total` rows.
    pub fn clamped_page(&self, total: usize) -> usize {
        self.current_page
            .clamp(1, page_count(total, self.items_per_page))
    }

    /// Returns the row range of the clamped page within `total` rows.
    pub fn row_range(&self, total: usize) -> Range<usize> {
        let per_page = self.items_per_page.max(1);
        let page = self.clamped_page(total);
        let start = ((page - 1) * per_page).min(total);
        let end = (start + per_page).min(total);
        start..end
    }
}

/// Returns the number of pages needed for `total` rows, never less than 1.
///
/// ```
/// use horizon_grid::model::page_count;
///
/// assert_eq!(page_count(25, 10), 3);
/// assert_eq!(page_count(0, 10), 1);
/// ```
pub fn page_count(total: usize, items_per_page: usize) -> usize {
    total.div_ceil(items_per_page.max(1)).max(1)
}

/// One page of a filtered and sorted sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<R> {
    /// Rows on the page.
    pub rows: Vec<R>,
    /// Length of the whole sequence before slicing.
    pub total_count: usize,
    /// Number of pages, at least 1.
    pub page_count: usize,
    /// The clamped 1-based page number the rows belong to.
    pub current_page: usize,
}

/// Slices `rows` down to the page described by `state`.
pub fn apply_pagination<R>(rows: Vec<R>, state: &PageState) -> PageSlice<R> {
    let total_count = rows.len();
    let range = state.row_range(total_count);
    let page_rows = rows
        .into_iter()
        .skip(range.start)
        .take(range.end - range.start)
        .collect();

    PageSlice {
        rows: page_rows,
        total_count,
        page_count: page_count(total_count, state.items_per_page),
        current_page: state.clamped_page(total_count),
    }
}
