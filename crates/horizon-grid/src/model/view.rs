//! The derived view handed to renderers.

use super::sort::SortOrder;

/// One header cell of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Header title.
    pub title: String,
    /// Field key the column is bound to.
    pub key: String,
    /// Sort indicator; set only on the actively sorted column.
    pub sort: Option<SortOrder>,
    /// Whether activating the header toggles sorting.
    pub sortable: bool,
}

/// Page indicator data, small enough to pass through signals by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PageInfo {
    /// Clamped 1-based page number.
    pub current_page: usize,
    /// Number of pages, at least 1.
    pub page_count: usize,
    /// Number of records passing the filter.
    pub total_filtered_count: usize,
    /// Rows per page.
    pub items_per_page: usize,
}

impl PageInfo {
    /// Returns `true` if a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Returns `true` if a next page exists.
    pub fn has_next(&self) -> bool {
        self.current_page < self.page_count
    }

    /// Returns the 1-based rank of the first row on the page, or 0 when the
    /// filtered sequence is empty.
    pub fn first_row_rank(&self) -> usize {
        if self.total_filtered_count == 0 {
            0
        } else {
            (self.current_page - 1) * self.items_per_page + 1
        }
    }

    /// Returns the 1-based rank of the last row on the page, or 0 when the
    /// filtered sequence is empty.
    pub fn last_row_rank(&self) -> usize {
        (self.current_page * self.items_per_page).min(self.total_filtered_count)
    }
}

/// The filtered, sorted and paginated projection of a dataset.
///
/// A view is a snapshot: it owns clones of the rows on the current page and
/// is never updated in place. The engine builds a new one after every state
/// change.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<T> {
    /// Records on the current page, in display order.
    pub rows: Vec<T>,
    /// Rendered text per row, one entry per column.
    pub cells: Vec<Vec<String>>,
    /// Header cells, one per column.
    pub headers: Vec<HeaderCell>,
    /// Number of records passing the filter.
    pub total_filtered_count: usize,
    /// Number of pages, at least 1.
    pub page_count: usize,
    /// Clamped 1-based page number.
    pub current_page: usize,
    /// Rows per page.
    pub items_per_page: usize,
    /// Whether the host is still fetching data.
    pub loading: bool,
    /// Label for the loading overlay.
    pub loading_label: String,
}

impl<T> DerivedView<T> {
    /// Returns the page indicator data of this view.
    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            current_page: self.current_page,
            page_count: self.page_count,
            total_filtered_count: self.total_filtered_count,
            items_per_page: self.items_per_page,
        }
    }

    /// Returns the number of rows on the page.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Returns `true` if the page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the rendered text at `row`, `column`.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.cells.get(row)?.get(column).map(String::as_str)
    }

    /// Returns the header of the actively sorted column.
    pub fn sorted_header(&self) -> Option<&HeaderCell> {
        self.headers.iter().find(|h| h.sort.is_some())
    }
}
