//! The table engine.
//!
//! [`TableEngine`] owns the interaction state of one table (query, sort,
//! page, page size, loading flag) on top of an immutable snapshot of the
//! host's dataset. Every state change rebuilds the [`DerivedView`] by running
//! the dataset through filter, sort and pagination, then notifies observers
//! through [`TableSignals`].
//!
//! All methods take `&self`, so an engine can be shared behind an `Arc` and
//! driven from signal slots. No lock is held while a slot runs.
//! `view_changed` is always emitted before the more specific signal of the
//! same call.
//!
//! # Example
//!
//! ```
//! use horizon_grid::config::TableConfig;
//! use horizon_grid::model::{Column, DynamicRecord, TableEngine};
//!
//! let rows = (1..=25i64)
//!     .map(|i| DynamicRecord::new(i).with("name", format!("user{i}")))
//!     .collect();
//! let columns = vec![Column::new("Name", "name")];
//! let config = TableConfig::new().with_items_per_page_options([10]);
//!
//! let engine = TableEngine::new(rows, columns, config).unwrap();
//! engine.set_page(5);
//!
//! let view = engine.view();
//! assert_eq!(view.page_count, 3);
//! assert_eq!(view.current_page, 3);
//! assert_eq!(view.cell(0, 0), Some("user21"));
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use horizon_grid_core::logging::{span_names, targets};
use horizon_grid_core::{PerfSpan, Property, Signal, grid_warn};
use parking_lot::RwLock;

use super::column::Column;
use super::filter::{SearchQuery, filter_rows};
use super::pagination::{PageState, apply_pagination};
use super::record::Record;
use super::sort::{SortState, apply_sort};
use super::value::RecordId;
use super::view::{DerivedView, HeaderCell, PageInfo};
use crate::config::{FieldValidation, IdPolicy, TableConfig};
use crate::error::{GridError, Result};

/// Signals emitted by a [`TableEngine`].
pub struct TableSignals<T> {
    /// Emitted after every recompute with the new page indicator data.
    pub view_changed: Signal<PageInfo>,
    /// Emitted when the active sort changes.
    pub sort_changed: Signal<Option<SortState>>,
    /// Emitted when the search query changes.
    pub query_changed: Signal<String>,
    /// Emitted when a row is clicked.
    pub row_clicked: Signal<T>,
    /// Emitted when editing a row is requested.
    pub row_edit_requested: Signal<T>,
}

impl<T: 'static> TableSignals<T> {
    fn new() -> Self {
        Self {
            view_changed: Signal::new(),
            sort_changed: Signal::new(),
            query_changed: Signal::new(),
            row_clicked: Signal::new(),
            row_edit_requested: Signal::new(),
        }
    }
}

/// A filtered, sorted and paginated view over a dataset.
pub struct TableEngine<T: Record> {
    rows: RwLock<Arc<[T]>>,
    columns: RwLock<Arc<[Column<T>]>>,
    config: TableConfig,
    query: Property<String>,
    sort: Property<Option<SortState>>,
    /// Stored as requested; clamped only when the view is built.
    page: Property<usize>,
    items_per_page: Property<usize>,
    loading: Property<bool>,
    view: RwLock<Arc<DerivedView<T>>>,
    signals: TableSignals<T>,
}

impl<T: Record> TableEngine<T> {
    /// Creates an engine over `rows` displayed through `columns`.
    ///
    /// Fails if the configuration is invalid, if a column key does not
    /// resolve on a record under [`FieldValidation::Strict`], or if ids
    /// repeat under [`IdPolicy::Reject`].
    pub fn new(rows: Vec<T>, columns: Vec<Column<T>>, config: TableConfig) -> Result<Self> {
        config.validate()?;
        validate_fields(&rows, &columns, config.field_validation)?;
        validate_ids(&rows, config.id_policy)?;

        let engine = Self {
            rows: RwLock::new(rows.into()),
            columns: RwLock::new(columns.into()),
            query: Property::new(String::new()),
            sort: Property::new(None),
            page: Property::new(1),
            items_per_page: Property::new(config.initial_items_per_page()),
            loading: Property::new(config.loading),
            view: RwLock::new(Arc::new(DerivedView {
                rows: Vec::new(),
                cells: Vec::new(),
                headers: Vec::new(),
                total_filtered_count: 0,
                page_count: 1,
                current_page: 1,
                items_per_page: config.initial_items_per_page(),
                loading: config.loading,
                loading_label: config.loading_label.clone(),
            })),
            config,
            signals: TableSignals::new(),
        };
        engine.recompute();
        Ok(engine)
    }

    /// Returns the engine's signals.
    pub fn signals(&self) -> &TableSignals<T> {
        &self.signals
    }

    /// Returns the configuration the engine was created with.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Returns the current derived view.
    pub fn view(&self) -> Arc<DerivedView<T>> {
        self.view.read().clone()
    }

    /// Returns the page indicator data of the current view.
    pub fn page_info(&self) -> PageInfo {
        self.view.read().page_info()
    }

    /// Returns the dataset snapshot.
    pub fn dataset(&self) -> Arc<[T]> {
        self.rows.read().clone()
    }

    /// Returns the column set.
    pub fn columns(&self) -> Arc<[Column<T>]> {
        self.columns.read().clone()
    }

    /// Returns the current search query.
    pub fn query(&self) -> String {
        self.query.get()
    }

    /// Returns the active sort, if any.
    pub fn sort_state(&self) -> Option<SortState> {
        self.sort.get()
    }

    /// Returns the current page size.
    pub fn items_per_page(&self) -> usize {
        self.items_per_page.get()
    }

    /// Returns whether the loading flag is set.
    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// Changes the search query.
    ///
    /// Returns `false` and leaves the view untouched if the query is equal to
    /// the current one. Otherwise goes back to page 1 when
    /// [`TableConfig::reset_page_on_query`] is set.
    pub fn set_query(&self, text: impl Into<String>) -> bool {
        let text = text.into();
        if !self.query.set(text.clone()) {
            return false;
        }
        if self.config.reset_page_on_query {
            self.page.set(1);
        }
        tracing::debug!(target: targets::ENGINE, query = %text, "query changed");

        let info = self.recompute();
        self.signals.view_changed.emit(info);
        self.signals.query_changed.emit(text);
        true
    }

    /// Activates the header of the column `key`.
    ///
    /// The same key flips direction; a new key starts ascending. Returns the
    /// resulting sort.
    pub fn toggle_sort(&self, key: &str) -> Result<SortState> {
        {
            let columns = self.columns.read();
            let column = columns
                .iter()
                .find(|c| c.key() == key)
                .ok_or_else(|| GridError::unknown_column(key))?;
            if !column.is_sortable() {
                return Err(GridError::ColumnNotSortable {
                    key: key.to_string(),
                });
            }
        }

        let next = SortState::toggle(self.sort.get().as_ref(), key);
        self.sort.set(Some(next.clone()));
        tracing::debug!(target: targets::ENGINE, key = %next.key, order = ?next.order, "sort toggled");

        let info = self.recompute();
        self.signals.view_changed.emit(info);
        self.signals.sort_changed.emit(Some(next.clone()));
        Ok(next)
    }

    /// Removes the active sort, restoring dataset order.
    ///
    /// Returns `false` if no sort was active.
    pub fn clear_sort(&self) -> bool {
        if !self.sort.set(None) {
            return false;
        }
        tracing::debug!(target: targets::ENGINE, "sort cleared");

        let info = self.recompute();
        self.signals.view_changed.emit(info);
        self.signals.sort_changed.emit(None);
        true
    }

    /// Requests page `page` (1-based).
    ///
    /// Returns `false` if `page` equals the stored page. Out-of-range values
    /// are stored as given and clamped when the view is built.
    pub fn set_page(&self, page: usize) -> bool {
        if !self.page.set(page) {
            return false;
        }
        tracing::debug!(target: targets::ENGINE, page, "page changed");
        self.refresh();
        true
    }

    /// Moves to the page after the one displayed. No-op on the last page.
    pub fn next_page(&self) -> bool {
        let info = self.page_info();
        info.has_next() && self.set_page(info.current_page + 1)
    }

    /// Moves to the page before the one displayed. No-op on the first page.
    pub fn previous_page(&self) -> bool {
        let info = self.page_info();
        info.has_previous() && self.set_page(info.current_page - 1)
    }

    /// Changes the page size. The page number is kept and clamped on read.
    ///
    /// Returns `Ok(false)` if `size` is already the page size.
    pub fn set_items_per_page(&self, size: usize) -> Result<bool> {
        if !self.config.offers_page_size(size) {
            return Err(GridError::InvalidPageSize {
                size,
                options: self.config.items_per_page_options.clone(),
            });
        }
        if !self.items_per_page.set(size) {
            return Ok(false);
        }
        tracing::debug!(target: targets::ENGINE, items_per_page = size, "page size changed");
        self.refresh();
        Ok(true)
    }

    /// Sets the loading flag surfaced in the view.
    pub fn set_loading(&self, loading: bool) -> bool {
        if !self.loading.set(loading) {
            return false;
        }
        tracing::debug!(target: targets::ENGINE, loading, "loading flag changed");
        self.refresh();
        true
    }

    /// Replaces the dataset. Query, sort and page state are kept.
    pub fn set_dataset(&self, rows: Vec<T>) -> Result<()> {
        {
            let columns = self.columns.read();
            validate_fields(&rows, &columns, self.config.field_validation)?;
        }
        validate_ids(&rows, self.config.id_policy)?;

        tracing::debug!(target: targets::ENGINE, row_count = rows.len(), "dataset replaced");
        *self.rows.write() = rows.into();
        self.refresh();
        Ok(())
    }

    /// Replaces the column set. Query, sort and page state are kept.
    ///
    /// A sort on a key the new columns no longer declare stays active and
    /// reads the record field directly. A sort on a column the new set marks
    /// unsortable is cleared, and [`TableSignals::sort_changed`] fires with
    /// `None` after the view update.
    pub fn set_columns(&self, columns: Vec<Column<T>>) -> Result<()> {
        {
            let rows = self.rows.read();
            validate_fields(&rows, &columns, self.config.field_validation)?;
        }

        let sort_disabled = self.sort.get().is_some_and(|sort| {
            columns
                .iter()
                .any(|c| c.key() == sort.key && !c.is_sortable())
        });

        tracing::debug!(target: targets::ENGINE, column_count = columns.len(), "columns replaced");
        *self.columns.write() = columns.into();

        if sort_disabled {
            self.sort.set(None);
            tracing::debug!(target: targets::ENGINE, "sort cleared on unsortable column");
        }

        self.refresh();
        if sort_disabled {
            self.signals.sort_changed.emit(None);
        }
        Ok(())
    }

    /// Forwards a click on `record` to [`TableSignals::row_clicked`].
    pub fn click_row(&self, record: &T) {
        self.signals.row_clicked.emit(record.clone());
    }

    /// Forwards an edit request for `record` to
    /// [`TableSignals::row_edit_requested`].
    pub fn request_row_edit(&self, record: &T) {
        self.signals.row_edit_requested.emit(record.clone());
    }

    /// Clicks the row at `index` of the current page.
    ///
    /// Returns `false` if the page has no such row.
    pub fn click_row_at(&self, index: usize) -> bool {
        match self.page_row(index) {
            Some(record) => {
                self.signals.row_clicked.emit(record);
                true
            }
            None => false,
        }
    }

    /// Requests an edit of the row at `index` of the current page.
    ///
    /// Returns `false` if the page has no such row.
    pub fn request_row_edit_at(&self, index: usize) -> bool {
        match self.page_row(index) {
            Some(record) => {
                self.signals.row_edit_requested.emit(record);
                true
            }
            None => false,
        }
    }

    /// Returns the first record of the dataset with identity `id`.
    pub fn find_row(&self, id: &RecordId) -> Option<T> {
        self.rows.read().iter().find(|row| row.id() == *id).cloned()
    }

    fn page_row(&self, index: usize) -> Option<T> {
        let row = self.view.read().rows.get(index).cloned();
        if row.is_none() {
            tracing::debug!(target: targets::ENGINE, index, "row index outside the current page");
        }
        row
    }

    fn refresh(&self) {
        let info = self.recompute();
        self.signals.view_changed.emit(info);
    }

    /// Rebuilds the view from the current state and returns its page info.
    fn recompute(&self) -> PageInfo {
        let _perf = PerfSpan::new(span_names::RECOMPUTE);

        let rows = self.dataset();
        let columns = self.columns();
        let sort = self.sort.get();
        let filtered = self
            .query
            .with(|query| filter_rows(rows.iter(), &SearchQuery::new(query)));
        let filtered_count = filtered.len();
        let sorted = apply_sort(filtered, sort.as_ref(), &columns);
        let slice = apply_pagination(
            sorted,
            &PageState::new(self.page.get(), self.items_per_page.get()),
        );

        let cells = slice
            .rows
            .iter()
            .map(|row| columns.iter().map(|c| c.display_text(row)).collect())
            .collect();
        let headers = columns
            .iter()
            .map(|column| HeaderCell {
                title: column.title().to_string(),
                key: column.key().to_string(),
                sort: sort
                    .as_ref()
                    .filter(|s| s.key == column.key())
                    .map(|s| s.order),
                sortable: column.is_sortable(),
            })
            .collect();

        let view = DerivedView {
            rows: slice.rows.into_iter().cloned().collect(),
            cells,
            headers,
            total_filtered_count: slice.total_count,
            page_count: slice.page_count,
            current_page: slice.current_page,
            items_per_page: self.items_per_page.get(),
            loading: self.loading.get(),
            loading_label: self.config.loading_label.clone(),
        };
        let info = view.page_info();

        tracing::trace!(
            target: targets::ENGINE,
            total = rows.len(),
            filtered = filtered_count,
            page = info.current_page,
            page_count = info.page_count,
            "view recomputed"
        );

        *self.view.write() = Arc::new(view);
        info
    }
}

/// Checks that every column key resolves on every record.
fn validate_fields<T: Record>(
    rows: &[T],
    columns: &[Column<T>],
    mode: FieldValidation,
) -> Result<()> {
    let _perf = PerfSpan::new(span_names::VALIDATE);

    for column in columns {
        let mut missing = rows.iter().filter(|row| !column.resolves_on(row));
        let Some(first) = missing.next() else {
            continue;
        };
        match mode {
            FieldValidation::Strict => {
                return Err(GridError::missing_field(column.key(), first.id()));
            }
            FieldValidation::Lenient => {
                let count = 1 + missing.count();
                grid_warn!(
                    column = column.key(),
                    first_record = %first.id(),
                    count,
                    "column key does not resolve, cells render empty"
                );
            }
        }
    }
    Ok(())
}

/// Applies the duplicate id policy to `rows`.
fn validate_ids<T: Record>(rows: &[T], policy: IdPolicy) -> Result<()> {
    if policy == IdPolicy::Ignore {
        return Ok(());
    }

    let mut seen = HashSet::with_capacity(rows.len());
    let mut reported = HashSet::new();
    for row in rows {
        let id = row.id();
        if seen.insert(id.clone()) {
            continue;
        }
        if policy == IdPolicy::Reject {
            return Err(GridError::DuplicateId { id });
        }
        if reported.insert(id.clone()) {
            grid_warn!(id = %id, "duplicate record id, row callbacks may be ambiguous");
        }
    }
    Ok(())
}
