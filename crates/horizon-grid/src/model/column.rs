//! Column descriptors.
//!
//! A [`Column`] binds a display title to one field of a record. Columns
//! define both what the table shows and which fields can be sorted on.

use std::fmt;
use std::sync::Arc;

use super::record::Record;
use super::value::CellValue;

/// Type alias for a field accessor function.
pub type FieldAccessor<T> = Arc<dyn Fn(&T) -> Option<CellValue> + Send + Sync>;

/// Type alias for a cell render function: (value, record) -> display text.
pub type CellRenderer<T> = Arc<dyn Fn(&CellValue, &T) -> String + Send + Sync>;

/// A display and sort descriptor bound to one field of a record.
///
/// Values are read through an explicit accessor when one is supplied, and
/// through [`Record::field`] otherwise.
///
/// # Example
///
/// ```
/// use horizon_grid::model::{CellValue, Column, DynamicRecord};
///
/// let price = Column::<DynamicRecord>::new("Price", "price")
///     .with_render(|value, _record| match value.as_float() {
///         Some(p) => format!("${p:.2}"),
///         None => String::new(),
///     });
///
/// let record = DynamicRecord::new(1).with("price", 4.5);
/// assert_eq!(price.display_text(&record), "$4.50");
/// ```
pub struct Column<T> {
    title: String,
    key: String,
    accessor: Option<FieldAccessor<T>>,
    render: Option<CellRenderer<T>>,
    sortable: bool,
}

impl<T: Record> Column<T> {
    /// Creates a column showing the field `key` under `title`.
    pub fn new(title: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            key: key.into(),
            accessor: None,
            render: None,
            sortable: true,
        }
    }

    /// Reads the column's value through `accessor` instead of [`Record::field`].
    ///
    /// Returning `None` means the field is missing on that record.
    pub fn with_accessor<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&T) -> Option<CellValue> + Send + Sync + 'static,
    {
        self.accessor = Some(Arc::new(accessor));
        self
    }

    /// Projects values for display with `render`.
    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&CellValue, &T) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Sets whether the column can be sorted on.
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Returns the header title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the field key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns whether the column can be sorted on.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Returns the raw value for `record`, or `None` if the field is missing.
    pub fn value(&self, record: &T) -> Option<CellValue> {
        match &self.accessor {
            Some(accessor) => accessor(record),
            None => record.field(&self.key),
        }
    }

    /// Returns `true` if the column's field exists on `record`.
    pub fn resolves_on(&self, record: &T) -> bool {
        self.value(record).is_some()
    }

    /// Returns the value used for sorting; missing fields sort as `None`.
    pub fn sort_value(&self, record: &T) -> CellValue {
        self.value(record).unwrap_or_default()
    }

    /// Returns the display text for `record`.
    ///
    /// A missing field renders as an empty string and never reaches the
    /// render function.
    pub fn display_text(&self, record: &T) -> String {
        match (self.value(record), &self.render) {
            (Some(value), Some(render)) => render(&value, record),
            (Some(value), None) => value.to_string(),
            (None, _) => String::new(),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            title: self.title.clone(),
            key: self.key.clone(),
            accessor: self.accessor.clone(),
            render: self.render.clone(),
            sortable: self.sortable,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("title", &self.title)
            .field("key", &self.key)
            .field("has_accessor", &self.accessor.is_some())
            .field("has_render", &self.render.is_some())
            .field("sortable", &self.sortable)
            .finish()
    }
}
