//! Free-text search filter.
//!
//! The filter keeps every record where at least one field's canonical text
//! contains the query, compared case-insensitively. All fields are searched,
//! not only the ones shown in columns.

use super::record::Record;

/// A normalized search query.
///
/// A query that is empty or only whitespace is inactive and matches every
/// record. An active query is lower-cased once but otherwise kept verbatim,
/// including inner and surrounding spaces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    needle: Option<String>,
}

impl SearchQuery {
    /// Normalizes `text` into a query.
    pub fn new(text: &str) -> Self {
        let needle = if text.trim().is_empty() {
            None
        } else {
            Some(text.to_lowercase())
        };
        Self { needle }
    }

    /// Returns `true` if the query filters anything.
    pub fn is_active(&self) -> bool {
        self.needle.is_some()
    }

    /// Returns the lower-cased needle, if active.
    pub fn needle(&self) -> Option<&str> {
        self.needle.as_deref()
    }

    /// Returns `true` if `record` passes the query.
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        match &self.needle {
            Some(needle) => record.matches_text(needle),
            None => true,
        }
    }
}

/// Returns the records of `rows` that match `query`, in input order.
///
/// # Example
///
/// ```
/// use horizon_grid::model::{apply_filter, DynamicRecord, Record, RecordId};
///
/// let rows = vec![
///     DynamicRecord::new(1).with("name", "Alpha"),
///     DynamicRecord::new(2).with("name", "Beta"),
/// ];
/// let hits = apply_filter(&rows, "AL");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id(), RecordId::Int(1));
/// ```
pub fn apply_filter<'a, T: Record>(rows: &'a [T], query: &str) -> Vec<&'a T> {
    filter_rows(rows.iter(), &SearchQuery::new(query))
}

/// Filters an iterator of records with a pre-normalized query.
pub fn filter_rows<'a, T, I>(rows: I, query: &SearchQuery) -> Vec<&'a T>
where
    T: Record,
    I: IntoIterator<Item = &'a T>,
{
    if !query.is_active() {
        return rows.into_iter().collect();
    }
    rows.into_iter().filter(|row| query.matches(*row)).collect()
}
