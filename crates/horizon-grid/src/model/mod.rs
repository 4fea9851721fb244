//! Table model for Horizon Grid.
//!
//! This module turns an ordered dataset into the rows a table actually
//! shows. Three independent transformations run in a fixed order on every
//! state change:
//!
//! 1. **Filter**: keep records whose fields contain the search query
//! 2. **Sort**: stable single-column sort
//! 3. **Paginate**: slice out the current page, clamping the page number
//!
//! # Core Types
//!
//! - `Record`: The trait row types implement to expose identity and fields
//! - `DynamicRecord`: A JSON-friendly record with a dynamic set of fields
//! - `CellValue`: Dynamically-typed field value with a canonical text form
//! - `Column`: Display and sort descriptor bound to one field
//! - `TableEngine`: Interaction state plus the derived view
//! - `DerivedView`: The projection handed to renderers
//!
//! The transformations are also exported as free functions so hosts can
//! run them outside an engine.
//!
//! # Example
//!
//! ```
//! use horizon_grid::model::{apply_filter, apply_sort, DynamicRecord, Record, RecordId, SortState};
//!
//! let rows = vec![
//!     DynamicRecord::new(1).with("name", "Mallory").with("v", 5),
//!     DynamicRecord::new(2).with("name", "Trent").with("v", 5),
//!     DynamicRecord::new(3).with("name", "Mike").with("v", 1),
//! ];
//!
//! let hits = apply_filter(&rows, "m");
//! let sorted = apply_sort(hits, Some(&SortState::ascending("v")), &[]);
//! let ids: Vec<RecordId> = sorted.iter().map(|r| r.id()).collect();
//! assert_eq!(ids, vec![RecordId::Int(3), RecordId::Int(1)]);
//! ```

mod column;
mod engine;
mod filter;
mod pagination;
mod record;
mod sort;
mod value;
mod view;

pub use column::{CellRenderer, Column, FieldAccessor};
pub use engine::{TableEngine, TableSignals};
pub use filter::{SearchQuery, apply_filter, filter_rows};
pub use pagination::{PageSlice, PageState, apply_pagination, page_count};
pub use record::{DynamicRecord, Record};
pub use sort::{SortOrder, SortState, apply_sort, compare_values, sort_value};
pub use value::{CellValue, RecordId};
pub use view::{DerivedView, HeaderCell, PageInfo};
