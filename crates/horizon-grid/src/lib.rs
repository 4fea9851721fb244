//! Horizon Grid - a generic in-memory table engine.
//!
//! Hand the engine a dataset, a set of column descriptors and a
//! configuration; it produces a filtered, sorted and paginated view and
//! relays row interactions back to the host through signals.
//!
//! # Example
//!
//! ```
//! use horizon_grid::prelude::*;
//!
//! let rows = DynamicRecord::from_json_array(r#"[
//!     {"id": 1, "name": "Alpha", "age": 31},
//!     {"id": 2, "name": "Beta", "age": 27}
//! ]"#).unwrap();
//!
//! let columns = vec![Column::new("Name", "name"), Column::new("Age", "age")];
//! let engine = TableEngine::new(rows, columns, TableConfig::default()).unwrap();
//!
//! engine.toggle_sort("age").unwrap();
//! assert_eq!(engine.view().cell(0, 0), Some("Beta"));
//! ```

pub use horizon_grid_core::*;

pub mod config;
pub mod error;
pub mod model;
pub mod prelude;

pub use error::{GridError, Result};
