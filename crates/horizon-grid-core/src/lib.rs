//! Core systems for Horizon Grid.
//!
//! This crate provides the reactive building blocks the table engine is
//! assembled from:
//!
//! - **Signal/Slot System**: Type-safe notification of view changes and row events
//! - **Property System**: State cells that report whether a write changed them
//! - **Logging**: `tracing` targets, span names and the `grid_warn!` macro
//!
//! # Example
//!
//! ```
//! use horizon_grid_core::{Property, Signal};
//!
//! let query = Property::new(String::new());
//! let query_changed = Signal::<String>::new();
//!
//! query_changed.connect(|text| println!("searching for {text:?}"));
//!
//! if query.set("alpha".to_string()) {
//!     query_changed.emit(query.get());
//! }
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
