//! Prelude module for Horizon Grid.
//!
//! ```
//! use horizon_grid::prelude::*;
//! ```

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use crate::{ConnectionId, Property, Signal};

// ============================================================================
// Table Model
// ============================================================================

pub use crate::model::{
    CellValue, Column, DerivedView, DynamicRecord, HeaderCell, PageInfo, Record, RecordId,
    SortOrder, SortState, TableEngine, TableSignals,
};

// ============================================================================
// Configuration and Errors
// ============================================================================

pub use crate::config::{FieldValidation, IdPolicy, TableConfig};
pub use crate::error::GridError;
