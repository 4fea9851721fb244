//! Error types for the table engine.

use crate::model::RecordId;

/// Result type alias for table engine operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors surfaced to the host by the table engine.
///
/// All of these are configuration or misuse errors detected at the boundary.
/// A stale page index is never an error; it is clamped when the view is read.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// A column key does not resolve on a record.
    #[error("Column '{column}' does not resolve on record {record}")]
    MissingField { column: String, record: RecordId },

    /// The configured page size options are empty.
    #[error("items_per_page_options must contain at least one page size")]
    EmptyPageSizeOptions,

    /// A configured page size is zero.
    #[error("Page sizes must be positive")]
    ZeroPageSize,

    /// The default page size is not one of the configured options.
    #[error("Default page size {size} is not one of the configured options {options:?}")]
    DefaultPageSizeNotOffered { size: usize, options: Vec<usize> },

    /// A requested page size is not one of the configured options.
    #[error("Page size {size} is not one of the configured options {options:?}")]
    InvalidPageSize { size: usize, options: Vec<usize> },

    /// A sort was requested on a key that no column declares.
    #[error("No column with key '{key}'")]
    UnknownColumn { key: String },

    /// A sort was requested on a column that is not sortable.
    #[error("Column '{key}' is not sortable")]
    ColumnNotSortable { key: String },

    /// Two records share an identity and duplicates are rejected.
    #[error("Duplicate record id {id}")]
    DuplicateId { id: RecordId },

    /// A configuration document could not be parsed.
    #[error("Failed to parse table configuration: {0}")]
    ConfigParse(String),

    /// A JSON value could not be turned into a record.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl GridError {
    /// Create a missing field error.
    pub fn missing_field(column: impl Into<String>, record: RecordId) -> Self {
        Self::MissingField {
            column: column.into(),
            record,
        }
    }

    /// Create an unknown column error.
    pub fn unknown_column(key: impl Into<String>) -> Self {
        Self::UnknownColumn { key: key.into() }
    }

    /// Returns `true` for errors caused by configuration rather than a call.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::EmptyPageSizeOptions
                | Self::ZeroPageSize
                | Self::DefaultPageSizeNotOffered { .. }
                | Self::DuplicateId { .. }
                | Self::ConfigParse(_)
        )
    }
}

impl From<toml::de::Error> for GridError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = GridError::missing_field("email", RecordId::Int(7));
        assert_eq!(err.to_string(), "Column 'email' does not resolve on record 7");
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_call_errors_are_not_configuration_errors() {
        assert!(!GridError::unknown_column("v").is_configuration_error());
        let err = GridError::InvalidPageSize {
            size: 7,
            options: vec![5, 10],
        };
        assert_eq!(err.to_string(), "Page size 7 is not one of the configured options [5, 10]");
        assert!(!err.is_configuration_error());
    }
}
