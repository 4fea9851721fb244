//! Table configuration.
//!
//! [`TableConfig`] carries everything the host decides once per table:
//! page size options, the loading overlay, and the policies for stale pages,
//! missing fields and duplicate ids. It can be built in code or loaded from
//! TOML or JSON:
//!
//! ```
//! use horizon_grid::config::{FieldValidation, TableConfig};
//!
//! let config = TableConfig::from_toml_str(r#"
//!     items_per_page_options = [10, 20]
//!     loading_label = "Fetching users..."
//!     field_validation = "lenient"
//! "#).unwrap();
//!
//! assert_eq!(config.initial_items_per_page(), 10);
//! assert_eq!(config.field_validation, FieldValidation::Lenient);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use horizon_grid_core::logging::targets;

/// Page sizes offered when none are configured.
pub const DEFAULT_ITEMS_PER_PAGE_OPTIONS: [usize; 4] = [5, 10, 25, 50];

/// How column keys that do not resolve on a record are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldValidation {
    /// Reject the dataset or column set with [`GridError::MissingField`].
    #[default]
    Strict,
    /// Log a warning and render the cell empty.
    Lenient,
}

/// How duplicate record ids are handled when a dataset is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPolicy {
    /// Accept duplicates silently.
    Ignore,
    /// Accept duplicates and log a warning for each.
    #[default]
    Warn,
    /// Reject the dataset with [`GridError::DuplicateId`].
    Reject,
}

/// Per-table configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Whether the host is still fetching data.
    pub loading: bool,
    /// Label for the host's loading overlay.
    pub loading_label: String,
    /// Page sizes the user may choose from.
    pub items_per_page_options: Vec<usize>,
    /// Initial page size; the first option when unset.
    pub default_items_per_page: Option<usize>,
    /// Whether changing the search query returns to page 1.
    pub reset_page_on_query: bool,
    /// Policy for column keys missing on a record.
    pub field_validation: FieldValidation,
    /// Policy for duplicate record ids.
    pub id_policy: IdPolicy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            loading: false,
            loading_label: "Loading...".to_string(),
            items_per_page_options: DEFAULT_ITEMS_PER_PAGE_OPTIONS.to_vec(),
            default_items_per_page: None,
            reset_page_on_query: true,
            field_validation: FieldValidation::default(),
            id_policy: IdPolicy::default(),
        }
    }
}

impl TableConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the loading flag.
    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Sets the loading label.
    pub fn with_loading_label(mut self, label: impl Into<String>) -> Self {
        self.loading_label = label.into();
        self
    }

    /// Sets the page size options.
    pub fn with_items_per_page_options(mut self, options: impl Into<Vec<usize>>) -> Self {
        self.items_per_page_options = options.into();
        self
    }

    /// Sets the initial page size.
    pub fn with_default_items_per_page(mut self, size: usize) -> Self {
        self.default_items_per_page = Some(size);
        self
    }

    /// Sets whether a query change returns to page 1.
    pub fn with_reset_page_on_query(mut self, reset: bool) -> Self {
        self.reset_page_on_query = reset;
        self
    }

    /// Sets the missing field policy.
    pub fn with_field_validation(mut self, validation: FieldValidation) -> Self {
        self.field_validation = validation;
        self
    }

    /// Sets the duplicate id policy.
    pub fn with_id_policy(mut self, policy: IdPolicy) -> Self {
        self.id_policy = policy;
        self
    }

    /// Checks the page size options.
    pub fn validate(&self) -> Result<()> {
        if self.items_per_page_options.is_empty() {
            return Err(GridError::EmptyPageSizeOptions);
        }
        if self.items_per_page_options.contains(&0) {
            return Err(GridError::ZeroPageSize);
        }
        if let Some(size) = self.default_items_per_page
            && !self.offers_page_size(size)
        {
            return Err(GridError::DefaultPageSizeNotOffered {
                size,
                options: self.items_per_page_options.clone(),
            });
        }
        Ok(())
    }

    /// Returns `true` if `size` is one of the configured options.
    pub fn offers_page_size(&self, size: usize) -> bool {
        self.items_per_page_options.contains(&size)
    }

    /// Returns the page size a new table starts with.
    ///
    /// Assumes a validated configuration; an empty option list yields the
    /// first default option.
    pub fn initial_items_per_page(&self) -> usize {
        self.default_items_per_page
            .or_else(|| self.items_per_page_options.first().copied())
            .unwrap_or(DEFAULT_ITEMS_PER_PAGE_OPTIONS[0])
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        tracing::debug!(target: targets::CONFIG, ?config, "loaded table configuration from TOML");
        Ok(config)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        tracing::debug!(target: targets::CONFIG, ?config, "loaded table configuration from JSON");
        Ok(config)
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| GridError::ConfigParse(err.to_string()))
    }
}
