//! The record capability trait.
//!
//! The engine never inspects a record's layout. Instead every record type
//! implements [`Record`], which exposes an identity and field access by key.
//! Hosts with statically-typed rows implement the trait by hand; hosts whose
//! rows arrive as JSON can use [`DynamicRecord`].

use serde_json::Value;

use super::value::{CellValue, RecordId};
use crate::error::{GridError, Result};

/// A uniformly-shaped row the engine can search, sort and project.
///
/// # Example
///
/// ```
/// use horizon_grid::model::{CellValue, Record, RecordId};
///
/// #[derive(Clone)]
/// struct User {
///     id: i64,
///     name: String,
/// }
///
/// impl Record for User {
///     fn id(&self) -> RecordId {
///         RecordId::Int(self.id)
///     }
///
///     fn field(&self, key: &str) -> Option<CellValue> {
///         match key {
///             "id" => Some(self.id.into()),
///             "name" => Some(self.name.as_str().into()),
///             _ => None,
///         }
///     }
///
///     fn field_values(&self) -> Vec<CellValue> {
///         vec![self.id.into(), self.name.as_str().into()]
///     }
/// }
/// ```
pub trait Record: Clone + Send + Sync + 'static {
    /// Returns the identity used to key row callbacks.
    fn id(&self) -> RecordId;

    /// Returns the value of the field named `key`, or `None` if the record
    /// has no such field.
    ///
    /// A field that exists but holds no value should return
    /// `Some(CellValue::None)`.
    fn field(&self, key: &str) -> Option<CellValue>;

    /// Returns the values of every field, including the identity field.
    ///
    /// The search filter matches against all of these, not only the ones a
    /// column displays.
    fn field_values(&self) -> Vec<CellValue>;

    /// Returns `true` if any field's canonical text contains `needle`.
    ///
    /// `needle` is already lower-cased. Override when a record can answer
    /// without materializing every value.
    fn matches_text(&self, needle: &str) -> bool {
        self.field_values()
            .iter()
            .any(|value| value.search_text().contains(needle))
    }
}

/// A record with a dynamic, ordered set of fields.
///
/// The identity is stored as the `id` field so that it participates in
/// searching like any other field.
///
/// # Example
///
/// ```
/// use horizon_grid::model::{DynamicRecord, Record, RecordId};
///
/// let record = DynamicRecord::new(1).with("name", "Alpha").with("score", 9);
/// assert_eq!(record.id(), RecordId::Int(1));
/// assert_eq!(record.field("name").unwrap().as_str(), Some("Alpha"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    id: RecordId,
    fields: Vec<(String, CellValue)>,
}

impl DynamicRecord {
    /// Key of the identity field.
    pub const ID_FIELD: &'static str = "id";

    /// Creates a record holding only its identity.
    pub fn new(id: impl Into<RecordId>) -> Self {
        let id = id.into();
        Self {
            fields: vec![(Self::ID_FIELD.to_string(), CellValue::from(id.clone()))],
            id,
        }
    }

    /// Sets a field using builder pattern.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets a field, replacing any previous value under the same key.
    ///
    /// The identity field cannot be overwritten through this method.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        let key = key.into();
        if key == Self::ID_FIELD {
            return;
        }
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Returns the field keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Returns the number of fields, including the identity.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false`; a record carries at least its identity.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Builds a record from a JSON object with an integer or string `id`.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| GridError::InvalidRecord(format!("expected an object, got {value}")))?;

        let id = match object.get(Self::ID_FIELD) {
            Some(Value::Number(n)) => n.as_i64().map(RecordId::Int).ok_or_else(|| {
                GridError::InvalidRecord(format!("id {n} is not an integer"))
            })?,
            Some(Value::String(s)) => RecordId::Str(s.clone()),
            Some(other) => {
                return Err(GridError::InvalidRecord(format!(
                    "id must be a number or string, got {other}"
                )));
            }
            None => return Err(GridError::InvalidRecord("missing id field".into())),
        };

        let mut record = Self::new(id);
        for (key, value) in object {
            record.set(key.as_str(), CellValue::from_json(value));
        }
        Ok(record)
    }

    /// Parses a JSON array of objects into records.
    pub fn from_json_array(text: &str) -> Result<Vec<Self>> {
        let value: Value = serde_json::from_str(text)
            .map_err(|err| GridError::InvalidRecord(err.to_string()))?;
        match value {
            Value::Array(items) => items.iter().map(Self::from_json).collect(),
            other => Err(GridError::InvalidRecord(format!(
                "expected an array of records, got {other}"
            ))),
        }
    }
}

impl TryFrom<Value> for DynamicRecord {
    type Error = GridError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_json(&value)
    }
}

impl Record for DynamicRecord {
    fn id(&self) -> RecordId {
        self.id.clone()
    }

    fn field(&self, key: &str) -> Option<CellValue> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn field_values(&self) -> Vec<CellValue> {
        self.fields.iter().map(|(_, v)| v.clone()).collect()
    }

    fn matches_text(&self, needle: &str) -> bool {
        self.fields
            .iter()
            .any(|(_, value)| value.search_text().contains(needle))
    }
}
