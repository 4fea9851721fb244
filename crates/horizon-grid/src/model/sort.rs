//! Single-column stable sorting.
//!
//! Sorting orders rows by one field using a total order over [`CellValue`]s.
//! Equal keys keep their input order in both directions: descending reverses
//! the comparison, never the output.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::column::Column;
use super::record::Record;
use super::value::CellValue;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order (A-Z, 0-9).
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    /// Descending order (Z-A, 9-0).
    #[serde(alias = "desc")]
    Descending,
}

impl SortOrder {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Applies this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// The active sort: one field key and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    /// Field key being sorted on.
    pub key: String,
    /// Sort direction.
    pub order: SortOrder,
}

impl SortState {
    /// Creates an ascending sort on `key`.
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            order: SortOrder::Ascending,
        }
    }

    /// Creates a descending sort on `key`.
    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            order: SortOrder::Descending,
        }
    }

    /// Returns the sort that results from activating the header for `key`.
    ///
    /// Activating the current key flips its direction; any other key starts
    /// ascending.
    ///
    /// ```
    /// use horizon_grid::model::{SortOrder, SortState};
    ///
    /// let first = SortState::toggle(None, "v");
    /// assert_eq!(first, SortState::ascending("v"));
    /// let second = SortState::toggle(Some(&first), "v");
    /// assert_eq!(second.order, SortOrder::Descending);
    /// assert_eq!(SortState::toggle(Some(&second), "name"), SortState::ascending("name"));
    /// ```
    pub fn toggle(current: Option<&SortState>, key: &str) -> SortState {
        match current {
            Some(state) if state.key == key => SortState {
                key: state.key.clone(),
                order: state.order.toggled(),
            },
            _ => SortState::ascending(key),
        }
    }
}

/// Rank of a value's type in the cross-type total order.
fn type_rank(value: &CellValue) -> u8 {
    match value {
        CellValue::None => 0,
        CellValue::Bool(_) => 1,
        CellValue::Int(_) | CellValue::Float(_) => 2,
        CellValue::Str(_) => 3,
        CellValue::List(_) => 4,
        CellValue::Map(_) => 5,
    }
}

/// Compares two values in ascending order.
///
/// This is a total order: values of different types order by type
/// (`None < Bool < number < Str < List < Map`), integers and floats compare
/// by exact numeric value, strings compare by code point, lists compare
/// element-wise and maps compare by their canonical text.
///
/// Numbers equal in value compare equal regardless of representation, so
/// `Int(2)`, `Float(2.0)` and `Float(-0.0)`/`Int(0)` tie. NaN sorts after
/// every number when positive and before every number when negative.
pub fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::None, CellValue::None) => Ordering::Equal,
        (CellValue::Bool(x), CellValue::Bool(y)) => x.cmp(y),
        (CellValue::Int(x), CellValue::Int(y)) => x.cmp(y),
        (CellValue::Int(x), CellValue::Float(y)) => compare_int_float(*x, *y),
        (CellValue::Float(x), CellValue::Int(y)) => compare_int_float(*y, *x).reverse(),
        (CellValue::Float(x), CellValue::Float(y)) => compare_floats(*x, *y),
        (CellValue::Str(x), CellValue::Str(y)) => x.cmp(y),
        (CellValue::List(x), CellValue::List(y)) => {
            for (xi, yi) in x.iter().zip(y.iter()) {
                let ord = compare_values(xi, yi);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        (CellValue::Map(_), CellValue::Map(_)) => a.to_string().cmp(&b.to_string()),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Compares two floats by value; `-0.0` equals `0.0`.
fn compare_floats(x: f64, y: f64) -> Ordering {
    x.partial_cmp(&y).unwrap_or_else(|| x.total_cmp(&y))
}

/// Compares an integer with a float without rounding the integer.
///
/// Casting an `i64` above 2^53 to `f64` rounds it, which would make distinct
/// integers equal to the same float and break transitivity.
fn compare_int_float(x: i64, y: f64) -> Ordering {
    if !y.is_finite() {
        return (x as f64).total_cmp(&y);
    }
    let floor = y.floor();
    // Saturates outside the i128 range, which still orders correctly
    // against any i64.
    match i128::from(x).cmp(&(floor as i128)) {
        Ordering::Equal if y > floor => Ordering::Less,
        ord => ord,
    }
}

/// Returns the value `record` contributes to a sort on `key`.
///
/// The column declaring `key` is used when there is one, so accessors apply;
/// otherwise the record's own field is read. Missing fields sort as `None`.
pub fn sort_value<T: Record>(record: &T, key: &str, columns: &[Column<T>]) -> CellValue {
    match columns.iter().find(|c| c.key() == key) {
        Some(column) => column.sort_value(record),
        None => record.field(key).unwrap_or_default(),
    }
}

/// Sorts `rows` by `sort`, returning a new sequence.
///
/// With no active sort the input order is returned unchanged. The sort is
/// stable in both directions.
pub fn apply_sort<'a, T: Record>(
    rows: Vec<&'a T>,
    sort: Option<&SortState>,
    columns: &[Column<T>],
) -> Vec<&'a T> {
    let Some(sort) = sort else {
        return rows;
    };

    // Extract each key once instead of on every comparison.
    let mut keyed: Vec<(CellValue, &'a T)> = rows
        .into_iter()
        .map(|row| (sort_value(row, &sort.key, columns), row))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| sort.order.apply(compare_values(a, b)));
    keyed.into_iter().map(|(_, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DynamicRecord, RecordId};

    fn ids(rows: &[&DynamicRecord]) -> Vec<RecordId> {
        rows.iter().map(|r| r.id()).collect()
    }

    fn sample() -> Vec<DynamicRecord> {
        vec![
            DynamicRecord::new(1).with("v", 5),
            DynamicRecord::new(2).with("v", 5),
            DynamicRecord::new(3).with("v", 1),
        ]
    }

    #[test]
    fn test_no_sort_keeps_order() {
        let rows = sample();
        let sorted = apply_sort(rows.iter().collect(), None, &[]);
        assert_eq!(ids(&sorted), vec![RecordId::Int(1), RecordId::Int(2), RecordId::Int(3)]);
    }

    #[test]
    fn test_ascending_is_stable() {
        let rows = sample();
        let sorted = apply_sort(rows.iter().collect(), Some(&SortState::ascending("v")), &[]);
        assert_eq!(ids(&sorted), vec![RecordId::Int(3), RecordId::Int(1), RecordId::Int(2)]);
    }

    #[test]
    fn test_descending_keeps_tie_order() {
        let rows = sample();
        let sorted = apply_sort(rows.iter().collect(), Some(&SortState::descending("v")), &[]);
        assert_eq!(ids(&sorted), vec![RecordId::Int(1), RecordId::Int(2), RecordId::Int(3)]);
    }

    #[test]
    fn test_strings_compare_by_code_point() {
        let rows = vec![
            DynamicRecord::new(1).with("name", "beta"),
            DynamicRecord::new(2).with("name", "Alpha"),
            DynamicRecord::new(3).with("name", "alpha"),
        ];
        let sorted = apply_sort(rows.iter().collect(), Some(&SortState::ascending("name")), &[]);
        assert_eq!(ids(&sorted), vec![RecordId::Int(2), RecordId::Int(3), RecordId::Int(1)]);
    }

    #[test]
    fn test_column_accessor_drives_sort() {
        let rows = vec![
            DynamicRecord::new(1).with("name", "aaa"),
            DynamicRecord::new(2).with("name", "b"),
        ];
        let columns = vec![Column::new("Length", "len").with_accessor(|r: &DynamicRecord| {
            r.field("name")
                .and_then(|v| v.as_str().map(|s| CellValue::from(s.len() as i64)))
        })];
        let sorted = apply_sort(rows.iter().collect(), Some(&SortState::ascending("len")), &columns);
        assert_eq!(ids(&sorted), vec![RecordId::Int(2), RecordId::Int(1)]);
    }

    #[test]
    fn test_missing_values_sort_first_ascending() {
        let rows = vec![
            DynamicRecord::new(1).with("v", 2),
            DynamicRecord::new(2),
            DynamicRecord::new(3).with("v", 1),
        ];
        let sorted = apply_sort(rows.iter().collect(), Some(&SortState::ascending("v")), &[]);
        assert_eq!(ids(&sorted), vec![RecordId::Int(2), RecordId::Int(3), RecordId::Int(1)]);
    }

    #[test]
    fn test_compare_values_total_order() {
        assert_eq!(compare_values(&CellValue::Int(2), &CellValue::Float(2.5)), Ordering::Less);
        assert_eq!(compare_values(&CellValue::Float(2.0), &CellValue::Int(2)), Ordering::Equal);
        assert_eq!(compare_values(&CellValue::None, &CellValue::Bool(false)), Ordering::Less);
        assert_eq!(compare_values(&CellValue::Int(99), &"1".into()), Ordering::Less);
        assert_eq!(
            compare_values(&CellValue::from(vec![1, 2]), &CellValue::from(vec![1, 2, 0])),
            Ordering::Less
        );
    }

    #[test]
    fn test_large_integers_compare_exactly_against_floats() {
        let big = 1i64 << 53;
        assert_eq!(compare_values(&CellValue::Int(big + 1), &CellValue::Float(big as f64)), Ordering::Greater);
        assert_eq!(compare_values(&CellValue::Float(big as f64), &CellValue::Int(big)), Ordering::Equal);
        assert_eq!(compare_values(&CellValue::Int(i64::MAX), &CellValue::Float(9.3e18)), Ordering::Less);
        assert_eq!(compare_values(&CellValue::Int(i64::MIN), &CellValue::Float(-1e300)), Ordering::Greater);
        assert_eq!(compare_values(&CellValue::Int(-3), &CellValue::Float(-2.5)), Ordering::Less);
        assert_eq!(compare_values(&CellValue::Int(0), &CellValue::Float(-0.0)), Ordering::Equal);
        assert_eq!(compare_values(&CellValue::Float(-0.0), &CellValue::Float(0.0)), Ordering::Equal);
        assert_eq!(compare_values(&CellValue::Int(5), &CellValue::Float(f64::INFINITY)), Ordering::Less);
        assert_eq!(compare_values(&CellValue::Int(5), &CellValue::Float(f64::NAN)), Ordering::Less);

        let rows = vec![
            DynamicRecord::new(1).with("v", CellValue::Int(big + 1)),
            DynamicRecord::new(2).with("v", CellValue::Float(big as f64)),
            DynamicRecord::new(3).with("v", CellValue::Int(big)),
        ];
        let sorted = apply_sort(rows.iter().collect(), Some(&SortState::ascending("v")), &[]);
        // 2 and 3 are equal in value and keep input order.
        assert_eq!(ids(&sorted), vec![RecordId::Int(2), RecordId::Int(3), RecordId::Int(1)]);
    }

    #[test]
    fn test_toggle_semantics() {
        let first = SortState::toggle(None, "v");
        assert_eq!(first, SortState::ascending("v"));
        let second = SortState::toggle(Some(&first), "v");
        assert_eq!(second, SortState::descending("v"));
        let third = SortState::toggle(Some(&second), "v");
        assert_eq!(third, SortState::ascending("v"));
        assert_eq!(SortState::toggle(Some(&second), "name"), SortState::ascending("name"));
    }

    #[test]
    fn test_sort_order_serde_aliases() {
        let order: SortOrder = serde_json::from_str(r#""desc""#).unwrap();
        assert_eq!(order, SortOrder::Descending);
        assert_eq!(serde_json::to_string(&SortOrder::Ascending).unwrap(), r#""ascending""#);
    }
}
