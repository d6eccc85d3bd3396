//! Column-oriented tabular sources.
//!
//! A [`RawTable`] maps a field name to an index-aligned sequence of
//! [`CellValue`]s. Row `i` across every column is one logical record. Two
//! tables are never assumed to share an order; they are correlated only
//! through an explicit join key.

mod cell;
mod error;

use std::collections::HashMap;
use std::io::Read;

pub use cell::CellValue;
pub use error::TableError;

static ABSENT: CellValue = CellValue::Absent;

/// An immutable, rectangular, column-oriented table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    columns: HashMap<String, Vec<CellValue>>,
    row_count: usize,
}

impl RawTable {
    /// Builds a table from `(field, cells)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `TableError::RaggedColumn` if the columns differ in length.
    pub fn from_columns<I, K>(columns: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (K, Vec<CellValue>)>,
        K: Into<String>,
    {
        let mut table = Self::default();
        for (name, cells) in columns {
            table.insert(name.into(), cells)?;
        }
        Ok(table)
    }

    /// Reads a JSON object of `field -> [cell, ...]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader fails, the JSON is malformed, the
    /// top-level value is not an object, a field is not an array, or the
    /// columns differ in length.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let value: serde_json::Value = serde_json::from_reader(reader)?;
        Self::from_json_value(&value)
    }

    /// Parses a JSON string; see [`RawTable::from_json_reader`].
    ///
    /// # Errors
    ///
    /// Same as [`RawTable::from_json_reader`].
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(&value)
    }

    fn from_json_value(value: &serde_json::Value) -> Result<Self, TableError> {
        let object = value.as_object().ok_or(TableError::NotAnObject)?;
        let mut table = Self::default();
        for (name, column) in object {
            let cells = column
                .as_array()
                .ok_or_else(|| TableError::NotAColumn(name.clone()))?
                .iter()
                .map(CellValue::from_json)
                .collect();
            table.insert(name.clone(), cells)?;
        }
        tracing::debug!(
            columns = table.columns.len(),
            rows = table.row_count,
            "Table source loaded"
        );
        Ok(table)
    }

    fn insert(&mut self, name: String, cells: Vec<CellValue>) -> Result<(), TableError> {
        if self.columns.is_empty() {
            self.row_count = cells.len();
        } else if cells.len() != self.row_count {
            return Err(TableError::RaggedColumn {
                column: name,
                expected: self.row_count,
                found: cells.len(),
            });
        }
        self.columns.insert(name, cells);
        Ok(())
    }

    /// Number of records.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.row_count
    }

    /// Returns true if the table holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Looks up a column by an optional mapped name.
    ///
    /// An unmapped name or a missing column yields an empty view whose cells
    /// are all `Absent`.
    #[must_use]
    pub fn column(&self, name: Option<&str>) -> Column<'_> {
        Column {
            cells: name
                .and_then(|name| self.columns.get(name))
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        }
    }
}

/// Read-only view of one column.
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    cells: &'a [CellValue],
}

impl<'a> Column<'a> {
    /// Returns the cell at `row`, or `Absent` past the end.
    #[must_use]
    pub fn get(&self, row: usize) -> &'a CellValue {
        self.cells.get(row).unwrap_or(&ABSENT)
    }

    /// Iterates the cells in row order.
    pub fn iter(&self) -> std::slice::Iter<'a, CellValue> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_columns() {
        let table = RawTable::from_columns([
            ("run", vec![CellValue::from("A"), CellValue::from("B")]),
            ("amount", vec![CellValue::from(10_i64), CellValue::Absent]),
        ])
        .unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column(Some("run")).get(1), &CellValue::from("B"));
        assert_eq!(table.column(Some("amount")).get(0), &CellValue::Number(dec!(10)));
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let err = RawTable::from_columns([
            ("run", vec![CellValue::from("A"), CellValue::from("B")]),
            ("amount", vec![CellValue::from(10_i64)]),
        ])
        .unwrap_err();

        assert!(matches!(
            err,
            TableError::RaggedColumn { expected: 2, found: 1, .. }
        ));
    }

    #[test]
    fn test_unmapped_or_missing_column_reads_absent() {
        let table = RawTable::from_columns([("run", vec![CellValue::from("A")])]).unwrap();

        let unmapped = table.column(None);
        assert_eq!(unmapped.iter().count(), 0);
        assert!(unmapped.get(0).is_absent());

        let missing = table.column(Some("vin"));
        assert_eq!(missing.iter().count(), 0);
        assert!(missing.get(0).is_absent());

        assert!(table.column(Some("run")).get(5).is_absent());
    }

    #[test]
    fn test_from_json_str() {
        let table = RawTable::from_json_str(
            r#"{"run": ["101", 102, null], "sale": [1000, "2000.50", true]}"#,
        )
        .unwrap();

        assert_eq!(table.row_count(), 3);
        let run = table.column(Some("run"));
        assert_eq!(run.get(1), &CellValue::Number(dec!(102)));
        assert!(run.get(2).is_absent());
        assert_eq!(table.column(Some("sale")).get(2), &CellValue::from("true"));
        assert_eq!(run.iter().count(), 3);
    }

    #[test]
    fn test_from_json_rejects_bad_shapes() {
        assert!(matches!(
            RawTable::from_json_str("[1, 2, 3]"),
            Err(TableError::NotAnObject)
        ));
        assert!(matches!(
            RawTable::from_json_str(r#"{"run": "A"}"#),
            Err(TableError::NotAColumn(name)) if name == "run"
        ));
        assert!(matches!(
            RawTable::from_json_str("{not json"),
            Err(TableError::Json(_))
        ));
    }

    #[test]
    fn test_empty_table() {
        let table = RawTable::from_json_str("{}").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
    }
}
