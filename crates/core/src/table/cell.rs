//! Raw cell values as handed over by a tabular source.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// A single untyped cell.
///
/// Sources hand over whatever the host platform stored in a column, so one
/// column may mix shapes. Consumers coerce, they never reject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CellValue {
    /// Null, missing, or an unsupported shape.
    #[default]
    Absent,
    /// Any number. Epoch milliseconds when read as a date.
    Number(Decimal),
    /// Free text.
    Text(String),
    /// A point in time.
    Timestamp(DateTime<Utc>),
    /// A calendar date without time zone.
    Date(NaiveDate),
}

impl CellValue {
    /// Builds a number cell from a float; non-finite or out-of-range values are `Absent`.
    #[must_use]
    pub fn number(value: f64) -> Self {
        Decimal::from_f64(value).map_or(Self::Absent, Self::Number)
    }

    /// Returns true for `Absent`.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Converts a JSON value; arrays and objects have no cell shape and become `Absent`.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                Self::Absent
            }
            serde_json::Value::Bool(flag) => Self::Text(flag.to_string()),
            serde_json::Value::Number(number) => number
                .as_i64()
                .map(Decimal::from)
                .or_else(|| number.as_u64().map(Decimal::from))
                .or_else(|| number.as_f64().and_then(Decimal::from_f64))
                .map_or(Self::Absent, Self::Number),
            serde_json::Value::String(text) => Self::Text(text.clone()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(Decimal::from(value))
    }
}

impl From<Decimal> for CellValue {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}
