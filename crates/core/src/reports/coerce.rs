//! Lenient cell coercion.
//!
//! A malformed cell becomes a default (empty text, zero) instead of failing
//! the report.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::table::CellValue;

/// Coerces a cell to display text.
pub(crate) fn text(cell: &CellValue) -> String {
    match cell {
        CellValue::Absent => String::new(),
        CellValue::Text(value) => value.clone(),
        CellValue::Number(value) => value.normalize().to_string(),
        CellValue::Timestamp(instant) => instant.to_rfc3339(),
        CellValue::Date(date) => date.format("%Y-%m-%d").to_string(),
    }
}

/// Coerces a cell to a decimal; anything non-numeric is zero.
pub(crate) fn decimal(cell: &CellValue) -> Decimal {
    match cell {
        CellValue::Number(value) => *value,
        CellValue::Text(value) => parse_decimal(value.trim()).unwrap_or_else(|| {
            tracing::trace!(value = %value, "Non-numeric cell coerced to zero");
            Decimal::ZERO
        }),
        CellValue::Absent | CellValue::Timestamp(_) | CellValue::Date(_) => Decimal::ZERO,
    }
}

fn parse_decimal(value: &str) -> Option<Decimal> {
    if value.is_empty() {
        return Some(Decimal::ZERO);
    }
    value
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(value).ok())
}

/// Coerces a cell to a whole number, truncating any fraction.
pub(crate) fn whole(cell: &CellValue) -> i64 {
    decimal(cell).trunc().to_i64().unwrap_or(0)
}
