//! Logical field to physical column mapping for the two report sources.
//!
//! Every column is optional. An unmapped field degrades to its coerced
//! default during assembly; only the two join keys are prerequisites.

use serde::{Deserialize, Serialize};

/// Column mapping for both sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    /// Columns of the detail (one row per vehicle) source.
    pub detail: DetailColumns,
    /// Columns of the charge (one row per line item) source.
    pub charge: ChargeColumns,
}

impl ColumnMapping {
    /// Returns true when both join keys are mapped.
    #[must_use]
    pub fn has_join_keys(&self) -> bool {
        self.detail.key.is_some() && self.charge.key.is_some()
    }
}

/// Detail source columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailColumns {
    /// Join key (run number).
    pub key: Option<String>,
    /// Stock number.
    pub stock_number: Option<String>,
    /// Vehicle identification number.
    pub vin: Option<String>,
    /// Model year.
    pub year: Option<String>,
    /// Make.
    pub make: Option<String>,
    /// Model.
    pub model: Option<String>,
    /// Odometer reading.
    pub mileage: Option<String>,
    /// Exterior color.
    pub color: Option<String>,
    /// Hammer price.
    pub sale_amount: Option<String>,
    /// Sale date.
    pub sale_date: Option<String>,
    /// Settlement check number.
    pub check_number: Option<String>,
    /// Title status.
    pub title_status: Option<String>,
    /// Buyer name.
    pub buyer_name: Option<String>,
    /// Buyer street address.
    pub buyer_address: Option<String>,
    /// Buyer city.
    pub buyer_city: Option<String>,
    /// Buyer state.
    pub buyer_state: Option<String>,
    /// Buyer postal code.
    pub buyer_zip: Option<String>,
    /// Seller name, read from the first row only.
    pub seller_name: Option<String>,
    /// Auction house code, read from the first row only.
    pub auction_code: Option<String>,
}

/// Charge source columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeColumns {
    /// Join key (run number of the owning vehicle).
    pub key: Option<String>,
    /// Charge date.
    pub date: Option<String>,
    /// Charge description.
    pub description: Option<String>,
    /// Charge amount.
    pub amount: Option<String>,
}
