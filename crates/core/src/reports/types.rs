//! Report data types.

use consign_shared::types::Money;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::date::DisplayDate;

/// Whitespace, path separators and other characters a file name cannot hold.
static FILE_NAME_UNSAFE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[\s/\\:*?"<>|\p{Cc}]+"#).expect("valid file name pattern")
});

/// Seller shown when the detail source has no seller name.
pub const UNKNOWN_SELLER: &str = "Unknown Seller";

/// Auction house shown when the detail source has no auction code.
pub const UNKNOWN_AUCTION: &str = "Unknown Auction";

/// One charge against a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    /// Charge date.
    pub date: DisplayDate,
    /// Charge description.
    pub description: String,
    /// Charge amount.
    pub amount: Money,
}

/// Buyer of a vehicle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Buyer {
    /// Buyer name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Postal code.
    pub zip: String,
}

impl Buyer {
    /// `City, ST 12345`
    #[must_use]
    pub fn locality(&self) -> String {
        format!("{}, {} {}", self.city, self.state, self.zip)
    }
}

/// Vehicle attributes read from one detail row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Vehicle {
    /// Run number; the join key.
    pub run_number: String,
    /// Stock number.
    pub stock_number: String,
    /// Odometer reading.
    pub mileage: i64,
    /// Model year.
    pub year: i64,
    /// Make.
    pub make: String,
    /// Model.
    pub model: String,
    /// Exterior color.
    pub color: String,
    /// Hammer price.
    pub sale_amount: Money,
    /// Vehicle identification number.
    pub vin: String,
    /// Sale date.
    pub sale_date: DisplayDate,
    /// Settlement check number.
    pub check_number: String,
    /// Title status.
    pub title_status: String,
    /// Buyer.
    pub buyer: Buyer,
}

impl Vehicle {
    /// `2019 Honda Accord`
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }

    /// Last six characters of the VIN.
    #[must_use]
    pub fn vin_suffix(&self) -> &str {
        let skip = self.vin.chars().count().saturating_sub(6);
        self.vin
            .char_indices()
            .nth(skip)
            .map_or("", |(offset, _)| &self.vin[offset..])
    }
}

/// A vehicle with its charges and settlement totals.
///
/// Totals are derived on construction and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    #[serde(flatten)]
    vehicle: Vehicle,
    line_items: Vec<LineItem>,
    total_charges: Money,
    net_proceeds: Money,
}

impl Entry {
    /// Creates an entry, summing charges in line item order.
    #[must_use]
    pub fn new(vehicle: Vehicle, line_items: Vec<LineItem>) -> Self {
        let total_charges: Money = line_items.iter().map(|item| item.amount).sum();
        let net_proceeds = vehicle.sale_amount - total_charges;
        Self {
            vehicle,
            line_items,
            total_charges,
            net_proceeds,
        }
    }

    /// Vehicle attributes.
    #[must_use]
    pub const fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Join key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.vehicle.run_number
    }

    /// Hammer price.
    #[must_use]
    pub const fn sale_amount(&self) -> Money {
        self.vehicle.sale_amount
    }

    /// Charges in source row order.
    #[must_use]
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Returns true if any charge is attached.
    #[must_use]
    pub fn has_charges(&self) -> bool {
        !self.line_items.is_empty()
    }

    /// Sum of all charges.
    #[must_use]
    pub const fn total_charges(&self) -> Money {
        self.total_charges
    }

    /// Sale amount less charges.
    #[must_use]
    pub const fn net_proceeds(&self) -> Money {
        self.net_proceeds
    }
}

/// Seller and auction house, taken from the first detail row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellerIdentity {
    /// Seller name.
    pub seller_name: String,
    /// Auction house code.
    pub auction_house: String,
}

impl Default for SellerIdentity {
    fn default() -> Self {
        Self {
            seller_name: UNKNOWN_SELLER.to_string(),
            auction_house: UNKNOWN_AUCTION.to_string(),
        }
    }
}

/// Caller-supplied display values, carried into the report unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportMeta {
    /// Free-text generation date.
    pub report_date: String,
    /// Page number seed.
    pub page_number: u32,
}

impl Default for ReportMeta {
    fn default() -> Self {
        Self {
            report_date: String::new(),
            page_number: 1,
        }
    }
}

/// Report-wide totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportTotals {
    /// Sum of sale amounts.
    pub total_sales: Money,
    /// Sum of per-entry charges.
    pub total_charges: Money,
    /// Sales less charges.
    pub total_net_proceeds: Money,
    /// Number of entries.
    pub entry_count: usize,
}

impl ReportTotals {
    /// Folds one entry into the running totals.
    pub(crate) fn accumulate(&mut self, entry: &Entry) {
        self.total_sales += entry.sale_amount();
        self.total_charges += entry.total_charges();
        self.entry_count += 1;
        self.total_net_proceeds = self.total_sales - self.total_charges;
    }
}

/// Seller detail report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellerReport {
    #[serde(flatten)]
    identity: SellerIdentity,
    sale_date_range: String,
    entries: Vec<Entry>,
    #[serde(flatten)]
    totals: ReportTotals,
    #[serde(flatten)]
    meta: ReportMeta,
}

impl SellerReport {
    pub(crate) const fn new(
        identity: SellerIdentity,
        sale_date_range: String,
        entries: Vec<Entry>,
        totals: ReportTotals,
        meta: ReportMeta,
    ) -> Self {
        Self {
            identity,
            sale_date_range,
            entries,
            totals,
            meta,
        }
    }

    /// Seller name.
    #[must_use]
    pub fn seller_name(&self) -> &str {
        &self.identity.seller_name
    }

    /// Auction house code.
    #[must_use]
    pub fn auction_house(&self) -> &str {
        &self.identity.auction_house
    }

    /// `MM/DD/YY - MM/DD/YY`, or empty when no dates were found.
    #[must_use]
    pub fn sale_date_range(&self) -> &str {
        &self.sale_date_range
    }

    /// Entries in detail source order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Report-wide totals.
    #[must_use]
    pub const fn totals(&self) -> &ReportTotals {
        &self.totals
    }

    /// Caller-supplied display values.
    #[must_use]
    pub const fn meta(&self) -> &ReportMeta {
        &self.meta
    }

    /// File name stem for exports, e.g. `seller-detail-Acme-Motors`.
    ///
    /// Runs of whitespace and of characters that are not valid in a file
    /// name become `-`, so the stem is always a single path component.
    #[must_use]
    pub fn export_file_stem(&self) -> String {
        format!(
            "seller-detail-{}",
            FILE_NAME_UNSAFE.replace_all(&self.identity.seller_name, "-")
        )
    }
}
