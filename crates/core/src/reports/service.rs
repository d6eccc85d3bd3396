//! Report assembly service.

use std::collections::{HashMap, HashSet};

use consign_shared::types::{ChargeColumns, ColumnMapping, DetailColumns, Money};

use super::coerce;
use super::types::{
    Buyer, Entry, LineItem, ReportMeta, ReportTotals, SellerIdentity, SellerReport, Vehicle,
};
use crate::date::{self, DateRange, DisplayDate};
use crate::table::RawTable;

/// Service for assembling seller detail reports.
pub struct ReportService;

impl ReportService {
    /// Joins the detail and charge sources into a seller detail report.
    ///
    /// This is a pure, total function of its inputs:
    /// 1. Identity comes from the first detail row
    /// 2. The sale date range spans every valid date in both sources
    /// 3. Charges are grouped by join key, keeping source order
    /// 4. Each detail row becomes an entry with its charge group attached
    /// 5. Report totals accumulate in the same pass
    ///
    /// Malformed cells coerce to defaults and never abort assembly.
    ///
    /// # Returns
    ///
    /// `None` when either source is unavailable or a join key is unmapped.
    /// The caller should show a waiting state, not an error.
    #[must_use]
    pub fn assemble(
        detail: Option<&RawTable>,
        charges: Option<&RawTable>,
        columns: &ColumnMapping,
        meta: ReportMeta,
    ) -> Option<SellerReport> {
        let (Some(detail), Some(charges)) = (detail, charges) else {
            tracing::debug!(
                detail = detail.is_some(),
                charges = charges.is_some(),
                "Report source unavailable"
            );
            return None;
        };
        if !columns.has_join_keys() {
            tracing::debug!("Join key columns are not mapped");
            return None;
        }

        let identity = Self::identity_of(detail, &columns.detail);
        let sale_date_range = Self::sale_date_range(detail, charges, columns)
            .map(|range| range.to_string())
            .unwrap_or_default();
        let groups = Self::group_line_items(charges, &columns.charge);

        let mut entries = Vec::with_capacity(detail.row_count());
        let mut totals = ReportTotals::default();
        let mut matched = 0usize;

        for row in 0..detail.row_count() {
            let vehicle = Self::read_vehicle(detail, &columns.detail, row);
            let line_items = match groups.get(&vehicle.run_number) {
                Some(items) => {
                    matched += 1;
                    items.clone()
                }
                None => Vec::new(),
            };
            let entry = Entry::new(vehicle, line_items);
            totals.accumulate(&entry);
            entries.push(entry);
        }

        tracing::debug!(
            entries = entries.len(),
            matched_entries = matched,
            charge_groups = groups.len(),
            orphan_charge_groups = Self::unmatched_group_count(&groups, &entries),
            "Seller report assembled"
        );

        Some(SellerReport::new(
            identity,
            sale_date_range,
            entries,
            totals,
            meta,
        ))
    }

    /// Reads seller and auction house from row 0.
    ///
    /// Later rows are ignored even if they name a different seller; one
    /// report covers exactly one seller.
    #[must_use]
    pub fn identity_of(detail: &RawTable, columns: &DetailColumns) -> SellerIdentity {
        let fallback = SellerIdentity::default();
        let first = |column: &Option<String>, default: String| {
            let value = coerce::text(detail.column(column.as_deref()).get(0));
            if value.is_empty() { default } else { value }
        };
        SellerIdentity {
            seller_name: first(&columns.seller_name, fallback.seller_name),
            auction_house: first(&columns.auction_code, fallback.auction_house),
        }
    }

    /// Spans every valid sale date and charge date.
    #[must_use]
    pub fn sale_date_range(
        detail: &RawTable,
        charges: &RawTable,
        columns: &ColumnMapping,
    ) -> Option<DateRange> {
        let sale_dates = detail.column(columns.detail.sale_date.as_deref());
        let charge_dates = charges.column(columns.charge.date.as_deref());
        DateRange::spanning(
            sale_dates
                .iter()
                .chain(charge_dates.iter())
                .filter_map(date::normalize),
        )
    }

    /// Groups charge rows by join key, preserving source order within a group.
    ///
    /// Rows without a key belong to no vehicle and are dropped.
    #[must_use]
    pub fn group_line_items(
        charges: &RawTable,
        columns: &ChargeColumns,
    ) -> HashMap<String, Vec<LineItem>> {
        let keys = charges.column(columns.key.as_deref());
        let dates = charges.column(columns.date.as_deref());
        let descriptions = charges.column(columns.description.as_deref());
        let amounts = charges.column(columns.amount.as_deref());

        let mut groups: HashMap<String, Vec<LineItem>> = HashMap::new();
        for row in 0..charges.row_count() {
            let key = coerce::text(keys.get(row));
            if key.is_empty() {
                tracing::trace!(row, "Charge row without join key skipped");
                continue;
            }
            groups.entry(key).or_default().push(LineItem {
                date: DisplayDate::from_cell(dates.get(row)),
                description: coerce::text(descriptions.get(row)),
                amount: Money::new(coerce::decimal(amounts.get(row))),
            });
        }
        groups
    }

    /// Counts charge groups whose key names no entry.
    #[must_use]
    pub fn unmatched_group_count(
        groups: &HashMap<String, Vec<LineItem>>,
        entries: &[Entry],
    ) -> usize {
        let keys: HashSet<&str> = entries.iter().map(Entry::key).collect();
        groups
            .keys()
            .filter(|key| !keys.contains(key.as_str()))
            .count()
    }

    fn read_vehicle(detail: &RawTable, columns: &DetailColumns, row: usize) -> Vehicle {
        let cell = |column: &Option<String>| detail.column(column.as_deref()).get(row);
        let text = |column: &Option<String>| coerce::text(cell(column));

        Vehicle {
            run_number: text(&columns.key),
            stock_number: text(&columns.stock_number),
            mileage: coerce::whole(cell(&columns.mileage)),
            year: coerce::whole(cell(&columns.year)),
            make: text(&columns.make),
            model: text(&columns.model),
            color: text(&columns.color),
            sale_amount: Money::new(coerce::decimal(cell(&columns.sale_amount))),
            vin: text(&columns.vin),
            sale_date: DisplayDate::from_cell(cell(&columns.sale_date)),
            check_number: text(&columns.check_number),
            title_status: text(&columns.title_status),
            buyer: Buyer {
                name: text(&columns.buyer_name),
                address: text(&columns.buyer_address),
                city: text(&columns.buyer_city),
                state: text(&columns.buyer_state),
                zip: text(&columns.buyer_zip),
            },
        }
    }
}
