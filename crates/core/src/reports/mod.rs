//! Seller detail report assembly.
//!
//! Joins the vehicle detail source with the charge source by run number and
//! derives per-vehicle and report-wide settlement totals. Assembly is a pure
//! function of its inputs; malformed cells coerce to defaults instead of
//! failing the report.

pub(crate) mod coerce;
pub mod service;
pub mod types;


pub use service::ReportService;
pub use types::*;
