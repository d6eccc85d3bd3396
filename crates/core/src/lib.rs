//! Core report logic for Consign.
//!
//! This crate contains pure report logic with ZERO rendering or I/O surface
//! beyond reading table sources. Every computation is a synchronous,
//! side-effect-free function of its inputs.
//!
//! # Modules
//!
//! - `table` - Column-oriented table sources and cell values
//! - `date` - Date normalization and display formatting
//! - `reports` - Seller detail report assembly and totals
//! - `pagination` - Fitting report entries onto fixed-size pages

pub mod date;
pub mod pagination;
pub mod reports;
pub mod table;
