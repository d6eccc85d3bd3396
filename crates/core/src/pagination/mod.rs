//! Fitting report entries onto fixed-size pages.
//!
//! This module provides:
//! - Height estimation for entries (a static heuristic, not a measurement)
//! - A greedy first-fit paginator that keeps room for the summary block on
//!   the last page

pub mod estimator;
pub mod paginator;

#[cfg(test)]
mod paginator_props;

pub use estimator::{EntryHeights, HeightEstimator};
pub use paginator::{Page, PageSet, Paginator};
