//! Common types used across the workspace.

pub mod columns;
pub mod layout;
pub mod money;

pub use columns::{ChargeColumns, ColumnMapping, DetailColumns};
pub use layout::LayoutConfig;
pub use money::Money;
