//! Page geometry and the entry height heuristic used by pagination.
//!
//! All values are CSS pixels at 96 DPI. They are estimates, never
//! measurements of rendered output.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Layout constants for fixed-size report pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Full page height (11in letter page).
    pub page_height: u32,
    /// Top page margin.
    pub margin_top: u32,
    /// Bottom page margin.
    pub margin_bottom: u32,
    /// Report header (auction house, seller, sale date range).
    pub header_height: u32,
    /// Page footer without the summary block.
    pub footer_height: u32,
    /// Slack kept free on every page.
    pub buffer: u32,
    /// Height withheld on the last page for the report totals.
    pub summary_reserve: u32,
    /// Fixed cost of one entry without charges.
    pub entry_base_height: u32,
    /// Cost of one charge line.
    pub line_item_height: u32,
    /// Cost of the per-entry totals block, only present when an entry has charges.
    pub totals_block_height: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_height: 11 * 96,
            margin_top: 48,
            margin_bottom: 48,
            header_height: 140,
            footer_height: 50,
            buffer: 20,
            summary_reserve: 100,
            entry_base_height: 245,
            line_item_height: 22,
            totals_block_height: 60,
        }
    }
}

impl LayoutConfig {
    /// Height available for entries on any page.
    #[must_use]
    pub fn content_capacity(&self) -> u32 {
        self.page_height
            .saturating_sub(self.margin_top)
            .saturating_sub(self.margin_bottom)
            .saturating_sub(self.header_height)
            .saturating_sub(self.footer_height)
            .saturating_sub(self.buffer)
    }

    /// Height available for entries on the last page, after the summary.
    #[must_use]
    pub fn last_page_capacity(&self) -> u32 {
        self.content_capacity().saturating_sub(self.summary_reserve)
    }

    /// Checks that the geometry leaves room for content.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when the page has no content capacity
    /// or the summary reserve does not fit on a page.
    pub fn validate(&self) -> AppResult<()> {
        let capacity = self.content_capacity();
        if capacity == 0 {
            return Err(AppError::Validation(format!(
                "page height {} leaves no room for content",
                self.page_height
            )));
        }
        if self.summary_reserve > capacity {
            return Err(AppError::Validation(format!(
                "summary reserve {} exceeds content capacity {capacity}",
                self.summary_reserve
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.page_height, 1056);
        assert_eq!(layout.content_capacity(), 750);
        assert_eq!(layout.last_page_capacity(), 650);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_capacity_saturates() {
        let layout = LayoutConfig {
            page_height: 100,
            ..LayoutConfig::default()
        };
        assert_eq!(layout.content_capacity(), 0);
        assert!(matches!(layout.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_reserve_larger_than_capacity_is_rejected() {
        let layout = LayoutConfig {
            summary_reserve: 751,
            ..LayoutConfig::default()
        };
        let err = layout.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: summary reserve 751 exceeds content capacity 750"
        );
    }

    #[test]
    fn test_partial_layout_deserializes_with_defaults() {
        let layout: LayoutConfig = serde_json::from_str(r#"{"summary_reserve": 120}"#).unwrap();
        assert_eq!(layout.summary_reserve, 120);
        assert_eq!(layout.entry_base_height, 245);
    }
}
