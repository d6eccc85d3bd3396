//! Entry height estimation.

use consign_shared::types::LayoutConfig;

use crate::reports::Entry;

/// Estimates the rendered height of an item.
///
/// Implementations must be deterministic and free of side effects. Closures
/// of the form `Fn(&T) -> u32` are estimators too, which keeps boundary tests
/// independent of the entry heuristic.
pub trait HeightEstimator<T: ?Sized> {
    /// Estimated height in layout units.
    fn estimate(&self, item: &T) -> u32;
}

impl<T: ?Sized, F> HeightEstimator<T> for F
where
    F: Fn(&T) -> u32,
{
    fn estimate(&self, item: &T) -> u32 {
        self(item)
    }
}

/// Height heuristic for report entries.
///
/// An entry costs `base`; an entry with charges additionally costs
/// `per_line_item` per charge plus `totals_block`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryHeights {
    /// Fixed cost of every entry.
    pub base: u32,
    /// Cost of one charge line.
    pub per_line_item: u32,
    /// Cost of the totals block under the charge table.
    pub totals_block: u32,
}

impl EntryHeights {
    /// Height of an entry with `line_items` charges.
    #[must_use]
    pub fn height(&self, line_items: usize) -> u32 {
        if line_items == 0 {
            return self.base;
        }
        let count = u32::try_from(line_items).unwrap_or(u32::MAX);
        self.base
            .saturating_add(self.per_line_item.saturating_mul(count))
            .saturating_add(self.totals_block)
    }
}

impl Default for EntryHeights {
    fn default() -> Self {
        Self::from(&LayoutConfig::default())
    }
}

impl From<&LayoutConfig> for EntryHeights {
    fn from(layout: &LayoutConfig) -> Self {
        Self {
            base: layout.entry_base_height,
            per_line_item: layout.line_item_height,
            totals_block: layout.totals_block_height,
        }
    }
}

impl HeightEstimator<Entry> for EntryHeights {
    fn estimate(&self, entry: &Entry) -> u32 {
        self.height(entry.line_items().len())
    }
}
