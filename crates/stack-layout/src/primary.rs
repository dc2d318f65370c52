//! Primary-axis sizing.
//!
//! Each item's extent along the stacking axis is the larger of its fixed
//! size and its percent-of-viewport size (never negative). Weighted items
//! additionally receive a share of the leftover space on the second pass.
//! Natural-sized items are measured by the caller; this module only keeps
//! the running offset for them.

use stack_core::Item;

/// Extent from the fixed and percent rules, before any weight share.
pub(crate) fn base_extent(item: &Item, scroll_extent: f64) -> f64 {
    let percent = item
        .percent_size()
        .map(|fraction| fraction * scroll_extent)
        .unwrap_or(0.0);
    let fixed = item.fixed_size().unwrap_or(0.0);
    percent.max(fixed).max(0.0)
}

/// Sum of all declared weights.
pub(crate) fn total_weight(items: &[Item]) -> f64 {
    items.iter().filter_map(Item::weight).sum()
}

/// Leftover primary-axis space and how it is split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WeightShare {
    pub leftover: f64,
    pub total_weight: f64,
}

impl WeightShare {
    /// Extra extent an item with `weight` receives.
    pub(crate) fn extra(&self, weight: f64) -> f64 {
        if self.total_weight > 0.0 {
            self.leftover * weight / self.total_weight
        } else {
            0.0
        }
    }
}

/// Running offset along the stacking axis.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PrimaryCursor {
    offset: f64,
}

impl PrimaryCursor {
    /// Start after the leading safe-area inset.
    pub(crate) fn new(leading_inset: f64) -> Self {
        Self {
            offset: leading_inset,
        }
    }

    /// Place an item and return its origin.
    pub(crate) fn place(&mut self, leading_margin: f64, extent: f64, trailing_margin: f64) -> f64 {
        let origin = self.offset + leading_margin;
        self.offset = origin + extent + trailing_margin;
        origin
    }

    /// Close the run with the trailing inset and return the total extent.
    pub(crate) fn finish(self, trailing_inset: f64) -> f64 {
        self.offset + trailing_inset
    }
}
