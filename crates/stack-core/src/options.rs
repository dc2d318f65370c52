//! Stack configuration.

use crate::types::Axis;

/// Configuration of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StackOptions {
    /// Stacking direction
    pub axis: Axis,
    /// Primary-axis extent comes from content instead of the viewport
    pub self_size_primary: bool,
    /// Cross-axis extent comes from the widest `Fit` item
    pub self_size_cross: bool,
    /// Add the safe-area inset before the first item
    pub auto_adjust_leading_inset: bool,
    /// Add the safe-area inset after the last item
    pub auto_adjust_trailing_inset: bool,
}

impl Default for StackOptions {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            self_size_primary: false,
            self_size_cross: false,
            auto_adjust_leading_inset: true,
            auto_adjust_trailing_inset: true,
        }
    }
}

impl StackOptions {
    /// Options for a vertical stack.
    pub fn vertical() -> Self {
        Self {
            axis: Axis::Vertical,
            ..Default::default()
        }
    }

    /// Options for a horizontal stack.
    pub fn horizontal() -> Self {
        Self {
            axis: Axis::Horizontal,
            ..Default::default()
        }
    }

    pub fn with_self_size_primary(mut self, enabled: bool) -> Self {
        self.self_size_primary = enabled;
        self
    }

    pub fn with_self_size_cross(mut self, enabled: bool) -> Self {
        self.self_size_cross = enabled;
        self
    }

    pub fn with_auto_adjust_leading_inset(mut self, enabled: bool) -> Self {
        self.auto_adjust_leading_inset = enabled;
        self
    }

    pub fn with_auto_adjust_trailing_inset(mut self, enabled: bool) -> Self {
        self.auto_adjust_trailing_inset = enabled;
        self
    }

    /// Whether the extent along `axis` is derived from content.
    pub fn is_self_sizing(&self, axis: Axis) -> bool {
        if axis == self.axis {
            self.self_size_primary
        } else {
            self.self_size_cross
        }
    }
}
