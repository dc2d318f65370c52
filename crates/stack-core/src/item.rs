//! Stack items and their builder.
//!
//! An [`Item`] is an immutable description of one child of a stack: which
//! content it shows, its margins, how its primary-axis extent is chosen and
//! how its cross-axis extent is resolved. Items are changed by replacement:
//! turn one back into an [`ItemBuilder`], adjust it, and build again.
//!
//! All validation happens in [`ItemBuilder::build`], so every `Item` that
//! exists satisfies the sizing invariants.

use crate::errors::ConfigError;
use crate::types::{Axis, ContentId, CrossAxisMode, LayoutDirection};

/// Sentinel for "no fixed or percent size".
pub const UNSET: f64 = -1.0;

/// One child of a stack.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ItemBuilder", into = "ItemBuilder")
)]
pub struct Item {
    content: ContentId,
    leading: f64,
    trailing: f64,
    top: f64,
    bottom: f64,
    fixed_size: f64,
    percent_size: f64,
    weight: Option<f64>,
    cross_axis: CrossAxisMode,
    tag: Option<String>,
}

impl Item {
    /// Start building an item for a piece of content.
    pub fn builder(content: ContentId) -> ItemBuilder {
        ItemBuilder::new(content)
    }

    /// An item with default settings (natural-sized, filling the cross axis).
    pub fn new(content: ContentId) -> Self {
        Self {
            content,
            leading: 0.0,
            trailing: 0.0,
            top: 0.0,
            bottom: 0.0,
            fixed_size: UNSET,
            percent_size: UNSET,
            weight: None,
            cross_axis: CrossAxisMode::Fill,
            tag: None,
        }
    }

    /// Builder pre-filled with this item's settings.
    pub fn to_builder(&self) -> ItemBuilder {
        ItemBuilder::from(self.clone())
    }

    pub fn content(&self) -> ContentId {
        self.content
    }

    pub fn leading(&self) -> f64 {
        self.leading
    }

    pub fn trailing(&self) -> f64 {
        self.trailing
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    /// Fixed primary-axis extent, if set (negative means unset).
    pub fn fixed_size(&self) -> Option<f64> {
        (self.fixed_size >= 0.0).then_some(self.fixed_size)
    }

    /// Fraction of the viewport's primary extent, if set.
    pub fn percent_size(&self) -> Option<f64> {
        (0.0..=1.0)
            .contains(&self.percent_size)
            .then_some(self.percent_size)
    }

    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    pub fn cross_axis(&self) -> CrossAxisMode {
        self.cross_axis
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// True when no fixed, percent or weight rule applies, so the primary
    /// extent comes from the content itself.
    pub fn is_natural_sized(&self) -> bool {
        self.weight.is_none() && self.fixed_size().is_none() && self.percent_size().is_none()
    }

    /// Physical left margin for the given reading direction.
    pub fn left(&self, direction: LayoutDirection) -> f64 {
        match direction {
            LayoutDirection::LeftToRight => self.leading,
            LayoutDirection::RightToLeft => self.trailing,
        }
    }

    /// Physical right margin for the given reading direction.
    pub fn right(&self, direction: LayoutDirection) -> f64 {
        match direction {
            LayoutDirection::LeftToRight => self.trailing,
            LayoutDirection::RightToLeft => self.leading,
        }
    }

    /// Margins before and after the item along the stacking axis.
    pub fn primary_margins(&self, axis: Axis, direction: LayoutDirection) -> (f64, f64) {
        match axis {
            Axis::Vertical => (self.top, self.bottom),
            Axis::Horizontal => (self.left(direction), self.right(direction)),
        }
    }

    /// Margins at the start and end of the cross axis.
    pub fn cross_margins(&self, axis: Axis, direction: LayoutDirection) -> (f64, f64) {
        match axis {
            Axis::Vertical => (self.left(direction), self.right(direction)),
            Axis::Horizontal => (self.top, self.bottom),
        }
    }
}

/// Builder for [`Item`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemBuilder {
    content: ContentId,
    #[cfg_attr(feature = "serde", serde(default))]
    leading: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    trailing: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    top: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    bottom: f64,
    #[cfg_attr(feature = "serde", serde(default = "unset"))]
    fixed_size: f64,
    #[cfg_attr(feature = "serde", serde(default = "unset"))]
    percent_size: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    weight: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    cross_axis: CrossAxisMode,
    #[cfg_attr(feature = "serde", serde(default))]
    tag: Option<String>,
}

#[cfg(feature = "serde")]
fn unset() -> f64 {
    UNSET
}

impl ItemBuilder {
    /// Create a builder with default settings.
    pub fn new(content: ContentId) -> Self {
        Item::new(content).into()
    }

    /// Replace the content handle.
    pub fn content(mut self, content: ContentId) -> Self {
        self.content = content;
        self
    }

    pub fn leading(mut self, leading: f64) -> Self {
        self.leading = leading;
        self
    }

    pub fn trailing(mut self, trailing: f64) -> Self {
        self.trailing = trailing;
        self
    }

    pub fn top(mut self, top: f64) -> Self {
        self.top = top;
        self
    }

    pub fn bottom(mut self, bottom: f64) -> Self {
        self.bottom = bottom;
        self
    }

    /// Set all four margins at once.
    pub fn margins(self, leading: f64, trailing: f64, top: f64, bottom: f64) -> Self {
        self.leading(leading).trailing(trailing).top(top).bottom(bottom)
    }

    /// Fixed primary-axis extent. Negative values clear it.
    pub fn fixed_size(mut self, size: f64) -> Self {
        self.fixed_size = size;
        self
    }

    /// Primary-axis extent as a fraction of the viewport. Negative values
    /// clear it; values above 1 are rejected by [`build`](Self::build).
    pub fn percent_size(mut self, fraction: f64) -> Self {
        self.percent_size = fraction;
        self
    }

    /// Share of leftover primary-axis space.
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn clear_weight(mut self) -> Self {
        self.weight = None;
        self
    }

    pub fn cross_axis(mut self, mode: CrossAxisMode) -> Self {
        self.cross_axis = mode;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn clear_tag(mut self) -> Self {
        self.tag = None;
        self
    }

    /// Validate and produce the item.
    pub fn build(self) -> Result<Item, ConfigError> {
        for (edge, value) in [
            ("leading", self.leading),
            ("trailing", self.trailing),
            ("top", self.top),
            ("bottom", self.bottom),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field: edge });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeMargin { edge, value });
            }
        }

        if !self.fixed_size.is_finite() {
            return Err(ConfigError::NonFinite { field: "fixed_size" });
        }

        if !self.percent_size.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "percent_size",
            });
        }
        if self.percent_size > 1.0 {
            return Err(ConfigError::PercentOutOfRange {
                value: self.percent_size,
            });
        }

        if let Some(weight) = self.weight {
            if !weight.is_finite() {
                return Err(ConfigError::NonFinite { field: "weight" });
            }
            if weight < 0.0 {
                return Err(ConfigError::NegativeWeight { value: weight });
            }
        }

        match self.cross_axis {
            CrossAxisMode::Fill => {}
            CrossAxisMode::Percent { fraction, .. } => {
                if !fraction.is_finite() {
                    return Err(ConfigError::NonFinite {
                        field: "cross_axis",
                    });
                }
                if !(0.0..=1.0).contains(&fraction) {
                    return Err(ConfigError::CrossPercentOutOfRange { value: fraction });
                }
            }
            CrossAxisMode::Fit { extent, .. } => {
                if let Some(extent) = extent {
                    if !extent.is_finite() {
                        return Err(ConfigError::NonFinite {
                            field: "cross_axis",
                        });
                    }
                    if extent < 0.0 {
                        return Err(ConfigError::NegativeExtent { value: extent });
                    }
                }
            }
        }

        Ok(Item {
            content: self.content,
            leading: self.leading,
            trailing: self.trailing,
            top: self.top,
            bottom: self.bottom,
            fixed_size: self.fixed_size,
            percent_size: self.percent_size,
            weight: self.weight,
            cross_axis: self.cross_axis,
            tag: self.tag,
        })
    }
}

impl From<Item> for ItemBuilder {
    fn from(item: Item) -> Self {
        Self {
            content: item.content,
            leading: item.leading,
            trailing: item.trailing,
            top: item.top,
            bottom: item.bottom,
            fixed_size: item.fixed_size,
            percent_size: item.percent_size,
            weight: item.weight,
            cross_axis: item.cross_axis,
            tag: item.tag,
        }
    }
}

impl TryFrom<ItemBuilder> for Item {
    type Error = ConfigError;

    fn try_from(builder: ItemBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
