//! Core value types for stack layout.

use std::fmt;

use glam::DVec2;

/// Opaque handle to a renderable piece of content.
///
/// The engine never owns the content behind a handle; it only uses the
/// handle to ask for sizes and to key computed frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentId(pub u64);

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ContentId {
    fn from(id: u64) -> Self {
        ContentId(id)
    }
}

/// Stacking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Items stack top to bottom
    #[default]
    Vertical,
    /// Items stack left to right
    Horizontal,
}

impl Axis {
    /// The axis perpendicular to this one.
    pub fn cross(self) -> Axis {
        match self {
            Axis::Vertical => Axis::Horizontal,
            Axis::Horizontal => Axis::Vertical,
        }
    }

    /// Map a (primary, cross) pair onto a physical (x, y) vector.
    pub fn compose(self, primary: f64, cross: f64) -> DVec2 {
        match self {
            Axis::Vertical => DVec2::new(cross, primary),
            Axis::Horizontal => DVec2::new(primary, cross),
        }
    }
}

/// Horizontal reading direction of a piece of content.
///
/// Decides which physical side the leading/trailing margins land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// Placement on the cross axis when an item is narrower than the space it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// Flush with the leading cross margin
    #[default]
    Begin,
    /// Centered in the available cross space
    Middle,
    /// Flush with the trailing cross margin
    End,
}

/// How an item's cross-axis extent is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossAxisMode {
    /// Take all available cross space (always begin-aligned)
    #[default]
    Fill,
    /// Take a fraction of the available cross space
    Percent { fraction: f64, alignment: Alignment },
    /// Use an explicit extent, or the content's own extent when `None`
    Fit {
        extent: Option<f64>,
        alignment: Alignment,
    },
}

impl CrossAxisMode {
    pub fn percent(fraction: f64, alignment: Alignment) -> Self {
        CrossAxisMode::Percent { fraction, alignment }
    }

    pub fn fit(alignment: Alignment) -> Self {
        CrossAxisMode::Fit { extent: None, alignment }
    }

    pub fn fit_extent(extent: f64, alignment: Alignment) -> Self {
        CrossAxisMode::Fit {
            extent: Some(extent),
            alignment,
        }
    }

    /// Effective alignment; `Fill` is always begin-aligned.
    pub fn alignment(&self) -> Alignment {
        match self {
            CrossAxisMode::Fill => Alignment::Begin,
            CrossAxisMode::Percent { alignment, .. } | CrossAxisMode::Fit { alignment, .. } => {
                *alignment
            }
        }
    }
}

/// Width and height of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Build a size from extents along a stacking axis and its cross axis.
    pub fn from_axes(axis: Axis, primary: f64, cross: f64) -> Self {
        axis.compose(primary, cross).into()
    }

    /// Extent along the given axis.
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.height,
            Axis::Horizontal => self.width,
        }
    }

    /// Copy of this size with the extent along `axis` replaced.
    pub fn with_extent(mut self, axis: Axis, extent: f64) -> Self {
        match axis {
            Axis::Vertical => self.height = extent,
            Axis::Horizontal => self.width = extent,
        }
        self
    }

    /// Both extents finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

impl From<DVec2> for Size {
    fn from(v: DVec2) -> Self {
        Size::new(v.x, v.y)
    }
}

impl From<Size> for DVec2 {
    fn from(s: Size) -> Self {
        DVec2::new(s.width, s.height)
    }
}

/// Insets contributed by an enclosing safe area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SafeArea {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl SafeArea {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Inset before the first item when stacking along `axis`.
    pub fn leading(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.top,
            Axis::Horizontal => self.left,
        }
    }

    /// Inset after the last item when stacking along `axis`.
    pub fn trailing(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.bottom,
            Axis::Horizontal => self.right,
        }
    }
}
