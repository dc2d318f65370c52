//! Computed frames and the aggregate result of a layout pass.
//!
//! Frames are pure output: the host applies them to its own render tree.

use glam::DVec2;
use indexmap::IndexMap;
use stack_core::{Axis, ContentId, Size};

/// Axis-aligned bounding box, relative to the stack's content origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create bounds with position and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create bounds from position and size vectors.
    pub fn from_vecs(position: DVec2, size: DVec2) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.x,
            height: size.y,
        }
    }

    /// Create bounds from offsets and extents along a stacking axis.
    pub fn from_axes(
        axis: Axis,
        primary_origin: f64,
        cross_origin: f64,
        primary: f64,
        cross: f64,
    ) -> Self {
        Self::from_vecs(
            axis.compose(primary_origin, cross_origin),
            axis.compose(primary, cross),
        )
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Offset of the leading edge along `axis`.
    pub fn origin_along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.y,
            Axis::Horizontal => self.x,
        }
    }

    /// Extent along `axis`.
    pub fn extent_along(&self, axis: Axis) -> f64 {
        self.size().along(axis)
    }

    /// Get the right edge (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Get the center X coordinate.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// Output of one layout computation.
///
/// Two results are equal only when their frames match in the same order.
#[derive(Debug, Clone)]
pub struct LayoutResult {
    /// Stacking axis the frames were computed for
    pub axis: Axis,
    /// Frame of each item, in item order
    frames: IndexMap<ContentId, Bounds>,
    /// Aggregate content size (primary extent x cross extent)
    pub content_size: Size,
    /// Viewport size after resolving any self-sizing axes
    pub viewport_size: Size,
    /// Number of sizing passes run (2 when weights were redistributed)
    pub passes: u8,
}

impl PartialEq for LayoutResult {
    fn eq(&self, other: &Self) -> bool {
        self.axis == other.axis
            && self.content_size == other.content_size
            && self.viewport_size == other.viewport_size
            && self.passes == other.passes
            && self.frames.iter().eq(other.frames.iter())
    }
}

impl LayoutResult {
    pub(crate) fn new(axis: Axis, capacity: usize) -> Self {
        Self {
            axis,
            frames: IndexMap::with_capacity(capacity),
            content_size: Size::ZERO,
            viewport_size: Size::ZERO,
            passes: 0,
        }
    }

    /// Record a frame, returning the previous frame for the same content.
    pub(crate) fn set_frame(&mut self, content: ContentId, bounds: Bounds) -> Option<Bounds> {
        self.frames.insert(content, bounds)
    }

    pub(crate) fn clear_frames(&mut self) {
        self.frames.clear();
    }

    /// Frame for a piece of content.
    pub fn frame(&self, content: ContentId) -> Option<Bounds> {
        self.frames.get(&content).copied()
    }

    /// Frame of the item at `index` in stack order.
    pub fn frame_at(&self, index: usize) -> Option<(ContentId, Bounds)> {
        self.frames.get_index(index).map(|(id, b)| (*id, *b))
    }

    /// All frames in stack order.
    pub fn frames(&self) -> impl Iterator<Item = (ContentId, Bounds)> + '_ {
        self.frames.iter().map(|(id, b)| (*id, *b))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Content extent along the stacking axis.
    pub fn content_extent(&self) -> f64 {
        self.content_size.along(self.axis)
    }

    /// Scroll position as a fraction of the scrollable range, in `[0, 1]`.
    ///
    /// Returns 0 when the content does not overflow the viewport.
    pub fn scroll_fraction(&self, offset: f64) -> f64 {
        let max_offset = self.content_extent() - self.viewport_size.along(self.axis);
        if max_offset <= 0.0 || !offset.is_finite() {
            return 0.0;
        }
        (offset / max_offset).clamp(0.0, 1.0)
    }
}
