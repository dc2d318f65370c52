//! Natural-size measurement.
//!
//! Items that set neither a fixed, percent nor weighted size are sized by
//! their content. The engine asks an [`IntrinsicSize`] provider for the
//! content's preferred extent, after giving a custom [`SizingHook`] the
//! chance to answer first, and caches each answer for the rest of the
//! layout call.

use indexmap::IndexMap;
use stack_core::{Axis, ContentId, Item, LayoutDirection, LayoutError, Size};

use crate::frame::{Bounds, LayoutResult};

/// Override hook consulted before the intrinsic-size provider.
pub type SizingHook = dyn Fn(&Item) -> Option<f64>;

/// Capability to report the preferred size of content by handle.
///
/// Answers must be stable for the duration of one layout call.
pub trait IntrinsicSize {
    /// Whether the content can report an intrinsic size at all.
    fn supports_intrinsic_size(&self, content: ContentId) -> bool;

    /// Preferred extent along `axis`, given the extent already resolved on
    /// the other axis. `None` means "no preference".
    fn intrinsic_extent(
        &mut self,
        content: ContentId,
        axis: Axis,
        constraint: f64,
    ) -> Result<Option<f64>, LayoutError>;

    /// Size the content currently has.
    fn current_size(&self, content: ContentId) -> Size;

    fn layout_direction(&self, content: ContentId) -> LayoutDirection;
}

/// A renderable element that can be stacked.
pub trait Content {
    fn supports_intrinsic_size(&self) -> bool {
        true
    }

    /// Preferred extent along `axis` when the other axis is `constraint`.
    fn intrinsic_extent(&mut self, axis: Axis, constraint: f64) -> Result<Option<f64>, LayoutError>;

    fn current_size(&self) -> Size;

    fn layout_direction(&self) -> LayoutDirection {
        LayoutDirection::LeftToRight
    }

    /// Receive the frame computed for this content.
    fn apply_frame(&mut self, frame: Bounds);
}

/// Content with a known preferred size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StaticContent {
    pub preferred: Size,
    pub size: Size,
    pub direction: LayoutDirection,
}

impl StaticContent {
    pub fn new(preferred: Size) -> Self {
        Self {
            preferred,
            size: preferred,
            direction: LayoutDirection::LeftToRight,
        }
    }

    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }
}

impl Content for StaticContent {
    fn intrinsic_extent(
        &mut self,
        axis: Axis,
        _constraint: f64,
    ) -> Result<Option<f64>, LayoutError> {
        Ok(Some(self.preferred.along(axis)))
    }

    fn current_size(&self) -> Size {
        self.size
    }

    fn layout_direction(&self) -> LayoutDirection {
        self.direction
    }

    fn apply_frame(&mut self, frame: Bounds) {
        self.size = frame.size();
    }
}

/// Registry of contents keyed by handle.
#[derive(Default)]
pub struct ContentStore {
    contents: IndexMap<ContentId, Box<dyn Content>>,
    next_id: u64,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a handle not used by any registered content.
    pub fn next_id(&mut self) -> ContentId {
        loop {
            let id = ContentId(self.next_id);
            self.next_id += 1;
            if !self.contents.contains_key(&id) {
                return id;
            }
        }
    }

    /// Register content under a fresh handle.
    pub fn add(&mut self, content: impl Content + 'static) -> ContentId {
        let id = self.next_id();
        self.contents.insert(id, Box::new(content));
        id
    }

    /// Register content under a caller-chosen handle, returning what it replaced.
    pub fn insert(&mut self, id: ContentId, content: Box<dyn Content>) -> Option<Box<dyn Content>> {
        self.contents.insert(id, content)
    }

    pub fn remove(&mut self, id: ContentId) -> Option<Box<dyn Content>> {
        self.contents.shift_remove(&id)
    }

    pub fn get(&self, id: ContentId) -> Option<&dyn Content> {
        self.contents.get(&id).map(|c| c.as_ref())
    }

    pub fn get_mut(&mut self, id: ContentId) -> Option<&mut (dyn Content + 'static)> {
        self.contents.get_mut(&id).map(|c| c.as_mut())
    }

    pub fn contains(&self, id: ContentId) -> bool {
        self.contents.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Push computed frames into the registered contents.
    pub fn apply(&mut self, result: &LayoutResult) {
        for (id, frame) in result.frames() {
            if let Some(content) = self.contents.get_mut(&id) {
                content.apply_frame(frame);
            }
        }
    }
}

impl IntrinsicSize for ContentStore {
    fn supports_intrinsic_size(&self, content: ContentId) -> bool {
        self.get(content)
            .map(|c| c.supports_intrinsic_size())
            .unwrap_or(false)
    }

    fn intrinsic_extent(
        &mut self,
        content: ContentId,
        axis: Axis,
        constraint: f64,
    ) -> Result<Option<f64>, LayoutError> {
        match self.contents.get_mut(&content) {
            Some(c) => c.intrinsic_extent(axis, constraint),
            None => {
                tracing::trace!(%content, "no registered content to measure");
                Ok(None)
            }
        }
    }

    fn current_size(&self, content: ContentId) -> Size {
        self.get(content).map(|c| c.current_size()).unwrap_or_default()
    }

    fn layout_direction(&self, content: ContentId) -> LayoutDirection {
        self.get(content)
            .map(|c| c.layout_direction())
            .unwrap_or_default()
    }
}

/// Per-call measurement front end with a natural-size cache.
pub(crate) struct NaturalSizer<'a> {
    provider: &'a mut dyn IntrinsicSize,
    hook: Option<&'a SizingHook>,
    cache: IndexMap<(ContentId, Axis), f64>,
    queries: usize,
}

impl<'a> NaturalSizer<'a> {
    pub(crate) fn new(provider: &'a mut dyn IntrinsicSize, hook: Option<&'a SizingHook>) -> Self {
        Self {
            provider,
            hook,
            cache: IndexMap::new(),
            queries: 0,
        }
    }

    pub(crate) fn direction(&self, content: ContentId) -> LayoutDirection {
        self.provider.layout_direction(content)
    }

    /// Current extent of the content along `axis`, used as the `Fit` hint.
    pub(crate) fn current_extent(&self, content: ContentId, axis: Axis) -> f64 {
        sanitize(self.provider.current_size(content).along(axis))
    }

    /// Natural extent along the stacking axis.
    pub(crate) fn primary_extent(
        &mut self,
        item: &Item,
        axis: Axis,
        constraint: f64,
    ) -> Result<f64, LayoutError> {
        let key = (item.content(), axis);
        if let Some(&extent) = self.cache.get(&key) {
            tracing::trace!(content = %item.content(), extent, "natural size cache hit");
            return Ok(extent);
        }

        let extent = match self.hook.and_then(|hook| hook(item)) {
            Some(extent) => sanitize(extent),
            None => self.measure(item.content(), axis, constraint)?,
        };
        self.cache.insert(key, extent);
        Ok(extent)
    }

    /// Natural extent along the cross axis of a `Fit` item.
    pub(crate) fn cross_extent(
        &mut self,
        content: ContentId,
        cross_axis: Axis,
        constraint: f64,
    ) -> Result<f64, LayoutError> {
        let key = (content, cross_axis);
        if let Some(&extent) = self.cache.get(&key) {
            return Ok(extent);
        }
        let extent = self.measure(content, cross_axis, constraint)?;
        self.cache.insert(key, extent);
        Ok(extent)
    }

    /// Number of provider queries made so far.
    pub(crate) fn queries(&self) -> usize {
        self.queries
    }

    fn measure(
        &mut self,
        content: ContentId,
        axis: Axis,
        constraint: f64,
    ) -> Result<f64, LayoutError> {
        let current = self.current_extent(content, axis);
        if !self.provider.supports_intrinsic_size(content) {
            return Ok(current);
        }
        self.queries += 1;
        let extent = self
            .provider
            .intrinsic_extent(content, axis, constraint)?
            .map(sanitize)
            .unwrap_or(current);
        tracing::trace!(%content, ?axis, constraint, extent, "measured natural size");
        Ok(extent)
    }
}

fn sanitize(extent: f64) -> f64 {
    if extent.is_finite() {
        extent.max(0.0)
    } else {
        0.0
    }
}
