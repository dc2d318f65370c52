//! Host-facing stack container.
//!
//! [`ScrollStack`] owns an [`ItemList`], a [`ContentStore`] and the current
//! viewport. Mutations schedule a coalesced recomputation on the host's
//! [`TaskQueue`]; [`ScrollStack::layout_now`] computes synchronously.
//!
//! A `ScrollStack` is itself [`Content`], so stacks nest: the outer stack
//! measures an inner one by laying it out under the constraining extent.
//! A stack that contains itself, directly or through other stacks, fails
//! with [`LayoutError::CycleDetected`].

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use stack_core::{
    Axis, ConfigError, ContentId, Item, ItemBuilder, LayoutDirection, LayoutError, SafeArea, Size,
    StackError, StackOptions,
};

use crate::compute::{compute_layout, LayoutContext};
use crate::frame::{Bounds, LayoutResult};
use crate::items::ItemList;
use crate::measure::{Content, ContentStore, SizingHook};
use crate::schedule::{LayoutScheduler, TaskQueue};

/// Callback receiving every completed layout.
pub type LayoutObserver = dyn FnMut(&LayoutResult);

struct StackState {
    options: StackOptions,
    items: ItemList,
    viewport: Size,
    safe_area: SafeArea,
    contents: ContentStore,
    sizing_hook: Option<Box<SizingHook>>,
    on_layout: Option<Box<LayoutObserver>>,
    scheduler: LayoutScheduler,
    last_layout: Option<LayoutResult>,
    recomputations: usize,
}

impl StackState {
    fn context(&self) -> LayoutContext {
        LayoutContext {
            options: self.options,
            viewport: self.viewport,
            safe_area: self.safe_area,
        }
    }

    fn compute(&mut self, ctx: &LayoutContext) -> Result<LayoutResult, LayoutError> {
        compute_layout(
            self.items.as_slice(),
            ctx,
            &mut self.contents,
            self.sizing_hook.as_deref(),
        )
    }
}

/// Shared handle to a stack. Clones refer to the same stack.
#[derive(Clone)]
pub struct ScrollStack {
    state: Rc<RefCell<StackState>>,
    queue: Rc<TaskQueue>,
}

impl ScrollStack {
    /// Create an empty stack that schedules its layouts on `queue`.
    pub fn new(options: StackOptions, queue: Rc<TaskQueue>) -> Self {
        let state = StackState {
            options,
            items: ItemList::new(),
            viewport: Size::ZERO,
            safe_area: SafeArea::default(),
            contents: ContentStore::new(),
            sizing_hook: None,
            on_layout: None,
            scheduler: LayoutScheduler::new(),
            last_layout: None,
            recomputations: 0,
        };
        Self {
            state: Rc::new(RefCell::new(state)),
            queue,
        }
    }

    pub fn queue(&self) -> &Rc<TaskQueue> {
        &self.queue
    }

    // -- Content registry --

    /// Register content under a fresh handle.
    pub fn add_content(&self, content: impl Content + 'static) -> ContentId {
        let id = self.state.borrow_mut().contents.add(content);
        self.layout_deferred();
        id
    }

    /// Register content under a caller-chosen handle, returning what it replaced.
    pub fn register(
        &self,
        id: ContentId,
        content: impl Content + 'static,
    ) -> Option<Box<dyn Content>> {
        let previous = self.state.borrow_mut().contents.insert(id, Box::new(content));
        self.layout_deferred();
        previous
    }

    /// Drop registered content. Items that still refer to it measure as empty.
    pub fn unregister(&self, id: ContentId) -> Option<Box<dyn Content>> {
        let removed = self.state.borrow_mut().contents.remove(id);
        if removed.is_some() {
            self.layout_deferred();
        }
        removed
    }

    /// Current size of registered content.
    pub fn content_size_of(&self, id: ContentId) -> Option<Size> {
        self.state
            .borrow()
            .contents
            .get(id)
            .map(|content| content.current_size())
    }

    // -- Item mutation --

    pub fn push(&self, item: Item) -> Result<(), ConfigError> {
        self.state.borrow_mut().items.push(item)?;
        self.layout_deferred();
        Ok(())
    }

    pub fn insert(&self, index: usize, item: Item) -> Result<(), ConfigError> {
        self.state.borrow_mut().items.insert(index, item)?;
        self.layout_deferred();
        Ok(())
    }

    pub fn pop(&self) -> Option<Item> {
        let item = self.state.borrow_mut().items.pop();
        self.changed_if(item)
    }

    pub fn remove_at(&self, index: usize) -> Option<Item> {
        let item = self.state.borrow_mut().items.remove_at(index);
        self.changed_if(item)
    }

    pub fn remove_content(&self, content: ContentId) -> Option<Item> {
        let item = self.state.borrow_mut().items.remove_content(content);
        self.changed_if(item)
    }

    pub fn remove_item(&self, item: &Item) -> Option<Item> {
        let removed = self.state.borrow_mut().items.remove_item(item);
        self.changed_if(removed)
    }

    pub fn replace_at(&self, index: usize, item: Item) -> Result<Item, ConfigError> {
        let old = self.state.borrow_mut().items.replace_at(index, item)?;
        self.layout_deferred();
        Ok(old)
    }

    pub fn replace_item(&self, old: &Item, item: Item) -> Result<Option<Item>, ConfigError> {
        let replaced = self.state.borrow_mut().items.replace_item(old, item)?;
        Ok(self.changed_if(replaced))
    }

    /// Rebuild the item at `index`; see [`ItemList::configure_at`].
    pub fn configure_at<F>(&self, index: usize, configure: F) -> Result<bool, ConfigError>
    where
        F: FnOnce(ItemBuilder) -> ItemBuilder,
    {
        let changed = self.state.borrow_mut().items.configure_at(index, configure)?;
        Ok(self.changed_when(changed))
    }

    pub fn configure_first<F>(&self, configure: F) -> Result<bool, ConfigError>
    where
        F: FnOnce(ItemBuilder) -> ItemBuilder,
    {
        let changed = self.state.borrow_mut().items.configure_first(configure)?;
        Ok(self.changed_when(changed))
    }

    pub fn configure_last<F>(&self, configure: F) -> Result<bool, ConfigError>
    where
        F: FnOnce(ItemBuilder) -> ItemBuilder,
    {
        let changed = self.state.borrow_mut().items.configure_last(configure)?;
        Ok(self.changed_when(changed))
    }

    // -- Viewport and options --

    pub fn set_viewport(&self, viewport: Size) {
        self.update(|state| std::mem::replace(&mut state.viewport, viewport) != viewport);
    }

    pub fn set_safe_area(&self, safe_area: SafeArea) {
        self.update(|state| std::mem::replace(&mut state.safe_area, safe_area) != safe_area);
    }

    pub fn set_options(&self, options: StackOptions) {
        self.update(|state| std::mem::replace(&mut state.options, options) != options);
    }

    pub fn set_auto_adjust_leading_inset(&self, enabled: bool) {
        self.update(|state| {
            std::mem::replace(&mut state.options.auto_adjust_leading_inset, enabled) != enabled
        });
    }

    pub fn set_auto_adjust_trailing_inset(&self, enabled: bool) {
        self.update(|state| {
            std::mem::replace(&mut state.options.auto_adjust_trailing_inset, enabled) != enabled
        });
    }

    /// Install a hook consulted before intrinsic measurement of
    /// natural-sized items. The hook runs during layout and must not
    /// mutate this stack.
    pub fn set_sizing_hook(&self, hook: impl Fn(&Item) -> Option<f64> + 'static) {
        self.state.borrow_mut().sizing_hook = Some(Box::new(hook));
        self.layout_deferred();
    }

    pub fn clear_sizing_hook(&self) {
        let removed = self.state.borrow_mut().sizing_hook.take();
        self.changed_if(removed);
    }

    /// Install a callback receiving every completed layout.
    pub fn set_on_layout(&self, observer: impl FnMut(&LayoutResult) + 'static) {
        self.state.borrow_mut().on_layout = Some(Box::new(observer));
    }

    // -- Layout --

    /// Invalidate the current layout and schedule a recomputation.
    ///
    /// Any recomputation scheduled earlier becomes a no-op, so a burst of
    /// mutations lays out once.
    pub fn layout_deferred(&self) {
        let tag = self.state.borrow_mut().scheduler.invalidate();
        let state = Rc::downgrade(&self.state);
        let queue = Rc::downgrade(&self.queue);
        self.queue.enqueue(move || run_deferred(state, queue, tag));
    }

    /// Lay out immediately, superseding any scheduled recomputation.
    pub fn layout_now(&self) -> Result<LayoutResult, StackError> {
        self.state
            .try_borrow_mut()
            .map_err(|_| LayoutError::CycleDetected)?
            .scheduler
            .invalidate();
        Ok(recompute(&self.state)?)
    }

    // -- Queries --

    pub fn options(&self) -> StackOptions {
        self.state.borrow().options
    }

    pub fn viewport(&self) -> Size {
        self.state.borrow().viewport
    }

    pub fn safe_area(&self) -> SafeArea {
        self.state.borrow().safe_area
    }

    /// Most recent completed layout.
    pub fn last_layout(&self) -> Option<LayoutResult> {
        self.state.borrow().last_layout.clone()
    }

    pub fn content_size(&self) -> Option<Size> {
        self.state
            .borrow()
            .last_layout
            .as_ref()
            .map(|layout| layout.content_size)
    }

    /// Frame of `content` in the most recent layout.
    pub fn frame(&self, content: ContentId) -> Option<Bounds> {
        self.state
            .borrow()
            .last_layout
            .as_ref()
            .and_then(|layout| layout.frame(content))
    }

    pub fn generation(&self) -> u64 {
        self.state.borrow().scheduler.generation()
    }

    /// Number of completed recomputations.
    pub fn recomputations(&self) -> usize {
        self.state.borrow().recomputations
    }

    pub fn items(&self) -> Vec<Item> {
        self.state.borrow().items.as_slice().to_vec()
    }

    pub fn item(&self, index: usize) -> Option<Item> {
        self.state.borrow().items.get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().items.is_empty()
    }

    fn update(&self, apply: impl FnOnce(&mut StackState) -> bool) {
        let changed = apply(&mut self.state.borrow_mut());
        self.changed_when(changed);
    }

    fn changed_when(&self, changed: bool) -> bool {
        if changed {
            self.layout_deferred();
        }
        changed
    }

    fn changed_if<T>(&self, value: Option<T>) -> Option<T> {
        self.changed_when(value.is_some());
        value
    }
}

fn run_deferred(weak: Weak<RefCell<StackState>>, queue: Weak<TaskQueue>, tag: u64) {
    let Some(state) = weak.upgrade() else {
        return;
    };
    let current = match state.try_borrow() {
        Ok(state) => state.scheduler.is_current(tag),
        Err(_) => {
            // Mid-pass: retry once the outer drain has finished
            tracing::debug!(tag, "stack busy, parking deferred layout");
            if let Some(owner) = queue.upgrade() {
                owner.defer(move || run_deferred(weak, queue, tag));
            }
            return;
        }
    };
    if !current {
        tracing::debug!(tag, "deferred layout superseded");
        return;
    }
    if let Err(err) = recompute(&state) {
        tracing::warn!(%err, tag, "deferred layout failed, keeping previous result");
    }
}

fn recompute(cell: &RefCell<StackState>) -> Result<LayoutResult, LayoutError> {
    let (result, observer) = {
        let mut state = cell.try_borrow_mut().map_err(|_| LayoutError::CycleDetected)?;
        let ctx = state.context();
        let result = state.compute(&ctx)?;
        state.contents.apply(&result);

        // Self-sizing axes adopt the resolved extent
        let axis = state.options.axis;
        for axis in [axis, axis.cross()] {
            if state.options.is_self_sizing(axis) {
                state.viewport = state.viewport.with_extent(axis, result.viewport_size.along(axis));
            }
        }

        state.recomputations += 1;
        state.last_layout = Some(result.clone());
        (result, state.on_layout.take())
    };

    if let Some(mut observer) = observer {
        observer(&result);
        if let Ok(mut state) = cell.try_borrow_mut() {
            // Keep a callback installed by the observer itself
            if state.on_layout.is_none() {
                state.on_layout = Some(observer);
            }
        }
    }

    Ok(result)
}

impl Content for ScrollStack {
    /// Natural extent along `axis` with the other axis fixed at
    /// `constraint`. The measured axis is laid out as self-sizing.
    fn intrinsic_extent(
        &mut self,
        axis: Axis,
        constraint: f64,
    ) -> Result<Option<f64>, LayoutError> {
        let mut state = self
            .state
            .try_borrow_mut()
            .map_err(|_| LayoutError::CycleDetected)?;

        let mut ctx = state.context();
        ctx.viewport = ctx.viewport.with_extent(axis.cross(), constraint.max(0.0));
        if axis == ctx.options.axis {
            ctx.options.self_size_primary = true;
        } else {
            ctx.options.self_size_cross = true;
        }

        let result = state.compute(&ctx)?;
        let extent = result.content_size.along(axis);
        tracing::trace!(?axis, constraint, extent, "measured nested stack");
        Ok(Some(extent))
    }

    fn current_size(&self) -> Size {
        self.state
            .try_borrow()
            .map(|state| state.viewport)
            .unwrap_or_default()
    }

    fn layout_direction(&self) -> LayoutDirection {
        LayoutDirection::LeftToRight
    }

    fn apply_frame(&mut self, frame: Bounds) {
        self.set_viewport(frame.size());
    }
}

impl fmt::Debug for ScrollStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.try_borrow() {
            Ok(state) => f
                .debug_struct("ScrollStack")
                .field("options", &state.options)
                .field("items", &state.items.len())
                .field("viewport", &state.viewport)
                .field("generation", &state.scheduler.generation())
                .finish(),
            Err(_) => f.write_str("ScrollStack { <in layout> }"),
        }
    }
}
