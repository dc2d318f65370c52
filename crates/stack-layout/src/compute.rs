//! Layout computation for a stack of items.
//!
//! A layout call runs one sizing pass with weights disabled. When some item
//! declares a weight and the content falls short of the viewport, the whole
//! pass runs again with the leftover space split between weighted items.
//! Natural sizes measured by the first pass are reused by the second.

use stack_core::{Axis, Item, LayoutError, SafeArea, Size, StackOptions};

use crate::cross;
use crate::frame::{Bounds, LayoutResult};
use crate::measure::{IntrinsicSize, NaturalSizer, SizingHook};
use crate::primary::{self, PrimaryCursor, WeightShare};

/// Per-call input to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutContext {
    /// Stack configuration
    pub options: StackOptions,
    /// Viewport box; self-sizing axes ignore the corresponding extent
    pub viewport: Size,
    /// Insets from the enclosing safe area
    pub safe_area: SafeArea,
}

impl LayoutContext {
    pub fn new(options: StackOptions, viewport: Size) -> Self {
        Self {
            options,
            viewport,
            safe_area: SafeArea::default(),
        }
    }

    pub fn with_safe_area(mut self, safe_area: SafeArea) -> Self {
        self.safe_area = safe_area;
        self
    }

    fn validate(&self) -> Result<(), LayoutError> {
        if !self.viewport.is_valid() {
            return Err(LayoutError::InvalidViewport {
                reason: format!(
                    "size {}x{} must be finite and non-negative",
                    self.viewport.width, self.viewport.height
                ),
            });
        }
        let area = self.safe_area;
        let insets = [area.top, area.left, area.bottom, area.right];
        if insets.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(LayoutError::InvalidViewport {
                reason: "safe-area insets must be finite and non-negative".to_string(),
            });
        }
        Ok(())
    }
}

/// Quantities fixed for the whole layout call.
struct PassPlan {
    axis: Axis,
    /// Viewport extent along the stacking axis (0 when self-sizing)
    scroll_extent: f64,
    /// Viewport extent along the cross axis
    container_cross: f64,
    self_size_cross: bool,
    leading_inset: f64,
    trailing_inset: f64,
}

impl PassPlan {
    fn new(ctx: &LayoutContext) -> Self {
        let options = ctx.options;
        let axis = options.axis;
        let scroll_extent = if options.self_size_primary {
            0.0
        } else {
            ctx.viewport.along(axis)
        };
        Self {
            axis,
            scroll_extent,
            container_cross: ctx.viewport.along(axis.cross()),
            self_size_cross: options.self_size_cross,
            leading_inset: if options.auto_adjust_leading_inset {
                ctx.safe_area.leading(axis)
            } else {
                0.0
            },
            trailing_inset: if options.auto_adjust_trailing_inset {
                ctx.safe_area.trailing(axis)
            } else {
                0.0
            },
        }
    }
}

/// What a sizing pass reports back.
struct PassOutcome {
    /// Primary extent including margins and insets
    total: f64,
    /// Widest `Fit` item when the cross axis self-sizes
    max_cross: f64,
    contains_weights: bool,
}

/// Compute frames for `items` within the context's viewport.
///
/// `provider` answers natural-size queries; `hook`, when given, is asked
/// first for every natural-sized item.
pub fn compute_layout(
    items: &[Item],
    ctx: &LayoutContext,
    provider: &mut dyn IntrinsicSize,
    hook: Option<&SizingHook>,
) -> Result<LayoutResult, LayoutError> {
    ctx.validate()?;

    let plan = PassPlan::new(ctx);
    let mut sizer = NaturalSizer::new(provider, hook);
    let mut result = LayoutResult::new(plan.axis, items.len());

    let mut outcome = run_pass(items, &plan, &mut sizer, None, &mut result)?;
    result.passes = 1;

    if outcome.total < plan.scroll_extent && outcome.contains_weights {
        let share = WeightShare {
            leftover: plan.scroll_extent - outcome.total,
            total_weight: primary::total_weight(items),
        };
        if share.total_weight > 0.0 {
            tracing::trace!(
                leftover = share.leftover,
                total_weight = share.total_weight,
                "redistributing leftover space"
            );
            result.clear_frames();
            outcome = run_pass(items, &plan, &mut sizer, Some(share), &mut result)?;
            result.passes = 2;
        }
    }

    let primary_extent = outcome.total.max(plan.scroll_extent);
    let cross_extent = if plan.self_size_cross {
        outcome.max_cross
    } else {
        plan.container_cross
    };
    let viewport_primary = if ctx.options.self_size_primary {
        primary_extent
    } else {
        ctx.viewport.along(plan.axis)
    };

    result.content_size = Size::from_axes(plan.axis, primary_extent, cross_extent);
    result.viewport_size = Size::from_axes(plan.axis, viewport_primary, cross_extent);

    tracing::debug!(
        items = items.len(),
        passes = result.passes,
        queries = sizer.queries(),
        width = result.content_size.width,
        height = result.content_size.height,
        "computed stack layout"
    );

    Ok(result)
}

fn run_pass(
    items: &[Item],
    plan: &PassPlan,
    sizer: &mut NaturalSizer<'_>,
    weights: Option<WeightShare>,
    result: &mut LayoutResult,
) -> Result<PassOutcome, LayoutError> {
    let axis = plan.axis;
    let max_cross = if plan.self_size_cross {
        cross::self_sized_extent(items, axis, sizer)?
    } else {
        0.0
    };
    let container_cross = if plan.self_size_cross {
        max_cross
    } else {
        plan.container_cross
    };

    let mut cursor = PrimaryCursor::new(plan.leading_inset);
    let mut contains_weights = false;

    for item in items {
        let mut extent = primary::base_extent(item, plan.scroll_extent);
        if let Some(weight) = item.weight() {
            contains_weights = true;
            if let Some(share) = weights {
                extent += share.extra(weight);
            }
        }

        let mut placement = cross::resolve(item, axis, container_cross, None, sizer)?;
        if item.is_natural_sized() {
            extent = sizer.primary_extent(item, axis, placement.extent)?;
            placement = cross::resolve(item, axis, container_cross, Some(extent), sizer)?;
        }

        let direction = sizer.direction(item.content());
        let (lead, trail) = item.primary_margins(axis, direction);
        let origin = cursor.place(lead, extent, trail);

        let bounds = Bounds::from_axes(axis, origin, placement.offset, extent, placement.extent);
        if result.set_frame(item.content(), bounds).is_some() {
            return Err(LayoutError::DuplicateContent {
                content: item.content(),
            });
        }
    }

    Ok(PassOutcome {
        total: cursor.finish(plan.trailing_inset),
        max_cross,
        contains_weights,
    })
}
