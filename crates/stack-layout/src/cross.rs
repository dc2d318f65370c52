//! Cross-axis resolution.

use stack_core::{Alignment, Axis, CrossAxisMode, Item, LayoutError};

use crate::measure::NaturalSizer;

/// Resolved cross-axis offset and extent of one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CrossPlacement {
    pub offset: f64,
    pub extent: f64,
}

/// Cross extent of a cross-self-sizing stack: the widest `Fit` item,
/// margins included.
///
/// A natural-sized `Fit` item without an explicit extent counts with the
/// refined extent it will be given in the pass, measured through the
/// sizer's cache. Other `Fit` items use their explicit or current extent.
pub(crate) fn self_sized_extent(
    items: &[Item],
    axis: Axis,
    sizer: &mut NaturalSizer<'_>,
) -> Result<f64, LayoutError> {
    let cross_axis = axis.cross();
    let mut widest = 0.0_f64;
    for item in items {
        let CrossAxisMode::Fit { extent, .. } = item.cross_axis() else {
            continue;
        };
        let content = item.content();
        let extent = match extent {
            Some(extent) => extent,
            None if item.is_natural_sized() => {
                let hint = sizer.current_extent(content, cross_axis);
                let primary = sizer.primary_extent(item, axis, hint)?;
                sizer.cross_extent(content, cross_axis, primary)?
            }
            None => sizer.current_extent(content, cross_axis),
        };
        let (lead, trail) = item.cross_margins(axis, sizer.direction(content));
        widest = widest.max(extent + lead + trail);
    }
    Ok(widest)
}

/// Cross space left to an item once its own margins are taken out.
pub(crate) fn available_space(container: f64, leading_margin: f64, trailing_margin: f64) -> f64 {
    (container - leading_margin - trailing_margin).max(0.0)
}

/// Extent chosen by the item's mode. `hint` is the content's current
/// extent, used by `Fit` items without an explicit extent.
pub(crate) fn mode_extent(mode: CrossAxisMode, available: f64, hint: f64) -> f64 {
    match mode {
        CrossAxisMode::Fill => available,
        CrossAxisMode::Percent { fraction, .. } => fraction * available,
        CrossAxisMode::Fit { extent, .. } => extent.unwrap_or(hint),
    }
}

/// Offset of an item of `extent` within `available` space that starts
/// after `leading_margin`.
pub(crate) fn align(alignment: Alignment, leading_margin: f64, available: f64, extent: f64) -> f64 {
    match alignment {
        Alignment::Begin => leading_margin,
        Alignment::Middle => leading_margin + (available - extent) / 2.0,
        Alignment::End => leading_margin + (available - extent),
    }
}

/// Resolve an item's cross-axis placement.
///
/// `natural_primary` is the item's measured primary extent when it is
/// natural-sized; a `Fit` item without an explicit extent is then refined by
/// an intrinsic cross-axis query constrained by that extent.
pub(crate) fn resolve(
    item: &Item,
    axis: Axis,
    container: f64,
    natural_primary: Option<f64>,
    sizer: &mut NaturalSizer<'_>,
) -> Result<CrossPlacement, LayoutError> {
    let cross_axis = axis.cross();
    let content = item.content();
    let mode = item.cross_axis();
    let (lead, trail) = item.cross_margins(axis, sizer.direction(content));
    let available = available_space(container, lead, trail);

    let extent = match (mode, natural_primary) {
        (CrossAxisMode::Fit { extent: None, .. }, Some(primary)) => {
            sizer.cross_extent(content, cross_axis, primary)?
        }
        _ => mode_extent(mode, available, sizer.current_extent(content, cross_axis)),
    };

    Ok(CrossPlacement {
        offset: align(mode.alignment(), lead, available, extent),
        extent,
    })
}
