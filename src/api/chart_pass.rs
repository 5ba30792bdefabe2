use tracing::trace;

use crate::core::{AxisScale, BackingSize, LinearScale, PlotArea, Viewport};
use crate::error::ChartResult;
use crate::render::{
    DrawingSurface, LinePrimitive, RenderFrame, TextBaseline, TextHAlign, TextPrimitive,
};
use crate::stats::format_tick;

use super::ChartStyle;

/// Resizes the backing buffer to `viewport × pixel_ratio` only when it differs.
pub(super) fn sync_backing<S: DrawingSurface>(
    surface: &mut S,
    viewport: Viewport,
    pixel_ratio: f64,
) -> ChartResult<()> {
    let wanted = BackingSize::for_viewport(viewport, pixel_ratio);
    if surface.backing_size() != wanted {
        trace!(
            width = wanted.width,
            height = wanted.height,
            pixel_ratio,
            "resizing backing buffer"
        );
        surface.resize_backing(wanted)?;
    }
    Ok(())
}

/// Horizontal grid line and right-aligned value label at every axis tick.
pub(super) fn push_value_grid(
    frame: &mut RenderFrame,
    axis: &AxisScale,
    plot: PlotArea,
    style: &ChartStyle,
) {
    let scale = LinearScale::from_axis(axis);
    for tick in axis.ticks() {
        let y = scale.value_to_y(tick, plot);
        frame.lines.push(LinePrimitive::new(
            plot.left - style.grid_overhang_px,
            y,
            plot.right(),
            y,
            style.grid_line_width,
            style.grid_color,
        ));
        frame.texts.push(TextPrimitive::new(
            format_tick(tick, &axis.unit),
            plot.left - style.y_label_gap_px,
            y,
            style.font_size_px,
            style.axis_label_color,
            TextHAlign::Right,
            TextBaseline::Middle,
        ));
    }
}
