mod frame;
mod headless_surface;
mod primitives;

pub use frame::RenderFrame;
pub use headless_surface::HeadlessSurface;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, PathPrimitive, RectPrimitive, TextBaseline, TextHAlign,
    TextPrimitive,
};

use crate::core::{BackingSize, Viewport};
use crate::error::ChartResult;

/// Resizable raster surface a chart draws onto.
///
/// The host owns layout: the surface reports the logical size it was laid
/// out at and the device pixel ratio, while charts decide when the backing
/// buffer must follow. `present` clears the surface and paints a fully
/// materialized `RenderFrame`, keeping drawing code isolated from chart
/// domain logic.
pub trait DrawingSurface {
    /// Laid-out size in logical pixels; zero while the host has not laid it out.
    fn logical_size(&self) -> Viewport;

    fn device_pixel_ratio(&self) -> f64;

    fn backing_size(&self) -> BackingSize;

    fn resize_backing(&mut self, size: BackingSize) -> ChartResult<()>;

    fn present(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

/// Ratio actually applied to a surface; non-finite or non-positive ratios fall back to 1.
#[must_use]
pub fn effective_pixel_ratio(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 { raw } else { 1.0 }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoSurface};
