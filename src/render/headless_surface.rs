use crate::core::{BackingSize, Viewport};
use crate::error::ChartResult;
use crate::render::{DrawingSurface, RenderFrame, effective_pixel_ratio};

/// Recording surface used by tests and headless hosts.
///
/// It validates every presented frame and keeps the last one. Frames are
/// deterministic descriptions of the pixels a raster backend would paint,
/// so two equal frames at the same backing size are equal pixel output.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    logical: Viewport,
    pixel_ratio: f64,
    backing: BackingSize,
    backing_resizes: usize,
    presented: usize,
    last_frame: Option<RenderFrame>,
}

impl HeadlessSurface {
    /// Surface laid out at `width`×`height` logical pixels with a ratio of 1.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            logical: Viewport::new(width, height),
            pixel_ratio: 1.0,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    /// Simulates the host re-laying out the element.
    pub fn set_logical_size(&mut self, width: u32, height: u32) {
        self.logical = Viewport::new(width, height);
    }

    pub fn set_pixel_ratio(&mut self, pixel_ratio: f64) {
        self.pixel_ratio = pixel_ratio;
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    #[must_use]
    pub fn presented_count(&self) -> usize {
        self.presented
    }

    #[must_use]
    pub fn backing_resize_count(&self) -> usize {
        self.backing_resizes
    }
}

impl DrawingSurface for HeadlessSurface {
    fn logical_size(&self) -> Viewport {
        self.logical
    }

    fn device_pixel_ratio(&self) -> f64 {
        effective_pixel_ratio(self.pixel_ratio)
    }

    fn backing_size(&self) -> BackingSize {
        self.backing
    }

    fn resize_backing(&mut self, size: BackingSize) -> ChartResult<()> {
        self.backing = size;
        self.backing_resizes += 1;
        Ok(())
    }

    fn present(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.presented += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
