use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, LinePrimitive, PathPrimitive, RectPrimitive, TextPrimitive,
    effective_pixel_ratio,
};

/// Backend-agnostic scene for one chart draw pass.
///
/// Coordinates are logical pixels; backends scale by `pixel_ratio`. Paint
/// order is grid lines, rects, then each series layer in turn (its paths,
/// then its circles), then texts.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub pixel_ratio: f64,
    pub lines: Vec<LinePrimitive>,
    pub paths: Vec<PathPrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, pixel_ratio: f64) -> Self {
        Self {
            viewport,
            pixel_ratio: effective_pixel_ratio(pixel_ratio),
            lines: Vec::new(),
            paths: Vec::new(),
            rects: Vec::new(),
            circles: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for line in &self.lines {
            line.validate()?;
        }
        for path in &self.paths {
            path.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    /// Number of series layers, one past the highest path or circle layer.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.paths
            .iter()
            .map(|path| path.layer)
            .chain(self.circles.iter().map(|circle| circle.layer))
            .max()
            .map_or(0, |layer| layer + 1)
    }

    pub fn layer_paths(&self, layer: usize) -> impl Iterator<Item = &PathPrimitive> {
        self.paths.iter().filter(move |path| path.layer == layer)
    }

    pub fn layer_circles(&self, layer: usize) -> impl Iterator<Item = &CirclePrimitive> {
        self.circles.iter().filter(move |circle| circle.layer == layer)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.paths.is_empty()
            && self.rects.is_empty()
            && self.circles.is_empty()
            && self.texts.is_empty()
    }
}
