use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Logical (CSS-pixel) size of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Physical size of a surface's backing pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BackingSize {
    pub width: u32,
    pub height: u32,
}

impl BackingSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Backing buffer size for a logical viewport at `pixel_ratio`.
    #[must_use]
    pub fn for_viewport(viewport: Viewport, pixel_ratio: f64) -> Self {
        let scale = |logical: u32| (f64::from(logical) * pixel_ratio).round().max(0.0) as u32;
        Self {
            width: scale(viewport.width),
            height: scale(viewport.height),
        }
    }
}

/// Space reserved around the plot for axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "padding `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }

    /// Plot rectangle left after padding; never narrower or shorter than 1px.
    #[must_use]
    pub fn plot_area(self, viewport: Viewport) -> PlotArea {
        PlotArea {
            left: self.left,
            top: self.top,
            width: (f64::from(viewport.width) - self.left - self.right).max(1.0),
            height: (f64::from(viewport.height) - self.top - self.bottom).max(1.0),
        }
    }
}

/// Plot rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    /// Y of the value axis baseline.
    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }
}
