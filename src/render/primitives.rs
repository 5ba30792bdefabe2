use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Same channels, different opacity.
    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self::rgba(self.red, self.green, self.blue, alpha)
    }

    /// Color from 8-bit channels, the way palette tokens are usually written.
    #[must_use]
    pub const fn rgba8(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self::rgba(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
            alpha,
        )
    }

    /// Parses `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(token: &str) -> ChartResult<Self> {
        let digits = token.strip_prefix('#').unwrap_or(token);
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(ChartError::InvalidData(format!(
                "color token `{token}` must be #rrggbb or #rrggbbaa"
            )));
        }
        let channel = |index: usize| {
            u8::from_str_radix(&digits[index..index + 2], 16).map_err(|_| {
                ChartError::InvalidData(format!("color token `{token}` is not hexadecimal"))
            })
        };
        let alpha = if digits.len() == 8 {
            f64::from(channel(6)?) / 255.0
        } else {
            1.0
        };
        Ok(Self::rgba8(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

fn ensure_finite(values: &[f64], what: &str) -> ChartResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!("{what} must be finite")))
    }
}

fn ensure_positive(value: f64, what: &str) -> ChartResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!(
            "{what} must be finite and > 0"
        )))
    }
}

/// Draw command for one straight line in logical pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(&[self.x1, self.y1, self.x2, self.y2], "line coordinates")?;
        ensure_positive(self.stroke_width, "line stroke width")?;
        self.color.validate()
    }
}

/// Stroked polyline with round joins and caps.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub points: Vec<(f64, f64)>,
    pub stroke_width: f64,
    pub color: Color,
    /// Series layer; see [`RenderFrame::layer_count`](crate::render::RenderFrame::layer_count).
    pub layer: usize,
}

impl PathPrimitive {
    #[must_use]
    pub fn new(points: Vec<(f64, f64)>, stroke_width: f64, color: Color) -> Self {
        Self {
            points,
            stroke_width,
            color,
            layer: 0,
        }
    }

    #[must_use]
    pub fn with_layer(mut self, layer: usize) -> Self {
        self.layer = layer;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.points.len() < 2 {
            return Err(ChartError::InvalidData(
                "path primitive needs at least two points".to_owned(),
            ));
        }
        for (x, y) in &self.points {
            ensure_finite(&[*x, *y], "path coordinates")?;
        }
        ensure_positive(self.stroke_width, "path stroke width")?;
        self.color.validate()
    }
}

/// Filled rectangle with an optional border (`border_width == 0` disables it).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
    pub border_width: f64,
    pub border_color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
            border_width: 0.0,
            border_color: fill_color,
        }
    }

    #[must_use]
    pub const fn with_border(mut self, border_width: f64, border_color: Color) -> Self {
        self.border_width = border_width;
        self.border_color = border_color;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(
            &[self.x, self.y, self.width, self.height, self.border_width],
            "rect geometry",
        )?;
        if self.width < 0.0 || self.height < 0.0 || self.border_width < 0.0 {
            return Err(ChartError::InvalidData(
                "rect size and border width must be >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()?;
        self.border_color.validate()
    }
}

/// Filled circle, used for series point markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub color: Color,
    pub layer: usize,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn new(cx: f64, cy: f64, radius: f64, color: Color) -> Self {
        Self {
            cx,
            cy,
            radius,
            color,
            layer: 0,
        }
    }

    #[must_use]
    pub fn with_layer(mut self, layer: usize) -> Self {
        self.layer = layer;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(&[self.cx, self.cy], "circle center")?;
        ensure_positive(self.radius, "circle radius")?;
        self.color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Vertical anchor relative to `TextPrimitive::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

/// Draw command for one label in logical pixel space.
///
/// When `rotation_rad` is non-zero the text is laid out in a frame rotated
/// about `(x, y)`; alignment applies inside that rotated frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub baseline: TextBaseline,
    pub rotation_rad: f64,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
        baseline: TextBaseline,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            baseline,
            rotation_rad: 0.0,
        }
    }

    #[must_use]
    pub fn rotated(mut self, rotation_rad: f64) -> Self {
        self.rotation_rad = rotation_rad;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        ensure_finite(&[self.x, self.y, self.rotation_rad], "text placement")?;
        ensure_positive(self.font_size_px, "font size")?;
        self.color.validate()
    }
}
