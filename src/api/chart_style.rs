use std::f64::consts::PI;

use crate::render::Color;

/// Visual constants shared by the dashboard charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub grid_color: Color,
    pub grid_line_width: f64,
    /// How far grid lines reach left of the plot, under the tick labels.
    pub grid_overhang_px: f64,
    pub axis_label_color: Color,
    pub font_size_px: f64,
    pub y_label_gap_px: f64,
    pub x_label_gap_px: f64,
    pub series_line_width: f64,
    pub marker_radius: f64,
    pub bar_fill: Color,
    pub bar_stroke: Color,
    pub bar_fill_emphasized: Color,
    pub bar_stroke_emphasized: Color,
    pub bar_stroke_width: f64,
    pub bar_stroke_width_emphasized: f64,
    /// Bars shorter than this are not outlined.
    pub bar_stroke_min_height_px: f64,
    pub bar_value_color: Color,
    pub bar_value_gap_px: f64,
    pub category_label_color: Color,
    pub category_label_gap_px: f64,
    pub category_label_rotation_rad: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            grid_color: Color::rgba(1.0, 1.0, 1.0, 0.08),
            grid_line_width: 1.0,
            grid_overhang_px: 6.0,
            axis_label_color: Color::rgba8(231, 237, 247, 0.85),
            font_size_px: 12.0,
            y_label_gap_px: 10.0,
            x_label_gap_px: 12.0,
            series_line_width: 2.4,
            marker_radius: 3.2,
            bar_fill: Color::rgba8(122, 162, 255, 0.28),
            bar_stroke: Color::rgba8(122, 162, 255, 0.2),
            bar_fill_emphasized: Color::rgba8(122, 162, 255, 1.0),
            bar_stroke_emphasized: Color::rgba8(122, 162, 255, 0.9),
            bar_stroke_width: 1.0,
            bar_stroke_width_emphasized: 1.6,
            bar_stroke_min_height_px: 0.5,
            bar_value_color: Color::rgba8(231, 237, 247, 0.88),
            bar_value_gap_px: 6.0,
            category_label_color: Color::rgba8(204, 214, 235, 0.85),
            category_label_gap_px: 8.0,
            category_label_rotation_rad: -PI / 4.5,
        }
    }
}

impl ChartStyle {
    /// Recolors the bars. Outlines reuse each fill at a reduced opacity.
    #[must_use]
    pub fn with_bar_colors(mut self, emphasized: Color, peer: Color) -> Self {
        self.bar_fill_emphasized = emphasized;
        self.bar_stroke_emphasized = emphasized.with_alpha(emphasized.alpha * 0.9);
        self.bar_fill = peer;
        self.bar_stroke = peer.with_alpha(peer.alpha * 0.7);
        self
    }
}
