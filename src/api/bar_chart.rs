use tracing::{debug, trace};

use crate::core::{
    AxisScale, BarInput, BarItem, LinearScale, Viewport, compute_axis, compute_bar_geometry,
};
use crate::error::ChartResult;
use crate::render::{
    DrawingSurface, RectPrimitive, RenderFrame, TextBaseline, TextHAlign, TextPrimitive,
};
use crate::stats::format_value;

use super::chart_pass::{push_value_grid, sync_backing};
use super::{BarAxisOverrides, BarChartOptions, ChartStyle, RedrawOutcome};

/// Categorical bar chart against one shared value axis.
#[derive(Debug)]
pub struct BarChart<S: DrawingSurface> {
    surface: S,
    base_options: BarChartOptions,
    current_options: BarChartOptions,
    style: ChartStyle,
    items: Vec<BarItem>,
}

impl<S: DrawingSurface> BarChart<S> {
    pub fn new(surface: S, options: BarChartOptions) -> ChartResult<Self> {
        let options = options.validate()?;
        Ok(Self {
            surface,
            current_options: options.clone(),
            base_options: options,
            style: ChartStyle::default(),
            items: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    #[must_use]
    pub fn items(&self) -> &[BarItem] {
        &self.items
    }

    /// Options in effect for the current dataset (base merged with overrides).
    #[must_use]
    pub fn options(&self) -> &BarChartOptions {
        &self.current_options
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        !self.items.is_empty()
    }

    /// Validates `inputs`, replaces the dataset and redraws.
    ///
    /// Candidates with a blank label or a missing/non-finite value are
    /// dropped entirely; nothing is drawn as a placeholder zero bar.
    /// `overrides` replace the base unit and suggested maximum for this
    /// dataset only.
    pub fn set_data(
        &mut self,
        inputs: Vec<BarInput>,
        overrides: Option<BarAxisOverrides>,
    ) -> ChartResult<RedrawOutcome> {
        let options = self.base_options.merged(overrides.as_ref()).validate()?;
        let total = inputs.len();
        self.items = inputs.iter().filter_map(BarItem::from_input).collect();
        if self.items.len() < total {
            debug!(
                dropped = total - self.items.len(),
                "dropped invalid bar candidates"
            );
        }
        self.current_options = options;
        debug!(item_count = self.items.len(), "set bar data");

        self.redraw()
    }

    #[must_use]
    pub fn axis(&self) -> AxisScale {
        compute_axis(
            self.items.iter().map(|item| item.value),
            self.current_options.suggested_max,
            self.current_options.tick_count,
            &self.current_options.unit,
        )
    }

    /// Repaints the current dataset; a surface that is not laid out yet is skipped.
    pub fn redraw(&mut self) -> ChartResult<RedrawOutcome> {
        let viewport = self.surface.logical_size();
        if !viewport.is_valid() {
            trace!(
                width = viewport.width,
                height = viewport.height,
                "bar chart surface not laid out; skipping redraw"
            );
            return Ok(RedrawOutcome::NotReady);
        }

        let pixel_ratio = self.surface.device_pixel_ratio();
        sync_backing(&mut self.surface, viewport, pixel_ratio)?;
        let frame = self.build_frame(viewport, pixel_ratio);
        self.surface.present(&frame)?;
        Ok(RedrawOutcome::Drawn)
    }

    /// Materializes the full scene for `viewport`; a pure function of chart state.
    #[must_use]
    pub fn build_frame(&self, viewport: Viewport, pixel_ratio: f64) -> RenderFrame {
        let plot = self.current_options.padding.plot_area(viewport);
        let axis = self.axis();
        let scale = LinearScale::from_axis(&axis);
        let style = &self.style;

        let mut frame = RenderFrame::new(viewport, pixel_ratio);
        push_value_grid(&mut frame, &axis, plot, style);
        if self.items.is_empty() {
            return frame;
        }

        let geometry = compute_bar_geometry(self.items.len(), plot.width);
        for (index, item) in self.items.iter().enumerate() {
            let center_x = plot.left + geometry.center(index);
            let ratio = scale.ratio(item.value).min(1.0);
            let bar_height = (ratio * plot.height).max(0.0);
            let top = plot.bottom() - bar_height;

            let (fill, stroke, stroke_width) = if item.emphasized {
                (
                    style.bar_fill_emphasized,
                    style.bar_stroke_emphasized,
                    style.bar_stroke_width_emphasized,
                )
            } else {
                (style.bar_fill, style.bar_stroke, style.bar_stroke_width)
            };
            let mut rect = RectPrimitive::new(
                center_x - geometry.bar_width / 2.0,
                top,
                geometry.bar_width,
                bar_height,
                fill,
            );
            if bar_height > style.bar_stroke_min_height_px {
                rect = rect.with_border(stroke_width, stroke);
            }
            frame.rects.push(rect);

            frame.texts.push(TextPrimitive::new(
                format_value(Some(item.value), &axis.unit),
                center_x,
                top - style.bar_value_gap_px,
                style.font_size_px,
                style.bar_value_color,
                TextHAlign::Center,
                TextBaseline::Bottom,
            ));
            frame.texts.push(
                TextPrimitive::new(
                    item.label.clone(),
                    center_x,
                    plot.bottom() + style.category_label_gap_px,
                    style.font_size_px,
                    style.category_label_color,
                    TextHAlign::Right,
                    TextBaseline::Middle,
                )
                .rotated(style.category_label_rotation_rad),
            );
        }

        frame
    }
}
