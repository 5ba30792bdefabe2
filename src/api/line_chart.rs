use tracing::{debug, trace};

use crate::core::{
    AxisScale, LegendEntry, LinearScale, Series, Viewport, compute_axis,
    compute_category_positions, project_line_paths,
};
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, DrawingSurface, PathPrimitive, RenderFrame, TextBaseline, TextHAlign,
    TextPrimitive,
};

use super::chart_pass::{push_value_grid, sync_backing};
use super::{ChartStyle, LineChartOptions, RedrawOutcome};

/// Multi-series line chart over a shared category axis.
///
/// The chart owns its surface and its last dataset. Every `set_datasets`
/// rebuilds the legend and redraws the whole surface; `redraw` alone
/// repaints the current dataset at the surface's current size.
#[derive(Debug)]
pub struct LineChart<S: DrawingSurface> {
    surface: S,
    categories: Vec<String>,
    options: LineChartOptions,
    style: ChartStyle,
    series: Vec<Series>,
    legend: Vec<LegendEntry>,
    has_data: bool,
}

impl<S: DrawingSurface> LineChart<S> {
    pub fn new(surface: S, categories: Vec<String>, options: LineChartOptions) -> ChartResult<Self> {
        Ok(Self {
            surface,
            categories,
            options: options.validate()?,
            style: ChartStyle::default(),
            series: Vec::new(),
            legend: Vec::new(),
            has_data: false,
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
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    #[must_use]
    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    #[must_use]
    pub fn options(&self) -> &LineChartOptions {
        &self.options
    }

    /// Whether any series has at least one finite point.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.has_data
    }

    /// Replaces the category axis and re-aligns the current series to it.
    pub fn set_categories(&mut self, categories: Vec<String>) -> ChartResult<RedrawOutcome> {
        self.categories = categories;
        let series = std::mem::take(&mut self.series);
        self.set_datasets(series)
    }

    /// Replaces the dataset, rebuilds the legend and redraws.
    ///
    /// Non-finite points are folded into gaps, then series are padded or
    /// truncated to the category count so every series has exactly one
    /// point per category.
    pub fn set_datasets(&mut self, series: Vec<Series>) -> ChartResult<RedrawOutcome> {
        let category_count = self.categories.len();
        let misaligned = series
            .iter()
            .filter(|series| series.points.len() != category_count)
            .count();
        if misaligned > 0 {
            debug!(
                misaligned,
                category_count, "aligning line series to category axis"
            );
        }

        self.series = series
            .into_iter()
            .map(|series| Series::new(series.label, series.points, series.color))
            .map(|series| series.aligned_to(category_count))
            .collect();
        self.has_data = self.series.iter().any(Series::has_data);
        self.legend = self
            .series
            .iter()
            .filter(|series| !series.label.is_empty())
            .map(|series| LegendEntry {
                label: series.label.clone(),
                color: series.color,
            })
            .collect();
        debug!(
            series_count = self.series.len(),
            has_data = self.has_data,
            "set line datasets"
        );

        self.redraw()
    }

    /// Value axis for the current dataset.
    #[must_use]
    pub fn axis(&self) -> AxisScale {
        compute_axis(
            self.series.iter().flat_map(Series::finite_values),
            self.options.suggested_max,
            self.options.tick_count,
            &self.options.unit,
        )
    }

    /// Repaints the current dataset; a surface that is not laid out yet is skipped.
    pub fn redraw(&mut self) -> ChartResult<RedrawOutcome> {
        let viewport = self.surface.logical_size();
        if !viewport.is_valid() {
            trace!(
                width = viewport.width,
                height = viewport.height,
                "line chart surface not laid out; skipping redraw"
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
        let plot = self.options.padding.plot_area(viewport);
        let axis = self.axis();
        let scale = LinearScale::from_axis(&axis);
        let style = &self.style;

        let mut frame = RenderFrame::new(viewport, pixel_ratio);
        push_value_grid(&mut frame, &axis, plot, style);

        let offsets = compute_category_positions(self.categories.len(), plot.width);
        for (label, offset) in self.categories.iter().zip(&offsets) {
            if label.is_empty() {
                continue;
            }
            frame.texts.push(TextPrimitive::new(
                label.clone(),
                plot.left + offset,
                plot.bottom() + style.x_label_gap_px,
                style.font_size_px,
                style.axis_label_color,
                TextHAlign::Center,
                TextBaseline::Top,
            ));
        }

        // Each series is stroked and marked before the next one starts.
        for (layer, series) in self.series.iter().enumerate() {
            for path in project_line_paths(&series.points, &offsets, scale, plot) {
                if path.segment_count() > 0 {
                    frame.paths.push(
                        PathPrimitive::new(
                            path.points.to_vec(),
                            style.series_line_width,
                            series.color,
                        )
                        .with_layer(layer),
                    );
                }
                frame.circles.extend(path.points.iter().map(|&(x, y)| {
                    CirclePrimitive::new(x, y, style.marker_radius, series.color).with_layer(layer)
                }));
            }
        }

        frame
    }
}
