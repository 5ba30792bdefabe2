use std::f64::consts::TAU;
use std::io::Write;

use cairo::{Context, Format, ImageSurface, LineCap, LineJoin, Operator};
use pango::FontDescription;

use crate::core::{BackingSize, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, DrawingSurface, RenderFrame, TextBaseline, TextHAlign, TextPrimitive,
    effective_pixel_ratio,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub paths_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Cairo + Pango raster surface.
///
/// The backing ARGB32 image is recreated whenever the chart asks for a new
/// backing size; frames are painted in logical coordinates under a
/// `pixel_ratio` scale so text and strokes stay crisp on dense displays.
#[derive(Debug)]
pub struct CairoSurface {
    surface: ImageSurface,
    logical: Viewport,
    pixel_ratio: f64,
    backing: BackingSize,
    font_family: String,
    last_stats: CairoRenderStats,
}

impl CairoSurface {
    pub fn new(width: u32, height: u32, pixel_ratio: f64) -> ChartResult<Self> {
        Ok(Self {
            surface: create_image_surface(BackingSize::new(1, 1))?,
            logical: Viewport::new(width, height),
            pixel_ratio: effective_pixel_ratio(pixel_ratio),
            backing: BackingSize::default(),
            font_family: "Sans".to_owned(),
            last_stats: CairoRenderStats::default(),
        })
    }

    pub fn set_logical_size(&mut self, width: u32, height: u32) {
        self.logical = Viewport::new(width, height);
    }

    pub fn set_pixel_ratio(&mut self, pixel_ratio: f64) {
        self.pixel_ratio = effective_pixel_ratio(pixel_ratio);
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Copy of the raw ARGB32 backing pixels.
    pub fn pixel_data(&mut self) -> ChartResult<Vec<u8>> {
        self.surface.flush();
        let data = self
            .surface
            .data()
            .map_err(|err| ChartError::Backend(format!("failed to read surface pixels: {err}")))?;
        Ok(data.to_vec())
    }

    pub fn write_png<W: Write>(&self, out: &mut W) -> ChartResult<()> {
        self.surface
            .write_to_png(out)
            .map_err(|err| ChartError::Backend(format!("failed to encode png: {err}")))
    }

    fn paint_frame(&self, context: &Context, frame: &RenderFrame) -> ChartResult<CairoRenderStats> {
        context.scale(frame.pixel_ratio, frame.pixel_ratio);

        context.save().map_err(backend("failed to save context"))?;
        context.set_operator(Operator::Clear);
        context.paint().map_err(backend("failed to clear surface"))?;
        context.restore().map_err(backend("failed to restore context"))?;

        let mut stats = CairoRenderStats::default();

        for line in &frame.lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context.stroke().map_err(backend("failed to stroke line"))?;
            stats.lines_drawn += 1;
        }

        for rect in &frame.rects {
            context.rectangle(rect.x, rect.y, rect.width, rect.height);
            apply_color(context, rect.fill_color);
            if rect.border_width > 0.0 {
                context
                    .fill_preserve()
                    .map_err(backend("failed to fill rectangle"))?;
                apply_color(context, rect.border_color);
                context.set_line_width(rect.border_width);
                context
                    .stroke()
                    .map_err(backend("failed to stroke rectangle border"))?;
            } else {
                context.fill().map_err(backend("failed to fill rectangle"))?;
            }
            stats.rects_drawn += 1;
        }

        for layer in 0..frame.layer_count() {
            context.set_line_join(LineJoin::Round);
            context.set_line_cap(LineCap::Round);
            for path in frame.layer_paths(layer) {
                let mut points = path.points.iter();
                if let Some((x, y)) = points.next() {
                    context.move_to(*x, *y);
                }
                for (x, y) in points {
                    context.line_to(*x, *y);
                }
                apply_color(context, path.color);
                context.set_line_width(path.stroke_width);
                context.stroke().map_err(backend("failed to stroke path"))?;
                stats.paths_drawn += 1;
            }
            context.set_line_cap(LineCap::Butt);
            context.set_line_join(LineJoin::Miter);

            for circle in frame.layer_circles(layer) {
                context.new_sub_path();
                context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
                apply_color(context, circle.color);
                context.fill().map_err(backend("failed to fill marker"))?;
                stats.circles_drawn += 1;
            }
        }

        for text in &frame.texts {
            self.paint_text(context, text)?;
            stats.texts_drawn += 1;
        }

        Ok(stats)
    }

    fn paint_text(&self, context: &Context, text: &TextPrimitive) -> ChartResult<()> {
        context.save().map_err(backend("failed to save context"))?;
        context.translate(text.x, text.y);
        if text.rotation_rad != 0.0 {
            context.rotate(text.rotation_rad);
        }

        let layout = pangocairo::functions::create_layout(context);
        let font_description =
            FontDescription::from_string(&format!("{} {}", self.font_family, text.font_size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(&text.text);

        let (text_width, text_height) = layout.pixel_size();
        let dx = match text.h_align {
            TextHAlign::Left => 0.0,
            TextHAlign::Center => -f64::from(text_width) / 2.0,
            TextHAlign::Right => -f64::from(text_width),
        };
        let dy = match text.baseline {
            TextBaseline::Top => 0.0,
            TextBaseline::Middle => -f64::from(text_height) / 2.0,
            TextBaseline::Bottom => -f64::from(text_height),
        };

        apply_color(context, text.color);
        context.move_to(dx, dy);
        pangocairo::functions::show_layout(context, &layout);
        context.restore().map_err(backend("failed to restore context"))
    }
}

impl DrawingSurface for CairoSurface {
    fn logical_size(&self) -> Viewport {
        self.logical
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn backing_size(&self) -> BackingSize {
        self.backing
    }

    fn resize_backing(&mut self, size: BackingSize) -> ChartResult<()> {
        self.surface = create_image_surface(size)?;
        self.backing = size;
        Ok(())
    }

    fn present(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let context =
            Context::new(&self.surface).map_err(backend("failed to create cairo context"))?;
        self.last_stats = self.paint_frame(&context, frame)?;
        Ok(())
    }
}

fn create_image_surface(size: BackingSize) -> ChartResult<ImageSurface> {
    let width = i32::try_from(size.width.max(1))
        .map_err(|_| ChartError::InvalidData("backing width exceeds i32".to_owned()))?;
    let height = i32::try_from(size.height.max(1))
        .map_err(|_| ChartError::InvalidData("backing height exceeds i32".to_owned()))?;
    ImageSurface::create(Format::ARgb32, width, height)
        .map_err(backend("failed to create cairo surface"))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn backend(prefix: &'static str) -> impl Fn(cairo::Error) -> ChartError {
    move |err| ChartError::Backend(format!("{prefix}: {err}"))
}
