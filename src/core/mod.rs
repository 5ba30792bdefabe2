pub mod axis;
pub mod line_series;
pub mod scale;
pub mod series;
pub mod types;

pub use axis::{
    AxisScale, AxisUnit, BarGeometry, DEFAULT_COUNT_SUFFIX, compute_axis, compute_bar_geometry,
    compute_category_positions,
};
pub use line_series::{LinePath, project_line_paths};
pub use scale::LinearScale;
pub use series::{BarInput, BarItem, LegendEntry, Series};
pub use types::{BackingSize, Padding, PlotArea, Viewport};
