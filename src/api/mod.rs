mod bar_chart;
mod chart_options;
mod chart_pass;
mod chart_style;
mod dashboard;
mod dashboard_config;
mod line_chart;
mod redraw_scheduler;
mod selection_controller;
mod view_model;

pub use bar_chart::BarChart;
pub use chart_options::{
    BAR_CHART_PADDING, BarAxisOverrides, BarChartOptions, DEFAULT_TICK_COUNT, LINE_CHART_PADDING,
    LineChartOptions, RedrawOutcome,
};
pub use chart_style::ChartStyle;
pub use dashboard::{Dashboard, DashboardPhase, DashboardSurfaces};
pub use dashboard_config::{DashboardConfig, DashboardText};
pub use line_chart::LineChart;
pub use redraw_scheduler::{
    FramePass, FrameRequest, FrameRequestId, Redraw, RedrawScheduler, SharedChart,
};
pub use selection_controller::{ChartSet, SelectionController, SelectionState};
pub use view_model::{
    CardState, CardStates, DashboardView, SelectOption, SelectorState, SessionTab,
};
