use serde::{Deserialize, Serialize};

use crate::core::{AxisUnit, DEFAULT_COUNT_SUFFIX};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;
use crate::stats::{DEFAULT_MAX_COMPARISON_BARS, MetricKind, MetricLabels, SeriesPalette};

use super::{BarChartOptions, ChartStyle, DEFAULT_TICK_COUNT, LineChartOptions};

/// Fixed copy shown by the dashboard outside of chart pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardText {
    pub no_sessions: String,
    pub no_years: String,
    pub missing_session: String,
    pub missing_year: String,
    pub comparison_title: String,
    /// Appended to the tag name in the comparison title.
    pub tag_suffix: String,
    pub legend_current: String,
    pub legend_related: String,
}

impl Default for DashboardText {
    fn default() -> Self {
        Self {
            no_sessions: "데이터 없음".to_owned(),
            no_years: "연도 없음".to_owned(),
            missing_session: "차수 데이터 없음".to_owned(),
            missing_year: "연도 데이터 없음".to_owned(),
            comparison_title: "태그 기반 비교".to_owned(),
            tag_suffix: " 태그".to_owned(),
            legend_current: "현재 자격증".to_owned(),
            legend_related: "연관 자격증".to_owned(),
        }
    }
}

/// Page-level dashboard configuration.
///
/// Every field is optional when loaded from JSON, so a host can override
/// just the palette or just the bar cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub palette: SeriesPalette,
    pub labels: MetricLabels,
    pub text: DashboardText,
    pub count_suffix: String,
    pub tick_count: usize,
    pub max_comparison_bars: usize,
    pub default_metric: MetricKind,
    pub comparison_current_color: Color,
    pub comparison_related_color: Color,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            palette: SeriesPalette::default(),
            labels: MetricLabels::default(),
            text: DashboardText::default(),
            count_suffix: DEFAULT_COUNT_SUFFIX.to_owned(),
            tick_count: DEFAULT_TICK_COUNT,
            max_comparison_bars: DEFAULT_MAX_COMPARISON_BARS,
            default_metric: MetricKind::Applicants,
            comparison_current_color: Color::rgba8(122, 162, 255, 1.0),
            comparison_related_color: Color::rgba8(122, 162, 255, 0.28),
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse dashboard config json: {e}"))
        })?;
        config.validate()
    }

    pub fn validate(self) -> ChartResult<Self> {
        if self.tick_count == 0 {
            return Err(ChartError::InvalidData(
                "dashboard tick count must be >= 1".to_owned(),
            ));
        }
        if self.max_comparison_bars == 0 {
            return Err(ChartError::InvalidData(
                "max comparison bars must be >= 1".to_owned(),
            ));
        }
        for kind in MetricKind::ALL {
            self.palette.color(kind).validate()?;
        }
        self.comparison_current_color.validate()?;
        self.comparison_related_color.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn with_max_comparison_bars(mut self, max: usize) -> Self {
        self.max_comparison_bars = max;
        self
    }

    #[must_use]
    pub fn with_default_metric(mut self, metric: MetricKind) -> Self {
        self.default_metric = metric;
        self
    }

    #[must_use]
    pub fn with_count_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.count_suffix = suffix.into();
        self
    }

    /// Options for the headcount line chart.
    #[must_use]
    pub fn volume_chart_options(&self) -> LineChartOptions {
        LineChartOptions::default()
            .with_unit(AxisUnit::count(self.count_suffix.clone()))
            .with_tick_count(self.tick_count)
    }

    /// Options for the pass-rate line chart: percent axis pinned to 0..100.
    #[must_use]
    pub fn rate_chart_options(&self) -> LineChartOptions {
        LineChartOptions::default()
            .with_unit(AxisUnit::Percent)
            .with_suggested_max(MetricKind::PassRate.suggested_max())
            .with_tick_count(self.tick_count)
    }

    #[must_use]
    pub fn comparison_chart_options(&self) -> BarChartOptions {
        BarChartOptions::default()
            .with_unit(AxisUnit::count(self.count_suffix.clone()))
            .with_tick_count(self.tick_count)
    }

    /// Bar style whose fills match the comparison legend swatches.
    #[must_use]
    pub fn comparison_chart_style(&self) -> ChartStyle {
        ChartStyle::default()
            .with_bar_colors(self.comparison_current_color, self.comparison_related_color)
    }
}
