use serde::{Deserialize, Serialize};

use crate::core::{AxisUnit, Padding};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_TICK_COUNT: usize = 4;
pub const LINE_CHART_PADDING: Padding = Padding::new(28.0, 24.0, 40.0, 64.0);
pub const BAR_CHART_PADDING: Padding = Padding::new(32.0, 32.0, 110.0, 76.0);

/// Result of one redraw request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedrawOutcome {
    Drawn,
    /// The surface has not been laid out yet (zero logical width or height).
    NotReady,
}

/// Value-axis and layout options for a line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartOptions {
    #[serde(default)]
    pub unit: AxisUnit,
    #[serde(default)]
    pub suggested_max: Option<f64>,
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
    #[serde(default = "default_line_padding")]
    pub padding: Padding,
}

impl Default for LineChartOptions {
    fn default() -> Self {
        Self {
            unit: AxisUnit::default(),
            suggested_max: None,
            tick_count: DEFAULT_TICK_COUNT,
            padding: LINE_CHART_PADDING,
        }
    }
}

impl LineChartOptions {
    #[must_use]
    pub fn with_unit(mut self, unit: AxisUnit) -> Self {
        self.unit = unit;
        self
    }

    #[must_use]
    pub fn with_suggested_max(mut self, suggested_max: Option<f64>) -> Self {
        self.suggested_max = suggested_max;
        self
    }

    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        validate_axis_options(self.suggested_max, self.tick_count)?;
        self.padding.validate()?;
        Ok(self)
    }
}

/// Value-axis and layout options for a bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartOptions {
    #[serde(default)]
    pub unit: AxisUnit,
    #[serde(default)]
    pub suggested_max: Option<f64>,
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
    #[serde(default = "default_bar_padding")]
    pub padding: Padding,
}

impl Default for BarChartOptions {
    fn default() -> Self {
        Self {
            unit: AxisUnit::default(),
            suggested_max: None,
            tick_count: DEFAULT_TICK_COUNT,
            padding: BAR_CHART_PADDING,
        }
    }
}

impl BarChartOptions {
    #[must_use]
    pub fn with_unit(mut self, unit: AxisUnit) -> Self {
        self.unit = unit;
        self
    }

    #[must_use]
    pub fn with_suggested_max(mut self, suggested_max: Option<f64>) -> Self {
        self.suggested_max = suggested_max;
        self
    }

    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        validate_axis_options(self.suggested_max, self.tick_count)?;
        self.padding.validate()?;
        Ok(self)
    }

    /// Base options with one dataset's axis overrides applied.
    #[must_use]
    pub fn merged(&self, overrides: Option<&BarAxisOverrides>) -> Self {
        match overrides {
            None => self.clone(),
            Some(overrides) => Self {
                unit: overrides.unit.clone(),
                suggested_max: overrides.suggested_max,
                ..self.clone()
            },
        }
    }
}

/// Per-dataset axis settings replacing the bar chart's base unit and floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarAxisOverrides {
    pub unit: AxisUnit,
    #[serde(default)]
    pub suggested_max: Option<f64>,
}

fn validate_axis_options(suggested_max: Option<f64>, tick_count: usize) -> ChartResult<()> {
    if tick_count == 0 {
        return Err(ChartError::InvalidData(
            "tick count must be >= 1".to_owned(),
        ));
    }
    if suggested_max.is_some_and(|max| !max.is_finite()) {
        return Err(ChartError::InvalidData(
            "suggested max must be finite".to_owned(),
        ));
    }
    Ok(())
}

fn default_tick_count() -> usize {
    DEFAULT_TICK_COUNT
}

fn default_line_padding() -> Padding {
    LINE_CHART_PADDING
}

fn default_bar_padding() -> Padding {
    BAR_CHART_PADDING
}
