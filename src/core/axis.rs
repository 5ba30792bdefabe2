use serde::{Deserialize, Serialize};

/// Count-style unit suffix used by the dashboard's headcount axes.
pub const DEFAULT_COUNT_SUFFIX: &str = "명";

pub const BAR_WIDTH_RATIO: f64 = 0.55;
pub const MIN_BAR_WIDTH_PX: f64 = 12.0;
pub const MAX_BAR_WIDTH_PX: f64 = 64.0;

/// Unit of a value axis.
///
/// The unit decides both label formatting and the fallback maximum used
/// when a dataset carries no positive value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AxisUnit {
    Count { suffix: String },
    Percent,
}

impl AxisUnit {
    #[must_use]
    pub fn count(suffix: impl Into<String>) -> Self {
        Self::Count {
            suffix: suffix.into(),
        }
    }

    #[must_use]
    pub const fn is_percent(&self) -> bool {
        matches!(self, Self::Percent)
    }

    #[must_use]
    pub fn suffix(&self) -> &str {
        match self {
            Self::Count { suffix } => suffix,
            Self::Percent => "%",
        }
    }

    /// Axis maximum substituted when the data gives no positive maximum.
    #[must_use]
    pub const fn fallback_max(&self) -> f64 {
        match self {
            Self::Count { .. } => 1.0,
            Self::Percent => 100.0,
        }
    }
}

impl Default for AxisUnit {
    fn default() -> Self {
        Self::count(DEFAULT_COUNT_SUFFIX)
    }
}

/// Numeric range and tick layout for one value axis on one redraw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    pub min: f64,
    pub max: f64,
    pub tick_count: usize,
    pub unit: AxisUnit,
}

impl AxisScale {
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Tick values from `min` to `max` inclusive: always `tick_count + 1` entries.
    #[must_use]
    pub fn ticks(&self) -> Vec<f64> {
        let count = self.tick_count as f64;
        (0..=self.tick_count)
            .map(|i| self.min + (i as f64 / count) * self.span())
            .collect()
    }
}

/// Computes the shared value axis for a pool of values.
///
/// The axis always starts at zero. Non-finite values are ignored and a
/// non-finite `suggested_max` counts as absent. When the resulting maximum
/// is not positive the unit's fallback is used so the range never collapses.
#[must_use]
pub fn compute_axis<I>(
    values: I,
    suggested_max: Option<f64>,
    tick_count: usize,
    unit: &AxisUnit,
) -> AxisScale
where
    I: IntoIterator<Item = f64>,
{
    let floor = suggested_max.filter(|value| value.is_finite()).unwrap_or(0.0);
    let max = values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(floor, f64::max);
    let max = if max.is_finite() && max > 0.0 {
        max
    } else {
        unit.fallback_max()
    };

    AxisScale {
        min: 0.0,
        max,
        tick_count: tick_count.max(1),
        unit: unit.clone(),
    }
}

/// X offsets (relative to the plot's left edge) of `count` categories.
///
/// Categories span the full width edge to edge; a single category sits at
/// the midpoint instead of the left edge.
#[must_use]
pub fn compute_category_positions(count: usize, plot_width: f64) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![plot_width / 2.0],
        _ => {
            let step = plot_width / (count - 1) as f64;
            (0..count).map(|i| step * i as f64).collect()
        }
    }
}

/// Horizontal slot layout for a categorical bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub step: f64,
    pub bar_width: f64,
}

impl BarGeometry {
    /// X offset of the center of slot `index`, relative to the plot's left edge.
    #[must_use]
    pub fn center(self, index: usize) -> f64 {
        self.step * index as f64 + self.step / 2.0
    }
}

/// Splits `plot_width` into `count` equal slots; a zero count is laid out as one slot.
#[must_use]
pub fn compute_bar_geometry(count: usize, plot_width: f64) -> BarGeometry {
    let step = plot_width / count.max(1) as f64;
    BarGeometry {
        step,
        bar_width: (step * BAR_WIDTH_RATIO).clamp(MIN_BAR_WIDTH_PX, MAX_BAR_WIDTH_PX),
    }
}
