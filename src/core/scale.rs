use crate::core::axis::AxisScale;
use crate::core::types::PlotArea;

/// Linear value domain mapped onto the inverted Y pixel axis of a plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    /// Scale spanning a computed axis. `AxisScale` guarantees `max > min`.
    #[must_use]
    pub fn from_axis(axis: &AxisScale) -> Self {
        Self {
            domain_start: axis.min,
            domain_end: axis.max,
        }
    }

    /// Position of `value` within the domain, `0.0` at start and `1.0` at end.
    #[must_use]
    pub fn ratio(self, value: f64) -> f64 {
        (value - self.domain_start) / (self.domain_end - self.domain_start)
    }

    /// Maps `value` to a Y pixel inside `plot`; the domain start sits on the baseline.
    #[must_use]
    pub fn value_to_y(self, value: f64, plot: PlotArea) -> f64 {
        plot.bottom() - self.ratio(value) * plot.height
    }
}
