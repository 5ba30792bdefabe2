use serde::{Deserialize, Serialize};

use crate::core::AxisUnit;
use crate::render::Color;
use crate::stats::{PeerMetrics, SessionSeries, YearMetrics};

/// Statistic tracked per session/year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Registered,
    #[default]
    Applicants,
    Passers,
    PassRate,
}

impl MetricKind {
    pub const ALL: [Self; 4] = [
        Self::Registered,
        Self::Applicants,
        Self::Passers,
        Self::PassRate,
    ];

    /// Wire key used by the payload and by selector option values.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Applicants => "applicants",
            Self::Passers => "passers",
            Self::PassRate => "pass_rate",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    #[must_use]
    pub const fn is_rate(self) -> bool {
        matches!(self, Self::PassRate)
    }

    #[must_use]
    pub fn unit(self, count_suffix: &str) -> AxisUnit {
        if self.is_rate() {
            AxisUnit::Percent
        } else {
            AxisUnit::count(count_suffix)
        }
    }

    /// Axis floor for the metric: rates always show the full 0..100 range.
    #[must_use]
    pub const fn suggested_max(self) -> Option<f64> {
        if self.is_rate() { Some(100.0) } else { None }
    }
}

/// A metric reading tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MetricValue {
    Count(f64),
    Rate(f64),
}

impl MetricValue {
    /// Tags `raw` as `kind`'s unit; absent and non-finite readings yield `None`.
    #[must_use]
    pub fn of(kind: MetricKind, raw: Option<f64>) -> Option<Self> {
        let value = raw.filter(|value| value.is_finite())?;
        Some(if kind.is_rate() {
            Self::Rate(value)
        } else {
            Self::Count(value)
        })
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Count(value) | Self::Rate(value) => value,
        }
    }

    #[must_use]
    pub fn unit(self, count_suffix: &str) -> AxisUnit {
        match self {
            Self::Count(_) => AxisUnit::count(count_suffix),
            Self::Rate(_) => AxisUnit::Percent,
        }
    }
}

impl SessionSeries {
    #[must_use]
    pub fn points(&self, kind: MetricKind) -> &[Option<f64>] {
        match kind {
            MetricKind::Registered => &self.registered,
            MetricKind::Applicants => &self.applicants,
            MetricKind::Passers => &self.passers,
            MetricKind::PassRate => &self.pass_rate,
        }
    }
}

impl YearMetrics {
    #[must_use]
    pub fn metric(&self, kind: MetricKind) -> Option<MetricValue> {
        let raw = match kind {
            MetricKind::Registered => self.registered,
            MetricKind::Applicants => self.applicants,
            MetricKind::Passers => self.passers,
            MetricKind::PassRate => self.pass_rate,
        };
        MetricValue::of(kind, raw)
    }
}

impl PeerMetrics {
    #[must_use]
    pub fn metric(&self, kind: MetricKind) -> Option<MetricValue> {
        let raw = match kind {
            MetricKind::Registered => self.registered,
            MetricKind::Applicants => self.applicants,
            MetricKind::Passers => self.passers,
            MetricKind::PassRate => self.pass_rate,
        };
        MetricValue::of(kind, raw)
    }
}

/// Display labels per metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricLabels {
    pub registered: String,
    pub applicants: String,
    pub passers: String,
    pub pass_rate: String,
}

impl Default for MetricLabels {
    fn default() -> Self {
        Self {
            registered: "접수자수".to_owned(),
            applicants: "응시자수".to_owned(),
            passers: "합격자수".to_owned(),
            pass_rate: "합격률".to_owned(),
        }
    }
}

impl MetricLabels {
    #[must_use]
    pub fn label(&self, kind: MetricKind) -> &str {
        match kind {
            MetricKind::Registered => &self.registered,
            MetricKind::Applicants => &self.applicants,
            MetricKind::Passers => &self.passers,
            MetricKind::PassRate => &self.pass_rate,
        }
    }
}

/// Series color per metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesPalette {
    pub registered: Color,
    pub applicants: Color,
    pub passers: Color,
    pub pass_rate: Color,
}

impl Default for SeriesPalette {
    fn default() -> Self {
        Self {
            registered: Color::rgba8(0x7a, 0xa2, 0xff, 1.0),
            applicants: Color::rgba8(0x3d, 0xdc, 0x84, 1.0),
            passers: Color::rgba8(0xff, 0xb7, 0x4d, 1.0),
            pass_rate: Color::rgba8(0xb3, 0x88, 0xff, 1.0),
        }
    }
}

impl SeriesPalette {
    #[must_use]
    pub fn color(&self, kind: MetricKind) -> Color {
        match kind {
            MetricKind::Registered => self.registered,
            MetricKind::Applicants => self.applicants,
            MetricKind::Passers => self.passers,
            MetricKind::PassRate => self.pass_rate,
        }
    }
}
