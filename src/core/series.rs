use serde::{Deserialize, Serialize};

use crate::render::Color;

/// One named line: nullable points aligned to a shared category axis.
///
/// `None` means "no data for that category". Non-finite inputs are folded
/// into `None` on construction, so every `Some` point is finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<Option<f64>>,
    pub color: Color,
}

impl Series {
    #[must_use]
    pub fn new(label: impl Into<String>, points: Vec<Option<f64>>, color: Color) -> Self {
        let points = points
            .into_iter()
            .map(|point| point.filter(|value| value.is_finite()))
            .collect();
        Self {
            label: label.into(),
            points,
            color,
        }
    }

    /// Pads with `None` or truncates so the series has exactly `len` points.
    #[must_use]
    pub fn aligned_to(mut self, len: usize) -> Self {
        self.points.resize(len, None);
        self
    }

    pub fn finite_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points
            .iter()
            .flatten()
            .copied()
            .filter(|value| value.is_finite())
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        self.finite_values().next().is_some()
    }
}

/// One legend row for a rendered series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
}

/// Raw bar candidate handed to a bar chart before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarInput {
    pub label: String,
    pub value: Option<f64>,
    #[serde(default)]
    pub emphasized: bool,
}

impl BarInput {
    #[must_use]
    pub fn new(label: impl Into<String>, value: Option<f64>, emphasized: bool) -> Self {
        Self {
            label: label.into(),
            value,
            emphasized,
        }
    }
}

impl From<BarItem> for BarInput {
    fn from(item: BarItem) -> Self {
        Self {
            label: item.label,
            value: Some(item.value),
            emphasized: item.emphasized,
        }
    }
}

/// One labeled, single-valued bar. The label is trimmed and non-empty and
/// the value is finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarItem {
    pub label: String,
    pub value: f64,
    pub emphasized: bool,
}

impl BarItem {
    /// Validates a candidate; returns `None` for blank labels or missing/non-finite values.
    #[must_use]
    pub fn new(label: &str, value: Option<f64>, emphasized: bool) -> Option<Self> {
        let label = label.trim();
        let value = value.filter(|value| value.is_finite())?;
        if label.is_empty() {
            return None;
        }
        Some(Self {
            label: label.to_owned(),
            value,
            emphasized,
        })
    }

    #[must_use]
    pub fn from_input(input: &BarInput) -> Option<Self> {
        Self::new(&input.label, input.value, input.emphasized)
    }
}
