use smallvec::SmallVec;

use crate::core::{LinearScale, PlotArea};

/// One contiguous run of finite points, projected to pixel coordinates.
///
/// Runs never cross a missing point; a run of one point draws only its marker.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePath {
    pub points: SmallVec<[(f64, f64); 8]>,
}

impl LinePath {
    /// Number of straight segments the run strokes.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// Projects nullable series points into disjoint pixel runs.
///
/// `x_offsets` are category positions relative to the plot's left edge;
/// points beyond the last category are ignored. A `None` (or non-finite)
/// point terminates the current run and the next finite point starts a new
/// one, so nothing is interpolated across gaps.
#[must_use]
pub fn project_line_paths(
    points: &[Option<f64>],
    x_offsets: &[f64],
    scale: LinearScale,
    plot: PlotArea,
) -> Vec<LinePath> {
    let mut paths = Vec::new();
    let mut current: SmallVec<[(f64, f64); 8]> = SmallVec::new();

    for (point, x_offset) in points.iter().zip(x_offsets) {
        match point.filter(|value| value.is_finite()) {
            Some(value) => {
                current.push((plot.left + x_offset, scale.value_to_y(value, plot)));
            }
            None if !current.is_empty() => {
                paths.push(LinePath {
                    points: std::mem::take(&mut current),
                });
            }
            None => {}
        }
    }
    if !current.is_empty() {
        paths.push(LinePath { points: current });
    }

    paths
}
