//! Projection of the statistics bundle into renderer datasets.
//!
//! Everything here is a pure function of its inputs: lookups that miss
//! produce empty datasets and malformed readings become gaps or are
//! dropped, never errors.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{BarItem, Series};
use crate::stats::format::{MISSING_VALUE, format_value};
use crate::stats::{
    MetricKind, MetricLabels, MetricValue, SeriesPalette, SessionStats, TagComparison,
};

/// Upper bound on bars shown in one peer comparison.
pub const DEFAULT_MAX_COMPARISON_BARS: usize = 12;

const VOLUME_METRICS: [MetricKind; 3] = [
    MetricKind::Registered,
    MetricKind::Applicants,
    MetricKind::Passers,
];

/// Registered/applicants/passers series aligned to a `year_count`-long axis.
///
/// Missing sessions and missing years become `None` points, never zero.
#[must_use]
pub fn build_volume_series(
    session: Option<&SessionStats>,
    year_count: usize,
    palette: &SeriesPalette,
    labels: &MetricLabels,
) -> Vec<Series> {
    VOLUME_METRICS
        .into_iter()
        .map(|kind| metric_series(session, kind, year_count, palette, labels))
        .collect()
}

/// Single pass-rate series; payload values are already percentages.
#[must_use]
pub fn build_rate_series(
    session: Option<&SessionStats>,
    year_count: usize,
    palette: &SeriesPalette,
    labels: &MetricLabels,
) -> Vec<Series> {
    vec![metric_series(
        session,
        MetricKind::PassRate,
        year_count,
        palette,
        labels,
    )]
}

fn metric_series(
    session: Option<&SessionStats>,
    kind: MetricKind,
    year_count: usize,
    palette: &SeriesPalette,
    labels: &MetricLabels,
) -> Series {
    let points = session
        .map(|session| session.series.points(kind).to_vec())
        .unwrap_or_default();
    Series::new(labels.label(kind), points, palette.color(kind)).aligned_to(year_count)
}

/// Peer ranking for one tag/session/year bucket, ranked by `metric`.
///
/// Rows without a usable title or reading are excluded. The result holds at
/// most `max_items` bars sorted by value descending, and always includes
/// the primary row when the bucket has one.
#[must_use]
pub fn build_comparison_bars(
    tag: &TagComparison,
    session_key: Option<&str>,
    year: Option<&str>,
    metric: MetricKind,
    max_items: usize,
) -> Vec<BarItem> {
    let (Some(session), Some(year)) = (session_key.and_then(|key| tag.session(key)), year) else {
        return Vec::new();
    };

    let candidates = session
        .peers(year)
        .iter()
        .filter_map(|peer| {
            BarItem::new(
                &peer.title,
                peer.metric(metric).map(MetricValue::value),
                peer.is_primary,
            )
        })
        .collect();

    rank_with_forced_inclusion(candidates, max_items)
}

/// Top-`max_items` ranking that never drops the emphasized item.
///
/// When the first emphasized candidate ranks below the cutoff it replaces
/// the lowest-ranked non-emphasized survivor. Sorting is stable, so among
/// equal values the later candidate ranks lower and is evicted first.
#[must_use]
pub fn rank_with_forced_inclusion(mut candidates: Vec<BarItem>, max_items: usize) -> Vec<BarItem> {
    if max_items == 0 {
        return Vec::new();
    }
    sort_descending(&mut candidates);

    let head_has_emphasis = candidates
        .iter()
        .take(max_items)
        .any(|item| item.emphasized);
    let forced_index = if head_has_emphasis {
        None
    } else {
        candidates
            .iter()
            .skip(max_items)
            .position(|item| item.emphasized)
            .map(|offset| max_items + offset)
    };
    let forced = forced_index.map(|index| candidates.remove(index));

    candidates.truncate(max_items);
    if let Some(item) = forced {
        if candidates.len() >= max_items {
            if let Some(evicted) = candidates.iter().rposition(|item| !item.emphasized) {
                candidates.remove(evicted);
            }
        }
        candidates.push(item);
        sort_descending(&mut candidates);
    }
    candidates
}

fn sort_descending(items: &mut [BarItem]) {
    items.sort_by_key(|item| Reverse(OrderedFloat(item.value)));
}

/// One formatted metric in the session summary panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryCell {
    pub metric: MetricKind,
    pub value: Option<MetricValue>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionSummary {
    pub cells: Vec<SummaryCell>,
    pub has_data: bool,
}

/// All four metrics of `session` for `year`, formatted for the summary panel.
#[must_use]
pub fn build_session_summary(
    session: Option<&SessionStats>,
    year: Option<&str>,
    count_suffix: &str,
) -> SessionSummary {
    let metrics = session
        .zip(year)
        .and_then(|(session, year)| session.metrics.get(year));

    let cells: Vec<SummaryCell> = MetricKind::ALL
        .into_iter()
        .map(|kind| {
            let value = metrics.and_then(|metrics| metrics.metric(kind));
            SummaryCell {
                metric: kind,
                value,
                text: value.map_or_else(
                    || MISSING_VALUE.to_owned(),
                    |value| format_value(Some(value.value()), &value.unit(count_suffix)),
                ),
            }
        })
        .collect();
    let has_data = cells.iter().any(|cell| cell.value.is_some());

    SessionSummary { cells, has_data }
}
