pub mod adapter;
pub mod format;
pub mod metric;
pub mod payload;

pub use adapter::{
    DEFAULT_MAX_COMPARISON_BARS, SessionSummary, SummaryCell, build_comparison_bars,
    build_rate_series, build_session_summary, build_volume_series, rank_with_forced_inclusion,
};
pub use format::{MISSING_VALUE, format_tick, format_value};
pub use metric::{MetricKind, MetricLabels, MetricValue, SeriesPalette};
pub use payload::{
    PeerList, PeerMetrics, SessionSeries, SessionStats, StatisticsBundle, TagComparison,
    TagSession, YearMetrics,
};
