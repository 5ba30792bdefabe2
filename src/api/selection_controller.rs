use std::cell::RefMut;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{BarInput, LegendEntry};
use crate::error::{ChartError, ChartResult};
use crate::render::DrawingSurface;
use crate::stats::{
    MetricKind, StatisticsBundle, TagComparison, build_comparison_bars, build_rate_series,
    build_session_summary, build_volume_series,
};

use super::{
    BarAxisOverrides, BarChart, CardState, DashboardConfig, DashboardView, LineChart,
    SelectOption, SelectorState, SessionTab, SharedChart,
};

/// The active selection in every dashboard dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    pub session_key: Option<String>,
    pub summary_year: Option<String>,
    pub tag_id: Option<String>,
    pub tag_session_key: Option<String>,
    pub tag_year: Option<String>,
    pub metric: MetricKind,
}

/// Charts driven by the controller. Constructed once per page; the
/// controller holds handles but never manages their lifecycle.
pub struct ChartSet<S: DrawingSurface> {
    pub volume: SharedChart<LineChart<S>>,
    pub rate: SharedChart<LineChart<S>>,
    pub comparison: SharedChart<BarChart<S>>,
}

impl<S: DrawingSurface> Clone for ChartSet<S> {
    fn clone(&self) -> Self {
        Self {
            volume: self.volume.clone(),
            rate: self.rate.clone(),
            comparison: self.comparison.clone(),
        }
    }
}

/// State machine from selection events to chart datasets.
///
/// Every transition updates the selection, re-derives only the datasets
/// that depend on the changed dimension and pushes them into the charts.
/// Dependent selector options are always repopulated before datasets are
/// re-derived, so a transition never reads a stale option list. Selecting
/// the current value, or a value the bundle does not know, is a no-op that
/// returns `false`.
pub struct SelectionController<S: DrawingSurface> {
    bundle: StatisticsBundle,
    config: DashboardConfig,
    charts: ChartSet<S>,
    state: SelectionState,
    view: DashboardView,
}

impl<S: DrawingSurface> SelectionController<S> {
    /// Builds the controller and applies the initial selection.
    ///
    /// The active session is `preselected_session` when the bundle knows it,
    /// else the first session. The comparison panel starts on the first tag.
    pub fn new(
        bundle: StatisticsBundle,
        config: DashboardConfig,
        charts: ChartSet<S>,
        preselected_session: Option<&str>,
    ) -> ChartResult<Self> {
        let config = config.validate()?;
        let state = SelectionState {
            metric: config.default_metric,
            ..SelectionState::default()
        };
        let mut controller = Self {
            bundle,
            config,
            charts,
            state,
            view: DashboardView::default(),
        };
        controller.initialize(preselected_session)?;
        Ok(controller)
    }

    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    #[must_use]
    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    #[must_use]
    pub fn bundle(&self) -> &StatisticsBundle {
        &self.bundle
    }

    #[must_use]
    pub fn charts(&self) -> &ChartSet<S> {
        &self.charts
    }

    fn initialize(&mut self, preselected_session: Option<&str>) -> ChartResult<()> {
        let years = self.bundle.years.clone();
        borrow_chart(&self.charts.volume)?.set_categories(years.clone())?;
        borrow_chart(&self.charts.rate)?.set_categories(years.clone())?;

        self.state.summary_year = self.bundle.latest_year().map(ToOwned::to_owned);
        self.view.summary_years = if years.is_empty() {
            SelectorState::empty(self.config.text.no_years.clone())
        } else {
            SelectorState::populated(
                years
                    .iter()
                    .map(|year| SelectOption::new(year, year))
                    .collect(),
                self.state.summary_year.clone(),
            )
        };

        let session_key = preselected_session
            .filter(|key| self.bundle.session(key).is_some())
            .map(ToOwned::to_owned)
            .or_else(|| self.bundle.sessions.first().map(|session| session.key.clone()));
        self.apply_session(session_key)?;

        self.view.metric_select = SelectorState::populated(
            MetricKind::ALL
                .into_iter()
                .map(|kind| SelectOption::new(kind.key(), self.config.labels.label(kind)))
                .collect(),
            Some(self.state.metric.key().to_owned()),
        );
        self.view.comparison_legend = vec![
            LegendEntry {
                label: self.config.text.legend_current.clone(),
                color: self.config.comparison_current_color,
            },
            LegendEntry {
                label: self.config.text.legend_related.clone(),
                color: self.config.comparison_related_color,
            },
        ];

        let tag_options: Vec<SelectOption> = self
            .bundle
            .tag_comparisons
            .iter()
            .map(|tag| SelectOption::new(&tag.id, &tag.name))
            .collect();
        let first_tag = tag_options.first().map(|option| option.value.clone());
        match first_tag {
            Some(first_tag) => {
                self.view.tag_select = SelectorState::populated(tag_options, None);
                self.apply_tag(first_tag)
            }
            None => {
                self.view.tag_select = SelectorState::empty(self.config.text.no_sessions.clone());
                self.view.comparison_sessions =
                    SelectorState::empty(self.config.text.no_sessions.clone());
                self.view.comparison_years = SelectorState::empty(self.config.text.no_years.clone());
                self.refresh_comparison()
            }
        }
    }

    /// Session tab click.
    pub fn select_session(&mut self, key: &str) -> ChartResult<bool> {
        if self.state.session_key.as_deref() == Some(key) {
            trace!(key, "session already active");
            return Ok(false);
        }
        if self.bundle.session(key).is_none() {
            debug!(key, "ignoring unknown session");
            return Ok(false);
        }
        debug!(from = ?self.state.session_key, to = key, "session selected");
        self.apply_session(Some(key.to_owned()))?;
        Ok(true)
    }

    /// Summary year dropdown change; touches only the summary panel.
    pub fn select_summary_year(&mut self, year: &str) -> ChartResult<bool> {
        if self.state.summary_year.as_deref() == Some(year)
            || !self.bundle.years.iter().any(|known| known == year)
        {
            return Ok(false);
        }
        debug!(year, "summary year selected");
        self.state.summary_year = Some(year.to_owned());
        self.refresh_summary();
        Ok(true)
    }

    /// Tag dropdown change.
    pub fn select_tag(&mut self, id: &str) -> ChartResult<bool> {
        if self.state.tag_id.as_deref() == Some(id) {
            return Ok(false);
        }
        if self.bundle.tag(id).is_none() {
            debug!(id, "ignoring unknown tag");
            return Ok(false);
        }
        debug!(from = ?self.state.tag_id, to = id, "tag selected");
        self.apply_tag(id.to_owned())?;
        Ok(true)
    }

    /// Comparison-panel session dropdown change.
    pub fn select_comparison_session(&mut self, key: &str) -> ChartResult<bool> {
        if self.state.tag_session_key.as_deref() == Some(key) {
            return Ok(false);
        }
        if self.current_tag().and_then(|tag| tag.session(key)).is_none() {
            debug!(key, "ignoring session unknown to the current tag");
            return Ok(false);
        }
        debug!(key, "comparison session selected");
        self.state.tag_session_key = Some(key.to_owned());
        self.view.comparison_sessions.selected = self.state.tag_session_key.clone();
        self.populate_comparison_years();
        self.refresh_comparison()?;
        Ok(true)
    }

    /// Comparison-panel year dropdown change.
    pub fn select_year(&mut self, year: &str) -> ChartResult<bool> {
        if self.state.tag_year.as_deref() == Some(year)
            || !self.view.comparison_years.contains(year)
        {
            return Ok(false);
        }
        debug!(year, "comparison year selected");
        self.state.tag_year = Some(year.to_owned());
        self.view.comparison_years.selected = self.state.tag_year.clone();
        self.refresh_comparison()?;
        Ok(true)
    }

    /// Comparison-panel metric change.
    pub fn select_metric(&mut self, metric: MetricKind) -> ChartResult<bool> {
        if self.state.metric == metric {
            return Ok(false);
        }
        debug!(metric = metric.key(), "comparison metric selected");
        self.state.metric = metric;
        self.view.metric_select.selected = Some(metric.key().to_owned());
        self.refresh_comparison()?;
        Ok(true)
    }

    /// Metric change as reported by the dropdown's option value.
    pub fn select_metric_key(&mut self, key: &str) -> ChartResult<bool> {
        match MetricKind::from_key(key) {
            Some(metric) => self.select_metric(metric),
            None => {
                debug!(key, "ignoring unknown metric key");
                Ok(false)
            }
        }
    }

    fn current_tag(&self) -> Option<&TagComparison> {
        self.state
            .tag_id
            .as_deref()
            .and_then(|id| self.bundle.tag(id))
    }

    fn apply_session(&mut self, key: Option<String>) -> ChartResult<()> {
        self.state.session_key = key;
        self.view.session_tabs = self
            .bundle
            .sessions
            .iter()
            .map(|session| SessionTab {
                key: session.key.clone(),
                active: self.state.session_key.as_deref() == Some(session.key.as_str()),
            })
            .collect();
        self.refresh_session_charts()?;
        self.refresh_summary();
        Ok(())
    }

    fn refresh_session_charts(&mut self) -> ChartResult<()> {
        let session = self
            .state
            .session_key
            .as_deref()
            .and_then(|key| self.bundle.session(key));
        let year_count = self.bundle.years.len();
        let palette = &self.config.palette;
        let labels = &self.config.labels;

        let volume_has_data = {
            let mut chart = borrow_chart(&self.charts.volume)?;
            chart.set_datasets(build_volume_series(session, year_count, palette, labels))?;
            chart.has_data()
        };
        let rate_has_data = {
            let mut chart = borrow_chart(&self.charts.rate)?;
            chart.set_datasets(build_rate_series(session, year_count, palette, labels))?;
            chart.has_data()
        };

        self.view.cards.session_volume = CardState::from_has_data(volume_has_data);
        self.view.cards.session_rate = CardState::from_has_data(rate_has_data);
        Ok(())
    }

    fn refresh_summary(&mut self) {
        let session = self
            .state
            .session_key
            .as_deref()
            .and_then(|key| self.bundle.session(key));
        let summary = build_session_summary(
            session,
            self.state.summary_year.as_deref(),
            &self.config.count_suffix,
        );
        self.view.summary = summary.cells;
        self.view.summary_years.selected = self.state.summary_year.clone();
        self.view.cards.summary = CardState::from_has_data(summary.has_data);
    }

    fn apply_tag(&mut self, id: String) -> ChartResult<()> {
        self.state.tag_id = Some(id);
        self.view.tag_select.selected = self.state.tag_id.clone();
        self.populate_comparison_sessions();
        self.populate_comparison_years();
        self.refresh_comparison()
    }

    /// Keeps the previous session when the new tag has it, else the tag's
    /// default, else its first session.
    fn populate_comparison_sessions(&mut self) {
        let (selector, selected) = match self.current_tag().filter(|tag| !tag.sessions.is_empty()) {
            None => (SelectorState::empty(self.config.text.no_sessions.clone()), None),
            Some(tag) => {
                let is_known = |key: &&str| tag.session(key).is_some();
                let selected = self
                    .state
                    .tag_session_key
                    .as_deref()
                    .filter(is_known)
                    .or_else(|| tag.default_session_key.as_deref().filter(is_known))
                    .or_else(|| tag.sessions.first().map(|session| session.key.as_str()))
                    .map(ToOwned::to_owned);
                let options = tag
                    .sessions
                    .iter()
                    .map(|session| SelectOption::new(&session.key, session.display_label()))
                    .collect();
                (SelectorState::populated(options, selected.clone()), selected)
            }
        };
        self.view.comparison_sessions = selector;
        self.state.tag_session_key = selected;
    }

    /// Keeps the previous year when the session has it, else the tag's
    /// default year, else the most recent year.
    fn populate_comparison_years(&mut self) {
        let tag = self.current_tag();
        let session = tag
            .zip(self.state.tag_session_key.as_deref())
            .and_then(|(tag, key)| tag.session(key))
            .filter(|session| !session.years.is_empty());

        let (selector, selected) = match (tag, session) {
            (Some(tag), Some(session)) => {
                let is_known = |year: &&str| session.years.iter().any(|known| known == year);
                let selected = self
                    .state
                    .tag_year
                    .as_deref()
                    .filter(is_known)
                    .or_else(|| tag.default_year.as_deref().filter(is_known))
                    .or_else(|| session.years.last().map(String::as_str))
                    .map(ToOwned::to_owned);
                let options = session
                    .years
                    .iter()
                    .map(|year| SelectOption::new(year, year))
                    .collect();
                (SelectorState::populated(options, selected.clone()), selected)
            }
            _ => (SelectorState::empty(self.config.text.no_years.clone()), None),
        };
        self.view.comparison_years = selector;
        self.state.tag_year = selected;
    }

    fn refresh_comparison(&mut self) -> ChartResult<()> {
        let metric = self.state.metric;
        let tag = self.current_tag();
        let items = tag
            .map(|tag| {
                build_comparison_bars(
                    tag,
                    self.state.tag_session_key.as_deref(),
                    self.state.tag_year.as_deref(),
                    metric,
                    self.config.max_comparison_bars,
                )
            })
            .unwrap_or_default();
        let title = self.comparison_title(tag);
        let overrides = BarAxisOverrides {
            unit: metric.unit(&self.config.count_suffix),
            suggested_max: metric.suggested_max(),
        };

        let has_data = {
            let mut chart = borrow_chart(&self.charts.comparison)?;
            chart.set_data(items.into_iter().map(BarInput::from).collect(), Some(overrides))?;
            chart.has_data()
        };
        self.view.comparison_title = title;
        self.view.cards.tag_comparison = CardState::from_has_data(has_data);
        Ok(())
    }

    fn comparison_title(&self, tag: Option<&TagComparison>) -> String {
        let text = &self.config.text;
        let Some(tag) = tag else {
            return text.comparison_title.clone();
        };
        let session_label = self
            .state
            .tag_session_key
            .as_deref()
            .and_then(|key| tag.session(key))
            .map_or(text.missing_session.as_str(), |session| session.display_label());
        let year = self
            .state
            .tag_year
            .as_deref()
            .unwrap_or(text.missing_year.as_str());
        format!(
            "{}{} · {} · {} · {}",
            tag.name,
            text.tag_suffix,
            session_label,
            year,
            self.config.labels.label(self.state.metric)
        )
    }
}

fn borrow_chart<T>(chart: &SharedChart<T>) -> ChartResult<RefMut<'_, T>> {
    chart
        .try_borrow_mut()
        .map_err(|_| ChartError::InvalidData("chart is already borrowed".to_owned()))
}
