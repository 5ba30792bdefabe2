use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, trace, warn};

use crate::error::{ChartResult, LoadError};
use crate::render::DrawingSurface;
use crate::stats::{MetricKind, StatisticsBundle};

use super::{
    BarChart, CardState, ChartSet, DashboardConfig, DashboardView, FramePass, FrameRequest,
    FrameRequestId, LineChart, RedrawScheduler, SelectionController,
};

/// Load lifecycle of the dashboard page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardPhase {
    /// Statistics requested, nothing received yet.
    Loading,
    Ready,
    /// Terminal; recovering requires a fresh dashboard.
    Failed(LoadError),
}

/// One host surface per chart card.
#[derive(Debug)]
pub struct DashboardSurfaces<S> {
    pub volume: S,
    pub rate: S,
    pub comparison: S,
}

/// Page-level orchestrator: owns the three charts, the redraw scheduler
/// and, once statistics arrive, the selection controller.
pub struct Dashboard<S: DrawingSurface + 'static> {
    config: DashboardConfig,
    phase: DashboardPhase,
    charts: ChartSet<S>,
    scheduler: RedrawScheduler,
    controller: Option<SelectionController<S>>,
    idle_view: DashboardView,
}

impl<S: DrawingSurface + 'static> Dashboard<S> {
    pub fn new(surfaces: DashboardSurfaces<S>, config: DashboardConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let charts = ChartSet {
            volume: Rc::new(RefCell::new(LineChart::new(
                surfaces.volume,
                Vec::new(),
                config.volume_chart_options(),
            )?)),
            rate: Rc::new(RefCell::new(LineChart::new(
                surfaces.rate,
                Vec::new(),
                config.rate_chart_options(),
            )?)),
            comparison: Rc::new(RefCell::new(
                BarChart::new(surfaces.comparison, config.comparison_chart_options())?
                    .with_style(config.comparison_chart_style()),
            )),
        };

        let mut scheduler = RedrawScheduler::new();
        scheduler.register(&charts.volume);
        scheduler.register(&charts.rate);
        scheduler.register(&charts.comparison);

        Ok(Self {
            config,
            phase: DashboardPhase::Loading,
            charts,
            scheduler,
            controller: None,
            idle_view: DashboardView::with_cards(CardState::Loading),
        })
    }

    #[must_use]
    pub fn phase(&self) -> &DashboardPhase {
        &self.phase
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.phase == DashboardPhase::Ready
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub fn charts(&self) -> &ChartSet<S> {
        &self.charts
    }

    #[must_use]
    pub fn scheduler(&self) -> &RedrawScheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn controller(&self) -> Option<&SelectionController<S>> {
        self.controller.as_ref()
    }

    /// Current view state; all cards read `Loading` or `Error` until ready.
    #[must_use]
    pub fn view(&self) -> &DashboardView {
        self.controller
            .as_ref()
            .map_or(&self.idle_view, SelectionController::view)
    }

    /// Decodes a raw payload body and loads it; malformed JSON fails the page.
    pub fn load_json(&mut self, input: &str, preselected_session: Option<&str>) -> ChartResult<()> {
        match StatisticsBundle::from_json_str(input) {
            Ok(bundle) => self.load_bundle(bundle, preselected_session),
            Err(err) => {
                self.fail(LoadError::Parse(err.to_string()));
                Ok(())
            }
        }
    }

    /// `Loading -> Ready`. Payloads arriving in any other phase are ignored.
    pub fn load_bundle(
        &mut self,
        bundle: StatisticsBundle,
        preselected_session: Option<&str>,
    ) -> ChartResult<()> {
        if self.phase != DashboardPhase::Loading {
            warn!(phase = ?self.phase, "ignoring statistics payload outside loading phase");
            return Ok(());
        }

        let years = bundle.years.len();
        let sessions = bundle.sessions.len();
        let tags = bundle.tag_comparisons.len();
        let controller = SelectionController::new(
            bundle,
            self.config.clone(),
            self.charts.clone(),
            preselected_session,
        )?;

        info!(years, sessions, tags, "statistics loaded");
        self.controller = Some(controller);
        self.phase = DashboardPhase::Ready;
        Ok(())
    }

    /// `Loading -> Failed`: every card switches to its error state.
    pub fn fail(&mut self, error: LoadError) {
        if self.phase != DashboardPhase::Loading {
            warn!(phase = ?self.phase, error = %error, "ignoring load failure outside loading phase");
            return;
        }
        warn!(error = %error, "statistics load failed");
        self.idle_view = DashboardView::with_cards(CardState::Error);
        self.phase = DashboardPhase::Failed(error);
    }

    pub fn select_session(&mut self, key: &str) -> ChartResult<bool> {
        self.dispatch("select_session", |controller| controller.select_session(key))
    }

    pub fn select_summary_year(&mut self, year: &str) -> ChartResult<bool> {
        self.dispatch("select_summary_year", |controller| {
            controller.select_summary_year(year)
        })
    }

    pub fn select_tag(&mut self, id: &str) -> ChartResult<bool> {
        self.dispatch("select_tag", |controller| controller.select_tag(id))
    }

    pub fn select_comparison_session(&mut self, key: &str) -> ChartResult<bool> {
        self.dispatch("select_comparison_session", |controller| {
            controller.select_comparison_session(key)
        })
    }

    pub fn select_year(&mut self, year: &str) -> ChartResult<bool> {
        self.dispatch("select_year", |controller| controller.select_year(year))
    }

    pub fn select_metric(&mut self, metric: MetricKind) -> ChartResult<bool> {
        self.dispatch("select_metric", |controller| controller.select_metric(metric))
    }

    pub fn select_metric_key(&mut self, key: &str) -> ChartResult<bool> {
        self.dispatch("select_metric_key", |controller| {
            controller.select_metric_key(key)
        })
    }

    /// Window resize signal; see [`RedrawScheduler::on_resize`].
    pub fn on_resize(&mut self) -> FrameRequest {
        self.scheduler.on_resize()
    }

    pub fn on_animation_frame(&mut self, id: FrameRequestId) -> Option<FramePass> {
        self.scheduler.on_animation_frame(id)
    }

    fn dispatch<F>(&mut self, event: &'static str, apply: F) -> ChartResult<bool>
    where
        F: FnOnce(&mut SelectionController<S>) -> ChartResult<bool>,
    {
        match self.controller.as_mut() {
            Some(controller) => {
                let changed = apply(controller)?;
                if changed {
                    debug!(event, "selection applied");
                }
                Ok(changed)
            }
            None => {
                trace!(event, phase = ?self.phase, "selection event before statistics loaded");
                Ok(false)
            }
        }
    }
}
