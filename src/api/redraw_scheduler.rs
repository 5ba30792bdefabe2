use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::ChartResult;
use crate::render::DrawingSurface;

use super::{BarChart, LineChart, RedrawOutcome};

/// Chart handle shared between the page, the controller and the scheduler.
pub type SharedChart<T> = Rc<RefCell<T>>;

/// Anything the scheduler can repaint on a frame pass.
pub trait Redraw {
    fn redraw(&mut self) -> ChartResult<RedrawOutcome>;
}

impl<S: DrawingSurface> Redraw for LineChart<S> {
    fn redraw(&mut self) -> ChartResult<RedrawOutcome> {
        LineChart::redraw(self)
    }
}

impl<S: DrawingSurface> Redraw for BarChart<S> {
    fn redraw(&mut self) -> ChartResult<RedrawOutcome> {
        BarChart::redraw(self)
    }
}

/// Identifier of one scheduled animation-frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRequestId(u64);

/// What the host must do with its animation-frame API after a resize signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRequest {
    /// Previously scheduled callback to cancel, if any.
    pub cancel: Option<FrameRequestId>,
    /// Callback to schedule; pass it back to [`RedrawScheduler::on_animation_frame`].
    pub schedule: FrameRequestId,
}

/// Tally of one redraw pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FramePass {
    pub drawn: usize,
    pub not_ready: usize,
    pub failed: usize,
}

impl FramePass {
    #[must_use]
    pub fn charts_visited(self) -> usize {
        self.drawn + self.not_ready + self.failed
    }
}

/// Coalesces bursts of resize signals into one redraw pass per display frame.
///
/// Each resize supersedes the previously scheduled pass, so however many
/// resizes arrive before a frame fires, only the last request redraws.
/// Charts are held weakly: a chart dropped by the page simply stops being
/// redrawn.
#[derive(Default)]
pub struct RedrawScheduler {
    charts: Vec<Weak<RefCell<dyn Redraw>>>,
    pending: Option<FrameRequestId>,
    next_id: u64,
    completed_passes: u64,
}

impl fmt::Debug for RedrawScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedrawScheduler")
            .field("live_charts", &self.live_chart_count())
            .field("pending", &self.pending)
            .field("completed_passes", &self.completed_passes)
            .finish()
    }
}

impl RedrawScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: Redraw + 'static>(&mut self, chart: &SharedChart<T>) {
        let chart: Rc<RefCell<dyn Redraw>> = chart.clone();
        self.charts.push(Rc::downgrade(&chart));
    }

    #[must_use]
    pub fn live_chart_count(&self) -> usize {
        self.charts
            .iter()
            .filter(|chart| chart.strong_count() > 0)
            .count()
    }

    #[must_use]
    pub fn pending(&self) -> Option<FrameRequestId> {
        self.pending
    }

    #[must_use]
    pub fn completed_passes(&self) -> u64 {
        self.completed_passes
    }

    /// Records a resize signal, superseding any pass that has not fired yet.
    pub fn on_resize(&mut self) -> FrameRequest {
        let schedule = FrameRequestId(self.next_id);
        self.next_id += 1;
        let cancel = self.pending.replace(schedule);
        trace!(?cancel, ?schedule, "resize coalesced into frame request");
        FrameRequest { cancel, schedule }
    }

    /// Runs the pass for `id` if it is still the pending request.
    ///
    /// Stale (cancelled) ids return `None`. Every live chart is redrawn
    /// unconditionally; a failing chart is logged and does not stop the pass.
    pub fn on_animation_frame(&mut self, id: FrameRequestId) -> Option<FramePass> {
        if self.pending != Some(id) {
            trace!(?id, "ignoring superseded frame request");
            return None;
        }
        self.pending = None;
        Some(self.redraw_all())
    }

    /// Redraws every live chart immediately and prunes dropped ones.
    pub fn redraw_all(&mut self) -> FramePass {
        let mut pass = FramePass::default();
        self.charts.retain(|chart| chart.strong_count() > 0);

        for handle in self.charts.iter().filter_map(Weak::upgrade) {
            let Ok(mut chart) = handle.try_borrow_mut() else {
                warn!("chart busy during frame pass; skipping");
                pass.failed += 1;
                continue;
            };
            match chart.redraw() {
                Ok(RedrawOutcome::Drawn) => pass.drawn += 1,
                Ok(RedrawOutcome::NotReady) => pass.not_ready += 1,
                Err(err) => {
                    warn!(error = %err, "chart redraw failed during frame pass");
                    pass.failed += 1;
                }
            }
        }

        self.completed_passes += 1;
        debug!(
            drawn = pass.drawn,
            not_ready = pass.not_ready,
            failed = pass.failed,
            "redraw pass complete"
        );
        pass
    }
}
