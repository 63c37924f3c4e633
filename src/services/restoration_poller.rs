//! Scroll restoration after return navigation.
//!
//! When the user goes back or forward, the document often has not finished
//! laying out yet (images, async content), so scrolling straight to the
//! stored offset would be clamped short. [`ScrollRestoration`] polls instead:
//! it scrolls as soon as the document is large enough, or unconditionally
//! once the deadline has passed.
//!
//! The poller is a small state machine driven by host timers:
//!
//! ```text
//! Idle -> Scheduled -> (attempt) -> Scrolled
//!                          |
//!                          +-> Rescheduled -> (attempt) -> ...
//! ```
//!
//! At most one attempt is pending at a time. Starting a new cycle, or calling
//! [`ScrollRestoration::cancel`], clears the pending timer.

use std::time::Duration;

use tracing::{debug, trace};

use crate::platform::{DocumentMetrics, PageHost, ProbeDom, TimerApi, TimerId, ViewportApi};
use crate::services::scrollbar_probe::measure_scrollbar_width;
use crate::types::navigation::ScrollOffsets;
use crate::types::scroll::{DocumentExtent, ScrollPosition, ScrollTarget};
use crate::types::settings::{RestorationSettings, DEFAULT_RETRY_INTERVAL_MS, DEFAULT_TIMEOUT_MS};

/// How long to wait for the document to grow before scrolling anyway.
pub const SCROLL_RESTORATION_TIMEOUT: Duration = Duration::from_millis(DEFAULT_TIMEOUT_MS);
/// Delay between two attempts.
pub const TRY_TO_SCROLL_INTERVAL: Duration = Duration::from_millis(DEFAULT_RETRY_INTERVAL_MS);

/// Where the current (or last) restoration cycle stands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RestorationPhase {
    Idle,
    /// First attempt queued, nothing measured yet.
    Scheduled { target: ScrollTarget },
    /// The document was too small; another attempt is queued.
    Rescheduled { target: ScrollTarget, attempts: u32 },
    /// `forced` is set when the deadline expired before the document fit.
    Scrolled {
        position: ScrollPosition,
        attempts: u32,
        forced: bool,
    },
    Cancelled,
}

/// Result of a single attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Scrolled { forced: bool },
    Rescheduled(TimerId),
}

#[derive(Debug, Clone, Copy)]
struct PendingAttempt {
    timer: TimerId,
    target: ScrollTarget,
}

/// Whether the document is currently large enough to scroll to `position`.
pub fn document_accommodates<H>(host: &H, scrollbar_width: f64, position: ScrollPosition) -> bool
where
    H: DocumentMetrics + ViewportApi + ?Sized,
{
    let extent = DocumentExtent::from_metrics(&host.body_metrics(), &host.root_metrics());
    let viewport = host.inner_size();
    trace!(
        document_width = extent.width,
        document_height = extent.height,
        viewport_width = viewport.width,
        viewport_height = viewport.height,
        scrollbar_width,
        "measured document"
    );
    extent.accommodates(viewport, scrollbar_width, position)
}

/// Session-scoped restoration state: the one pending attempt and the
/// memoized scrollbar width.
#[derive(Debug)]
pub struct ScrollRestoration {
    timeout: Duration,
    retry_interval: Duration,
    pending: Option<PendingAttempt>,
    scrollbar_width: Option<f64>,
    phase: RestorationPhase,
    attempts: u32,
}

impl Default for ScrollRestoration {
    fn default() -> Self {
        Self::with_timing(SCROLL_RESTORATION_TIMEOUT, TRY_TO_SCROLL_INTERVAL)
    }
}

impl ScrollRestoration {
    pub fn new(settings: &RestorationSettings) -> Self {
        Self::with_timing(settings.timeout(), settings.retry_interval())
    }

    pub fn with_timing(timeout: Duration, retry_interval: Duration) -> Self {
        Self {
            timeout,
            retry_interval,
            pending: None,
            scrollbar_width: None,
            phase: RestorationPhase::Idle,
            attempts: 0,
        }
    }

    pub fn phase(&self) -> RestorationPhase {
        self.phase
    }

    /// The memoized scrollbar width, once the first attempt has measured it.
    pub fn scrollbar_width(&self) -> Option<f64> {
        self.scrollbar_width
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        self.pending.map(|pending| pending.timer)
    }

    /// Handles a return navigation.
    ///
    /// Starts a new cycle when the now-current entry carries finite scroll
    /// offsets, cancelling any cycle still in flight. The first attempt runs
    /// from a zero-delay timer, never inside this call. Returns whether a
    /// cycle was started.
    pub fn on_pop_state<H: PageHost>(&mut self, host: &mut H) -> bool {
        let Some(position) = ScrollOffsets::from_state(&host.state()) else {
            trace!("entry has no stored scroll position");
            return false;
        };

        self.clear_pending(host);
        let target = ScrollTarget {
            position,
            deadline: host.now().saturating_add(self.timeout),
        };
        let timer = host.set_timeout(Duration::ZERO);
        self.pending = Some(PendingAttempt { timer, target });
        self.attempts = 0;
        self.phase = RestorationPhase::Scheduled { target };
        debug!(x = position.x, y = position.y, "scheduled scroll restoration");
        true
    }

    /// Runs the attempt owned by `timer`. Returns false, doing nothing, for
    /// timers this instance did not schedule or has since cancelled.
    pub fn on_timer<H: PageHost>(&mut self, host: &mut H, timer: TimerId) -> bool {
        match self.pending {
            Some(pending) if pending.timer == timer => {
                self.pending = None;
                self.try_to_scroll_to(host, pending.target);
                true
            }
            _ => false,
        }
    }

    /// One attempt: scroll if the document fits `target` on both axes or the
    /// deadline has passed, otherwise queue the next attempt.
    pub fn try_to_scroll_to<H>(&mut self, host: &mut H, target: ScrollTarget) -> AttemptOutcome
    where
        H: ViewportApi + DocumentMetrics + ProbeDom + TimerApi,
    {
        self.clear_pending(host);
        self.attempts += 1;

        let scrollbar_width = self.memoized_scrollbar_width(host);
        let fits = document_accommodates(host, scrollbar_width, target.position);
        let expired = host.now() > target.deadline;

        if fits || expired {
            host.scroll_to(target.position.x, target.position.y);
            self.phase = RestorationPhase::Scrolled {
                position: target.position,
                attempts: self.attempts,
                forced: !fits,
            };
            debug!(
                x = target.position.x,
                y = target.position.y,
                attempts = self.attempts,
                forced = !fits,
                "restored scroll position"
            );
            return AttemptOutcome::Scrolled { forced: !fits };
        }

        let timer = host.set_timeout(self.retry_interval);
        self.pending = Some(PendingAttempt { timer, target });
        self.phase = RestorationPhase::Rescheduled {
            target,
            attempts: self.attempts,
        };
        AttemptOutcome::Rescheduled(timer)
    }

    /// Stops the cycle in flight, if any.
    pub fn cancel<H: TimerApi + ?Sized>(&mut self, host: &mut H) {
        if self.clear_pending(host) {
            self.phase = RestorationPhase::Cancelled;
            debug!("cancelled scroll restoration");
        }
    }

    fn clear_pending<H: TimerApi + ?Sized>(&mut self, host: &mut H) -> bool {
        match self.pending.take() {
            Some(pending) => {
                host.clear_timeout(pending.timer);
                true
            }
            None => false,
        }
    }

    // Measured once per session; later changes to the platform's scrollbars
    // are not picked up.
    fn memoized_scrollbar_width<H: ProbeDom>(&mut self, host: &mut H) -> f64 {
        *self
            .scrollbar_width
            .get_or_insert_with(|| measure_scrollbar_width(host))
    }
}
