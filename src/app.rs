//! Scroll session wiring.
//!
//! Central struct tying a page host to scroll restoration: the wrapped history
//! entry points and the restoration state machine, installed once at startup.

use std::time::Duration;

use tracing::debug;

use crate::managers::history_interceptor::ScrollCapturingHistory;
use crate::platform::headless::HeadlessPage;
use crate::platform::{PageHost, TimerApi, TimerId};
use crate::services::restoration_poller::{RestorationPhase, ScrollRestoration};
use crate::types::errors::EventLoopError;
use crate::types::settings::RestorationSettings;

/// One page's scroll restoration session.
pub struct ScrollSession<H> {
    page: ScrollCapturingHistory<H>,
    restoration: ScrollRestoration,
    enabled: bool,
}

impl<H: PageHost> ScrollSession<H> {
    /// Installs scroll capture and restoration on `host`.
    ///
    /// With `settings.enabled == false` the host is wrapped as a plain
    /// passthrough and return navigation never scrolls.
    pub fn install(host: H, settings: &RestorationSettings) -> Self {
        let page = if settings.enabled {
            ScrollCapturingHistory::install(host)
        } else {
            debug!("scroll restoration disabled by settings");
            ScrollCapturingHistory::passthrough(host)
        };
        Self {
            page,
            restoration: ScrollRestoration::new(settings),
            enabled: settings.enabled,
        }
    }

    /// The wrapped history entry points; use these instead of the host's own.
    pub fn history(&mut self) -> &mut ScrollCapturingHistory<H> {
        &mut self.page
    }

    pub fn host(&self) -> &H {
        self.page.get_ref()
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.page.get_mut()
    }

    pub fn restoration(&self) -> &ScrollRestoration {
        &self.restoration
    }

    pub fn phase(&self) -> RestorationPhase {
        self.restoration.phase()
    }

    /// Return-navigation handler. Returns whether a restoration cycle started.
    pub fn on_pop_state(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.restoration.on_pop_state(&mut self.page)
    }

    /// Timer dispatch. Returns whether the timer belonged to restoration.
    pub fn on_timer(&mut self, timer: TimerId) -> bool {
        self.restoration.on_timer(&mut self.page, timer)
    }

    pub fn cancel(&mut self) {
        self.restoration.cancel(&mut self.page);
    }

    pub fn into_host(self) -> H {
        self.page.into_inner()
    }
}

impl ScrollSession<HeadlessPage> {
    /// Goes back one entry, notifying restoration when the entry changed.
    pub fn back(&mut self) -> bool {
        self.go(-1)
    }

    pub fn forward(&mut self) -> bool {
        self.go(1)
    }

    pub fn go(&mut self, delta: i64) -> bool {
        if !self.page.get_mut().traverse(delta) {
            return false;
        }
        self.on_pop_state();
        true
    }

    /// Advances the virtual clock by `delta`, running every timer that falls
    /// due on the way. Returns how many timers ran.
    pub fn advance_time(&mut self, delta: Duration) -> Result<usize, EventLoopError> {
        let target = self.page.get_ref().now().saturating_add(delta);
        let ran = self.run_timers_until(target)?;
        self.page.get_mut().advance_clock_to(target);
        Ok(ran)
    }

    /// Runs timers, moving the clock as needed, until none are left.
    pub fn run_until_idle(&mut self) -> Result<usize, EventLoopError> {
        self.run_timers_until(Duration::MAX)
    }

    fn run_timers_until(&mut self, until: Duration) -> Result<usize, EventLoopError> {
        let limit = self.page.get_ref().timer_step_limit();
        let mut ran = 0;
        while let Some(timer) = self.page.get_mut().next_due_timer(until) {
            ran += 1;
            if ran > limit {
                return Err(EventLoopError::TimerStepLimit { limit });
            }
            self.on_timer(timer);
        }
        Ok(ran)
    }
}
