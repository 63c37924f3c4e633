//! Scroll restoration driven by a tokio task.
//!
//! Hosts that live behind an `Arc<Mutex<_>>` on a tokio runtime (a webview
//! bridge, for instance) cannot hand their timers to [`ScrollRestoration`].
//! [`RestorationTask`] runs the same policy as one spawned task per cycle:
//! measure, scroll or sleep for the retry interval, repeat. A new cycle
//! aborts the previous task.
//!
//! [`ScrollRestoration`]: crate::services::restoration_poller::ScrollRestoration

use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::platform::{DocumentMetrics, HistoryApi, ProbeDom, ViewportApi};
use crate::services::restoration_poller::{
    document_accommodates, SCROLL_RESTORATION_TIMEOUT, TRY_TO_SCROLL_INTERVAL,
};
use crate::services::scrollbar_probe::measure_scrollbar_width;
use crate::types::navigation::ScrollOffsets;
use crate::types::scroll::ScrollPosition;
use crate::types::settings::RestorationSettings;

/// Owner of the single in-flight restoration task.
pub struct RestorationTask {
    timeout: Duration,
    retry_interval: Duration,
    scrollbar_width: Arc<OnceLock<f64>>,
    handle: Option<JoinHandle<ScrollPosition>>,
}

impl Default for RestorationTask {
    fn default() -> Self {
        Self::with_timing(SCROLL_RESTORATION_TIMEOUT, TRY_TO_SCROLL_INTERVAL)
    }
}

impl RestorationTask {
    pub fn new(settings: &RestorationSettings) -> Self {
        Self::with_timing(settings.timeout(), settings.retry_interval())
    }

    pub fn with_timing(timeout: Duration, retry_interval: Duration) -> Self {
        Self {
            timeout,
            retry_interval,
            scrollbar_width: Arc::new(OnceLock::new()),
            handle: None,
        }
    }

    /// Handles a return navigation. Must be called from within a tokio
    /// runtime. Returns whether a new cycle was spawned.
    pub fn on_pop_state<H>(&mut self, host: &Arc<Mutex<H>>) -> bool
    where
        H: HistoryApi + ViewportApi + DocumentMetrics + ProbeDom + Send + 'static,
    {
        let state = host.lock().unwrap_or_else(PoisonError::into_inner).state();
        let Some(position) = ScrollOffsets::from_state(&state) else {
            return false;
        };

        self.cancel();
        let deadline = Instant::now() + self.timeout;
        let retry_interval = self.retry_interval;
        let scrollbar_width = Arc::clone(&self.scrollbar_width);
        let host = Arc::clone(host);

        debug!(x = position.x, y = position.y, "spawned scroll restoration task");
        self.handle = Some(tokio::spawn(async move {
            sleep(Duration::ZERO).await;
            loop {
                let scrolled = {
                    let mut page = host.lock().unwrap_or_else(PoisonError::into_inner);
                    let width = *scrollbar_width.get_or_init(|| measure_scrollbar_width(&mut *page));
                    let fits = document_accommodates(&*page, width, position);
                    if fits || Instant::now() > deadline {
                        page.scroll_to(position.x, position.y);
                        true
                    } else {
                        false
                    }
                };
                if scrolled {
                    debug!(x = position.x, y = position.y, "restored scroll position");
                    return position;
                }
                sleep(retry_interval).await;
            }
        }));
        true
    }

    /// Aborts the task in flight, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn scrollbar_width(&self) -> Option<f64> {
        self.scrollbar_width.get().copied()
    }

    /// Waits for the current cycle. Resolves to the position scrolled to, or
    /// `None` when there was no cycle or it was cancelled.
    pub async fn wait(&mut self) -> Option<ScrollPosition> {
        let handle = self.handle.take()?;
        handle.await.ok()
    }
}

impl Drop for RestorationTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
