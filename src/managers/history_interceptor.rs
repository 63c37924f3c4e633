//! History interceptor.
//!
//! [`ScrollCapturingHistory`] wraps a host and implements the same
//! [`HistoryApi`] entry points, so callers push and replace state exactly as
//! before while scroll offsets are captured behind their back:
//!
//! - `push_state` first records the live scroll position into the state of
//!   the entry being left (its title and URL stay as they are), then performs
//!   the caller's push unchanged.
//! - `replace_state` keeps the offsets previously recorded on the current
//!   entry unless the caller's state sets them itself.
//!
//! The remaining host capabilities are delegated, so the wrapper is itself a
//! [`PageHost`](crate::platform::PageHost).

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::platform::{
    DocumentMetrics, HistoryApi, ProbeDom, ProbeStyle, TimerApi, TimerId, ViewportApi,
};
use crate::types::errors::HistoryError;
use crate::types::navigation::ScrollOffsets;
use crate::types::scroll::{ElementMetrics, ScrollPosition, ViewportSize};

/// History decorator that stores scroll offsets in each entry's state.
pub struct ScrollCapturingHistory<H> {
    inner: H,
    active: bool,
}

impl<H: HistoryApi + ViewportApi> ScrollCapturingHistory<H> {
    /// Wraps `host`. Capture is only activated when the host supports
    /// history mutation; otherwise every call goes straight to the host.
    pub fn install(host: H) -> Self {
        let active = host.supports_state_mutation();
        if !active {
            debug!("history mutation unsupported, scroll capture not installed");
        }
        Self {
            inner: host,
            active,
        }
    }

    /// Wraps `host` without capturing anything.
    pub fn passthrough(host: H) -> Self {
        Self {
            inner: host,
            active: false,
        }
    }
}

impl<H> ScrollCapturingHistory<H> {
    /// Whether push/replace are being intercepted.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn get_ref(&self) -> &H {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut H {
        &mut self.inner
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: HistoryApi + ViewportApi> HistoryApi for ScrollCapturingHistory<H> {
    fn state(&self) -> Value {
        self.inner.state()
    }

    fn title(&self) -> String {
        self.inner.title()
    }

    fn push_state(
        &mut self,
        state: Value,
        title: &str,
        url: Option<&str>,
    ) -> Result<(), HistoryError> {
        if self.active {
            let position = self.inner.scroll_position();
            let outgoing = ScrollOffsets::merged_into(&self.inner.state(), position);
            let outgoing_title = self.inner.title();
            self.inner.replace_state(outgoing, &outgoing_title, None)?;
            debug!(x = position.x, y = position.y, "captured scroll position before push");
        }
        self.inner.push_state(state, title, url)
    }

    fn replace_state(
        &mut self,
        state: Value,
        title: &str,
        url: Option<&str>,
    ) -> Result<(), HistoryError> {
        if !self.active {
            return self.inner.replace_state(state, title, url);
        }
        let current = self.inner.state();
        if let Some(previous) = ScrollOffsets::from_state(&current) {
            debug!(x = previous.x, y = previous.y, "preserving scroll position on replace");
        }
        let preserved = ScrollOffsets::preserved_on_replace(&current, state);
        self.inner.replace_state(preserved, title, url)
    }

    fn supports_state_mutation(&self) -> bool {
        self.inner.supports_state_mutation()
    }
}

impl<H: ViewportApi> ViewportApi for ScrollCapturingHistory<H> {
    fn scroll_position(&self) -> ScrollPosition {
        self.inner.scroll_position()
    }

    fn scroll_to(&mut self, x: f64, y: f64) {
        self.inner.scroll_to(x, y)
    }

    fn inner_size(&self) -> ViewportSize {
        self.inner.inner_size()
    }
}

impl<H: DocumentMetrics> DocumentMetrics for ScrollCapturingHistory<H> {
    fn body_metrics(&self) -> ElementMetrics {
        self.inner.body_metrics()
    }

    fn root_metrics(&self) -> ElementMetrics {
        self.inner.root_metrics()
    }
}

impl<H: ProbeDom> ProbeDom for ScrollCapturingHistory<H> {
    type Element = H::Element;

    fn create_element(&mut self) -> Self::Element {
        self.inner.create_element()
    }

    fn set_style(&mut self, element: Self::Element, style: ProbeStyle) {
        self.inner.set_style(element, style)
    }

    fn append_to_body(&mut self, element: Self::Element) {
        self.inner.append_to_body(element)
    }

    fn append_child(&mut self, parent: Self::Element, child: Self::Element) {
        self.inner.append_child(parent, child)
    }

    fn offset_width(&self, element: Self::Element) -> f64 {
        self.inner.offset_width(element)
    }

    fn remove(&mut self, element: Self::Element) {
        self.inner.remove(element)
    }
}

impl<H: TimerApi> TimerApi for ScrollCapturingHistory<H> {
    fn now(&self) -> Duration {
        self.inner.now()
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        self.inner.set_timeout(delay)
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.inner.clear_timeout(id)
    }
}
