//! Headless page host.
//!
//! Keeps a document, viewport, session history, probe elements and a virtual
//! clock entirely in memory. Timers never fire on their own: the owner pops
//! due timers with [`HeadlessPage::next_due_timer`] and dispatches them,
//! which keeps every run deterministic.

use std::time::Duration;

use serde_json::Value;

use crate::managers::session_history::{SessionHistory, SessionHistoryTrait};
use crate::platform::host::{
    DocumentMetrics, HistoryApi, ProbeDom, ProbeStyle, TimerApi, TimerId, ViewportApi,
};
use crate::types::errors::HistoryError;
use crate::types::history::HistoryEntry;
use crate::types::scroll::{ElementMetrics, ScrollPosition, ViewportSize};

/// Scrollbar width of a classic desktop platform.
pub const DEFAULT_SCROLLBAR_WIDTH: f64 = 15.0;

const DEFAULT_TIMER_STEP_LIMIT: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: TimerId,
    pub due_at: Duration,
    pub order: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ProbeParent {
    Body,
    Element(usize),
}

#[derive(Debug, Clone)]
struct ProbeElement {
    parent: Option<ProbeParent>,
    removed: bool,
    width: Option<ProbeStyle>,
    overflow_scroll: bool,
}

/// In-memory page implementing every host capability.
pub struct HeadlessPage {
    history: SessionHistory,
    history_mutation: bool,
    viewport: ViewportSize,
    content_width: f64,
    content_height: f64,
    scrollbar_width: f64,
    scroll: ScrollPosition,
    scroll_requests: Vec<ScrollPosition>,
    probes: Vec<ProbeElement>,
    now: Duration,
    timers: Vec<PendingTimer>,
    next_timer_id: TimerId,
    next_timer_order: u64,
    timer_step_limit: usize,
}

impl HeadlessPage {
    /// A page at `url` with the given viewport and an empty document.
    pub fn new(url: &str, viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            history: SessionHistory::new(url),
            history_mutation: true,
            viewport: ViewportSize {
                width: viewport_width,
                height: viewport_height,
            },
            content_width: 0.0,
            content_height: 0.0,
            scrollbar_width: DEFAULT_SCROLLBAR_WIDTH,
            scroll: ScrollPosition::default(),
            scroll_requests: Vec::new(),
            probes: Vec::new(),
            now: Duration::ZERO,
            timers: Vec::new(),
            next_timer_id: 1,
            next_timer_order: 0,
            timer_step_limit: DEFAULT_TIMER_STEP_LIMIT,
        }
    }

    /// Emulates an environment whose history cannot be mutated.
    pub fn without_history_mutation(mut self) -> Self {
        self.history_mutation = false;
        self
    }

    /// Sets the platform scrollbar width (0 for overlay scrollbars).
    pub fn with_scrollbar_width(mut self, width: f64) -> Self {
        self.scrollbar_width = width;
        self
    }

    pub fn with_content_size(mut self, width: f64, height: f64) -> Self {
        self.set_content_size(width, height);
        self
    }

    pub fn set_content_size(&mut self, width: f64, height: f64) {
        self.content_width = width;
        self.content_height = height;
    }

    /// Grows the document height, e.g. after an image finished loading.
    pub fn grow_content(&mut self, extra_height: f64) {
        self.content_height += extra_height;
    }

    pub fn content_size(&self) -> (f64, f64) {
        (self.content_width, self.content_height)
    }

    /// Scrolls as the user would, without recording a restoration request.
    pub fn user_scroll(&mut self, x: f64, y: f64) {
        self.scroll = self.clamp(x, y);
    }

    /// Every position passed to `scroll_to`, in call order.
    pub fn scroll_requests(&self) -> &[ScrollPosition] {
        &self.scroll_requests
    }

    pub fn session_history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn current_entry(&self) -> &HistoryEntry {
        self.history.current()
    }

    /// Moves through the session history. Returns whether the current entry
    /// changed, i.e. whether a return-navigation notification is due.
    pub fn traverse(&mut self, delta: i64) -> bool {
        self.history.go(delta).is_some()
    }

    /// Number of probe elements ever created.
    pub fn probe_elements_created(&self) -> usize {
        self.probes.len()
    }

    /// Number of probe elements still attached to the document.
    pub fn attached_probe_elements(&self) -> usize {
        (0..self.probes.len()).filter(|&i| self.is_attached(i)).count()
    }

    pub fn pending_timers(&self) -> &[PendingTimer] {
        &self.timers
    }

    pub fn timer_step_limit(&self) -> usize {
        self.timer_step_limit
    }

    pub fn set_timer_step_limit(&mut self, limit: usize) {
        self.timer_step_limit = limit.max(1);
    }

    /// Removes the earliest timer due at or before `until`, moving the clock
    /// forward to its due time. Ties fire in scheduling order.
    pub fn next_due_timer(&mut self, until: Duration) -> Option<TimerId> {
        let (idx, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due_at <= until)
            .min_by_key(|(_, timer)| (timer.due_at, timer.order))?;
        let timer = self.timers.remove(idx);
        self.now = self.now.max(timer.due_at);
        Some(timer.id)
    }

    /// Moves the clock forward without running anything. Never goes backwards.
    pub fn advance_clock_to(&mut self, target: Duration) {
        self.now = self.now.max(target);
    }

    fn root_client_size(&self) -> (f64, f64) {
        (
            (self.viewport.width - self.scrollbar_width).max(0.0),
            (self.viewport.height - self.scrollbar_width).max(0.0),
        )
    }

    fn clamp(&self, x: f64, y: f64) -> ScrollPosition {
        let root = self.root_metrics();
        let max_x = (root.scroll_width - root.client_width).max(0.0);
        let max_y = (root.scroll_height - root.client_height).max(0.0);
        ScrollPosition::new(x.clamp(0.0, max_x), y.clamp(0.0, max_y))
    }

    fn is_attached(&self, element: usize) -> bool {
        // Bounded walk: a parent cycle can never reach the body.
        let mut current = element;
        for _ in 0..self.probes.len() {
            let probe = &self.probes[current];
            if probe.removed {
                return false;
            }
            match probe.parent {
                Some(ProbeParent::Body) => return true,
                Some(ProbeParent::Element(parent)) => current = parent,
                None => return false,
            }
        }
        false
    }

    /// Width available to children of `element`.
    fn content_box_width(&self, element: usize) -> f64 {
        let scrollbar = if self.probes[element].overflow_scroll {
            self.scrollbar_width
        } else {
            0.0
        };
        (self.offset_width(element) - scrollbar).max(0.0)
    }
}

impl HistoryApi for HeadlessPage {
    fn state(&self) -> Value {
        self.history.state()
    }

    fn title(&self) -> String {
        self.history.title()
    }

    fn push_state(
        &mut self,
        state: Value,
        title: &str,
        url: Option<&str>,
    ) -> Result<(), HistoryError> {
        if !self.history_mutation {
            return Err(HistoryError::Unsupported);
        }
        self.history.push_state(state, title, url)
    }

    fn replace_state(
        &mut self,
        state: Value,
        title: &str,
        url: Option<&str>,
    ) -> Result<(), HistoryError> {
        if !self.history_mutation {
            return Err(HistoryError::Unsupported);
        }
        self.history.replace_state(state, title, url)
    }

    fn supports_state_mutation(&self) -> bool {
        self.history_mutation
    }
}

impl ViewportApi for HeadlessPage {
    fn scroll_position(&self) -> ScrollPosition {
        self.scroll
    }

    /// Records the request, then clamps like a browser does.
    fn scroll_to(&mut self, x: f64, y: f64) {
        self.scroll_requests.push(ScrollPosition::new(x, y));
        self.scroll = self.clamp(x, y);
    }

    fn inner_size(&self) -> ViewportSize {
        self.viewport
    }
}

impl DocumentMetrics for HeadlessPage {
    fn body_metrics(&self) -> ElementMetrics {
        ElementMetrics {
            scroll_width: self.content_width,
            scroll_height: self.content_height,
            offset_width: self.content_width,
            offset_height: self.content_height,
            client_width: self.content_width,
            client_height: self.content_height,
        }
    }

    // The root always reserves room for classic scrollbars on both axes.
    fn root_metrics(&self) -> ElementMetrics {
        let (client_width, client_height) = self.root_client_size();
        ElementMetrics {
            scroll_width: self.content_width.max(client_width),
            scroll_height: self.content_height.max(client_height),
            offset_width: client_width,
            offset_height: self.content_height,
            client_width,
            client_height,
        }
    }
}

impl ProbeDom for HeadlessPage {
    type Element = usize;

    fn create_element(&mut self) -> usize {
        self.probes.push(ProbeElement {
            parent: None,
            removed: false,
            width: None,
            overflow_scroll: false,
        });
        self.probes.len() - 1
    }

    fn set_style(&mut self, element: usize, style: ProbeStyle) {
        let Some(probe) = self.probes.get_mut(element) else {
            return;
        };
        match style {
            ProbeStyle::WidthPx(_) | ProbeStyle::WidthPercent(_) => probe.width = Some(style),
            ProbeStyle::OverflowScroll => probe.overflow_scroll = true,
            ProbeStyle::VisibilityHidden | ProbeStyle::ScrollbarOverflowStyle => {}
        }
    }

    fn append_to_body(&mut self, element: usize) {
        if let Some(probe) = self.probes.get_mut(element) {
            probe.parent = Some(ProbeParent::Body);
        }
    }

    fn append_child(&mut self, parent: usize, child: usize) {
        if parent != child && parent < self.probes.len() {
            if let Some(probe) = self.probes.get_mut(child) {
                probe.parent = Some(ProbeParent::Element(parent));
            }
        }
    }

    /// Detached elements measure zero, as in a browser.
    fn offset_width(&self, element: usize) -> f64 {
        if element >= self.probes.len() || !self.is_attached(element) {
            return 0.0;
        }
        let available = match self.probes[element].parent {
            Some(ProbeParent::Element(parent)) => self.content_box_width(parent),
            _ => self.viewport.width,
        };
        match self.probes[element].width {
            Some(ProbeStyle::WidthPx(px)) => px,
            Some(ProbeStyle::WidthPercent(percent)) => available * percent / 100.0,
            _ => available,
        }
    }

    fn remove(&mut self, element: usize) {
        if let Some(probe) = self.probes.get_mut(element) {
            probe.removed = true;
        }
    }
}

impl TimerApi for HeadlessPage {
    fn now(&self) -> Duration {
        self.now
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        self.timers.push(PendingTimer {
            id,
            due_at: self.now.saturating_add(delay),
            order: self.next_timer_order,
        });
        self.next_timer_order += 1;
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.retain(|timer| timer.id != id);
    }
}
