//! Capabilities a page environment provides to scroll restoration.
//!
//! A host is whatever owns the live document: a webview bridge, a headless
//! engine, or the in-memory [`HeadlessPage`](super::headless::HeadlessPage).
//! All calls happen on the host's single event-loop thread.

use std::time::Duration;

use serde_json::Value;

use crate::types::errors::HistoryError;
use crate::types::scroll::{ElementMetrics, ScrollPosition, ViewportSize};

/// Handle returned by [`TimerApi::set_timeout`].
pub type TimerId = u64;

/// Session history entry points of the current page.
pub trait HistoryApi {
    /// State of the current entry, `Value::Null` when it has none.
    fn state(&self) -> Value;
    /// Title of the current entry.
    fn title(&self) -> String;
    /// Creates a new entry after the current one and makes it current.
    fn push_state(&mut self, state: Value, title: &str, url: Option<&str>)
        -> Result<(), HistoryError>;
    /// Overwrites the current entry's state (and URL when given).
    fn replace_state(
        &mut self,
        state: Value,
        title: &str,
        url: Option<&str>,
    ) -> Result<(), HistoryError>;
    /// Whether `push_state` / `replace_state` are available at all.
    fn supports_state_mutation(&self) -> bool {
        true
    }
}

/// Scroll position and size of the window.
pub trait ViewportApi {
    fn scroll_position(&self) -> ScrollPosition;
    fn scroll_to(&mut self, x: f64, y: f64);
    fn inner_size(&self) -> ViewportSize;
}

/// Size measurements of the `<body>` and root (`<html>`) elements.
pub trait DocumentMetrics {
    fn body_metrics(&self) -> ElementMetrics;
    fn root_metrics(&self) -> ElementMetrics;
}

/// Style rules the scrollbar probe applies to its elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeStyle {
    VisibilityHidden,
    WidthPx(f64),
    WidthPercent(f64),
    /// Legacy hint asking engines with overlay scrollbars to reserve space.
    ScrollbarOverflowStyle,
    OverflowScroll,
}

/// Minimal element API used to measure the platform scrollbar width.
pub trait ProbeDom {
    type Element: Copy;

    fn create_element(&mut self) -> Self::Element;
    fn set_style(&mut self, element: Self::Element, style: ProbeStyle);
    fn append_to_body(&mut self, element: Self::Element);
    fn append_child(&mut self, parent: Self::Element, child: Self::Element);
    fn offset_width(&self, element: Self::Element) -> f64;
    /// Detaches the element (and its children) from the document.
    fn remove(&mut self, element: Self::Element);
}

/// Clock and one-shot timers of the host event loop.
pub trait TimerApi {
    /// Monotonic time since the host's epoch.
    fn now(&self) -> Duration;
    fn set_timeout(&mut self, delay: Duration) -> TimerId;
    /// Clearing an unknown or already fired timer is a no-op.
    fn clear_timeout(&mut self, id: TimerId);
}

/// Everything scroll restoration needs from a page.
pub trait PageHost: HistoryApi + ViewportApi + DocumentMetrics + ProbeDom + TimerApi {}

impl<T> PageHost for T where T: HistoryApi + ViewportApi + DocumentMetrics + ProbeDom + TimerApi {}
