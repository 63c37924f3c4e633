use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Scroll position within a web page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct ScrollPosition {
    pub x: f64,
    pub y: f64,
}

impl ScrollPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Inner size of the window (the layout viewport including scrollbars).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

/// Size measurements reported by a single element.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct ElementMetrics {
    pub scroll_width: f64,
    pub scroll_height: f64,
    pub offset_width: f64,
    pub offset_height: f64,
    pub client_width: f64,
    pub client_height: f64,
}

/// Largest document size across the body and root element measurements.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DocumentExtent {
    pub width: f64,
    pub height: f64,
}

impl DocumentExtent {
    /// Combines body and root metrics. Browsers disagree on which of these
    /// carries the real document size, so the maximum of all of them wins.
    pub fn from_metrics(body: &ElementMetrics, root: &ElementMetrics) -> Self {
        let width = [
            body.scroll_width,
            body.offset_width,
            root.client_width,
            root.scroll_width,
            root.offset_width,
        ]
        .into_iter()
        .fold(0.0, f64::max);
        let height = [
            body.scroll_height,
            body.offset_height,
            root.client_height,
            root.scroll_height,
            root.offset_height,
        ]
        .into_iter()
        .fold(0.0, f64::max);
        Self { width, height }
    }

    /// Whether the document is large enough to scroll the viewport to `target`,
    /// allowing for the space reserved by a scrollbar.
    pub fn accommodates(
        &self,
        viewport: ViewportSize,
        scrollbar_width: f64,
        target: ScrollPosition,
    ) -> bool {
        self.width + scrollbar_width - viewport.width >= target.x
            && self.height + scrollbar_width - viewport.height >= target.y
    }
}

/// A pending restoration: where to scroll and until when to wait for the
/// document to grow large enough.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTarget {
    pub position: ScrollPosition,
    pub deadline: Duration,
}
