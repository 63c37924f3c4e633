// Scrollbar width probe
// Measures how much layout width the platform reserves for a scrollbar by
// comparing a fixed-width element before and after forcing scrollbars on it.

use tracing::trace;

use crate::platform::{ProbeDom, ProbeStyle};

const PROBE_WIDTH_PX: f64 = 100.0;

/// Measures the platform scrollbar width in CSS pixels.
///
/// Creates a hidden 100px element, reads its width, forces scrollbars, adds a
/// full-width child and reads the child's width; the difference is the space
/// taken by the scrollbar. The probe elements are removed before returning.
/// Overlay-scrollbar platforms report 0.
pub fn measure_scrollbar_width<D: ProbeDom + ?Sized>(dom: &mut D) -> f64 {
    let outer = dom.create_element();
    dom.set_style(outer, ProbeStyle::VisibilityHidden);
    dom.set_style(outer, ProbeStyle::WidthPx(PROBE_WIDTH_PX));
    dom.set_style(outer, ProbeStyle::ScrollbarOverflowStyle);
    dom.append_to_body(outer);

    let width_no_scroll = dom.offset_width(outer);

    dom.set_style(outer, ProbeStyle::OverflowScroll);
    let inner = dom.create_element();
    dom.set_style(inner, ProbeStyle::WidthPercent(100.0));
    dom.append_child(outer, inner);

    let width_with_scroll = dom.offset_width(inner);

    dom.remove(outer);

    let width = width_no_scroll - width_with_scroll;
    trace!(width_no_scroll, width_with_scroll, width, "measured scrollbar width");
    width
}
