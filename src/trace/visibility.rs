//! Short-span classification.
//!
//! A span is "insignificant" when its duration, as a percentage of the
//! total trace duration, falls below the user-configured threshold.
//! Insignificant spans are eligible to be hidden from the waterfall.

use crate::core::{NestedTrace, ViewConfig};
use crate::trace::units::nanos_to_millis;

/// Decides whether a span is too short to matter at the given
/// threshold.
///
/// The comparison is strict: a span exactly at the threshold is NOT
/// insignificant, so a threshold of 0 never hides anything. A zero
/// total duration makes the ratio NaN or infinite, and either way the
/// comparison is false, so nothing is hidden for degenerate traces.
pub fn is_insignificant(duration_ns: u64, total_duration_ns: u64, threshold_percent: u8) -> bool {
    let duration_ms = nanos_to_millis(duration_ns);
    let total_ms = nanos_to_millis(total_duration_ns);

    (duration_ms * 100.0) / total_ms < f64::from(threshold_percent.min(100))
}

/// Returns whether a span should be rendered under the given view
/// settings.
///
/// Every span, root or nested, is evaluated independently against the
/// same total duration; insignificance does not propagate.
pub fn is_visible(duration_ns: u64, total_duration_ns: u64, view: &ViewConfig) -> bool {
    !(view.hide_short_spans && is_insignificant(duration_ns, total_duration_ns, view.threshold()))
}

/// Returns whether any span nested directly under `trace` is visible.
///
/// Drives the expand affordance of a root row: a root whose children
/// are all hidden renders as a leaf.
pub fn has_visible_children(trace: &NestedTrace, total_duration_ns: u64, view: &ViewConfig) -> bool {
    trace
        .nested
        .iter()
        .any(|child| is_visible(child.span.duration, total_duration_ns, view))
}
