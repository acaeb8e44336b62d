//! Horizontal layout mapping for the waterfall.
//!
//! Maps span offsets and durations onto integer column positions
//! within a container of a given width. The same math places axis
//! ticks and span bars, so rows and ruler always line up.

use crate::trace::units::nanos_to_millis;

/// Left edge and width of a span bar, in container columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarGeometry {
    /// Columns between the container's left edge and the bar
    pub left: usize,
    /// Bar width in columns; reported exactly, even when zero
    pub width: usize,
}

/// Computes the bar geometry for a span within the total duration.
///
/// Both edges floor, matching the tick placement, so a bar never
/// overshoots its interval. A zero total duration maps everything to
/// the origin.
pub fn bar_geometry(
    start_offset_ns: u64,
    duration_ns: u64,
    total_duration_ns: u64,
    container_width: usize,
) -> BarGeometry {
    BarGeometry {
        left: scale_to_columns(start_offset_ns, total_duration_ns, container_width),
        width: scale_to_columns(duration_ns, total_duration_ns, container_width),
    }
}

/// Maps a nanosecond quantity onto container columns, flooring.
fn scale_to_columns(value_ns: u64, total_duration_ns: u64, container_width: usize) -> usize {
    let total_ms = nanos_to_millis(total_duration_ns);
    if total_ms == 0.0 {
        return 0;
    }

    let value_ms = nanos_to_millis(value_ns);
    ((value_ms * container_width as f64) / total_ms).floor() as usize
}

/// Column position for a fraction of the timeline, flooring.
pub fn fraction_to_column(fraction: f64, container_width: usize) -> usize {
    (fraction * container_width as f64).floor() as usize
}
