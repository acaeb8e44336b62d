//! Timeline scale selection for axis labeling.

use serde::Serialize;

const SCALE_1MS: f64 = 1.0;
const SCALE_10MS: f64 = 10.0;
const SCALE_100MS: f64 = 100.0;

/// A chosen time-axis scale: the tick interval and how many ticks it
/// produces over the total duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scale {
    /// Interval between ticks in milliseconds (100, 10, or 1)
    pub interval_ms: f64,
    /// Number of ticks covering the total duration
    pub tick_count: u32,
}

/// Counts how many whole-or-partial chunks of `interval_ms` cover
/// `total_ms`.
///
/// Ceiling for non-negative reals: an exact multiple adds no extra
/// chunk.
fn chunk_count(total_ms: f64, interval_ms: f64) -> u32 {
    let mut chunks = (total_ms / interval_ms).floor() as u32;

    if total_ms % interval_ms != 0.0 {
        chunks += 1;
    }

    chunks
}

/// Picks the coarsest tick interval that still yields more than one
/// tick, so short traces get finer-grained axis labels instead of a
/// single unreadable one.
///
/// Tries 100ms, then 10ms, and falls back to 1ms regardless of its
/// tick count, which may be 0 or 1 for very short traces.
pub fn select_scale(total_ms: f64) -> Scale {
    for interval_ms in [SCALE_100MS, SCALE_10MS] {
        let tick_count = chunk_count(total_ms, interval_ms);

        if tick_count > 1 {
            return Scale {
                interval_ms,
                tick_count,
            };
        }
    }

    Scale {
        interval_ms: SCALE_1MS,
        tick_count: chunk_count(total_ms, SCALE_1MS),
    }
}

impl Scale {
    /// Horizontal position of tick `i` as a fraction of the timeline.
    ///
    /// Tick 0 is always the origin. Callers place interior ticks for
    /// `1 <= i < tick_count`; the end-of-axis label is the exact total
    /// duration, not a scale multiple.
    pub fn tick_fraction(&self, i: u32, total_ms: f64) -> f64 {
        if total_ms == 0.0 {
            return 0.0;
        }
        (f64::from(i) * self.interval_ms) / total_ms
    }

    /// Label value for tick `i` in milliseconds
    pub fn tick_label_ms(&self, i: u32) -> f64 {
        f64::from(i) * self.interval_ms
    }
}
