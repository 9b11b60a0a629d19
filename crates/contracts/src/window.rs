//! AlignmentWindow - the global resampling interval
//!
//! The closed-open time range `[start, end)` shared by every feed, plus the
//! tick spacing derived from the fastest feed. Computed once before any
//! feed's resampling begins, read-only afterwards.

use serde::{Deserialize, Serialize};

/// Alignment policy for the output window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentPolicy {
    /// Full span covered by any feed; gaps padded with blank frames
    Union,
    /// Only the span covered by all feeds
    #[default]
    Intersection,
}

/// One point on the global output timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputTick {
    /// Position in the output sequence, starting at 0
    pub index: u64,
    /// Wall-clock time of this tick (seconds)
    pub t: f64,
}

/// The global resampling interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentWindow {
    /// Window start (seconds, inclusive)
    pub start: f64,
    /// Window end (seconds, exclusive)
    pub end: f64,
    /// Tick spacing (seconds), reciprocal of the output frame rate
    pub interval: f64,
}

impl AlignmentWindow {
    /// Output frame rate
    #[inline]
    pub fn fps(&self) -> f64 {
        1.0 / self.interval
    }

    /// Lazily iterate the ticks `start, start + interval, …` while `< end`.
    ///
    /// Each tick is recomputed as `start + index * interval` rather than
    /// accumulated, so long windows do not drift.
    pub fn ticks(&self) -> TickIter {
        TickIter {
            start: self.start,
            end: self.end,
            interval: self.interval,
            index: 0,
        }
    }

    /// Exact number of ticks `ticks()` yields, identical for every feed.
    ///
    /// This equality is the synchronization guarantee: all output videos
    /// carry the same frame count with the same per-tick meaning.
    pub fn tick_count(&self) -> u64 {
        let span = self.end - self.start;
        if span <= 0.0 || self.interval <= 0.0 {
            return 0;
        }
        let mut n = (span / self.interval).ceil() as u64;
        // Guard against rounding landing the estimate one off either way
        while self.start + n as f64 * self.interval < self.end {
            n += 1;
        }
        while n > 0 && self.start + (n - 1) as f64 * self.interval >= self.end {
            n -= 1;
        }
        n
    }
}

/// Iterator over a window's output ticks
#[derive(Debug, Clone)]
pub struct TickIter {
    start: f64,
    end: f64,
    interval: f64,
    index: u64,
}

impl Iterator for TickIter {
    type Item = OutputTick;

    fn next(&mut self) -> Option<OutputTick> {
        let t = self.start + self.index as f64 * self.interval;
        if t >= self.end {
            return None;
        }
        let tick = OutputTick {
            index: self.index,
            t,
        };
        self.index += 1;
        Some(tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_iteration_exclusive_end() {
        let window = AlignmentWindow {
            start: 0.0,
            end: 1.2,
            interval: 0.3,
        };
        let ticks: Vec<f64> = window.ticks().map(|tick| tick.t).collect();
        assert_eq!(ticks.len(), 4);
        assert_eq!(ticks[0], 0.0);
        assert!((ticks[3] - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_tick_count_matches_iteration() {
        let cases = [
            (0.0, 1.2, 0.3),
            (0.2, 1.0, 0.3),
            (0.0, 1.0, 0.5),
            (0.0, 0.05, 0.1),
            (5.0, 5.0, 0.1),
            (0.1, 7.3, 0.033),
        ];
        for (start, end, interval) in cases {
            let window = AlignmentWindow {
                start,
                end,
                interval,
            };
            assert_eq!(
                window.tick_count(),
                window.ticks().count() as u64,
                "mismatch for [{start}, {end}) step {interval}"
            );
        }
    }

    #[test]
    fn test_tick_indices_are_sequential() {
        let window = AlignmentWindow {
            start: 0.2,
            end: 1.0,
            interval: 0.3,
        };
        let indices: Vec<u64> = window.ticks().map(|tick| tick.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_fps_is_reciprocal() {
        let window = AlignmentWindow {
            start: 0.0,
            end: 1.0,
            interval: 0.04,
        };
        assert!((window.fps() - 25.0).abs() < 1e-9);
    }
}
