//! Repeated timed renders of the same frame.

use std::time::Duration;

use tracing::info;

use mandeltime_core::{IterationBound, PlaneWindow};

use crate::grid::PixelGrid;
use crate::renderer::{RenderMode, RenderStats};

/// One timed render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedRun {
    /// 1-based position in the sequence.
    pub call: usize,
    pub stats: RenderStats,
}

impl TimedRun {
    pub fn elapsed(&self) -> Duration {
        self.stats.elapsed
    }

    /// `"first"`, `"second"`, `"third"`, then `"4th"`, `"5th"`, …
    pub fn ordinal(&self) -> String {
        ordinal(self.call)
    }
}

/// Render `window` into `grid` `runs` times back to back, timing each call.
///
/// The grid is zeroed before every call after the first, so each run starts
/// from the same state. The grid holds the last run's output on return.
pub fn time_renders(
    window: &PlaneWindow,
    grid: &mut PixelGrid,
    bound: IterationBound,
    runs: usize,
    mode: RenderMode,
) -> Vec<TimedRun> {
    let mut timings = Vec::with_capacity(runs);
    for call in 1..=runs {
        if call > 1 {
            grid.clear();
        }
        let stats = mode.render(window, grid, bound);
        info!(
            call,
            mode = mode.label(),
            elapsed_ms = stats.elapsed.as_secs_f64() * 1e3,
            "Timed render"
        );
        timings.push(TimedRun { call, stats });
    }
    timings
}

fn ordinal(n: usize) -> String {
    match n {
        1 => "first".into(),
        2 => "second".into(),
        3 => "third".into(),
        _ => {
            let suffix = match (n % 10, n % 100) {
                (_, 11..=13) => "th",
                (1, _) => "st",
                (2, _) => "nd",
                (3, _) => "rd",
                _ => "th",
            };
            format!("{n}{suffix}")
        }
    }
}
