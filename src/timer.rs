use std::fmt;

use instant::Instant;

/// Which phase of the simulation tick is being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TickPhase {
    Rebuild = 0,
    Compute = 1,
    Commit = 2,
}

/// Microseconds spent in each tick phase.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickStats {
    pub rebuild_us: f64,
    pub compute_us: f64,
    pub commit_us: f64,
}

impl TickStats {
    pub fn total_us(&self) -> f64 {
        self.rebuild_us + self.compute_us + self.commit_us
    }
}

impl fmt::Display for TickStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}us (rebuild {:.1}, compute {:.1}, commit {:.1})",
            self.total_us(),
            self.rebuild_us,
            self.compute_us,
            self.commit_us,
        )
    }
}

/// Per-phase tick timing. Keeps the latest tick raw and an exponential moving
/// average for reporting.
#[derive(Debug, Clone)]
pub struct TickTimers {
    last: TickStats,
    smoothed: TickStats,
    /// Ticks timed so far; the first tick seeds the average directly.
    ticks: u64,
    /// Timestamp when `begin()` was called.
    start: Instant,
}

const EMA_ALPHA: f64 = 0.1;

impl TickTimers {
    pub fn new() -> Self {
        Self {
            last: TickStats::default(),
            smoothed: TickStats::default(),
            ticks: 0,
            start: Instant::now(),
        }
    }

    /// Call before a phase runs.
    pub fn begin(&mut self) {
        self.start = Instant::now();
    }

    /// Call after a phase finishes. Records elapsed time for `phase`.
    pub fn end(&mut self, phase: TickPhase) {
        let elapsed_us = self.start.elapsed().as_secs_f64() * 1_000_000.0;
        let slot = match phase {
            TickPhase::Rebuild => &mut self.last.rebuild_us,
            TickPhase::Compute => &mut self.last.compute_us,
            TickPhase::Commit => &mut self.last.commit_us,
        };
        *slot = elapsed_us;
    }

    /// Fold the phases recorded since the last call into the average.
    pub fn finish_tick(&mut self) {
        self.ticks += 1;
        if self.ticks == 1 {
            self.smoothed = self.last;
            return;
        }
        let blend = |avg: f64, sample: f64| avg * (1.0 - EMA_ALPHA) + sample * EMA_ALPHA;
        self.smoothed = TickStats {
            rebuild_us: blend(self.smoothed.rebuild_us, self.last.rebuild_us),
            compute_us: blend(self.smoothed.compute_us, self.last.compute_us),
            commit_us: blend(self.smoothed.commit_us, self.last.commit_us),
        };
    }

    /// Phase durations of the most recent tick.
    pub fn last(&self) -> TickStats {
        self.last
    }

    /// Smoothed phase durations.
    pub fn smoothed(&self) -> TickStats {
        self.smoothed
    }
}

impl Default for TickTimers {
    fn default() -> Self {
        Self::new()
    }
}
