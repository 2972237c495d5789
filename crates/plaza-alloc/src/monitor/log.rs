// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::{
    decision::Decision,
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::SearchState,
    stats::EngineStatistics,
};
use plaza_model::{allocation::Allocation, model::AllocationModel};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Reports search progress through `tracing`.
///
/// The clock is only read on steps where `steps & clock_check_mask == 0`, and
/// a progress line is emitted at most once per `log_interval`.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    progress_lines: u64,
}

impl LogMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_log_time: now,
            log_interval,
            clock_check_mask,
            progress_lines: 0,
        }
    }

    #[inline]
    pub fn log_interval(&self) -> Duration {
        self.log_interval
    }

    #[inline]
    pub fn clock_check_mask(&self) -> u64 {
        self.clock_check_mask
    }

    /// Number of progress lines emitted during the current run.
    #[inline]
    pub fn progress_lines(&self) -> u64 {
        self.progress_lines
    }

    fn log_progress(&mut self, state: &SearchState, stats: &EngineStatistics, now: Instant) {
        info!(
            elapsed = ?now.duration_since(self.start_time),
            nodes = stats.nodes_explored,
            depth = state.num_assigned_events(),
            allocations = stats.allocations_found,
            backtracks = stats.backtracks,
            prunings_capacity = stats.prunings_capacity,
            prunings_forbidden = stats.prunings_forbidden,
            "allocation search progress"
        );
        self.last_log_time = now;
        self.progress_lines = self.progress_lines.saturating_add(1);
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl TreeSearchMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, model: &AllocationModel, _statistics: &EngineStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.progress_lines = 0;
        info!(
            events = model.num_events(),
            venues = model.num_venues(),
            corridors = model.num_corridors(),
            scaling = %model.scaling(),
            complexity = %model.complexity(),
            "allocation search started"
        );
    }

    fn on_exit_search(&mut self, statistics: &EngineStatistics) {
        info!(
            elapsed = ?statistics.time_total,
            nodes = statistics.nodes_explored,
            backtracks = statistics.backtracks,
            max_depth = statistics.max_depth,
            allocations = statistics.allocations_found,
            prunings = statistics.prunings_total(),
            "allocation search finished"
        );
    }

    fn on_step(&mut self, state: &SearchState, statistics: &EngineStatistics) {
        if (statistics.steps & self.clock_check_mask) != 0 {
            return;
        }
        let now = Instant::now();
        if now.duration_since(self.last_log_time) >= self.log_interval {
            self.log_progress(state, statistics, now);
        }
    }

    fn on_prune(
        &mut self,
        _state: &SearchState,
        _decision: Decision,
        _reason: PruneReason,
        _statistics: &EngineStatistics,
    ) {
    }

    fn on_decisions_enqueued(
        &mut self,
        _state: &SearchState,
        _count: usize,
        _statistics: &EngineStatistics,
    ) {
    }

    fn on_descend(&mut self, _state: &SearchState, _decision: Decision, _statistics: &EngineStatistics) {}

    fn on_backtrack(&mut self, _state: &SearchState, _statistics: &EngineStatistics) {}

    fn on_allocation_found(&mut self, allocation: &Allocation, statistics: &EngineStatistics) {
        debug!(
            events = allocation.num_events(),
            found = statistics.allocations_found,
            nodes = statistics.nodes_explored,
            "safe allocation found"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let m = LogMonitor::default();
        assert_eq!(m.log_interval(), Duration::from_secs(1));
        assert_eq!(m.clock_check_mask(), 4095);
        assert_eq!(
            format!("{}", m),
            "LogMonitor(log_interval: 1s, clock_check_mask: 4095)"
        );
    }

    #[test]
    fn test_progress_respects_mask_and_interval() {
        let mut m = LogMonitor::new(Duration::ZERO, 0b11);
        let state = SearchState::new(1, 1, 0);
        let mut stats = EngineStatistics::default();

        // steps = 0 passes the mask.
        m.on_step(&state, &stats);
        assert_eq!(m.progress_lines(), 1);

        stats.steps = 1;
        m.on_step(&state, &stats);
        assert_eq!(m.progress_lines(), 1);

        stats.steps = 4;
        m.on_step(&state, &stats);
        assert_eq!(m.progress_lines(), 2);
    }

    #[test]
    fn test_long_interval_suppresses_progress() {
        let mut m = LogMonitor::new(Duration::from_secs(3600), 0);
        let state = SearchState::new(1, 1, 0);
        let stats = EngineStatistics::default();
        for _ in 0..10 {
            m.on_step(&state, &stats);
        }
        assert_eq!(m.progress_lines(), 0);
    }
}
