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

use std::time::Duration;

/// Counters collected by one run of the allocation engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineStatistics {
    /// Total nodes visited, the root included.
    pub nodes_explored: u64,
    /// Total decision levels closed.
    pub backtracks: u64,
    /// Total decisions taken off the stack.
    pub decisions_generated: u64,
    /// Total loop iterations.
    pub steps: u64,
    /// The deepest level reached in the tree.
    pub max_depth: u64,
    /// Placements rejected because a corridor would exceed its capacity.
    pub prunings_capacity: u64,
    /// Placements never tried because the event does not fit the venue.
    pub prunings_forbidden: u64,
    /// Total safe allocations reached.
    pub allocations_found: u64,
    /// Total time spent in the engine.
    pub time_total: Duration,
}

impl EngineStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add(1);
    }

    #[inline]
    pub fn on_decision_generated(&mut self) {
        self.decisions_generated = self.decisions_generated.saturating_add(1);
    }

    #[inline]
    pub fn on_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_pruning_capacity(&mut self) {
        self.prunings_capacity = self.prunings_capacity.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_forbidden(&mut self) {
        self.prunings_forbidden = self.prunings_forbidden.saturating_add(1);
    }

    #[inline]
    pub fn on_allocation_found(&mut self) {
        self.allocations_found = self.allocations_found.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Total placements rejected for any reason.
    #[inline]
    pub fn prunings_total(&self) -> u64 {
        self.prunings_capacity
            .saturating_add(self.prunings_forbidden)
    }
}

impl std::fmt::Display for EngineStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Plaza Engine Statistics:")?;
        writeln!(f, "  Nodes explored:        {}", self.nodes_explored)?;
        writeln!(f, "  Backtracks:            {}", self.backtracks)?;
        writeln!(f, "  Max depth reached:     {}", self.max_depth)?;
        writeln!(f, "  Decisions generated:   {}", self.decisions_generated)?;
        writeln!(f, "  Prunings (capacity):   {}", self.prunings_capacity)?;
        writeln!(f, "  Prunings (forbidden):  {}", self.prunings_forbidden)?;
        writeln!(f, "  Allocations found:     {}", self.allocations_found)?;
        writeln!(f, "  Total time:            {:.2?}", self.time_total)?;
        Ok(())
    }
}
