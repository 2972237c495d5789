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

/// A monitor that ignores every event and never stops the search.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct NoOperationMonitor;

impl NoOperationMonitor {
    #[inline(always)]
    pub fn new() -> Self {
        Self
    }
}

impl TreeSearchMonitor for NoOperationMonitor {
    #[inline(always)]
    fn name(&self) -> &str {
        "NoOperationMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, _model: &AllocationModel, _statistics: &EngineStatistics) {}

    #[inline(always)]
    fn on_exit_search(&mut self, _statistics: &EngineStatistics) {}

    #[inline(always)]
    fn on_step(&mut self, _state: &SearchState, _statistics: &EngineStatistics) {}

    #[inline(always)]
    fn on_prune(
        &mut self,
        _state: &SearchState,
        _decision: Decision,
        _reason: PruneReason,
        _statistics: &EngineStatistics,
    ) {
    }

    #[inline(always)]
    fn on_decisions_enqueued(
        &mut self,
        _state: &SearchState,
        _count: usize,
        _statistics: &EngineStatistics,
    ) {
    }

    #[inline(always)]
    fn on_descend(
        &mut self,
        _state: &SearchState,
        _decision: Decision,
        _statistics: &EngineStatistics,
    ) {
    }

    #[inline(always)]
    fn on_backtrack(&mut self, _state: &SearchState, _statistics: &EngineStatistics) {}

    #[inline(always)]
    fn on_allocation_found(&mut self, _allocation: &Allocation, _statistics: &EngineStatistics) {}
}

impl std::fmt::Display for NoOperationMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NoOperationMonitor")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_search::monitor::search_monitor::SearchCommand;

    #[test]
    fn test_always_continues() {
        let mut m = NoOperationMonitor::new();
        let state = SearchState::new(1, 1, 0);
        let stats = EngineStatistics::default();
        assert_eq!(m.search_command(&state, &stats), SearchCommand::Continue);
        assert_eq!(m.name(), "NoOperationMonitor");
        assert_eq!(format!("{}", m), "NoOperationMonitor");
    }
}
