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

//! Fan-out monitor for the allocation engine
//!
//! `CompositeTreeSearchMonitor` forwards every event to its children in
//! insertion order. `search_command` returns the first non-`Continue`
//! answer, so stricter stop conditions belong first.

use crate::{
    decision::Decision,
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::SearchState,
    stats::EngineStatistics,
};
use plaza_model::{allocation::Allocation, model::AllocationModel};
use plaza_search::monitor::search_monitor::SearchCommand;

#[derive(Default)]
pub struct CompositeTreeSearchMonitor<'a> {
    monitors: Vec<Box<dyn TreeSearchMonitor + 'a>>,
}

impl<'a> CompositeTreeSearchMonitor<'a> {
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TreeSearchMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn TreeSearchMonitor + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a> FromIterator<Box<dyn TreeSearchMonitor + 'a>> for CompositeTreeSearchMonitor<'a> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn TreeSearchMonitor + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl TreeSearchMonitor for CompositeTreeSearchMonitor<'_> {
    fn name(&self) -> &str {
        "CompositeTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, model: &AllocationModel, statistics: &EngineStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_enter_search(model, statistics);
        }
    }

    fn on_exit_search(&mut self, statistics: &EngineStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_exit_search(statistics);
        }
    }

    fn search_command(&mut self, state: &SearchState, statistics: &EngineStatistics) -> SearchCommand {
        for monitor in self.monitors.iter_mut() {
            if let SearchCommand::Terminate(reason) = monitor.search_command(state, statistics) {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }

    fn on_step(&mut self, state: &SearchState, statistics: &EngineStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_step(state, statistics);
        }
    }

    fn on_prune(
        &mut self,
        state: &SearchState,
        decision: Decision,
        reason: PruneReason,
        statistics: &EngineStatistics,
    ) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_prune(state, decision, reason, statistics);
        }
    }

    fn on_decisions_enqueued(
        &mut self,
        state: &SearchState,
        count: usize,
        statistics: &EngineStatistics,
    ) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_decisions_enqueued(state, count, statistics);
        }
    }

    fn on_descend(&mut self, state: &SearchState, decision: Decision, statistics: &EngineStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_descend(state, decision, statistics);
        }
    }

    fn on_backtrack(&mut self, state: &SearchState, statistics: &EngineStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_backtrack(state, statistics);
        }
    }

    fn on_allocation_found(&mut self, allocation: &Allocation, statistics: &EngineStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_allocation_found(allocation, statistics);
        }
    }
}

impl std::fmt::Display for CompositeTreeSearchMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.monitors.iter().map(|m| m.name()).collect();
        write!(f, "CompositeTreeSearchMonitor([{}])", names.join(", "))
    }
}

impl std::fmt::Debug for CompositeTreeSearchMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{log::LogMonitor, no_op::NoOperationMonitor};

    struct StopAfter {
        name: &'static str,
        remaining: u32,
        steps: u32,
    }

    impl TreeSearchMonitor for StopAfter {
        fn name(&self) -> &str {
            self.name
        }
        fn on_enter_search(&mut self, _m: &AllocationModel, _s: &EngineStatistics) {}
        fn on_exit_search(&mut self, _s: &EngineStatistics) {}
        fn search_command(&mut self, _st: &SearchState, _s: &EngineStatistics) -> SearchCommand {
            if self.steps >= self.remaining {
                SearchCommand::Terminate(format!("{} stopped", self.name))
            } else {
                SearchCommand::Continue
            }
        }
        fn on_step(&mut self, _st: &SearchState, _s: &EngineStatistics) {
            self.steps += 1;
        }
        fn on_prune(&mut self, _st: &SearchState, _d: Decision, _r: PruneReason, _s: &EngineStatistics) {}
        fn on_decisions_enqueued(&mut self, _st: &SearchState, _c: usize, _s: &EngineStatistics) {}
        fn on_descend(&mut self, _st: &SearchState, _d: Decision, _s: &EngineStatistics) {}
        fn on_backtrack(&mut self, _st: &SearchState, _s: &EngineStatistics) {}
        fn on_allocation_found(&mut self, _a: &Allocation, _s: &EngineStatistics) {}
    }

    #[test]
    fn test_first_terminate_wins_and_events_fan_out() {
        let mut c = CompositeTreeSearchMonitor::new();
        c.add_monitor(StopAfter {
            name: "late",
            remaining: 5,
            steps: 0,
        });
        c.add_monitor(StopAfter {
            name: "early",
            remaining: 1,
            steps: 0,
        });
        c.add_monitor(StopAfter {
            name: "earliest",
            remaining: 0,
            steps: 0,
        });
        let state = SearchState::new(0, 0, 0);
        let stats = EngineStatistics::default();

        assert_eq!(
            c.search_command(&state, &stats),
            SearchCommand::Terminate("earliest stopped".to_string())
        );
        c.on_step(&state, &stats);
        assert_eq!(
            c.search_command(&state, &stats),
            SearchCommand::Terminate("early stopped".to_string())
        );
    }

    #[test]
    fn test_display_lists_children() {
        let monitors: Vec<Box<dyn TreeSearchMonitor>> = vec![
            Box::new(NoOperationMonitor::new()),
            Box::new(LogMonitor::default()),
        ];
        let c: CompositeTreeSearchMonitor = monitors.into_iter().collect();
        assert_eq!(c.len(), 2);
        assert_eq!(
            format!("{}", c),
            "CompositeTreeSearchMonitor([NoOperationMonitor, LogMonitor])"
        );
    }

    #[test]
    fn test_empty_composite_continues() {
        let mut c = CompositeTreeSearchMonitor::with_capacity(2);
        assert!(c.is_empty());
        let state = SearchState::new(0, 0, 0);
        assert_eq!(
            c.search_command(&state, &EngineStatistics::default()),
            SearchCommand::Continue
        );
    }
}
