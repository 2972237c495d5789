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

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use plaza_model::{allocation::Allocation, model::AllocationModel};
use std::sync::atomic::{AtomicU64, Ordering};

/// A monitor that terminates the search once a number of safe allocations
/// has been found. The count lives in an atomic shared by every monitor of
/// the same solve, so the limit is global across threads.
#[derive(Debug)]
pub struct SolutionLimitMonitor<'a> {
    allocations_found: &'a AtomicU64,
    solution_limit: u64,
}

impl<'a> SolutionLimitMonitor<'a> {
    /// Creates a new `SolutionLimitMonitor`.
    #[inline]
    pub fn new(allocations_found: &'a AtomicU64, solution_limit: u64) -> Self {
        Self {
            allocations_found,
            solution_limit,
        }
    }

    /// Checks if the solution limit has been reached.
    #[inline]
    fn reached_limit(&self) -> bool {
        self.allocations_found.load(Ordering::Relaxed) >= self.solution_limit
    }
}

impl SearchMonitor for SolutionLimitMonitor<'_> {
    fn name(&self) -> &str {
        "SolutionLimitMonitor"
    }

    fn on_enter_search(&mut self, _model: &AllocationModel) {}

    fn on_exit_search(&mut self) {}

    fn on_allocation_found(&mut self, _allocation: &Allocation) {
        self.allocations_found.fetch_add(1, Ordering::Relaxed);
    }

    fn on_step(&mut self) {}

    fn search_command(&self) -> SearchCommand {
        if self.reached_limit() {
            SearchCommand::Terminate("global solution limit reached".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SolutionLimitMonitor;
    use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
    use plaza_model::allocation::Allocation;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn test_continue_before_limit_and_terminate_at_limit() {
        let counter = AtomicU64::new(0);
        let mut monitor = SolutionLimitMonitor::new(&counter, 3);
        let allocation = Allocation::empty();

        assert!(matches!(monitor.search_command(), SearchCommand::Continue));

        monitor.on_allocation_found(&allocation);
        monitor.on_allocation_found(&allocation);
        assert!(matches!(monitor.search_command(), SearchCommand::Continue));

        monitor.on_allocation_found(&allocation);
        assert!(matches!(
            monitor.search_command(),
            SearchCommand::Terminate(_)
        ));
        assert!(matches!(
            monitor.search_command(),
            SearchCommand::Terminate(_)
        ));
    }

    #[test]
    fn test_multiple_monitors_share_global_counter() {
        let counter = AtomicU64::new(0);
        let allocation = Allocation::empty();

        let mut m1 = SolutionLimitMonitor::new(&counter, 4);
        let mut m2 = SolutionLimitMonitor::new(&counter, 4);

        m1.on_allocation_found(&allocation);
        m1.on_allocation_found(&allocation);
        m2.on_allocation_found(&allocation);
        assert!(matches!(m1.search_command(), SearchCommand::Continue));
        assert!(matches!(m2.search_command(), SearchCommand::Continue));

        m2.on_allocation_found(&allocation);
        assert!(matches!(m1.search_command(), SearchCommand::Terminate(_)));
        assert!(matches!(m2.search_command(), SearchCommand::Terminate(_)));
    }

    #[test]
    fn test_concurrent_increment_reaches_limit() {
        let counter = AtomicU64::new(0);
        let limit = 10;

        let commands: Vec<SearchCommand> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        let mut m = SolutionLimitMonitor::new(&counter, limit);
                        let allocation = Allocation::empty();
                        for _ in 0..3 {
                            m.on_allocation_found(&allocation);
                        }
                        m.search_command()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(counter.load(Ordering::Relaxed), 12);
        assert!(
            commands
                .iter()
                .any(|c| matches!(c, SearchCommand::Terminate(_))),
            "expected at least one termination command across threads"
        );
    }
}
