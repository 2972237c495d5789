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

//! Adapter for engine independent search monitors
//!
//! `WrapperMonitor` lets a `plaza_search::SearchMonitor` drive the allocation
//! engine. It forwards enter, step, allocation, exit and `search_command` to
//! the inner monitor and ignores the tree specific callbacks.

use crate::{
    decision::Decision,
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::SearchState,
    stats::EngineStatistics,
};
use plaza_model::{allocation::Allocation, model::AllocationModel};
use plaza_search::monitor::search_monitor::{SearchCommand, SearchMonitor};

/// A tree search monitor that wraps a general search monitor.
pub struct WrapperMonitor<'a> {
    inner: &'a mut dyn SearchMonitor,
    name: String,
}

impl<'a> WrapperMonitor<'a> {
    #[inline]
    pub fn new(inner: &'a mut dyn SearchMonitor) -> Self {
        let name = format!("WrapperMonitor({})", inner.name());
        Self { inner, name }
    }
}

impl TreeSearchMonitor for WrapperMonitor<'_> {
    #[inline(always)]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    fn on_enter_search(&mut self, model: &AllocationModel, _statistics: &EngineStatistics) {
        self.inner.on_enter_search(model);
    }

    #[inline(always)]
    fn on_exit_search(&mut self, _statistics: &EngineStatistics) {
        self.inner.on_exit_search();
    }

    #[inline(always)]
    fn search_command(
        &mut self,
        _state: &SearchState,
        _statistics: &EngineStatistics,
    ) -> SearchCommand {
        self.inner.search_command()
    }

    #[inline(always)]
    fn on_step(&mut self, _state: &SearchState, _statistics: &EngineStatistics) {
        self.inner.on_step();
    }

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
    fn on_allocation_found(&mut self, allocation: &Allocation, _statistics: &EngineStatistics) {
        self.inner.on_allocation_found(allocation);
    }
}

impl std::fmt::Debug for WrapperMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrapperMonitor")
            .field("inner", &self.inner.name())
            .finish()
    }
}
