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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait and `PruneReason` for observing and
//! controlling the allocation engine. Callbacks follow the engine lifecycle,
//! and a monitor can stop the run through `SearchCommand` (default:
//! Continue).
//!
//! Lifecycle
//! - enter → step → {prune | decisions/descend/backtrack} → allocation → exit
//! - `EngineStatistics` is passed to every callback.
//!
//! Methods take `&mut self`; a monitor belongs to a single engine run.
//! Callbacks sit on the hot path and should stay cheap.

use crate::{decision::Decision, state::SearchState, stats::EngineStatistics};
use plaza_model::{allocation::Allocation, model::AllocationModel};
use plaza_search::monitor::search_monitor::SearchCommand;

/// Why a placement was rejected.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The event is larger than the venue.
    Forbidden,
    /// Hosting the event would push a corridor past its capacity.
    CapacityExceeded,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Forbidden => write!(f, "Forbidden"),
            PruneReason::CapacityExceeded => write!(f, "CapacityExceeded"),
        }
    }
}

/// Observes and controls a single run of the allocation engine.
pub trait TreeSearchMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called once before the first step.
    fn on_enter_search(&mut self, model: &AllocationModel, statistics: &EngineStatistics);
    /// Called once after the last step.
    fn on_exit_search(&mut self, statistics: &EngineStatistics);
    /// Called before every step to decide whether the run may continue.
    fn search_command(
        &mut self,
        _state: &SearchState,
        _statistics: &EngineStatistics,
    ) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called at each step of the search.
    fn on_step(&mut self, state: &SearchState, statistics: &EngineStatistics);
    /// Called when a placement is rejected.
    fn on_prune(
        &mut self,
        state: &SearchState,
        decision: Decision,
        reason: PruneReason,
        statistics: &EngineStatistics,
    );
    /// Called after the decisions of a new level were pushed.
    fn on_decisions_enqueued(
        &mut self,
        state: &SearchState,
        count: usize,
        statistics: &EngineStatistics,
    );
    /// Called after a placement was committed.
    fn on_descend(&mut self, state: &SearchState, decision: Decision, statistics: &EngineStatistics);
    /// Called before a level is undone.
    fn on_backtrack(&mut self, state: &SearchState, statistics: &EngineStatistics);
    /// Called when every event has been placed safely.
    fn on_allocation_found(&mut self, allocation: &Allocation, statistics: &EngineStatistics);
}

impl std::fmt::Debug for dyn TreeSearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn TreeSearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}
