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

//! Depth-first allocation engine.
//!
//! The engine places events in input order. For the next unplaced event it
//! enqueues one decision per free venue the event fits into, so that venues
//! are tried in input order, and then repeatedly pops a decision, checks the
//! corridor capacities against the running loads, commits the placement on
//! the trail and descends. Exhausted levels are undone through the trail.
//!
//! The search is iterative: `SearchStack` holds the pending decisions of
//! every open level and `SearchTrail` holds what is needed to undo them, so
//! the depth of the tree is never limited by the call stack. Both are owned
//! by the `AllocationEngine` and keep their capacity between runs.
//!
//! Runs come in two flavours:
//! - `allocate` stops at the first safe allocation.
//! - `allocate_all` explores the whole tree and collects every safe
//!   allocation.
//!
//! Both can be restricted to a subset of venues for the first event
//! (`*_with_roots`), which lets several engines split one search between
//! them.

use crate::{
    decision::Decision,
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    result::{AllocationOutcome, EnumerationOutcome},
    stack::SearchStack,
    state::SearchState,
    stats::EngineStatistics,
    trail::SearchTrail,
};
use plaza_model::{
    allocation::Allocation,
    index::VenueIndex,
    model::{AllocationModel, Contribution},
};
use plaza_search::monitor::search_monitor::SearchCommand;
use std::collections::BTreeSet;

/// Reusable search engine for safe allocations.
#[derive(Clone, Debug, Default)]
pub struct AllocationEngine {
    stack: SearchStack,
    trail: SearchTrail,
}

impl AllocationEngine {
    #[inline]
    pub fn new() -> Self {
        Self {
            stack: SearchStack::new(),
            trail: SearchTrail::new(),
        }
    }

    /// Creates an engine with storage for a problem of the given size.
    ///
    /// Every run ensures sufficient capacity for its model anyway; this only
    /// moves the allocations to construction time.
    #[inline]
    pub fn preallocated(num_events: usize, num_venues: usize, num_corridors: usize) -> Self {
        Self {
            stack: SearchStack::preallocated(num_events, num_venues),
            trail: SearchTrail::preallocated(num_events, num_corridors),
        }
    }

    /// Searches for one safe allocation.
    ///
    /// Returns the first safe allocation in depth-first, input-ordered order,
    /// `NoSafeAllocation` if the tree holds none, or `Unknown` if the monitor
    /// stopped the run first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use plaza_alloc::{engine::AllocationEngine, monitor::no_op::NoOperationMonitor};
    /// # use plaza_model::{event::Event, model::ModelBuilder, traffic::Traffic, venue::Venue};
    /// let events = vec![Event::new("Concert", 50)];
    /// let venues = vec![Venue::new("Arena", 100, Traffic::new())];
    /// let model = ModelBuilder::new(&events, &venues).build().unwrap();
    ///
    /// let mut engine = AllocationEngine::new();
    /// let outcome = engine.allocate(&model, NoOperationMonitor::new());
    /// assert!(outcome.result().is_safe());
    /// ```
    pub fn allocate<S>(&mut self, model: &AllocationModel, monitor: S) -> AllocationOutcome
    where
        S: TreeSearchMonitor,
    {
        self.allocate_internal(model, None, monitor)
    }

    /// Like `allocate`, but the first event may only be placed at one of
    /// `roots`.
    pub fn allocate_with_roots<S>(
        &mut self,
        model: &AllocationModel,
        roots: &[VenueIndex],
        monitor: S,
    ) -> AllocationOutcome
    where
        S: TreeSearchMonitor,
    {
        self.allocate_internal(model, Some(roots), monitor)
    }

    /// Enumerates every safe allocation.
    pub fn allocate_all<S>(&mut self, model: &AllocationModel, monitor: S) -> EnumerationOutcome
    where
        S: TreeSearchMonitor,
    {
        self.allocate_all_internal(model, None, monitor)
    }

    /// Like `allocate_all`, but the first event may only be placed at one of
    /// `roots`.
    pub fn allocate_all_with_roots<S>(
        &mut self,
        model: &AllocationModel,
        roots: &[VenueIndex],
        monitor: S,
    ) -> EnumerationOutcome
    where
        S: TreeSearchMonitor,
    {
        self.allocate_all_internal(model, Some(roots), monitor)
    }

    fn allocate_internal<S>(
        &mut self,
        model: &AllocationModel,
        roots: Option<&[VenueIndex]>,
        mut monitor: S,
    ) -> AllocationOutcome
    where
        S: TreeSearchMonitor,
    {
        let session = AllocationSearchSession::new(
            self,
            model,
            roots,
            SearchMode::FirstAllocation,
            &mut monitor,
        );
        let (end, mut allocations, stats) = session.run();
        self.reset();

        match end {
            SessionEnd::AllocationFound => match allocations.pop_first() {
                Some(allocation) => AllocationOutcome::found(allocation, stats),
                None => AllocationOutcome::infeasible(stats),
            },
            SessionEnd::Exhausted => AllocationOutcome::infeasible(stats),
            SessionEnd::Aborted(reason) => AllocationOutcome::aborted(reason, stats),
        }
    }

    fn allocate_all_internal<S>(
        &mut self,
        model: &AllocationModel,
        roots: Option<&[VenueIndex]>,
        mut monitor: S,
    ) -> EnumerationOutcome
    where
        S: TreeSearchMonitor,
    {
        let session = AllocationSearchSession::new(
            self,
            model,
            roots,
            SearchMode::AllAllocations,
            &mut monitor,
        );
        let (end, allocations, stats) = session.run();
        self.reset();

        match end {
            SessionEnd::Aborted(reason) => EnumerationOutcome::aborted(allocations, reason, stats),
            SessionEnd::AllocationFound | SessionEnd::Exhausted => {
                EnumerationOutcome::exhausted(allocations, stats)
            }
        }
    }

    /// Clears the logical state of the stack and trail, keeping capacity.
    #[inline]
    fn reset(&mut self) {
        self.stack.reset();
        self.trail.reset();
    }

    #[inline]
    pub fn allocated_memory_bytes(&self) -> usize {
        self.stack.allocated_memory_bytes() + self.trail.allocated_memory_bytes()
    }
}

impl std::fmt::Display for AllocationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllocationEngine({}, {})", self.stack, self.trail)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum SearchMode {
    FirstAllocation,
    AllAllocations,
}

#[derive(Clone, PartialEq, Eq, Debug)]
enum SessionEnd {
    AllocationFound,
    Exhausted,
    Aborted(String),
}

/// State and logic of a single engine run.
struct AllocationSearchSession<'a, S> {
    engine: &'a mut AllocationEngine,
    model: &'a AllocationModel,
    roots: Option<&'a [VenueIndex]>,
    mode: SearchMode,
    monitor: &'a mut S,
    state: SearchState,
    allocations: BTreeSet<Allocation>,
    stats: EngineStatistics,
    start_time: std::time::Instant,
}

impl<'a, S> std::fmt::Debug for AllocationSearchSession<'a, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllocationSearchSession")
            .field("mode", &self.mode)
            .field("state", &self.state)
            .field("allocations", &self.allocations.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, S> AllocationSearchSession<'a, S>
where
    S: TreeSearchMonitor,
{
    fn new(
        engine: &'a mut AllocationEngine,
        model: &'a AllocationModel,
        roots: Option<&'a [VenueIndex]>,
        mode: SearchMode,
        monitor: &'a mut S,
    ) -> Self {
        let state = SearchState::new(
            model.num_events(),
            model.num_venues(),
            model.num_corridors(),
        );
        Self {
            engine,
            model,
            roots,
            mode,
            monitor,
            state,
            allocations: BTreeSet::new(),
            stats: EngineStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    fn run(mut self) -> (SessionEnd, BTreeSet<Allocation>, EngineStatistics) {
        self.monitor.on_enter_search(self.model, &self.stats);
        self.initialize();

        let end = loop {
            if self.mode == SearchMode::FirstAllocation && !self.allocations.is_empty() {
                break SessionEnd::AllocationFound;
            }

            self.monitor.on_step(&self.state, &self.stats);
            self.stats.on_step();

            if let SearchCommand::Terminate(reason) =
                self.monitor.search_command(&self.state, &self.stats)
            {
                // Without pending decisions only backtracking is left.
                if self.engine.stack.num_entries() == 0 {
                    break SessionEnd::Exhausted;
                }
                break SessionEnd::Aborted(reason);
            }

            if self.engine.stack.is_current_level_empty() {
                if self.engine.stack.depth() <= 1 {
                    break SessionEnd::Exhausted;
                }
                self.backtrack_step();
            } else {
                self.process_next_decision();
            }
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        (end, self.allocations, self.stats)
    }

    /// Opens the root level and enqueues the decisions for the first event.
    fn initialize(&mut self) {
        self.engine
            .trail
            .ensure_capacity(self.model.num_events(), self.model.num_corridors());
        self.engine
            .stack
            .ensure_capacity(self.model.num_events(), self.model.num_venues());

        // Root frame. Must exist before the first decisions are pushed.
        self.engine.trail.push_frame();
        self.engine.stack.push_frame();
        self.stats.on_node_explored();

        if self.state.is_complete() {
            self.handle_complete_allocation();
            return;
        }
        self.enqueue_decisions();
    }

    /// Pushes one decision per free, admissible venue for the next event.
    ///
    /// Venues are pushed in reverse so the LIFO stack yields them in input
    /// order.
    fn enqueue_decisions(&mut self) {
        let event = match self.state.next_event() {
            Some(e) => e,
            None => return,
        };
        let roots = if event.get() == 0 { self.roots } else { None };
        let count_before = self.engine.stack.num_entries();

        for venue in VenueIndex::range(self.model.num_venues()).rev() {
            if self.state.is_venue_consumed(venue) {
                continue;
            }
            if roots.is_some_and(|r| !r.contains(&venue)) {
                continue;
            }

            let decision = Decision::new(event, venue);
            if !self.model.is_admissible(event, venue) {
                self.stats.on_pruning_forbidden();
                self.monitor
                    .on_prune(&self.state, decision, PruneReason::Forbidden, &self.stats);
                continue;
            }
            self.engine.stack.push(decision);
        }

        let count = self.engine.stack.num_entries() - count_before;
        self.monitor
            .on_decisions_enqueued(&self.state, count, &self.stats);
    }

    #[inline]
    fn backtrack_step(&mut self) {
        self.stats.on_backtrack();
        self.monitor.on_backtrack(&self.state, &self.stats);

        self.engine.trail.backtrack(&mut self.state);
        self.engine.stack.pop_frame();
    }

    /// Pops the next decision and descends into it unless a corridor would
    /// overflow.
    fn process_next_decision(&mut self) {
        let decision = match self.engine.stack.pop() {
            Some(d) => d,
            None => return,
        };
        self.stats.on_decision_generated();

        let model = self.model;
        let contributions = model.contributions(decision.event(), decision.venue());

        if self.exceeds_capacity(contributions) {
            self.stats.on_pruning_capacity();
            self.monitor.on_prune(
                &self.state,
                decision,
                PruneReason::CapacityExceeded,
                &self.stats,
            );
            return;
        }

        self.descend(decision, contributions);
    }

    /// A placement overflows a corridor if the new load exceeds the smallest
    /// capacity declared by the placed venues and the candidate venue.
    #[inline]
    fn exceeds_capacity(&self, contributions: &[Contribution]) -> bool {
        contributions.iter().any(|c| {
            let load = self
                .state
                .corridor_load(c.corridor())
                .saturating_add(c.amount());
            let capacity = self.state.corridor_capacity(c.corridor()).min(c.capacity());
            load > capacity
        })
    }

    /// Commits `decision` in a new level.
    fn descend(&mut self, decision: Decision, contributions: &[Contribution]) {
        self.engine.trail.push_frame();
        self.engine
            .trail
            .apply(&mut self.state, decision, contributions);
        self.engine.stack.push_frame();

        self.stats.on_node_explored();
        self.stats
            .on_depth_update(self.state.num_assigned_events() as u64);
        self.monitor.on_descend(&self.state, decision, &self.stats);

        if self.state.is_complete() {
            self.handle_complete_allocation();
            return;
        }
        self.enqueue_decisions();
    }

    fn handle_complete_allocation(&mut self) {
        let allocation = self.state.to_allocation();
        debug_assert!(
            self.model.is_safe(&allocation),
            "called `AllocationSearchSession::handle_complete_allocation` with an unsafe allocation: {:?}",
            allocation
        );

        self.stats.on_allocation_found();
        self.monitor.on_allocation_found(&allocation, &self.stats);
        self.allocations.insert(allocation);
    }
}
