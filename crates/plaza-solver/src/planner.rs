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

//! # Parallel Planner
//!
//! Splits one allocation search across worker threads and enforces global
//! limits (time, number of allocations, early stop) through monitors.
//!
//! ## How the work is split
//!
//! The venues the first event fits into are dealt round-robin to the
//! workers. Each worker runs its own `AllocationEngine` restricted to its
//! share of first-event venues, so the subtrees are disjoint and their union
//! is the whole tree. Instances with no events, or where the first event has
//! fewer than two candidate venues, run on a single worker.
//!
//! ## Monitors
//!
//! Every worker builds a `CompositeMonitor` with
//! - an `InterruptMonitor` on the shared stop flag,
//! - a `SolutionLimitMonitor` on the shared allocation counter when a
//!   solution limit is set,
//! - a `TimeLimitMonitor` when a time limit is set,
//!
//! and hands it to the engine through a `WrapperMonitor`, next to an optional
//! `LogMonitor`. In `allocate` mode the first worker that finds a safe
//! allocation raises the stop flag and the others abort.
//!
//! ## Usage
//!
//! ```rust
//! use plaza_model::{event::Event, model::ModelBuilder, traffic::Traffic, venue::Venue};
//! use plaza_solver::planner::PlannerBuilder;
//! use std::time::Duration;
//!
//! let events = vec![Event::new("Concert", 50), Event::new("Expo", 70)];
//! let venues = vec![
//!     Venue::new("Arena", 100, Traffic::new()),
//!     Venue::new("Hall", 80, Traffic::new()),
//! ];
//! let model = ModelBuilder::new(&events, &venues).build().unwrap();
//!
//! let planner = PlannerBuilder::new()
//!     .with_threads(2)
//!     .with_time_limit(Duration::from_secs(10))
//!     .build();
//!
//! let outcome = planner.allocate_all(&model);
//! assert_eq!(outcome.allocations.len(), 2);
//! ```

use plaza_alloc::{
    engine::AllocationEngine,
    monitor::{composite::CompositeTreeSearchMonitor, log::LogMonitor, wrapper::WrapperMonitor},
    result::{AllocationOutcome, EnumerationOutcome},
};
use plaza_model::{
    allocation::Allocation,
    index::{EventIndex, VenueIndex},
    model::AllocationModel,
};
use plaza_search::{
    monitor::{
        composite::CompositeMonitor, interrupt::InterruptMonitor,
        solution_limit::SolutionLimitMonitor, time_limit::TimeLimitMonitor,
    },
    result::{SearchResult, SolverEnumerationOutcome, SolverOutcome, TerminationReason},
    stats::{SolverStatistics, SolverStatisticsBuilder},
};
use std::{
    collections::BTreeSet,
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
    time::{Duration, Instant},
};
use tracing::{debug, info};

/// Check the clock about every 4,096 steps when logging progress.
const LOG_CLOCK_CHECK_MASK: u64 = 0x0FFF;

/// Runs the allocation engine on one or more threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Planner {
    threads: usize,
    time_limit: Option<Duration>,
    clock_check_mask: Option<u64>,
    solution_limit: Option<u64>,
    log_interval: Option<Duration>,
}

/// Per-solve state shared by every worker.
struct SharedSignals {
    stop: AtomicBool,
    allocations_found: AtomicU64,
}

impl SharedSignals {
    fn new() -> Self {
        Self {
            stop: AtomicBool::new(false),
            allocations_found: AtomicU64::new(0),
        }
    }
}

impl Planner {
    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    #[inline]
    pub fn solution_limit(&self) -> Option<u64> {
        self.solution_limit
    }

    /// Searches for one safe allocation.
    ///
    /// Any safe allocation found by a worker is acceptable; among several
    /// found before the others stopped, the smallest in input order is
    /// returned.
    pub fn allocate(&self, model: &AllocationModel) -> SolverOutcome {
        let start_time = Instant::now();
        let signals = SharedSignals::new();
        let shares = self.partition(model);

        let outcomes = self.run_workers(&shares, |roots| {
            let outcome = self.run_allocate(model, roots, &signals);
            if outcome.result().is_safe() && !signals.stop.swap(true, Ordering::Relaxed) {
                info!("safe allocation found, stopping remaining workers");
            }
            outcome
        });

        let statistics = Self::build_statistics(
            start_time,
            shares.len(),
            outcomes
                .iter()
                .map(|o| (o.statistics().nodes_explored, o.statistics().allocations_found)),
        );

        let mut best: Option<Allocation> = None;
        let mut all_exhausted = true;
        let mut abort_reason: Option<String> = None;
        for outcome in outcomes {
            let (result, reason, _) = outcome.into_parts();
            match result {
                SearchResult::Safe(allocation) => {
                    if best.as_ref().is_none_or(|b| allocation < *b) {
                        best = Some(allocation);
                    }
                }
                SearchResult::NoSafeAllocation => {}
                SearchResult::Unknown => {
                    all_exhausted = false;
                    if let TerminationReason::Aborted(msg) = reason {
                        abort_reason.get_or_insert(msg);
                    }
                }
            }
        }

        match best {
            Some(allocation) => SolverOutcome::new(
                SearchResult::Safe(allocation),
                TerminationReason::SolutionFound,
                statistics,
            ),
            None if all_exhausted => SolverOutcome::new(
                SearchResult::NoSafeAllocation,
                TerminationReason::InfeasibilityProven,
                statistics,
            ),
            None => SolverOutcome::new(
                SearchResult::Unknown,
                TerminationReason::Aborted(
                    abort_reason.unwrap_or_else(|| "search aborted".to_string()),
                ),
                statistics,
            ),
        }
    }

    /// Enumerates every safe allocation.
    ///
    /// With a solution limit the run stops once the shared counter reaches
    /// it; workers that were mid-step may still add a few allocations, so an
    /// aborted set can be slightly larger than the limit. A worker that hits
    /// the limit with no pending decisions counts as exhausted, so a limit
    /// equal to the number of safe allocations completes on one thread. With
    /// several threads, another worker may still hold unexplored decisions at
    /// that moment and the run is then reported as aborted.
    pub fn allocate_all(&self, model: &AllocationModel) -> SolverEnumerationOutcome {
        let start_time = Instant::now();
        let signals = SharedSignals::new();
        let shares = self.partition(model);

        let outcomes = self.run_workers(&shares, |roots| {
            self.run_allocate_all(model, roots, &signals)
        });

        let statistics = Self::build_statistics(
            start_time,
            shares.len(),
            outcomes
                .iter()
                .map(|o| (o.statistics().nodes_explored, o.statistics().allocations_found)),
        );

        let mut allocations = BTreeSet::new();
        let mut abort_reason: Option<String> = None;
        for outcome in outcomes {
            let (found, reason, _) = outcome.into_parts();
            allocations.extend(found);
            if let TerminationReason::Aborted(msg) = reason {
                abort_reason.get_or_insert(msg);
            }
        }

        let reason = match abort_reason {
            Some(msg) => TerminationReason::Aborted(msg),
            None if allocations.is_empty() => TerminationReason::InfeasibilityProven,
            None => TerminationReason::SearchExhausted,
        };
        SolverEnumerationOutcome::new(allocations, reason, statistics)
    }

    /// Deals the first event's candidate venues to the workers.
    ///
    /// Returns one share per worker; `None` is a single unrestricted worker.
    fn partition(&self, model: &AllocationModel) -> Vec<Option<Vec<VenueIndex>>> {
        if model.num_events() == 0 || self.threads <= 1 {
            return vec![None];
        }

        let roots: Vec<VenueIndex> = model.admissible_venues(EventIndex::new(0)).collect();
        if roots.len() <= 1 {
            return vec![None];
        }

        let workers = self.threads.min(roots.len());
        let mut shares: Vec<Vec<VenueIndex>> = vec![Vec::new(); workers];
        for (i, root) in roots.into_iter().enumerate() {
            shares[i % workers].push(root);
        }

        debug!(
            workers,
            events = model.num_events(),
            venues = model.num_venues(),
            "splitting allocation search across workers"
        );
        shares.into_iter().map(Some).collect()
    }

    /// Runs `work` once per share, in parallel when there is more than one.
    fn run_workers<R, F>(&self, shares: &[Option<Vec<VenueIndex>>], work: F) -> Vec<R>
    where
        R: Send,
        F: Fn(Option<&[VenueIndex]>) -> R + Sync,
    {
        if let [share] = shares {
            return vec![work(share.as_deref())];
        }

        let work = &work;
        std::thread::scope(|scope| {
            let handles: Vec<_> = shares
                .iter()
                .map(|share| scope.spawn(move || work(share.as_deref())))
                .collect();

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(result) => result,
                    Err(payload) => std::panic::resume_unwind(payload),
                })
                .collect()
        })
    }

    fn search_monitor<'a>(&self, signals: &'a SharedSignals) -> CompositeMonitor<'a> {
        let mut monitor = CompositeMonitor::with_capacity(3);
        monitor.add_monitor(InterruptMonitor::new(&signals.stop));
        if let Some(limit) = self.solution_limit {
            monitor.add_monitor(SolutionLimitMonitor::new(&signals.allocations_found, limit));
        }
        if let Some(limit) = self.time_limit {
            let time_limit = match self.clock_check_mask {
                Some(mask) => TimeLimitMonitor::with_clock_check_mask(limit, mask),
                None => TimeLimitMonitor::new(limit),
            };
            monitor.add_monitor(time_limit);
        }
        monitor
    }

    fn tree_monitor<'a>(&self, inner: &'a mut CompositeMonitor<'_>) -> CompositeTreeSearchMonitor<'a> {
        let mut monitor = CompositeTreeSearchMonitor::with_capacity(2);
        monitor.add_monitor(WrapperMonitor::new(inner));
        if let Some(interval) = self.log_interval {
            monitor.add_monitor(LogMonitor::new(interval, LOG_CLOCK_CHECK_MASK));
        }
        monitor
    }

    fn run_allocate(
        &self,
        model: &AllocationModel,
        roots: Option<&[VenueIndex]>,
        signals: &SharedSignals,
    ) -> AllocationOutcome {
        let mut engine = AllocationEngine::preallocated(
            model.num_events(),
            model.num_venues(),
            model.num_corridors(),
        );
        let mut search_monitor = self.search_monitor(signals);
        let monitor = self.tree_monitor(&mut search_monitor);
        match roots {
            Some(roots) => engine.allocate_with_roots(model, roots, monitor),
            None => engine.allocate(model, monitor),
        }
    }

    fn run_allocate_all(
        &self,
        model: &AllocationModel,
        roots: Option<&[VenueIndex]>,
        signals: &SharedSignals,
    ) -> EnumerationOutcome {
        let mut engine = AllocationEngine::preallocated(
            model.num_events(),
            model.num_venues(),
            model.num_corridors(),
        );
        let mut search_monitor = self.search_monitor(signals);
        let monitor = self.tree_monitor(&mut search_monitor);
        match roots {
            Some(roots) => engine.allocate_all_with_roots(model, roots, monitor),
            None => engine.allocate_all(model, monitor),
        }
    }

    fn build_statistics<I>(start_time: Instant, used_threads: usize, per_worker: I) -> SolverStatistics
    where
        I: Iterator<Item = (u64, u64)>,
    {
        let (nodes, allocations) = per_worker.fold((0u64, 0u64), |(n, a), (wn, wa)| {
            (n.saturating_add(wn), a.saturating_add(wa))
        });
        SolverStatisticsBuilder::new()
            .nodes_explored(nodes)
            .allocations_found(allocations)
            .used_threads(used_threads)
            .solve_duration(start_time.elapsed())
            .build()
    }
}

impl std::fmt::Display for Planner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Planner(threads: {}", self.threads)?;
        if let Some(limit) = self.time_limit {
            write!(f, ", time_limit: {:?}", limit)?;
        }
        if let Some(limit) = self.solution_limit {
            write!(f, ", solution_limit: {}", limit)?;
        }
        write!(f, ")")
    }
}

/// Builder for `Planner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerBuilder {
    threads: usize,
    time_limit: Option<Duration>,
    clock_check_mask: Option<u64>,
    solution_limit: Option<u64>,
    log_interval: Option<Duration>,
}

impl Default for PlannerBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl PlannerBuilder {
    /// Starts with one thread per available core and no limits.
    #[inline]
    pub fn new() -> Self {
        Self {
            threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            time_limit: None,
            clock_check_mask: None,
            solution_limit: None,
            log_interval: None,
        }
    }

    /// Sets the maximum number of worker threads. Zero is treated as one.
    #[inline]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Overrides how often the time limit reads the clock: once every step
    /// where `steps & mask == 0`.
    #[inline]
    pub fn with_clock_check_mask(mut self, mask: u64) -> Self {
        self.clock_check_mask = Some(mask);
        self
    }

    #[inline]
    pub fn with_solution_limit(mut self, limit: u64) -> Self {
        self.solution_limit = Some(limit);
        self
    }

    /// Emits progress through `tracing` at most once per `interval` per worker.
    #[inline]
    pub fn with_progress_log(mut self, interval: Duration) -> Self {
        self.log_interval = Some(interval);
        self
    }

    #[inline]
    pub fn build(self) -> Planner {
        Planner {
            threads: self.threads,
            time_limit: self.time_limit,
            clock_check_mask: self.clock_check_mask,
            solution_limit: self.solution_limit,
            log_interval: self.log_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_alloc::monitor::no_op::NoOperationMonitor;
    use plaza_model::{
        corridor::Corridor, event::Event, model::ModelBuilder, traffic::Traffic, venue::Venue,
    };

    fn vi(i: usize) -> VenueIndex {
        VenueIndex::new(i)
    }

    fn venue(name: &str, capacity: u32, entries: &[(&str, &str, u32, u32)]) -> Venue {
        let traffic: Traffic = entries
            .iter()
            .map(|&(s, e, c, t)| (Corridor::new(s, e, c), t))
            .collect();
        Venue::new(name, capacity, traffic)
    }

    /// Five venues sharing two corridors, four events.
    fn contested_model() -> AllocationModel {
        let events = vec![
            Event::new("Opera", 40),
            Event::new("Derby", 90),
            Event::new("Expo", 20),
            Event::new("Gala", 60),
        ];
        let venues = vec![
            venue("North", 100, &[("Hub", "Bridge", 100, 80)]),
            venue("South", 120, &[("Hub", "Bridge", 100, 60), ("Bridge", "Quay", 50, 40)]),
            venue("East", 60, &[("Bridge", "Quay", 50, 50)]),
            venue("West", 95, &[("Hub", "Bridge", 100, 30)]),
            venue("Annex", 45, &[]),
        ];
        ModelBuilder::new(&events, &venues).build().unwrap()
    }

    fn sequential(model: &AllocationModel) -> BTreeSet<Allocation> {
        let mut engine = AllocationEngine::new();
        engine
            .allocate_all(model, NoOperationMonitor::new())
            .allocations()
            .clone()
    }

    #[test]
    fn test_parallel_enumeration_matches_sequential() {
        let model = contested_model();
        let expected = sequential(&model);
        assert!(!expected.is_empty());

        for threads in [1, 2, 3, 8] {
            let planner = PlannerBuilder::new().with_threads(threads).build();
            let outcome = planner.allocate_all(&model);
            assert_eq!(outcome.allocations, expected, "threads = {}", threads);
            assert_eq!(outcome.reason, TerminationReason::SearchExhausted);
            assert_eq!(
                outcome.statistics.allocations_found,
                expected.len() as u64
            );
        }
    }

    #[test]
    fn test_partition_is_round_robin_over_admissible_venues() {
        let model = contested_model();
        // "Opera" (40) fits all five venues.
        let planner = PlannerBuilder::new().with_threads(2).build();
        let shares = planner.partition(&model);
        assert_eq!(
            shares,
            vec![
                Some(vec![vi(0), vi(2), vi(4)]),
                Some(vec![vi(1), vi(3)]),
            ]
        );

        let single = PlannerBuilder::new().with_threads(1).build();
        assert_eq!(single.partition(&model), vec![None]);
    }

    #[test]
    fn test_parallel_allocate_finds_a_safe_allocation() {
        let model = contested_model();
        let planner = PlannerBuilder::new().with_threads(4).build();
        let outcome = planner.allocate(&model);

        assert_eq!(outcome.reason, TerminationReason::SolutionFound);
        let allocation = outcome.result.allocation().expect("safe allocation");
        assert!(model.is_safe(allocation));
        assert!(sequential(&model).contains(allocation));
    }

    #[test]
    fn test_no_safe_allocation_in_parallel() {
        let events = vec![Event::new("A", 50), Event::new("B", 80)];
        let venues = vec![
            venue("V1", 100, &[("X", "Y", 60, 60)]),
            venue("V2", 90, &[("X", "Y", 60, 54)]),
        ];
        let model = ModelBuilder::new(&events, &venues).build().unwrap();
        let planner = PlannerBuilder::new().with_threads(2).build();

        let one = planner.allocate(&model);
        assert_eq!(one.result, SearchResult::NoSafeAllocation);
        assert_eq!(one.reason, TerminationReason::InfeasibilityProven);
        assert_eq!(one.statistics.used_threads, 2);

        let all = planner.allocate_all(&model);
        assert!(all.allocations.is_empty());
        assert_eq!(all.reason, TerminationReason::InfeasibilityProven);
    }

    #[test]
    fn test_zero_events_run_on_one_worker() {
        let venues = vec![venue("V1", 10, &[])];
        let model = ModelBuilder::new(&[], &venues).build().unwrap();
        let planner = PlannerBuilder::new().with_threads(4).build();

        let outcome = planner.allocate(&model);
        assert_eq!(outcome.result, SearchResult::Safe(Allocation::empty()));
        assert_eq!(outcome.statistics.used_threads, 1);
    }

    #[test]
    fn test_solution_limit_stops_enumeration() {
        let model = contested_model();
        let planner = PlannerBuilder::new()
            .with_threads(1)
            .with_solution_limit(1)
            .build();
        let outcome = planner.allocate_all(&model);

        assert_eq!(outcome.allocations.len(), 1);
        assert_eq!(
            outcome.reason,
            TerminationReason::Aborted("global solution limit reached".to_string())
        );
        assert!(!outcome.is_complete());
    }

    #[test]
    fn test_solution_limit_equal_to_the_total_is_complete() {
        let model = contested_model();
        let expected = sequential(&model);
        assert!(!expected.is_empty());

        let planner = PlannerBuilder::new()
            .with_threads(1)
            .with_solution_limit(expected.len() as u64)
            .build();
        let outcome = planner.allocate_all(&model);

        assert_eq!(outcome.allocations, expected);
        assert_eq!(outcome.reason, TerminationReason::SearchExhausted);
        assert!(outcome.is_complete());
    }

    #[test]
    fn test_expired_time_limit_is_inconclusive() {
        let model = contested_model();
        let planner = PlannerBuilder::new()
            .with_threads(2)
            .with_time_limit(Duration::ZERO)
            .with_clock_check_mask(0)
            .build();

        let outcome = planner.allocate(&model);
        assert_eq!(outcome.result, SearchResult::Unknown);
        assert_eq!(
            outcome.reason,
            TerminationReason::Aborted("time limit reached".to_string())
        );
    }

    #[test]
    fn test_progress_log_does_not_change_results() {
        let model = contested_model();
        let planner = PlannerBuilder::new()
            .with_threads(3)
            .with_progress_log(Duration::ZERO)
            .build();
        assert_eq!(planner.allocate_all(&model).allocations, sequential(&model));
    }

    #[test]
    fn test_builder_and_display() {
        let planner = PlannerBuilder::new()
            .with_threads(0)
            .with_time_limit(Duration::from_secs(2))
            .with_solution_limit(5)
            .build();
        assert_eq!(planner.threads(), 1);
        assert_eq!(planner.time_limit(), Some(Duration::from_secs(2)));
        assert_eq!(planner.solution_limit(), Some(5));
        assert_eq!(
            format!("{}", planner),
            "Planner(threads: 1, time_limit: 2s, solution_limit: 5)"
        );
    }
}
