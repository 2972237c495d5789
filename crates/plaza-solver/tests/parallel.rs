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

//! Property-based tests for the parallel planner
//!
//! For random instances the planner must return exactly the allocations a
//! single sequential engine returns, regardless of the number of threads.

use plaza_alloc::{engine::AllocationEngine, monitor::no_op::NoOperationMonitor};
use plaza_model::{
    corridor::Corridor,
    event::Event,
    model::{AllocationModel, ModelBuilder},
    traffic::Traffic,
    venue::Venue,
};
use plaza_search::result::{SearchResult, TerminationReason};
use plaza_solver::planner::PlannerBuilder;
use proptest::prelude::*;

const LOCATIONS: [&str; 3] = ["Kurilpa", "Victoria Bridge", "Queen Street"];

fn model_strategy() -> impl Strategy<Value = AllocationModel> {
    (
        prop::collection::vec(1u32..=60, 0..=5),
        prop::collection::vec(
            (
                1u32..=60,
                prop::collection::vec((0..3usize, 1..3usize, 1u32..=100), 0..3),
            ),
            0..=5,
        ),
    )
        .prop_map(|(sizes, venue_specs)| {
            let events: Vec<Event> = sizes
                .into_iter()
                .enumerate()
                .map(|(i, size)| Event::new(format!("E{}", i), size))
                .collect();
            let venues: Vec<Venue> = venue_specs
                .into_iter()
                .enumerate()
                .map(|(i, (capacity, entries))| {
                    let mut traffic = Traffic::new();
                    for (start, offset, share) in entries {
                        let end = (start + offset) % 3;
                        // Corridor capacity 50 everywhere, so venues compete.
                        let amount = (50u32.min(capacity) * share / 100).max(1);
                        traffic.insert(Corridor::new(LOCATIONS[start], LOCATIONS[end], 50), amount);
                    }
                    Venue::new(format!("V{}", i), capacity, traffic)
                })
                .collect();
            ModelBuilder::new(&events, &venues)
                .build()
                .expect("generated names are unique")
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_parallel_enumeration_equals_sequential(model in model_strategy(), threads in 1usize..=4) {
        let mut engine = AllocationEngine::new();
        let sequential = engine.allocate_all(&model, NoOperationMonitor::new());

        let planner = PlannerBuilder::new().with_threads(threads).build();
        let parallel = planner.allocate_all(&model);

        prop_assert_eq!(&parallel.allocations, sequential.allocations());
        prop_assert!(parallel.is_complete());
        prop_assert_eq!(
            parallel.statistics.allocations_found,
            sequential.allocations().len() as u64
        );
    }

    #[test]
    fn prop_parallel_allocate_agrees_on_existence(model in model_strategy(), threads in 1usize..=4) {
        let mut engine = AllocationEngine::new();
        let sequential = engine.allocate_all(&model, NoOperationMonitor::new());

        let planner = PlannerBuilder::new().with_threads(threads).build();
        let outcome = planner.allocate(&model);

        match &outcome.result {
            SearchResult::Safe(allocation) => {
                prop_assert!(sequential.allocations().contains(allocation));
                prop_assert_eq!(&outcome.reason, &TerminationReason::SolutionFound);
            }
            SearchResult::NoSafeAllocation => {
                prop_assert!(sequential.allocations().is_empty());
                prop_assert_eq!(&outcome.reason, &TerminationReason::InfeasibilityProven);
            }
            SearchResult::Unknown => prop_assert!(false, "unlimited planner runs are conclusive"),
        }
    }
}
