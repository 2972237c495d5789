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

//! Plaza-Alloc: depth-first search for safe allocations
//!
//! Given a compiled `AllocationModel`, the engine assigns every event to a
//! distinct venue it fits into such that the summed traffic on every corridor
//! stays within the corridor's capacity.
//!
//! Core flow
//! - Compile events and venues with `plaza_model::model::ModelBuilder`.
//! - Run `engine::AllocationEngine::allocate` for one safe allocation or
//!   `allocate_all` for all of them, passing a `TreeSearchMonitor`.
//! - Inspect the outcome: a `SearchResult` or the set of allocations, the
//!   `TerminationReason` and `EngineStatistics`.
//!
//! The free functions `allocate` and `allocate_all` wrap those steps for
//! plain slices of events and venues.
//!
//! Module map
//! - `decision`: the `(event, venue)` branching choice.
//! - `engine`: the engine and its search session.
//! - `monitor`: tree search monitors (log, composite, no-op, wrapper).
//! - `result`: per-run outcomes.
//! - `state`: partial allocation, consumed venues and corridor loads.
//! - `stats`: per-run counters.
//! - `stack` / `trail`: pending decisions and the undo log.

pub mod decision;
pub mod engine;
pub mod monitor;
pub mod result;
mod stack;
pub mod state;
pub mod stats;
mod trail;

use crate::{engine::AllocationEngine, monitor::no_op::NoOperationMonitor};
use plaza_model::{
    allocation::Allocation, error::ModelError, event::Event, model::ModelBuilder, venue::Venue,
};
use plaza_search::result::SearchResult;
use std::collections::BTreeSet;

/// Finds one safe allocation of `events` to `venues`.
///
/// Returns `SearchResult::Safe` with the first safe allocation in input
/// order, or `SearchResult::NoSafeAllocation` if none exists. Fails only if
/// the input itself is invalid.
///
/// # Examples
///
/// ```rust
/// use plaza_alloc::allocate;
/// use plaza_model::{corridor::Corridor, event::Event, traffic::Traffic, venue::Venue};
///
/// let mut traffic = Traffic::new();
/// traffic.insert(Corridor::new("South Bank", "Roma Street", 60), 60);
/// let venues = vec![Venue::new("Riverstage", 100, traffic)];
/// let events = vec![Event::new("Concert", 50)];
///
/// let result = allocate(&events, &venues).unwrap();
/// assert!(result.is_safe());
/// ```
pub fn allocate(events: &[Event], venues: &[Venue]) -> Result<SearchResult, ModelError> {
    let model = ModelBuilder::new(events, venues).build()?;
    let mut engine = AllocationEngine::new();
    let (result, _, _) = engine.allocate(&model, NoOperationMonitor::new()).into_parts();
    Ok(result)
}

/// Finds every safe allocation of `events` to `venues`.
///
/// The set is empty if and only if `allocate` reports no safe allocation.
pub fn allocate_all(
    events: &[Event],
    venues: &[Venue],
) -> Result<BTreeSet<Allocation>, ModelError> {
    let model = ModelBuilder::new(events, venues).build()?;
    let mut engine = AllocationEngine::new();
    let (allocations, _, _) = engine
        .allocate_all(&model, NoOperationMonitor::new())
        .into_parts();
    Ok(allocations)
}
