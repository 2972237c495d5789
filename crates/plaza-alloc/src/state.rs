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

//! Mutable search state of one engine run.
//!
//! Events are assigned strictly in input order, so the partial allocation is
//! a prefix: `event_venues[i]` is the venue of event `i` for every
//! `i < num_assigned_events()`. The state also keeps the consumed venues, the
//! running load of every corridor and the capacity each corridor is held to.
//! A corridor's capacity is the smallest one declared by the venues placed so
//! far, and `u64::MAX` while no placed venue declares the corridor. All
//! mutation goes through the trail so that every change can be undone on
//! backtrack.

use fixedbitset::FixedBitSet;
use plaza_model::{
    allocation::Allocation,
    index::{CorridorIndex, EventIndex, VenueIndex},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    num_events: usize,
    event_venues: Vec<VenueIndex>,
    consumed: FixedBitSet,
    corridor_loads: Vec<u64>,
    corridor_capacities: Vec<u64>,
}

impl SearchState {
    /// Creates an empty state: nothing assigned, every venue free, every
    /// corridor load zero and every corridor unconstrained.
    pub fn new(num_events: usize, num_venues: usize, num_corridors: usize) -> Self {
        Self {
            num_events,
            event_venues: Vec::with_capacity(num_events),
            consumed: FixedBitSet::with_capacity(num_venues),
            corridor_loads: vec![0; num_corridors],
            corridor_capacities: vec![u64::MAX; num_corridors],
        }
    }

    #[inline]
    pub fn num_events(&self) -> usize {
        self.num_events
    }

    #[inline]
    pub fn num_venues(&self) -> usize {
        self.consumed.len()
    }

    #[inline]
    pub fn num_corridors(&self) -> usize {
        self.corridor_loads.len()
    }

    #[inline]
    pub fn num_assigned_events(&self) -> usize {
        self.event_venues.len()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.event_venues.len() == self.num_events
    }

    /// Returns the next event to place, or `None` when every event is placed.
    #[inline]
    pub fn next_event(&self) -> Option<EventIndex> {
        if self.is_complete() {
            None
        } else {
            Some(EventIndex::new(self.event_venues.len()))
        }
    }

    /// Returns the venue of `event_index` if it is already placed.
    #[inline]
    pub fn venue_of(&self, event_index: EventIndex) -> Option<VenueIndex> {
        self.event_venues.get(event_index.get()).copied()
    }

    #[inline]
    pub fn is_venue_consumed(&self, venue_index: VenueIndex) -> bool {
        debug_assert!(
            venue_index.get() < self.num_venues(),
            "called `SearchState::is_venue_consumed` with venue index out of bounds: the len is {} but the index is {}",
            self.num_venues(),
            venue_index.get()
        );
        self.consumed.contains(venue_index.get())
    }

    #[inline]
    pub fn corridor_load(&self, corridor_index: CorridorIndex) -> u64 {
        debug_assert!(
            corridor_index.get() < self.num_corridors(),
            "called `SearchState::corridor_load` with corridor index out of bounds: the len is {} but the index is {}",
            self.num_corridors(),
            corridor_index.get()
        );
        self.corridor_loads[corridor_index.get()]
    }

    #[inline]
    pub fn corridor_loads(&self) -> &[u64] {
        &self.corridor_loads
    }

    #[inline]
    pub(crate) fn set_corridor_load(&mut self, corridor_index: CorridorIndex, load: u64) {
        debug_assert!(
            corridor_index.get() < self.num_corridors(),
            "called `SearchState::set_corridor_load` with corridor index out of bounds: the len is {} but the index is {}",
            self.num_corridors(),
            corridor_index.get()
        );
        self.corridor_loads[corridor_index.get()] = load;
    }

    /// Returns the capacity the corridor is held to by the venues placed so
    /// far.
    #[inline]
    pub fn corridor_capacity(&self, corridor_index: CorridorIndex) -> u64 {
        debug_assert!(
            corridor_index.get() < self.num_corridors(),
            "called `SearchState::corridor_capacity` with corridor index out of bounds: the len is {} but the index is {}",
            self.num_corridors(),
            corridor_index.get()
        );
        self.corridor_capacities[corridor_index.get()]
    }

    #[inline]
    pub fn corridor_capacities(&self) -> &[u64] {
        &self.corridor_capacities
    }

    #[inline]
    pub(crate) fn set_corridor_capacity(&mut self, corridor_index: CorridorIndex, capacity: u64) {
        debug_assert!(
            corridor_index.get() < self.num_corridors(),
            "called `SearchState::set_corridor_capacity` with corridor index out of bounds: the len is {} but the index is {}",
            self.num_corridors(),
            corridor_index.get()
        );
        self.corridor_capacities[corridor_index.get()] = capacity;
    }

    /// Places the next event at `venue_index` and marks the venue consumed.
    #[inline]
    pub(crate) fn assign_next(&mut self, event_index: EventIndex, venue_index: VenueIndex) {
        debug_assert_eq!(
            event_index.get(),
            self.event_venues.len(),
            "called `SearchState::assign_next` out of order"
        );
        debug_assert!(
            !self.is_venue_consumed(venue_index),
            "called `SearchState::assign_next` with consumed venue {}",
            venue_index
        );
        self.event_venues.push(venue_index);
        self.consumed.insert(venue_index.get());
    }

    /// Removes the most recent placement, which must be `event_index`.
    #[inline]
    pub(crate) fn unassign_last(&mut self, event_index: EventIndex) {
        debug_assert_eq!(
            event_index.get() + 1,
            self.event_venues.len(),
            "called `SearchState::unassign_last` for an event that is not the last placed"
        );
        if let Some(venue_index) = self.event_venues.pop() {
            self.consumed.set(venue_index.get(), false);
        }
    }

    /// Snapshots the placed prefix as an allocation.
    #[inline]
    pub fn to_allocation(&self) -> Allocation {
        Allocation::new(self.event_venues.clone())
    }

    /// Returns the state to its initial configuration.
    pub fn reset(&mut self) {
        self.event_venues.clear();
        self.consumed.clear();
        self.corridor_loads.fill(0);
        self.corridor_capacities.fill(u64::MAX);
    }
}

impl std::fmt::Display for SearchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchState(assigned: {}/{}, consumed venues: {}, corridors: {})",
            self.num_assigned_events(),
            self.num_events,
            self.consumed.count_ones(..),
            self.num_corridors()
        )
    }
}
