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

//! The compiled allocation model.
//!
//! `ModelBuilder` takes the domain objects (`Event`s and `Venue`s) and turns
//! them into an `AllocationModel`, the immutable, index-based representation
//! the search engines work on. Compilation does three things:
//!
//! 1. It rejects invalid input: duplicate event names and structurally
//!    duplicate venues.
//! 2. It interns corridors by their `(start, end)` endpoints into dense
//!    `CorridorIndex`es.
//! 3. It precomputes, for every `(event, venue)` pair in a flattened
//!    `event * num_venues + venue` layout, whether the event fits into the
//!    venue and, if so, the scaled traffic the pair puts on each corridor
//!    together with the capacity the venue declares for that corridor.
//!
//! Venues may declare different capacities for the same corridor. Only the
//! venues that actually host an event constrain a corridor: its effective
//! capacity under an allocation is the smallest capacity declared by any
//! hosting venue (see `AllocationModel::effective_capacities`).
//!
//! After compilation the model is read-only and can be shared between
//! threads.

use crate::{
    allocation::Allocation,
    complexity::Complexity,
    corridor::Corridor,
    error::ModelError,
    event::Event,
    index::{CorridorIndex, EventIndex, VenueIndex},
    venue::Venue,
};
use plaza_core::num::{Rounding, scale_proportional};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, warn};

/// How a venue's full-capacity traffic is scaled down for smaller events.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ScalingPolicy {
    /// `max_traffic * event_size / venue_capacity`, rounded as given.
    Proportional(Rounding),
    /// Every event generates the full-capacity traffic.
    Unscaled,
}

impl Default for ScalingPolicy {
    #[inline]
    fn default() -> Self {
        ScalingPolicy::Proportional(Rounding::Up)
    }
}

impl ScalingPolicy {
    /// Returns the traffic an event of `event_size` hosted at a venue of
    /// `venue_capacity` puts on a corridor with `max_traffic` at full capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use plaza_model::model::ScalingPolicy;
    /// # use plaza_core::num::Rounding;
    /// assert_eq!(ScalingPolicy::default().contribution(60, 50, 100), 30);
    /// assert_eq!(ScalingPolicy::Proportional(Rounding::Up).contribution(10, 1, 3), 4);
    /// assert_eq!(ScalingPolicy::Unscaled.contribution(10, 1, 3), 10);
    /// ```
    #[inline]
    pub fn contribution(&self, max_traffic: u32, event_size: u32, venue_capacity: u32) -> u64 {
        match *self {
            ScalingPolicy::Proportional(rounding) => scale_proportional(
                u64::from(max_traffic),
                u64::from(event_size),
                u64::from(venue_capacity),
                rounding,
            )
            // A product of two `u32`s fits into a `u64`; only a zero capacity fails.
            .unwrap_or(u64::MAX),
            ScalingPolicy::Unscaled => u64::from(max_traffic),
        }
    }
}

impl std::fmt::Display for ScalingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalingPolicy::Proportional(r) => write!(f, "Proportional({})", r),
            ScalingPolicy::Unscaled => write!(f, "Unscaled"),
        }
    }
}

/// The traffic one `(event, venue)` placement puts on one corridor, and the
/// capacity the venue declares for that corridor.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Contribution {
    corridor: CorridorIndex,
    amount: u64,
    capacity: u64,
}

impl Contribution {
    #[inline]
    pub fn new(corridor: CorridorIndex, amount: u64, capacity: u64) -> Self {
        Self {
            corridor,
            amount,
            capacity,
        }
    }

    #[inline]
    pub fn corridor(&self) -> CorridorIndex {
        self.corridor
    }

    #[inline]
    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// The corridor capacity declared by the hosting venue. Once the venue
    /// hosts an event, the corridor's total load must not exceed it.
    #[inline]
    pub fn capacity(&self) -> u64 {
        self.capacity
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Placement {
    /// The event is larger than the venue.
    Forbidden,
    /// Contributions live in `contributions[start..end]`.
    Admissible { start: usize, end: usize },
}

/// The immutable, index-based description of an allocation problem.
///
/// This struct holds all pre-validated, queryable data:
/// - `events[e]`, `venues[v]`: the domain objects, in input order.
/// - `corridors[c]`: the interned corridors, carrying the capacity of their
///   first declaration.
/// - `placements[e * num_venues + v]`: whether event `e` fits into venue `v`,
///   and where its contributions are stored.
/// - `contributions`: one entry per corridor the venue declares, for all
///   admissible placements, back to back.
///
/// Construction:
/// - Use `ModelBuilder` and call `ModelBuilder::build` to obtain a validated
///   `AllocationModel`.
#[derive(Clone, Debug)]
pub struct AllocationModel {
    events: Vec<Event>,
    venues: Vec<Venue>,
    corridors: Vec<Corridor>,
    placements: Vec<Placement>,
    contributions: Vec<Contribution>,
    scaling: ScalingPolicy,
}

impl AllocationModel {
    /// Returns the number of events in the model.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use plaza_model::{event::Event, model::ModelBuilder};
    /// let events = vec![Event::new("A", 5), Event::new("B", 7)];
    /// let model = ModelBuilder::new(&events, &[]).build().unwrap();
    /// assert_eq!(model.num_events(), 2);
    /// assert_eq!(model.num_venues(), 0);
    /// ```
    #[inline]
    pub fn num_events(&self) -> usize {
        self.events.len()
    }

    /// Returns the number of venues in the model.
    #[inline]
    pub fn num_venues(&self) -> usize {
        self.venues.len()
    }

    /// Returns the number of distinct corridors across all venues.
    #[inline]
    pub fn num_corridors(&self) -> usize {
        self.corridors.len()
    }

    /// Returns the events in input order.
    #[inline]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns the venues in input order.
    #[inline]
    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    /// Returns the event at `event_index`.
    ///
    /// # Panics
    ///
    /// Panics if `event_index` is out of bounds.
    #[inline]
    pub fn event(&self, event_index: EventIndex) -> &Event {
        let index = event_index.get();
        debug_assert!(
            index < self.num_events(),
            "called `AllocationModel::event` with event index out of bounds: the len is {} but the index is {}",
            self.num_events(),
            index
        );

        &self.events[index]
    }

    /// Returns the venue at `venue_index`.
    ///
    /// # Panics
    ///
    /// Panics if `venue_index` is out of bounds.
    #[inline]
    pub fn venue(&self, venue_index: VenueIndex) -> &Venue {
        let index = venue_index.get();
        debug_assert!(
            index < self.num_venues(),
            "called `AllocationModel::venue` with venue index out of bounds: the len is {} but the index is {}",
            self.num_venues(),
            index
        );

        &self.venues[index]
    }

    #[inline]
    pub fn event_size(&self, event_index: EventIndex) -> u32 {
        self.event(event_index).size()
    }

    #[inline]
    pub fn venue_capacity(&self, venue_index: VenueIndex) -> u32 {
        self.venue(venue_index).capacity()
    }

    /// Returns the interned corridor at `corridor_index`.
    ///
    /// The corridor carries the capacity of its first declaration. Venues may
    /// declare other capacities; those are part of each placement's
    /// `Contribution`s.
    ///
    /// # Panics
    ///
    /// Panics if `corridor_index` is out of bounds.
    #[inline]
    pub fn corridor(&self, corridor_index: CorridorIndex) -> &Corridor {
        let index = corridor_index.get();
        debug_assert!(
            index < self.num_corridors(),
            "called `AllocationModel::corridor` with corridor index out of bounds: the len is {} but the index is {}",
            self.num_corridors(),
            index
        );

        &self.corridors[index]
    }

    /// Returns the scaling policy the contributions were computed with.
    #[inline]
    pub fn scaling(&self) -> ScalingPolicy {
        self.scaling
    }

    /// Returns the complexity of the model's search space.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use plaza_model::{event::Event, model::ModelBuilder};
    /// let events = vec![Event::new("A", 5)];
    /// let model = ModelBuilder::new(&events, &[]).build().unwrap();
    /// println!("Model complexity: {}", model.complexity());
    /// ```
    #[inline]
    pub fn complexity(&self) -> Complexity {
        Complexity::new(self.num_events(), self.num_venues())
    }

    #[inline(always)]
    fn flat_index(&self, event_index: EventIndex, venue_index: VenueIndex) -> usize {
        let e = event_index.get();
        let v = venue_index.get();
        debug_assert!(
            e < self.num_events(),
            "called `AllocationModel::flat_index` with event index out of bounds: the len is {} but the index is {}",
            self.num_events(),
            e
        );
        debug_assert!(
            v < self.num_venues(),
            "called `AllocationModel::flat_index` with venue index out of bounds: the len is {} but the index is {}",
            self.num_venues(),
            v
        );

        e * self.num_venues() + v
    }

    /// Returns `true` if the event fits into the venue.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn is_admissible(&self, event_index: EventIndex, venue_index: VenueIndex) -> bool {
        matches!(
            self.placements[self.flat_index(event_index, venue_index)],
            Placement::Admissible { .. }
        )
    }

    /// Returns the corridor contributions of hosting the event at the venue,
    /// one per corridor in the venue's traffic profile. Amounts can be zero
    /// under rounding down. Forbidden placements have no contributions.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn contributions(&self, event_index: EventIndex, venue_index: VenueIndex) -> &[Contribution] {
        match self.placements[self.flat_index(event_index, venue_index)] {
            Placement::Forbidden => &[],
            Placement::Admissible { start, end } => &self.contributions[start..end],
        }
    }

    /// Iterates over the venues the event fits into, in input order.
    #[inline]
    pub fn admissible_venues(
        &self,
        event_index: EventIndex,
    ) -> impl DoubleEndedIterator<Item = VenueIndex> + '_ {
        VenueIndex::range(self.num_venues()).filter(move |&v| self.is_admissible(event_index, v))
    }

    /// Sums the contributions of every placement in `allocation` per corridor.
    ///
    /// Placements that are forbidden or refer to an unknown venue add nothing.
    pub fn corridor_loads(&self, allocation: &Allocation) -> Vec<u64> {
        let mut loads = vec![0u64; self.num_corridors()];
        for (event, venue) in allocation.iter() {
            if event.get() >= self.num_events() || venue.get() >= self.num_venues() {
                continue;
            }
            for contribution in self.contributions(event, venue) {
                let load = &mut loads[contribution.corridor().get()];
                *load = load.saturating_add(contribution.amount());
            }
        }
        loads
    }

    /// Returns, per corridor, the smallest capacity declared by any venue that
    /// hosts an event in `allocation`.
    ///
    /// Corridors no hosting venue declares are unconstrained and report
    /// `u64::MAX`. Placements that are forbidden or refer to an unknown venue
    /// are ignored.
    pub fn effective_capacities(&self, allocation: &Allocation) -> Vec<u64> {
        let mut capacities = vec![u64::MAX; self.num_corridors()];
        for (event, venue) in allocation.iter() {
            if event.get() >= self.num_events() || venue.get() >= self.num_venues() {
                continue;
            }
            for contribution in self.contributions(event, venue) {
                let capacity = &mut capacities[contribution.corridor().get()];
                *capacity = (*capacity).min(contribution.capacity());
            }
        }
        capacities
    }

    /// Evaluates the safety predicate for `allocation`.
    ///
    /// An allocation is safe iff it places every event of the model exactly
    /// once, no two events share a venue, every event fits into its venue, and
    /// no corridor's summed contribution exceeds the smallest capacity any
    /// hosting venue declares for it.
    pub fn is_safe(&self, allocation: &Allocation) -> bool {
        if allocation.num_events() != self.num_events() {
            return false;
        }
        if allocation
            .venues()
            .iter()
            .any(|v| v.get() >= self.num_venues())
        {
            return false;
        }
        if !allocation.is_injective() {
            return false;
        }
        if allocation.iter().any(|(e, v)| !self.is_admissible(e, v)) {
            return false;
        }

        self.corridor_loads(allocation)
            .iter()
            .zip(self.effective_capacities(allocation).iter())
            .all(|(load, capacity)| load <= capacity)
    }
}

impl std::fmt::Display for AllocationModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AllocationModel(events: {}, venues: {}, corridors: {}, scaling: {})",
            self.num_events(),
            self.num_venues(),
            self.num_corridors(),
            self.scaling
        )
    }
}

/// Validates events and venues and compiles them into an `AllocationModel`.
#[derive(Clone, Copy, Debug)]
pub struct ModelBuilder<'a> {
    events: &'a [Event],
    venues: &'a [Venue],
    scaling: ScalingPolicy,
}

impl<'a> ModelBuilder<'a> {
    /// Creates a builder over the given events and venues.
    #[inline]
    pub fn new(events: &'a [Event], venues: &'a [Venue]) -> Self {
        Self {
            events,
            venues,
            scaling: ScalingPolicy::default(),
        }
    }

    /// Sets the scaling policy used for the corridor contributions.
    #[inline]
    pub fn scaling(mut self, scaling: ScalingPolicy) -> Self {
        self.scaling = scaling;
        self
    }

    /// Validates the input and compiles the model.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::DuplicateEvent` if two events share a name and
    /// `ModelError::DuplicateVenue` if two venues are structurally equal.
    pub fn build(self) -> Result<AllocationModel, ModelError> {
        self.check_events()?;
        self.check_venues()?;

        let (corridors, venue_corridors) = self.intern_corridors();

        let num_venues = self.venues.len();
        let mut placements = Vec::with_capacity(self.events.len() * num_venues);
        let mut contributions = Vec::new();

        for event in self.events {
            for (venue, entries) in self.venues.iter().zip(venue_corridors.iter()) {
                if !venue.can_host(event.size()) {
                    placements.push(Placement::Forbidden);
                    continue;
                }

                let start = contributions.len();
                for &(corridor, max_traffic, capacity) in entries {
                    let amount =
                        self.scaling
                            .contribution(max_traffic, event.size(), venue.capacity());
                    contributions.push(Contribution::new(
                        corridor,
                        amount,
                        u64::from(capacity),
                    ));
                }
                placements.push(Placement::Admissible {
                    start,
                    end: contributions.len(),
                });
            }
        }

        debug!(
            events = self.events.len(),
            venues = num_venues,
            corridors = corridors.len(),
            contributions = contributions.len(),
            scaling = %self.scaling,
            "compiled allocation model"
        );

        Ok(AllocationModel {
            events: self.events.to_vec(),
            venues: self.venues.to_vec(),
            corridors,
            placements,
            contributions,
            scaling: self.scaling,
        })
    }

    fn check_events(&self) -> Result<(), ModelError> {
        let mut seen: FxHashMap<&str, EventIndex> = FxHashMap::default();
        for (i, event) in self.events.iter().enumerate() {
            if let Some(&first) = seen.get(event.name()) {
                return Err(ModelError::DuplicateEvent {
                    name: event.name().to_string(),
                    first,
                    second: EventIndex::new(i),
                });
            }
            seen.insert(event.name(), EventIndex::new(i));
        }
        Ok(())
    }

    fn check_venues(&self) -> Result<(), ModelError> {
        let mut seen: FxHashMap<&Venue, VenueIndex> = FxHashMap::default();
        for (i, venue) in self.venues.iter().enumerate() {
            if let Some(&first) = seen.get(venue) {
                return Err(ModelError::DuplicateVenue {
                    name: venue.name().to_string(),
                    first,
                    second: VenueIndex::new(i),
                });
            }
            seen.insert(venue, VenueIndex::new(i));
        }
        Ok(())
    }

    /// Assigns dense indices to corridors in order of first appearance and
    /// lists, per venue, the interned corridors with their full-capacity
    /// traffic and the capacity the venue declares.
    #[allow(clippy::type_complexity)]
    fn intern_corridors(&self) -> (Vec<Corridor>, Vec<SmallVec<[(CorridorIndex, u32, u32); 8]>>) {
        let mut index_of: FxHashMap<&Corridor, CorridorIndex> = FxHashMap::default();
        let mut corridors: Vec<Corridor> = Vec::new();
        let mut venue_corridors = Vec::with_capacity(self.venues.len());

        for venue in self.venues {
            let mut entries: SmallVec<[(CorridorIndex, u32, u32); 8]> = SmallVec::new();
            for (corridor, traffic) in venue.traffic().iter() {
                let index = match index_of.get(corridor) {
                    Some(&index) => {
                        let known = &corridors[index.get()];
                        if known.capacity() != corridor.capacity() {
                            warn!(
                                start = %corridor.start(),
                                end = %corridor.end(),
                                known = known.capacity(),
                                declared = corridor.capacity(),
                                venue = venue.name(),
                                "conflicting corridor capacities, the smallest among hosting venues applies"
                            );
                        }
                        index
                    }
                    None => {
                        let index = CorridorIndex::new(corridors.len());
                        index_of.insert(corridor, index);
                        corridors.push(corridor.clone());
                        index
                    }
                };
                entries.push((index, traffic, corridor.capacity()));
            }
            venue_corridors.push(entries);
        }

        (corridors, venue_corridors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traffic::Traffic;

    fn ei(i: usize) -> EventIndex {
        EventIndex::new(i)
    }

    fn vi(i: usize) -> VenueIndex {
        VenueIndex::new(i)
    }

    fn ci(i: usize) -> CorridorIndex {
        CorridorIndex::new(i)
    }

    fn venue(name: &str, capacity: u32, entries: &[(&str, &str, u32, u32)]) -> Venue {
        let traffic: Traffic = entries
            .iter()
            .map(|&(s, e, c, t)| (Corridor::new(s, e, c), t))
            .collect();
        Venue::new(name, capacity, traffic)
    }

    fn scenario() -> (Vec<Event>, Vec<Venue>) {
        let events = vec![Event::new("A", 50), Event::new("B", 80)];
        let venues = vec![
            venue("V1", 100, &[("X", "Y", 60, 60)]),
            venue("V2", 90, &[("X", "Y", 60, 54)]),
        ];
        (events, venues)
    }

    #[test]
    fn test_scenario_contributions() {
        let (events, venues) = scenario();
        let model = ModelBuilder::new(&events, &venues).build().unwrap();

        assert_eq!(model.num_events(), 2);
        assert_eq!(model.num_venues(), 2);
        assert_eq!(model.num_corridors(), 1);
        assert_eq!(model.corridor(ci(0)).capacity(), 60);

        // 60 * 50 / 100 = 30
        assert_eq!(model.contributions(ei(0), vi(0)), &[Contribution::new(ci(0), 30, 60)]);
        // 54 * 50 / 90 = 30
        assert_eq!(model.contributions(ei(0), vi(1)), &[Contribution::new(ci(0), 30, 60)]);
        // 60 * 80 / 100 = 48
        assert_eq!(model.contributions(ei(1), vi(0)), &[Contribution::new(ci(0), 48, 60)]);
        // 54 * 80 / 90 = 48
        assert_eq!(model.contributions(ei(1), vi(1)), &[Contribution::new(ci(0), 48, 60)]);

        let a = Allocation::new(vec![vi(0), vi(1)]);
        assert_eq!(model.corridor_loads(&a), vec![78]);
        assert_eq!(model.effective_capacities(&a), vec![60]);
        assert!(!model.is_safe(&a));
        assert!(!model.is_safe(&Allocation::new(vec![vi(1), vi(0)])));
    }

    #[test]
    fn test_forbidden_placements() {
        let events = vec![Event::new("Big", 95), Event::new("Small", 10)];
        let venues = vec![venue("V1", 100, &[]), venue("V2", 90, &[])];
        let model = ModelBuilder::new(&events, &venues).build().unwrap();

        assert!(model.is_admissible(ei(0), vi(0)));
        assert!(!model.is_admissible(ei(0), vi(1)));
        assert!(model.contributions(ei(0), vi(1)).is_empty());
        assert_eq!(model.admissible_venues(ei(0)).collect::<Vec<_>>(), vec![vi(0)]);
        assert_eq!(
            model.admissible_venues(ei(1)).collect::<Vec<_>>(),
            vec![vi(0), vi(1)]
        );

        assert!(!model.is_safe(&Allocation::new(vec![vi(1), vi(0)])));
        assert!(model.is_safe(&Allocation::new(vec![vi(0), vi(1)])));
    }

    #[test]
    fn test_duplicate_event_is_rejected() {
        let events = vec![Event::new("A", 5), Event::new("B", 5), Event::new("A", 7)];
        let err = ModelBuilder::new(&events, &[]).build().unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateEvent {
                name: "A".to_string(),
                first: ei(0),
                second: ei(2),
            }
        );
    }

    #[test]
    fn test_duplicate_venue_is_rejected() {
        let venues = vec![
            venue("V", 10, &[("X", "Y", 5, 5)]),
            venue("V", 10, &[("X", "Y", 5, 4)]),
            venue("V", 10, &[("X", "Y", 5, 5)]),
        ];
        let err = ModelBuilder::new(&[], &venues).build().unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateVenue {
                name: "V".to_string(),
                first: vi(0),
                second: vi(2),
            }
        );
    }

    #[test]
    fn test_conflicting_capacities_apply_per_hosting_venue() {
        let events = vec![Event::new("E1", 100), Event::new("E2", 100)];
        let venues = vec![
            venue("V1", 100, &[("X", "Y", 60, 10)]),
            venue("V2", 100, &[("X", "Y", 40, 10)]),
            venue("V3", 100, &[("X", "Y", 50, 10)]),
        ];
        let model = ModelBuilder::new(&events, &venues).build().unwrap();
        assert_eq!(model.num_corridors(), 1);
        assert_eq!(model.corridor(ci(0)).capacity(), 60);
        assert_eq!(model.contributions(ei(0), vi(1))[0].capacity(), 40);

        assert_eq!(
            model.effective_capacities(&Allocation::new(vec![vi(0), vi(2)])),
            vec![50]
        );
        assert_eq!(
            model.effective_capacities(&Allocation::new(vec![vi(2), vi(1)])),
            vec![40]
        );
        assert_eq!(model.effective_capacities(&Allocation::empty()), vec![u64::MAX]);
    }

    #[test]
    fn test_non_hosting_venue_does_not_tighten_a_corridor() {
        let events = vec![Event::new("E", 10)];
        let venues = vec![
            venue("V1", 10, &[("X", "Y", 60, 10)]),
            venue("V2", 10, &[("X", "Y", 5, 5)]),
        ];
        let model = ModelBuilder::new(&events, &venues).build().unwrap();

        // Load 10 against V1's own capacity of 60.
        assert!(model.is_safe(&Allocation::new(vec![vi(0)])));
        assert!(model.is_safe(&Allocation::new(vec![vi(1)])));
    }

    #[test]
    fn test_hosting_venue_tightens_load_of_others() {
        let events = vec![Event::new("A", 10), Event::new("B", 10)];
        let venues = vec![
            venue("V1", 10, &[("X", "Y", 60, 10)]),
            venue("V2", 10, &[("X", "Y", 12, 5)]),
            venue("V3", 10, &[("X", "Y", 60, 5)]),
        ];
        let model = ModelBuilder::new(&events, &venues).build().unwrap();

        // 10 + 5 exceeds the 12 declared by V2.
        assert!(!model.is_safe(&Allocation::new(vec![vi(0), vi(1)])));
        assert!(!model.is_safe(&Allocation::new(vec![vi(1), vi(0)])));
        assert!(model.is_safe(&Allocation::new(vec![vi(0), vi(2)])));
    }

    #[test]
    fn test_reverse_corridors_are_separate_resources() {
        let venues = vec![
            venue("V1", 100, &[("X", "Y", 60, 10)]),
            venue("V2", 100, &[("Y", "X", 60, 10)]),
        ];
        let events = vec![Event::new("E", 100)];
        let model = ModelBuilder::new(&events, &venues).build().unwrap();
        assert_eq!(model.num_corridors(), 2);
        assert_eq!(model.contributions(ei(0), vi(0))[0].corridor(), ci(0));
        assert_eq!(model.contributions(ei(0), vi(1))[0].corridor(), ci(1));
    }

    #[test]
    fn test_scaling_policies() {
        let events = vec![Event::new("E", 1)];
        let venues = vec![venue("V", 3, &[("X", "Y", 10, 2)])];

        // 2 * 1 / 3 = 0.67
        let up = ModelBuilder::new(&events, &venues).build().unwrap();
        assert_eq!(up.scaling(), ScalingPolicy::Proportional(Rounding::Up));
        assert_eq!(up.contributions(ei(0), vi(0))[0].amount(), 1);

        let nearest = ModelBuilder::new(&events, &venues)
            .scaling(ScalingPolicy::Proportional(Rounding::Nearest))
            .build()
            .unwrap();
        assert_eq!(nearest.contributions(ei(0), vi(0))[0].amount(), 1);

        // Zero contributions still carry the declared capacity.
        let down = ModelBuilder::new(&events, &venues)
            .scaling(ScalingPolicy::Proportional(Rounding::Down))
            .build()
            .unwrap();
        assert!(down.is_admissible(ei(0), vi(0)));
        assert_eq!(down.contributions(ei(0), vi(0)), &[Contribution::new(ci(0), 0, 10)]);

        let unscaled = ModelBuilder::new(&events, &venues)
            .scaling(ScalingPolicy::Unscaled)
            .build()
            .unwrap();
        assert_eq!(unscaled.contributions(ei(0), vi(0))[0].amount(), 2);
    }

    #[test]
    fn test_is_safe_rejects_malformed_allocations() {
        let (events, venues) = scenario();
        let model = ModelBuilder::new(&events, &venues).build().unwrap();

        assert!(!model.is_safe(&Allocation::new(vec![vi(0)])));
        assert!(!model.is_safe(&Allocation::new(vec![vi(0), vi(0)])));
        assert!(!model.is_safe(&Allocation::new(vec![vi(0), vi(7)])));
    }

    #[test]
    fn test_empty_model() {
        let model = ModelBuilder::new(&[], &[]).build().unwrap();
        assert_eq!(model.num_events(), 0);
        assert!(model.is_safe(&Allocation::empty()));
        assert_eq!(
            format!("{}", model),
            "AllocationModel(events: 0, venues: 0, corridors: 0, scaling: Proportional(Up))"
        );
    }

    #[test]
    fn test_model_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AllocationModel>();
    }
}
