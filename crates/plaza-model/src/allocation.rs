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

use crate::{
    event::Event,
    index::{EventIndex, VenueIndex},
    venue::Venue,
};
use std::collections::BTreeMap;

/// An assignment of every event to a venue.
///
/// This struct uses a Structure of Arrays (SoA) layout: `venues[e]` is the
/// venue hosting event `e`. Two allocations are equal iff every event is
/// hosted at the same venue, and the derived ordering is lexicographic over
/// that vector, so allocations can be collected into ordered sets.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Allocation {
    /// `venues[e]` is the venue assigned to event `e`.
    venues: Vec<VenueIndex>,
}

impl Allocation {
    /// Constructs a new `Allocation` from one venue per event.
    #[inline]
    pub fn new(venues: Vec<VenueIndex>) -> Self {
        Self { venues }
    }

    /// Returns the allocation of zero events.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the venue hosting `event_index`.
    ///
    /// # Panics
    ///
    /// Panics if `event_index` is out of bounds.
    #[inline]
    pub fn venue_for_event(&self, event_index: EventIndex) -> VenueIndex {
        let index = event_index.get();
        debug_assert!(
            index < self.num_events(),
            "called `Allocation::venue_for_event` with event index out of bounds: the len is {} but the index is {}",
            self.num_events(),
            index
        );

        self.venues[index]
    }

    /// Returns the number of events in this allocation.
    #[inline]
    pub fn num_events(&self) -> usize {
        self.venues.len()
    }

    /// Returns `true` if the allocation places no events.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    /// Returns the assigned venues, indexed by event.
    #[inline]
    pub fn venues(&self) -> &[VenueIndex] {
        &self.venues
    }

    /// Iterates over `(event, venue)` pairs in event order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (EventIndex, VenueIndex)> + '_ {
        self.venues
            .iter()
            .enumerate()
            .map(|(e, &v)| (EventIndex::new(e), v))
    }

    /// Returns `true` if no two events share a venue.
    pub fn is_injective(&self) -> bool {
        let mut seen = self.venues.clone();
        seen.sort_unstable();
        seen.windows(2).all(|w| w[0] != w[1])
    }

    /// Resolves the indices against the domain slices the allocation was
    /// computed from, yielding `(event, venue)` pairs in event order.
    ///
    /// # Panics
    ///
    /// Panics if `events` does not have exactly one entry per allocated event
    /// or if a venue index is out of bounds for `venues`.
    pub fn pairs<'a>(
        &'a self,
        events: &'a [Event],
        venues: &'a [Venue],
    ) -> impl ExactSizeIterator<Item = (&'a Event, &'a Venue)> + 'a {
        assert_eq!(
            events.len(),
            self.num_events(),
            "called `Allocation::pairs` with a mismatched event slice: the allocation has {} events but the slice has {}",
            self.num_events(),
            events.len()
        );

        events
            .iter()
            .zip(self.venues.iter())
            .map(move |(event, v)| (event, &venues[v.get()]))
    }

    /// Returns the allocation as a map from event name to venue name.
    pub fn to_named_map<'a>(
        &'a self,
        events: &'a [Event],
        venues: &'a [Venue],
    ) -> BTreeMap<&'a str, &'a str> {
        self.pairs(events, venues)
            .map(|(e, v)| (e.name(), v.name()))
            .collect()
    }
}

impl FromIterator<VenueIndex> for Allocation {
    fn from_iter<I: IntoIterator<Item = VenueIndex>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl std::fmt::Display for Allocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Allocation Summary")?;
        writeln!(f)?;

        if self.is_empty() {
            writeln!(f, "   (No events allocated)")?;
            return Ok(());
        }

        writeln!(f, "   {:<10} | {:<10}", "Event", "Venue")?;
        writeln!(f, "   {:-<10}-+-{:-<10}", "", "")?;
        for (event, venue) in self.iter() {
            writeln!(f, "   {:<10} | {:<10}", event.get(), venue.get())?;
        }

        Ok(())
    }
}
