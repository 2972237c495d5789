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

//! Brute force reference for small instances.
//!
//! Tries every injective placement of events into venues and keeps those
//! that pass an independent evaluation of the safety rules: each event fits
//! its venue, and for every directed corridor the summed contributions
//! `ceil(traffic * size / venue capacity)` stay within the smallest capacity
//! declared for that corridor by a venue that hosts an event.

#![allow(dead_code)]

use plaza_model::{allocation::Allocation, event::Event, index::VenueIndex, venue::Venue};
use std::collections::{BTreeMap, BTreeSet};

type CorridorKey<'a> = (&'a str, &'a str);

pub fn vi(i: usize) -> VenueIndex {
    VenueIndex::new(i)
}

pub fn brute_force(events: &[Event], venues: &[Venue]) -> BTreeSet<Allocation> {
    let mut found = BTreeSet::new();
    let mut current = Vec::with_capacity(events.len());
    let mut used = vec![false; venues.len()];
    permute(events, venues, &mut current, &mut used, &mut found);
    found
}

fn permute(
    events: &[Event],
    venues: &[Venue],
    current: &mut Vec<usize>,
    used: &mut [bool],
    found: &mut BTreeSet<Allocation>,
) {
    if current.len() == events.len() {
        if is_safe(events, venues, current) {
            found.insert(current.iter().map(|&v| vi(v)).collect());
        }
        return;
    }
    for v in 0..venues.len() {
        if used[v] {
            continue;
        }
        used[v] = true;
        current.push(v);
        permute(events, venues, current, used, found);
        current.pop();
        used[v] = false;
    }
}

fn is_safe(events: &[Event], venues: &[Venue], placement: &[usize]) -> bool {
    let mut loads: BTreeMap<CorridorKey<'_>, u64> = BTreeMap::new();
    let mut capacities: BTreeMap<CorridorKey<'_>, u64> = BTreeMap::new();
    for (e, &v) in placement.iter().enumerate() {
        let (event, venue) = (&events[e], &venues[v]);
        if event.size() > venue.capacity() {
            return false;
        }
        for (corridor, traffic) in venue.traffic().iter() {
            let key = (corridor.start().name(), corridor.end().name());
            let amount = (u64::from(traffic) * u64::from(event.size()))
                .div_ceil(u64::from(venue.capacity()));
            *loads.entry(key).or_insert(0) += amount;

            let capacity = u64::from(corridor.capacity());
            capacities
                .entry(key)
                .and_modify(|c| *c = (*c).min(capacity))
                .or_insert(capacity);
        }
    }
    loads.iter().all(|(key, load)| *load <= capacities[key])
}
