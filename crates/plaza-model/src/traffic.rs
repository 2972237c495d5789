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

//! Per-venue traffic profiles.
//!
//! A `Traffic` profile records, for each corridor a venue's visitors use, how
//! many of them travel along it when the venue hosts an event of its full
//! capacity. Entries are kept in a `BTreeMap` ordered by corridor endpoints,
//! which gives every profile a canonical iteration order. Equality and hashing
//! are structural over the entries, including each corridor's declared
//! capacity.

use crate::corridor::Corridor;
use std::collections::BTreeMap;

/// Maps corridors to the traffic a venue puts on them at full capacity.
#[derive(Clone, Default)]
pub struct Traffic {
    entries: BTreeMap<Corridor, u32>,
}

impl Traffic {
    /// Creates an empty traffic profile.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the traffic on `corridor`, returning the previous
    /// traffic for the same endpoints.
    ///
    /// A replaced entry also takes over the capacity of the new `corridor`.
    ///
    /// # Panics
    ///
    /// Panics if `traffic` is zero or exceeds the capacity of `corridor`.
    pub fn insert(&mut self, corridor: Corridor, traffic: u32) -> Option<u32> {
        assert!(
            traffic > 0,
            "called `Traffic::insert` with zero traffic on corridor {}",
            corridor
        );
        assert!(
            traffic <= corridor.capacity(),
            "called `Traffic::insert` with traffic exceeding the corridor capacity: the capacity is {} but the traffic is {}",
            corridor.capacity(),
            traffic
        );

        // `BTreeMap::insert` keeps the old key, which would keep the old capacity.
        let previous = self.entries.remove(&corridor);
        self.entries.insert(corridor, traffic);
        previous
    }

    /// Returns the traffic on `corridor`, if any.
    #[inline]
    pub fn get(&self, corridor: &Corridor) -> Option<u32> {
        self.entries.get(corridor).copied()
    }

    /// Returns `true` if the profile has an entry for `corridor`.
    #[inline]
    pub fn contains(&self, corridor: &Corridor) -> bool {
        self.entries.contains_key(corridor)
    }

    /// Returns the number of corridors in the profile.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no corridor carries traffic.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(corridor, traffic)` pairs ordered by corridor endpoints.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Corridor, u32)> + '_ {
        self.entries.iter().map(|(c, t)| (c, *t))
    }

    /// Iterates over the corridors ordered by endpoints.
    #[inline]
    pub fn corridors(&self) -> impl ExactSizeIterator<Item = &Corridor> + '_ {
        self.entries.keys()
    }

    /// Returns the largest traffic value in the profile, or zero if empty.
    #[inline]
    pub fn max_traffic(&self) -> u32 {
        self.entries.values().copied().max().unwrap_or(0)
    }
}

impl PartialEq for Traffic {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((a, ta), (b, tb))| a == b && a.capacity() == b.capacity() && ta == tb)
    }
}

impl Eq for Traffic {}

impl std::hash::Hash for Traffic {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_usize(self.entries.len());
        for (corridor, traffic) in self.iter() {
            corridor.hash(state);
            corridor.capacity().hash(state);
            traffic.hash(state);
        }
    }
}

impl std::fmt::Debug for Traffic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl std::fmt::Display for Traffic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (corridor, traffic) in self.iter() {
            writeln!(f, "{}: {}", corridor, traffic)?;
        }
        Ok(())
    }
}

impl FromIterator<(Corridor, u32)> for Traffic {
    fn from_iter<I: IntoIterator<Item = (Corridor, u32)>>(iter: I) -> Self {
        let mut traffic = Traffic::new();
        for (corridor, value) in iter {
            traffic.insert(corridor, value);
        }
        traffic
    }
}

impl Extend<(Corridor, u32)> for Traffic {
    fn extend<I: IntoIterator<Item = (Corridor, u32)>>(&mut self, iter: I) {
        for (corridor, value) in iter {
            self.insert(corridor, value);
        }
    }
}
