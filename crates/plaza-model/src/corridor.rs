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

use crate::location::Location;

/// A directed transit link between two locations with a traffic capacity.
///
/// Identity is the ordered `(start, end)` pair: equality, ordering and
/// hashing ignore the capacity, so two corridors with the same endpoints but
/// different declared capacities compare equal. `(A, B)` and `(B, A)` are
/// distinct corridors.
#[derive(Clone)]
pub struct Corridor {
    start: Location,
    end: Location,
    capacity: u32,
}

impl Corridor {
    /// Creates a new corridor.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[inline]
    pub fn new(start: impl Into<Location>, end: impl Into<Location>, capacity: u32) -> Self {
        assert!(
            capacity > 0,
            "called `Corridor::new` with a capacity of zero"
        );

        Self {
            start: start.into(),
            end: end.into(),
            capacity,
        }
    }

    /// Returns the start location.
    #[inline]
    pub fn start(&self) -> &Location {
        &self.start
    }

    /// Returns the end location.
    #[inline]
    pub fn end(&self) -> &Location {
        &self.end
    }

    /// Returns the capacity of the corridor.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the `(start, end)` pair that identifies this corridor.
    #[inline]
    pub fn endpoints(&self) -> (&Location, &Location) {
        (&self.start, &self.end)
    }
}

impl PartialEq for Corridor {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.endpoints() == other.endpoints()
    }
}

impl Eq for Corridor {}

impl PartialOrd for Corridor {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Corridor {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.endpoints().cmp(&other.endpoints())
    }
}

impl std::hash::Hash for Corridor {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl std::fmt::Debug for Corridor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Corridor")
            .field("start", &self.start.name())
            .field("end", &self.end.name())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl std::fmt::Display for Corridor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.start, self.end, self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identity_ignores_capacity() {
        let a = Corridor::new("X", "Y", 60);
        let b = Corridor::new("X", "Y", 120);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }

    #[test]
    fn test_corridors_are_directed() {
        assert_ne!(Corridor::new("X", "Y", 60), Corridor::new("Y", "X", 60));
    }

    #[test]
    fn test_ordering_by_start_then_end() {
        let mut v = vec![
            Corridor::new("B", "A", 1),
            Corridor::new("A", "C", 1),
            Corridor::new("A", "B", 1),
        ];
        v.sort();
        let names: Vec<_> = v
            .iter()
            .map(|c| format!("{}-{}", c.start(), c.end()))
            .collect();
        assert_eq!(names, vec!["A-B", "A-C", "B-A"]);
    }

    #[test]
    fn test_display_matches_file_layout() {
        assert_eq!(format!("{}", Corridor::new("X", "Y", 60)), "X, Y, 60");
    }

    #[test]
    #[should_panic(expected = "capacity of zero")]
    fn test_zero_capacity_panics() {
        let _ = Corridor::new("X", "Y", 0);
    }
}
