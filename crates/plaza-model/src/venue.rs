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

use crate::traffic::Traffic;

/// A place that can host a single event.
///
/// `capacity` is the largest event the venue can host, and `traffic` is the
/// corridor usage generated by an event of exactly that size. Equality and
/// hashing are structural over name, capacity and traffic profile.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Venue {
    name: String,
    capacity: u32,
    traffic: Traffic,
}

impl Venue {
    /// Creates a new venue.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty, if `capacity` is zero, or if any corridor
    /// in `traffic` carries more traffic than `capacity`.
    pub fn new(name: impl Into<String>, capacity: u32, traffic: Traffic) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "called `Venue::new` with an empty name");
        assert!(
            capacity > 0,
            "called `Venue::new` with a capacity of zero for venue `{}`",
            name
        );
        assert!(
            traffic.max_traffic() <= capacity,
            "called `Venue::new` with traffic exceeding the venue capacity: the capacity is {} but the traffic is {}",
            capacity,
            traffic.max_traffic()
        );

        Self {
            name,
            capacity,
            traffic,
        }
    }

    /// Returns the name of the venue.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the largest event size the venue can host.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the traffic generated by an event of full capacity.
    #[inline]
    pub fn traffic(&self) -> &Traffic {
        &self.traffic
    }

    /// Returns `true` if an event of `size` fits into the venue.
    #[inline]
    pub fn can_host(&self, size: u32) -> bool {
        size <= self.capacity
    }
}

impl std::fmt::Display for Venue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", self.capacity)?;
        write!(f, "{}", self.traffic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corridor::Corridor;

    fn traffic(entries: &[(&str, &str, u32, u32)]) -> Traffic {
        entries
            .iter()
            .map(|&(s, e, c, t)| (Corridor::new(s, e, c), t))
            .collect()
    }

    #[test]
    fn test_structural_equality() {
        let a = Venue::new("Stadium", 100, traffic(&[("X", "Y", 60, 60)]));
        let b = Venue::new("Stadium", 100, traffic(&[("X", "Y", 60, 60)]));
        let c = Venue::new("Stadium", 100, traffic(&[("X", "Y", 60, 59)]));
        let d = Venue::new("Stadium", 99, traffic(&[("X", "Y", 60, 60)]));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_can_host() {
        let v = Venue::new("Hall", 90, Traffic::new());
        assert!(v.can_host(90));
        assert!(v.can_host(1));
        assert!(!v.can_host(91));
    }

    #[test]
    fn test_display_round_trips_block_layout() {
        let v = Venue::new("Hall", 90, traffic(&[("X", "Y", 60, 54)]));
        assert_eq!(format!("{}", v), "Hall\n90\nX, Y, 60: 54\n");
    }

    #[test]
    #[should_panic(expected = "empty name")]
    fn test_empty_name_panics() {
        let _ = Venue::new("", 10, Traffic::new());
    }

    #[test]
    #[should_panic(expected = "exceeding the venue capacity")]
    fn test_traffic_above_venue_capacity_panics() {
        let _ = Venue::new("Hall", 10, traffic(&[("X", "Y", 60, 11)]));
    }
}
