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

/// An estimate of the size of the allocation search tree.
///
/// The tree has one level per event; level `k` holds one node per ordered
/// choice of `k` distinct venues, so the total is `Σ_{k=0..E} P(V, k)`. The
/// value is stored as its base-10 logarithm since it overflows any integer
/// type for realistic inputs.
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Complexity {
    /// The base-10 logarithm of the number of nodes.
    log_val: f64,
}

impl Complexity {
    /// Calculates the complexity for a given number of events and venues.
    pub fn new(num_events: usize, num_venues: usize) -> Self {
        // log10(10^a + 10^b)
        let log10_add = |a: f64, b: f64| -> f64 {
            let max = a.max(b);
            let min = a.min(b);
            max + (1.0 + 10.0_f64.powf(min - max)).log10()
        };

        // Level 0 is the root.
        let mut current_level_log = 0.0;
        let mut total_sum_log = 0.0;

        // Levels deeper than the number of venues are empty.
        for k in 1..=num_events.min(num_venues) {
            let remaining_venues = (num_venues - k + 1) as f64;
            current_level_log += remaining_venues.log10();
            total_sum_log = log10_add(total_sum_log, current_level_log);
        }

        Complexity {
            log_val: total_sum_log,
        }
    }

    /// Returns the percentage of the search space that was explored, or
    /// `None` if the space is empty. Spaces beyond `10^15` nodes report zero.
    pub fn coverage(&self, nodes_explored: u64) -> Option<f64> {
        if self.log_val > 15.0 {
            return Some(0.0);
        }

        let total_size = 10.0_f64.powf(self.log_val);
        if total_size == 0.0 {
            return None;
        }

        Some((nodes_explored as f64 / total_size) * 100.0)
    }

    /// Returns the exponent (order of magnitude).
    #[inline]
    pub fn exponent(&self) -> u64 {
        self.log_val.floor() as u64
    }

    /// Returns the mantissa, in `[1, 10)`.
    #[inline]
    pub fn mantissa(&self) -> f64 {
        let fractional_part = self.log_val - self.log_val.floor();
        10.0_f64.powf(fractional_part)
    }

    /// Returns the raw log10 value.
    #[inline]
    pub fn raw(&self) -> f64 {
        self.log_val
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} × 10^{}", self.mantissa(), self.exponent())
    }
}

impl std::fmt::Debug for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Complexity(log10={:.4})", self.log_val)
    }
}
