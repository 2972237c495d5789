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

//! # Proportional Scaling
//!
//! Venues record the traffic they put on a corridor when hosting an event of
//! their full capacity. Smaller events put proportionally less traffic on the
//! same corridor, so the search needs `value * part / whole` in integer
//! arithmetic with a rounding direction that is fixed up front.
//!
//! `scale_proportional` computes the exact product first (checked, so it
//! returns `None` instead of wrapping) and then applies the `Rounding` mode to
//! the remainder of the division.

use num_traits::{PrimInt, Unsigned};

/// Direction in which a fractional scaled value is rounded.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Rounding {
    /// Round towards positive infinity. A partial unit of traffic still
    /// occupies the corridor.
    #[default]
    Up,
    /// Round towards zero.
    Down,
    /// Round to the nearest integer, ties away from zero.
    Nearest,
}

impl std::fmt::Display for Rounding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rounding::Up => write!(f, "Up"),
            Rounding::Down => write!(f, "Down"),
            Rounding::Nearest => write!(f, "Nearest"),
        }
    }
}

/// Computes `value * numerator / denominator`, rounded according to `rounding`.
///
/// Returns `None` if `denominator` is zero or if an intermediate result does
/// not fit into `T`.
///
/// # Examples
///
/// ```rust
/// use plaza_core::num::{Rounding, scale_proportional};
///
/// assert_eq!(scale_proportional(60u64, 50, 100, Rounding::Up), Some(30));
/// assert_eq!(scale_proportional(10u64, 1, 3, Rounding::Up), Some(4));
/// assert_eq!(scale_proportional(10u64, 1, 3, Rounding::Down), Some(3));
/// assert_eq!(scale_proportional(10u64, 1, 0, Rounding::Down), None);
/// ```
#[inline]
pub fn scale_proportional<T>(value: T, numerator: T, denominator: T, rounding: Rounding) -> Option<T>
where
    T: PrimInt + Unsigned,
{
    if denominator.is_zero() {
        return None;
    }

    let product = value.checked_mul(&numerator)?;
    let quotient = product / denominator;
    let remainder = product % denominator;

    if remainder.is_zero() {
        return Some(quotient);
    }

    match rounding {
        Rounding::Down => Some(quotient),
        Rounding::Up => quotient.checked_add(&T::one()),
        Rounding::Nearest => {
            // remainder * 2 >= denominator, written without the doubling overflow.
            if remainder >= denominator - remainder {
                quotient.checked_add(&T::one())
            } else {
                Some(quotient)
            }
        }
    }
}
