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

//! # Strongly Typed Indices
//!
//! `TypedIndex<T>` wraps a `usize` and carries a zero-sized tag type `T`.
//! The tag only exists at the type level, so an `EventIndex` can never be
//! handed to a function expecting a `VenueIndex`, while the runtime layout is
//! still a plain `usize` (`#[repr(transparent)]`).
//!
//! ```rust
//! use plaza_core::index::{TypedIndex, TypedIndexTag};
//!
//! #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
//! struct SeatTag;
//! impl TypedIndexTag for SeatTag {
//!     const NAME: &'static str = "SeatIndex";
//! }
//!
//! type SeatIndex = TypedIndex<SeatTag>;
//! let seat = SeatIndex::new(7);
//! assert_eq!(seat.get(), 7);
//! assert_eq!(format!("{}", seat), "SeatIndex(7)");
//! ```

/// Names a family of typed indices for `Debug` and `Display` output.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A `usize` index tagged with the domain it indexes into.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Wraps a raw index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the raw index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Returns the index directly following this one.
    #[inline(always)]
    pub const fn next(&self) -> Self {
        Self::new(self.index + 1)
    }

    /// Iterates over all indices in `0..len`.
    #[inline]
    pub fn range(len: usize) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..len).map(Self::new)
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    #[inline(always)]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    #[inline(always)]
    fn from(index: TypedIndex<T>) -> Self {
        index.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    struct TestTag;

    impl TypedIndexTag for TestTag {
        const NAME: &'static str = "TestIndex";
    }

    type TestIndex = TypedIndex<TestTag>;

    #[test]
    fn test_new_and_get() {
        let idx = TestIndex::new(42);
        assert_eq!(idx.get(), 42);
        assert_eq!(usize::from(idx), 42);
        assert_eq!(TestIndex::from(3usize).get(), 3);
    }

    #[test]
    fn test_next() {
        assert_eq!(TestIndex::new(0).next(), TestIndex::new(1));
    }

    #[test]
    fn test_range_is_ordered_and_reversible() {
        let forward: Vec<usize> = TestIndex::range(4).map(|i| i.get()).collect();
        assert_eq!(forward, vec![0, 1, 2, 3]);

        let backward: Vec<usize> = TestIndex::range(3).rev().map(|i| i.get()).collect();
        assert_eq!(backward, vec![2, 1, 0]);

        assert_eq!(TestIndex::range(0).len(), 0);
    }

    #[test]
    fn test_ordering_follows_raw_index() {
        assert!(TestIndex::new(1) < TestIndex::new(2));
        let mut v = vec![TestIndex::new(5), TestIndex::new(1), TestIndex::new(3)];
        v.sort();
        assert_eq!(v, vec![TestIndex::new(1), TestIndex::new(3), TestIndex::new(5)]);
    }

    #[test]
    fn test_display_and_debug_use_tag_name() {
        let idx = TestIndex::new(9);
        assert_eq!(format!("{}", idx), "TestIndex(9)");
        assert_eq!(format!("{:?}", idx), "TestIndex(9)");
    }
}
