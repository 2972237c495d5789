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

use plaza_core::index::{TypedIndex, TypedIndexTag};

/// A tag type for event indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct EventIndexTag;

impl TypedIndexTag for EventIndexTag {
    const NAME: &'static str = "EventIndex";
}

/// A typed index for events.
pub type EventIndex = TypedIndex<EventIndexTag>;

/// A tag type for venue indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct VenueIndexTag;

impl TypedIndexTag for VenueIndexTag {
    const NAME: &'static str = "VenueIndex";
}

/// A typed index for venues.
pub type VenueIndex = TypedIndex<VenueIndexTag>;

/// A tag type for interned corridor indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CorridorIndexTag;

impl TypedIndexTag for CorridorIndexTag {
    const NAME: &'static str = "CorridorIndex";
}

/// A typed index for corridors after interning by endpoints.
pub type CorridorIndex = TypedIndex<CorridorIndexTag>;
