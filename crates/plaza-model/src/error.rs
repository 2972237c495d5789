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

use crate::index::{EventIndex, VenueIndex};

/// The error type for compiling events and venues into an `AllocationModel`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Two events share a name.
    #[error("event `{name}` appears more than once ({first} and {second})")]
    DuplicateEvent {
        name: String,
        first: EventIndex,
        second: EventIndex,
    },
    /// Two venues are equal in name, capacity and traffic profile.
    #[error("venue `{name}` appears more than once ({first} and {second})")]
    DuplicateVenue {
        name: String,
        first: VenueIndex,
        second: VenueIndex,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_both_positions() {
        let e = ModelError::DuplicateEvent {
            name: "Concert".to_string(),
            first: EventIndex::new(0),
            second: EventIndex::new(3),
        };
        assert_eq!(
            e.to_string(),
            "event `Concert` appears more than once (EventIndex(0) and EventIndex(3))"
        );

        let v = ModelError::DuplicateVenue {
            name: "Hall".to_string(),
            first: VenueIndex::new(1),
            second: VenueIndex::new(2),
        };
        assert_eq!(
            v.to_string(),
            "venue `Hall` appears more than once (VenueIndex(1) and VenueIndex(2))"
        );
    }
}
