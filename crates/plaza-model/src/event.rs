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

/// An activity that needs a venue.
///
/// `size` is the number of attendees the event draws. Events are identified
/// by name when validating allocation input.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Event {
    name: String,
    size: u32,
}

impl Event {
    /// Creates a new event.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or `size` is zero.
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "called `Event::new` with an empty name");
        assert!(
            size > 0,
            "called `Event::new` with a size of zero for event `{}`",
            name
        );

        Self { name, size }
    }

    /// Returns the name of the event.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of attendees.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.size)
    }
}
