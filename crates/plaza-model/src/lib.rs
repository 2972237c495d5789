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

//! # Plaza Model
//!
//! **The domain model for safe event-to-venue allocation.**
//!
//! Events need venues; venues put traffic on shared transit corridors. This
//! crate defines the value objects that describe such a problem, the compiled
//! form the search engines consume, and a reader for venue description files.
//!
//! ## Architecture
//!
//! * **`location`, `corridor`, `traffic`, `venue`, `event`**: immutable value
//!   objects with structural equality. Corridors are identified by their
//!   directed `(start, end)` pair.
//! * **`index`**: strongly-typed wrappers (`EventIndex`, `VenueIndex`,
//!   `CorridorIndex`) to prevent logical indexing errors.
//! * **`model`**: `ModelBuilder` validates the input and compiles it into the
//!   immutable `AllocationModel`, with corridors interned and scaled
//!   contributions precomputed per `(event, venue)` pair.
//! * **`allocation`**: the `Allocation` result value, one venue per event.
//! * **`complexity`**: a log-space estimate of the search tree size.
//! * **`loading`**: `VenueReader` for the textual venue format.
//! * **`error`**: `ModelError` for invalid allocation input.

pub mod allocation;
pub mod complexity;
pub mod corridor;
pub mod error;
pub mod event;
pub mod index;
pub mod loading;
pub mod location;
pub mod model;
pub mod traffic;
pub mod venue;
