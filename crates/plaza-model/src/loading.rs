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

//! Venue description reader.
//!
//! This module turns the line-oriented venue description format into a list
//! of validated `Venue`s, in the order they appear in the input. A file holds
//! zero or more venue blocks back to back:
//!
//! ```raw
//! <venue name>                          any non-empty line
//! <capacity>                            positive integer, digits only
//! START, END, CAPACITY: TRAFFIC         zero or more corridor lines
//! <empty line>                          terminates the block
//! ```
//!
//! `START` and `END` are distinct, non-empty and contain neither `,` nor `:`.
//! The three corridor fields are separated by exactly `", "` and the traffic
//! follows `": "`. Numbers carry no sign and no surrounding whitespace. A
//! corridor may appear only once per venue, its traffic may exceed neither
//! the corridor capacity nor the venue capacity, and two identical venues may
//! not both appear in the same input.
//!
//! Every violation is reported as a `FormatError` carrying the 1-based line
//! number where it was detected. The reader accepts any `BufRead`, file path,
//! raw reader, or string slice.

use crate::{corridor::Corridor, traffic::Traffic, venue::Venue};
use std::{
    fs::File,
    io::{BufRead, BufReader, ErrorKind, Lines, Read},
    path::Path,
};
use tracing::{debug, trace};

/// What is wrong with a line of a venue description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum FormatErrorKind {
    #[error("venue name must not be empty")]
    EmptyVenueName,
    #[error("unexpected end of input, expected a venue capacity")]
    UnexpectedEof,
    #[error("venue capacity must be a positive integer without surrounding whitespace")]
    InvalidVenueCapacity,
    #[error("unexpected end of input, expected an empty line terminating the venue")]
    UnterminatedVenue,
    #[error("corridor line must have the form `START, END, CAPACITY: TRAFFIC`")]
    MalformedCorridor,
    #[error("corridor start and end must differ")]
    IdenticalEndpoints,
    #[error("corridor capacity must be a positive integer")]
    InvalidCorridorCapacity,
    #[error("corridor traffic must be a positive integer")]
    InvalidTraffic,
    #[error("corridor traffic exceeds the corridor capacity")]
    TrafficExceedsCorridorCapacity,
    #[error("corridor traffic exceeds the venue capacity")]
    TrafficExceedsVenueCapacity,
    #[error("corridor appears more than once for the same venue")]
    DuplicateCorridor,
    #[error("venue is identical to an earlier venue")]
    DuplicateVenue,
    #[error("line is not valid UTF-8")]
    InvalidEncoding,
}

/// A format violation at a specific line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct FormatError {
    /// The 1-based line number where the problem was detected.
    pub line: usize,
    /// What is wrong.
    pub kind: FormatErrorKind,
}

impl FormatError {
    #[inline]
    pub fn new(line: usize, kind: FormatErrorKind) -> Self {
        Self { line, kind }
    }
}

/// The error type for reading venue descriptions.
#[derive(Debug, thiserror::Error)]
pub enum VenueReaderError {
    /// An I/O error occurred while reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The input does not follow the venue description format.
    #[error("format error: {0}")]
    Format(#[from] FormatError),
}

impl VenueReaderError {
    /// Returns the format error, if this is one.
    #[inline]
    pub fn as_format(&self) -> Option<&FormatError> {
        match self {
            VenueReaderError::Format(e) => Some(e),
            VenueReaderError::Io(_) => None,
        }
    }
}

/// A reader for venue description files.
///
/// # Configuration
/// * `reject_duplicate_venues`: If true (the default), a venue identical to
///   an earlier one is a `FormatErrorKind::DuplicateVenue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VenueReader {
    reject_duplicate_venues: bool,
}

impl Default for VenueReader {
    fn default() -> Self {
        Self {
            reject_duplicate_venues: true,
        }
    }
}

impl VenueReader {
    /// Creates a new `VenueReader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether identical venues are rejected.
    #[inline]
    pub fn reject_duplicate_venues(mut self, yes: bool) -> Self {
        self.reject_duplicate_venues = yes;
        self
    }

    /// Reads venues from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Vec<Venue>, VenueReaderError> {
        let mut cursor = LineCursor::new(rdr);
        let mut venues: Vec<Venue> = Vec::new();

        while let Some(name) = cursor.next_line()? {
            if name.is_empty() {
                return Err(cursor.error(FormatErrorKind::EmptyVenueName).into());
            }

            let capacity_line = cursor
                .next_line()?
                .ok_or_else(|| cursor.eof_error(FormatErrorKind::UnexpectedEof))?;
            let capacity = parse_positive(&capacity_line)
                .ok_or_else(|| cursor.error(FormatErrorKind::InvalidVenueCapacity))?;

            let mut traffic = Traffic::new();
            loop {
                let line = cursor
                    .next_line()?
                    .ok_or_else(|| cursor.eof_error(FormatErrorKind::UnterminatedVenue))?;
                if line.is_empty() {
                    break;
                }

                let (corridor, value) =
                    parse_corridor_line(&line).map_err(|kind| cursor.error(kind))?;
                if value > capacity {
                    return Err(cursor
                        .error(FormatErrorKind::TrafficExceedsVenueCapacity)
                        .into());
                }
                if traffic.contains(&corridor) {
                    return Err(cursor.error(FormatErrorKind::DuplicateCorridor).into());
                }
                traffic.insert(corridor, value);
            }

            let venue = Venue::new(name, capacity, traffic);
            if self.reject_duplicate_venues && venues.contains(&venue) {
                return Err(cursor.error(FormatErrorKind::DuplicateVenue).into());
            }

            trace!(
                venue = venue.name(),
                capacity = venue.capacity(),
                corridors = venue.traffic().len(),
                "read venue"
            );
            venues.push(venue);
        }

        debug!(
            venues = venues.len(),
            lines = cursor.line(),
            "read venue descriptions"
        );

        Ok(venues)
    }

    /// Reads venues from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Venue>, VenueReaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Reads venues from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Vec<Venue>, VenueReaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Reads venues from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Vec<Venue>, VenueReaderError> {
        self.from_bufread(s.as_bytes())
    }
}

/// Yields lines and tracks the 1-based number of the last line returned.
struct LineCursor<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> LineCursor<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            lines: rdr.lines(),
            line: 0,
        }
    }

    /// Returns the next line, or `None` at the end of input. A line that is
    /// not valid UTF-8 is a format error at that line.
    #[inline]
    fn next_line(&mut self) -> Result<Option<String>, VenueReaderError> {
        match self.lines.next() {
            Some(Ok(line)) => {
                self.line += 1;
                Ok(Some(line))
            }
            Some(Err(e)) if e.kind() == ErrorKind::InvalidData => {
                self.line += 1;
                Err(self.error(FormatErrorKind::InvalidEncoding).into())
            }
            Some(Err(e)) => Err(e.into()),
            None => Ok(None),
        }
    }

    /// The number of the last line returned.
    #[inline]
    fn line(&self) -> usize {
        self.line
    }

    /// An error at the last line returned.
    #[inline]
    fn error(&self, kind: FormatErrorKind) -> FormatError {
        FormatError::new(self.line, kind)
    }

    /// An error at the line that would have followed the end of input.
    #[inline]
    fn eof_error(&self, kind: FormatErrorKind) -> FormatError {
        FormatError::new(self.line + 1, kind)
    }
}

/// Parses a positive `u32` made of ASCII digits only.
fn parse_positive(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u32>().ok().filter(|&v| v > 0)
}

/// Parses `START, END, CAPACITY: TRAFFIC`.
fn parse_corridor_line(line: &str) -> Result<(Corridor, u32), FormatErrorKind> {
    let (left, traffic) = line
        .split_once(": ")
        .ok_or(FormatErrorKind::MalformedCorridor)?;

    let mut fields = left.split(',');
    let (Some(start), Some(end), Some(capacity), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(FormatErrorKind::MalformedCorridor);
    };

    let end = end
        .strip_prefix(' ')
        .ok_or(FormatErrorKind::MalformedCorridor)?;
    let capacity = capacity
        .strip_prefix(' ')
        .ok_or(FormatErrorKind::MalformedCorridor)?;

    if start.is_empty() || end.is_empty() || start.contains(':') || end.contains(':') {
        return Err(FormatErrorKind::MalformedCorridor);
    }
    if start == end {
        return Err(FormatErrorKind::IdenticalEndpoints);
    }

    let capacity = parse_positive(capacity).ok_or(FormatErrorKind::InvalidCorridorCapacity)?;
    let traffic = parse_positive(traffic).ok_or(FormatErrorKind::InvalidTraffic)?;
    if traffic > capacity {
        return Err(FormatErrorKind::TrafficExceedsCorridorCapacity);
    }

    Ok((Corridor::new(start, end, capacity), traffic))
}
