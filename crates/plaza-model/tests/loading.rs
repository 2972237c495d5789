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

use plaza_model::{
    corridor::Corridor,
    event::Event,
    loading::{FormatErrorKind, VenueReader, VenueReaderError},
    model::ModelBuilder,
};
use std::path::PathBuf;

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

#[test]
fn test_reads_fixture_file() {
    let venues = VenueReader::new()
        .from_path(data_path("venues.txt"))
        .expect("fixture should be well formed");

    let names: Vec<_> = venues.iter().map(|v| v.name()).collect();
    assert_eq!(
        names,
        vec![
            "Suncorp Stadium",
            "The Gabba",
            "Royal Queensland Show - EKKA",
            "Riverstage"
        ]
    );

    assert_eq!(venues[0].capacity(), 52500);
    assert_eq!(venues[0].traffic().len(), 3);
    assert_eq!(
        venues[1]
            .traffic()
            .get(&Corridor::new("South Bank", "Roma Street", 1)),
        Some(5000)
    );
    assert!(venues[3].traffic().is_empty());
}

#[test]
fn test_display_round_trip() {
    let venues = VenueReader::new()
        .from_path(data_path("venues.txt"))
        .unwrap();

    let mut text = String::new();
    for venue in &venues {
        text.push_str(&venue.to_string());
        text.push('\n');
    }

    let reread = VenueReader::new().from_str(&text).unwrap();
    assert_eq!(venues, reread);
}

#[test]
fn test_fixture_compiles_into_model() {
    let venues = VenueReader::new()
        .from_path(data_path("venues.txt"))
        .unwrap();
    let events = vec![Event::new("Final", 40000), Event::new("Show", 9000)];

    let model = ModelBuilder::new(&events, &venues).build().unwrap();
    assert_eq!(model.num_venues(), 4);
    // "South Bank, Roma Street" is shared by two venues.
    assert_eq!(model.num_corridors(), 6);
}

#[test]
fn test_from_reader_reports_line_numbers() {
    let input = "V1\n10\nX, Y, 5: 5\n\nV2\nten\n\n";
    let err = VenueReader::new().from_reader(input.as_bytes()).unwrap_err();
    match err {
        VenueReaderError::Format(e) => {
            assert_eq!(e.line, 6);
            assert_eq!(e.kind, FormatErrorKind::InvalidVenueCapacity);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_invalid_utf8_is_a_format_error_at_its_line() {
    let mut input = b"V1\n10\nX, Y, 5: 5\n\nBad".to_vec();
    input.push(0xff);
    input.extend_from_slice(b"\n50\n\n");

    let err = VenueReader::new().from_reader(&input[..]).unwrap_err();
    match err {
        VenueReaderError::Format(e) => {
            assert_eq!(e.line, 5);
            assert_eq!(e.kind, FormatErrorKind::InvalidEncoding);
        }
        other => panic!("unexpected error: {other}"),
    }
}
