mod common;

use common::*;
use pretty_assertions::assert_eq;
use smfread::prelude::*;

/// Decode a single meta event at tick 0
fn meta(kind: u8, data: &[u8]) -> Event {
    let mut events = vec![0x00, 0xFF, kind, data.len() as u8];
    events.extend_from_slice(data);
    events.extend_from_slice(&END_OF_TRACK);
    let file = MidiFile::parse(smf(96, &[&events])).unwrap();
    file.tracks()[0].events_at_tick(0)[0].clone()
}

#[test]
fn text_events() {
    let cases: [(u8, fn(String) -> Event); 7] = [
        (0x01, |text| Event::Text { text }),
        (0x02, |text| Event::Copyright { text }),
        (0x03, |text| Event::SequenceName { text }),
        (0x04, |text| Event::InstrumentName { text }),
        (0x05, |text| Event::Lyrics { text }),
        (0x06, |text| Event::Marker { text }),
        (0x07, |text| Event::CuePoint { text }),
    ];
    for (kind, make) in cases {
        assert_eq!(meta(kind, b"Grand Piano"), make("Grand Piano".to_string()));
    }
    assert_eq!(meta(0x01, b""), Event::Text {
        text: String::new()
    });
}

#[test]
fn numeric_events() {
    assert_eq!(
        meta(0x00, &[0x00, 0x02]),
        Event::SequenceNumber { number: 2 }
    );
    assert_eq!(meta(0x20, &[0x09]), Event::ChannelPrefix { channel: 9 });
}

#[test]
fn tempo_event() {
    assert_eq!(meta(0x51, &[0x07, 0xA1, 0x20]), Event::Tempo { bpm: 120. });
    assert_eq!(meta(0x51, &[0x09, 0x27, 0xC0]), Event::Tempo { bpm: 100. });
}

#[test]
fn signatures() {
    assert_eq!(
        meta(0x58, &[0x03, 0x03, 0x0C, 0x08]),
        Event::TimeSignature {
            numerator: 3,
            denominator: 8
        }
    );

    let Event::KeySignature(sig) = meta(0x59, &[0x02, 0x00]) else {
        panic!("expected a key signature");
    };
    assert_eq!(sig.key().to_string(), "D");
    assert_eq!(sig.scale(), Scale::Major);

    let Event::KeySignature(sig) = meta(0x59, &[0xF9, 0x03]) else {
        panic!("expected a key signature");
    };
    assert_eq!(sig.key().to_string(), "Cb");
    assert_eq!(sig.scale().to_string(), "unknown 3");
}

#[test]
fn raw_payload_events() {
    assert_eq!(
        meta(0x7F, &[0x00, 0x00, 0x41, 0x01]),
        Event::SequencerSpecific {
            data: vec![0x00, 0x00, 0x41, 0x01]
        }
    );
    assert_eq!(
        meta(0x21, &[0x01]),
        Event::UnknownMeta {
            kind: 0x21,
            data: vec![0x01]
        }
    );
}

#[test]
fn smpte_offset_kept_raw_and_parsable() {
    let event = meta(0x54, &[0x61, 0x00, 0x00, 0x00, 0x00]);
    assert_eq!(
        event,
        Event::SmpteOffset {
            data: vec![0x61, 0x00, 0x00, 0x00, 0x00]
        }
    );
    let offset = event.smpte_offset().unwrap().unwrap();
    assert_eq!(offset.fps, SmpteFps::Fps30);
    assert_eq!(offset.hour, 1);
    assert_eq!(offset.as_micros(), 3_600_000_000.);

    // a malformed payload does not fail the decode
    let event = meta(0x54, &[0x61, 0x00]);
    assert_eq!(event.smpte_offset(), Some(Err(SmpteError::Length(2))));
    assert_eq!(Event::EndOfTrack.smpte_offset(), None);
}

#[test]
fn end_of_track_payload_is_discarded() {
    let events = [0x00, 0xFF, 0x2F, 0x02, 0xAB, 0xCD];
    let file = MidiFile::parse(smf(96, &[&events])).unwrap();
    assert_eq!(file.tracks()[0].events_at_tick(0), [Event::EndOfTrack]);
}

#[test]
fn long_meta_length() {
    // a 200 byte payload needs a two byte length
    let text = vec![b'x'; 200];
    let mut events = vec![0x00, 0xFF, 0x01, 0x81, 0x48];
    events.extend_from_slice(&text);
    events.extend_from_slice(&END_OF_TRACK);
    let file = MidiFile::parse(smf(96, &[&events])).unwrap();
    assert_eq!(
        file.tracks()[0].events_at_tick(0)[0].text().map(str::len),
        Some(200)
    );
}
