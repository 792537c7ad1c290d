mod common;

use common::*;
use pretty_assertions::assert_eq;
use smfread::prelude::*;

fn events(bytes: &[u8]) -> Vec<(u64, Event)> {
    let mut track = bytes.to_vec();
    track.extend_from_slice(&END_OF_TRACK);
    let file = MidiFile::parse(smf(96, &[&track])).unwrap();
    file.tracks()[0]
        .ticks()
        .flat_map(|(tick, events)| events.iter().cloned().map(move |e| (tick, e)))
        .filter(|(_, e)| *e != Event::EndOfTrack)
        .collect()
}

#[test]
fn data_byte_reuses_status_and_channel() {
    let explicit = events(&[
        0x00, 0xB4, 7, 100, //
        0x10, 0xB4, 10, 64, //
    ]);
    let running = events(&[
        0x00, 0xB4, 7, 100, //
        0x10, 10, 64, // one byte shorter
    ]);
    assert_eq!(explicit, running);
    assert_eq!(
        running,
        [
            (
                0,
                Event::Controller {
                    channel: 5,
                    number: 7,
                    value: 100
                }
            ),
            (
                16,
                Event::Controller {
                    channel: 5,
                    number: 10,
                    value: 64
                }
            ),
        ]
    );
}

#[test]
fn running_status_with_notes() {
    let running = events(&[
        0x00, 0x9A, 60, 100, //
        0x00, 64, 100, //
        0x60, 60, 0, //
        0x00, 64, 0, //
    ]);
    assert_eq!(
        running,
        [
            (
                0,
                Event::Note {
                    channel: 11,
                    pitch: 60,
                    velocity: 100,
                    duration: 1.,
                    release_velocity: None
                }
            ),
            (
                0,
                Event::Note {
                    channel: 11,
                    pitch: 64,
                    velocity: 100,
                    duration: 1.,
                    release_velocity: None
                }
            ),
        ]
    );
}

#[test]
fn running_status_one_data_byte() {
    let running = events(&[
        0x00, 0xC0, 5, //
        0x00, 6, //
        0x00, 0xD1, 30, //
        0x01, 40, //
    ]);
    assert_eq!(
        running,
        [
            (
                0,
                Event::ProgramChange {
                    channel: 1,
                    number: 5
                }
            ),
            (
                0,
                Event::ProgramChange {
                    channel: 1,
                    number: 6
                }
            ),
            (
                0,
                Event::ChannelAftertouch {
                    channel: 2,
                    value: 30
                }
            ),
            (
                1,
                Event::ChannelAftertouch {
                    channel: 2,
                    value: 40
                }
            ),
        ]
    );
}

#[test]
fn running_status_survives_meta_events() {
    let running = events(&[
        0x00, 0xE3, 0x00, 0x40, //
        0x00, 0xFF, 0x06, 0x01, b'A', // marker
        0x00, 0x7F, 0x7F, //
    ]);
    assert_eq!(
        running,
        [
            (
                0,
                Event::PitchBend {
                    channel: 4,
                    value: 0x2000
                }
            ),
            (
                0,
                Event::Marker {
                    text: "A".to_string()
                }
            ),
            (
                0,
                Event::PitchBend {
                    channel: 4,
                    value: 0x3FFF
                }
            ),
        ]
    );
}

#[test]
fn data_byte_without_prior_status() {
    let track = [0x00, 0x3C, 0x40, 0x00, 0xFF, 0x2F, 0x00];
    let err = MidiFile::parse(smf(96, &[&track])).unwrap_err();
    assert_eq!(
        *err.error_kind(),
        ReaderErrorKind::UnexpectedMessageType(0x3C)
    );
    // header, track header, delta
    assert_eq!(err.position(), 14 + 8 + 1);
}

#[test]
fn running_status_does_not_cross_tracks() {
    let first = [0x00, 0x90, 60, 100, 0x00, 60, 0, 0x00, 0xFF, 0x2F, 0x00];
    let second = [0x00, 60, 100, 0x00, 0xFF, 0x2F, 0x00];
    let err = MidiFile::parse(smf(96, &[&first, &second])).unwrap_err();
    assert_eq!(*err.error_kind(), ReaderErrorKind::UnexpectedMessageType(60));
}

#[test]
fn note_aftertouch_with_running_status() {
    let running = events(&[
        0x00, 0xA2, 60, 33, //
        0x00, 61, 34, //
    ]);
    assert_eq!(
        running,
        [
            (
                0,
                Event::NoteAftertouch {
                    channel: 3,
                    pitch: 60,
                    value: 33
                }
            ),
            (
                0,
                Event::NoteAftertouch {
                    channel: 3,
                    pitch: 61,
                    value: 34
                }
            ),
        ]
    );
}

#[test]
fn pitch_bend_low_byte_first() {
    let running = events(&[0x00, 0xE0, 0x01, 0x00, 0x00, 0x00, 0x01]);
    assert_eq!(
        running,
        [
            (0, Event::PitchBend { channel: 1, value: 1 }),
            (0, Event::PitchBend { channel: 1, value: 0x80 }),
        ]
    );
}
