mod common;

use common::*;
use pretty_assertions::assert_eq;
use smfread::prelude::*;

fn kind_of(tracks: &[&[u8]]) -> ReaderErrorKind {
    MidiFile::parse(smf(96, tracks))
        .unwrap_err()
        .error_kind()
        .clone()
}

#[test]
fn sysex_is_unsupported() {
    let track = [0x00, 0xF0, 0x03, 0x7E, 0x7F, 0xF7, 0x00, 0xFF, 0x2F, 0x00];
    assert_eq!(
        kind_of(&[&track]),
        ReaderErrorKind::UnsupportedEventType(0xF0)
    );

    let track = [0x00, 0xF7, 0x01, 0xF7, 0x00, 0xFF, 0x2F, 0x00];
    assert_eq!(
        kind_of(&[&track]),
        ReaderErrorKind::UnsupportedEventType(0xF7)
    );
}

#[test]
fn system_messages_are_unexpected() {
    for status in [0xF1, 0xF2, 0xF8, 0xFE] {
        let track = [0x00, status, 0x00, 0x00, 0x00, 0xFF, 0x2F, 0x00];
        assert_eq!(
            kind_of(&[&track]),
            ReaderErrorKind::UnexpectedMessageType(status)
        );
    }
}

#[test]
fn invalid_track_chunk() {
    let mut bytes = smf(96, &[&END_OF_TRACK, &END_OF_TRACK]);
    // second track id
    let second = 14 + 8 + END_OF_TRACK.len();
    bytes[second..second + 4].copy_from_slice(b"XFIH");
    let err = MidiFile::parse(bytes).unwrap_err();
    assert_eq!(
        *err.error_kind(),
        ReaderErrorKind::InvalidTrackChunk(*b"XFIH")
    );
    assert_eq!(err.position(), second);
}

#[test]
fn fewer_tracks_than_declared() {
    let mut bytes = header(1, 2, 96);
    bytes.extend(track(&END_OF_TRACK));
    assert!(MidiFile::parse(bytes).unwrap_err().is_truncated());
}

#[test]
fn event_overruns_track_length() {
    // the track claims 6 bytes, the note off needs a 7th
    let mut bytes = header(0, 1, 96);
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&6u32.to_be_bytes());
    bytes.extend_from_slice(&[0x00, 0x90, 60, 100, 0x00, 0x80, 60, 64]);
    bytes.extend_from_slice(&END_OF_TRACK);

    let err = MidiFile::parse(bytes).unwrap_err();
    assert_eq!(
        *err.error_kind(),
        ReaderErrorKind::TrackLengthMismatch {
            end: 28,
            position: 30
        }
    );
}

#[test]
fn truncated_track() {
    let mut bytes = smf(96, &[&[0x00, 0x90, 60, 100, 0x60, 0x80, 60, 64]]);
    bytes.truncate(bytes.len() - 1);
    let err = MidiFile::parse(bytes).unwrap_err();
    assert!(err.is_truncated());

    // a meta event longer than the input
    let err = MidiFile::parse(smf(96, &[&[0x00, 0xFF, 0x01, 0x7F, b'a']])).unwrap_err();
    assert!(err.is_truncated());
}

#[test]
fn no_partial_results() {
    // a valid first track does not survive a broken second one
    let broken = [0x00, 0xF0, 0x00];
    let result = Decoder::new(smf(96, &[&END_OF_TRACK, &broken])).decode();
    assert!(result.is_err());
}

#[test]
fn errors_display_position() {
    let err = MidiFile::parse(&b"RIFF\x00\x00\x00\x06"[..]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Reading at Position 0, Invalid header chunk id [52, 49, 46, 46]"
    );
}
