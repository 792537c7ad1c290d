mod common;

use common::*;
use pretty_assertions::assert_eq;
use smfread::prelude::*;

/// Decode a track that starts with an `FF 54` event carrying `payload`
fn decode_with_offset(payload: &[u8]) -> Decoded {
    let mut events = vec![0x00, 0xFF, 0x54, payload.len() as u8];
    events.extend_from_slice(payload);
    events.extend_from_slice(&[0x00, 0x90, 0x3C, 0x64, 0x60, 0x80, 0x3C, 0x40]);
    events.extend_from_slice(&END_OF_TRACK);
    Decoder::new(smf(96, &[&END_OF_TRACK, &events]))
        .decode()
        .unwrap()
}

#[test]
fn valid_offset_is_silent() {
    // 30 fps drop-frame, 01:00:00 frame 2
    let decoded = decode_with_offset(&[0x41, 0x00, 0x00, 0x02, 0x00]);
    assert!(decoded.diagnostics.is_empty());

    let track = &decoded.file.tracks()[1];
    let offset = track.events_at_tick(0)[0].smpte_offset().unwrap().unwrap();
    assert_eq!(offset.fps, SmpteFps::Fps30Drop);
    assert_eq!(offset.seconds(), 3600);
    assert_eq!(offset.frame, 2);
    assert_eq!(track.notes().count(), 1);
}

#[test]
fn invalid_offset_is_kept_and_reported() {
    let payload = [0x00, 0x3C, 0x00, 0x00, 0x00];
    let decoded = decode_with_offset(&payload);

    let track = &decoded.file.tracks()[1];
    assert_eq!(
        track.events_at_tick(0)[0],
        Event::SmpteOffset {
            data: payload.to_vec()
        }
    );
    // the note after it still decodes
    assert_eq!(track.notes().count(), 1);
    assert_eq!(
        decoded.diagnostics,
        [Diagnostic::InvalidSmpteOffset {
            track: 1,
            tick: 0,
            error: SmpteError::Minute(60),
        }]
    );
}

#[test]
fn short_offset_is_reported() {
    let decoded = decode_with_offset(&[0x20, 0x00]);
    assert_eq!(
        decoded.diagnostics,
        [Diagnostic::InvalidSmpteOffset {
            track: 1,
            tick: 0,
            error: SmpteError::Length(2),
        }]
    );
    assert_eq!(
        decoded.diagnostics[0].to_string(),
        "keeping raw smpte offset on track 1 at tick 0: expected 5 bytes, got 2"
    );
}

#[test]
fn every_frame_rate_bit_pattern() {
    let rates = [
        SmpteFps::Fps24,
        SmpteFps::Fps25,
        SmpteFps::Fps30Drop,
        SmpteFps::Fps30,
    ];
    for (bits, fps) in (0u8..).zip(rates) {
        let offset = SmpteOffset::parse(&[(bits << 5) | 5, 0, 0, 0, 0]).unwrap();
        assert_eq!((offset.fps, offset.hour), (fps, 5));
    }
    for bits in 4u8..8 {
        assert_eq!(
            SmpteOffset::parse(&[bits << 5, 0, 0, 0, 0]),
            Err(SmpteError::FrameRate(bits))
        );
    }
}

#[test]
fn last_valid_instant_of_the_day() {
    let offset = SmpteOffset::parse(&[0x77, 59, 59, 29, 99]).unwrap();
    assert_eq!(offset.fps, SmpteFps::Fps30);
    assert_eq!(offset.seconds(), 86_399);
    assert_eq!(
        offset.as_micros(),
        86_399. * 1_000_000. + (29. + 99. / 100.) * 1_000_000. / 30.
    );
}
