use super::{Decoder, read_varlen};
use crate::{
    event::{Event, KeySignature},
    reader::{ReadResult, ReaderError},
};
use alloc::string::String;
use num_enum::TryFromPrimitive;

const MICROS_PER_MINUTE: f64 = 60_000_000.;

#[doc = r#"
The meta event types this crate interprets.

```text
FF <type> <vlq length> <data>
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum MetaKind {
    /// `FF 00`
    SequenceNumber = 0x00,
    /// `FF 01`
    Text = 0x01,
    /// `FF 02`
    Copyright = 0x02,
    /// `FF 03`
    SequenceName = 0x03,
    /// `FF 04`
    InstrumentName = 0x04,
    /// `FF 05`
    Lyrics = 0x05,
    /// `FF 06`
    Marker = 0x06,
    /// `FF 07`
    CuePoint = 0x07,
    /// `FF 20`
    ChannelPrefix = 0x20,
    /// `FF 2F`
    EndOfTrack = 0x2F,
    /// `FF 51`
    Tempo = 0x51,
    /// `FF 54`
    SmpteOffset = 0x54,
    /// `FF 58`
    TimeSignature = 0x58,
    /// `FF 59`
    KeySignature = 0x59,
    /// `FF 7F`
    SequencerSpecific = 0x7F,
}

impl Decoder<'_> {
    /// Decode a meta event after its `FF` status byte.
    pub(super) fn decode_meta(&mut self) -> ReadResult<Event> {
        let kind = self.reader.read_u8()?;
        let length = read_varlen(&mut self.reader)?;
        let length = usize::try_from(length)
            .map_err(|_| ReaderError::truncated(self.reader.buffer_len()))?;
        let data = self.reader.read_slice(length)?;
        Ok(meta_event(kind, data))
    }
}

/// Interpret the payload of a meta event of type `kind`.
///
/// Never fails: unknown types, and payloads too short or out of range for
/// their type, become [`Event::UnknownMeta`] with the raw bytes.
pub fn meta_event(kind: u8, data: &[u8]) -> Event {
    let unknown = || Event::UnknownMeta {
        kind,
        data: data.to_vec(),
    };
    let Ok(meta) = MetaKind::try_from(kind) else {
        return unknown();
    };

    match meta {
        MetaKind::SequenceNumber => Event::SequenceNumber {
            number: be_value(data),
        },
        MetaKind::Text => Event::Text { text: text(data) },
        MetaKind::Copyright => Event::Copyright { text: text(data) },
        MetaKind::SequenceName => Event::SequenceName { text: text(data) },
        MetaKind::InstrumentName => Event::InstrumentName { text: text(data) },
        MetaKind::Lyrics => Event::Lyrics { text: text(data) },
        MetaKind::Marker => Event::Marker { text: text(data) },
        MetaKind::CuePoint => Event::CuePoint { text: text(data) },
        MetaKind::ChannelPrefix => Event::ChannelPrefix {
            channel: be_value(data),
        },
        // payload should be empty, not checked
        MetaKind::EndOfTrack => Event::EndOfTrack,
        MetaKind::Tempo => match be_value(data) {
            0 => unknown(),
            micros_per_beat => Event::Tempo {
                bpm: MICROS_PER_MINUTE / micros_per_beat as f64,
            },
        },
        MetaKind::SmpteOffset => Event::SmpteOffset {
            data: data.to_vec(),
        },
        MetaKind::TimeSignature => match data {
            [numerator, exponent, ..] if *exponent < 32 => Event::TimeSignature {
                numerator: *numerator,
                denominator: 1u32 << *exponent,
            },
            _ => unknown(),
        },
        MetaKind::KeySignature => match data {
            [sharps, scale, ..] => Event::KeySignature(KeySignature::new(*sharps as i8, *scale)),
            _ => unknown(),
        },
        MetaKind::SequencerSpecific => Event::SequencerSpecific {
            data: data.to_vec(),
        },
    }
}

/// Big-endian unsigned value of any length; only the low 64 bits survive.
fn be_value(data: &[u8]) -> u64 {
    data.iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
}

/// Every byte maps to the char with the same code point.
fn text(data: &[u8]) -> String {
    data.iter().map(|byte| char::from(*byte)).collect()
}

#[test]
fn tempo_to_bpm() {
    use pretty_assertions::assert_eq;
    // 500000 us per beat
    assert_eq!(
        meta_event(0x51, &[0x07, 0xA1, 0x20]),
        Event::Tempo { bpm: 120. }
    );
    assert_eq!(
        meta_event(0x51, &[0x00, 0x00]),
        Event::UnknownMeta {
            kind: 0x51,
            data: alloc::vec![0x00, 0x00]
        }
    );
}

#[test]
fn time_signature_denominator_is_power_of_two() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        meta_event(0x58, &[6, 3, 24, 8]),
        Event::TimeSignature {
            numerator: 6,
            denominator: 8
        }
    );
    assert_eq!(
        meta_event(0x58, &[6]),
        Event::UnknownMeta {
            kind: 0x58,
            data: alloc::vec![6]
        }
    );
}

#[test]
fn key_signature_is_signed() {
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;
    let Event::KeySignature(sig) = meta_event(0x59, &[0xFD, 0x01]) else {
        panic!("expected a key signature");
    };
    assert_eq!(sig.sharps(), -3);
    assert_eq!(sig.key().to_string(), "Eb");
    assert_eq!(sig.scale().to_string(), "minor");
}

#[test]
fn text_is_byte_per_char() {
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;
    assert_eq!(
        meta_event(0x03, b"Piano \xE9"),
        Event::SequenceName {
            text: "Piano \u{e9}".to_string()
        }
    );
}

#[test]
fn unknown_type_keeps_payload() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        meta_event(0x09, b"port"),
        Event::UnknownMeta {
            kind: 0x09,
            data: b"port".to_vec()
        }
    );
    assert_eq!(
        meta_event(0x00, &[0x00, 0x07]),
        Event::SequenceNumber { number: 7 }
    );
}
