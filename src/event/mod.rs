#![doc = r#"
Events as they appear in a decoded [`Track`](crate::file::Track)

# Overview

An [`Event`] is either a meta event (text, tempo, signatures and so on) or a
channel message. Channel variants always carry the 1-based MIDI channel they
were sent on.

Note on and note off messages are not represented directly. The decoder pairs
them into one [`Event::Note`] holding the on velocity, the optional release
velocity and the duration in beats.
"#]

mod key_signature;
pub use key_signature::*;

mod smpte_offset;
pub use smpte_offset::*;

use alloc::{string::String, vec::Vec};

/// A single decoded event.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Event {
    /// `FF 00`: the number of a sequence or pattern
    SequenceNumber {
        /// The sequence number
        number: u64,
    },
    /// `FF 01`: free text
    Text {
        /// The text
        text: String,
    },
    /// `FF 02`: a copyright notice
    Copyright {
        /// The text
        text: String,
    },
    /// `FF 03`: the name of the sequence or track
    SequenceName {
        /// The text
        text: String,
    },
    /// `FF 04`: the instrument used in this track
    InstrumentName {
        /// The text
        text: String,
    },
    /// `FF 05`: a lyric, usually a syllable
    Lyrics {
        /// The text
        text: String,
    },
    /// `FF 06`: a rehearsal letter or section name
    Marker {
        /// The text
        text: String,
    },
    /// `FF 07`: a description of something happening at this point
    CuePoint {
        /// The text
        text: String,
    },
    /// `FF 20`: the channel subsequent meta and sysex events apply to
    ChannelPrefix {
        /// The channel as stored in the file
        channel: u64,
    },
    /// `FF 2F`: the end of the track
    EndOfTrack,
    /// `FF 51`: a tempo change
    Tempo {
        /// Beats per minute
        bpm: f64,
    },
    /// `FF 54`: the SMPTE time at which the track should start.
    ///
    /// See [`Event::smpte_offset`] to interpret the bytes.
    SmpteOffset {
        /// The raw payload
        data: Vec<u8>,
    },
    /// `FF 58`: a time signature change
    TimeSignature {
        /// Beats per bar
        numerator: u8,
        /// The note value of one beat, always a power of two
        denominator: u32,
    },
    /// `FF 59`: a key signature change
    KeySignature(KeySignature),
    /// `FF 7F`: data for a specific sequencer
    SequencerSpecific {
        /// The raw payload
        data: Vec<u8>,
    },
    /// A meta event this crate does not interpret, or one whose payload was
    /// too short or out of range to interpret.
    UnknownMeta {
        /// The meta type byte
        kind: u8,
        /// The raw payload
        data: Vec<u8>,
    },
    /// A note on paired with its note off.
    Note {
        /// 1-16
        channel: u8,
        /// The key that was pressed
        pitch: u8,
        /// The note on velocity
        velocity: u8,
        /// Time between note on and note off, in beats
        duration: f64,
        /// The note off velocity.
        ///
        /// `None` when the note was ended by a note on with velocity 0.
        release_velocity: Option<u8>,
    },
    /// Polyphonic key pressure
    NoteAftertouch {
        /// 1-16
        channel: u8,
        /// The key under pressure
        pitch: u8,
        /// Pressure amount
        value: u8,
    },
    /// Control change
    Controller {
        /// 1-16
        channel: u8,
        /// Controller number
        number: u8,
        /// Controller value
        value: u8,
    },
    /// Program change
    ProgramChange {
        /// 1-16
        channel: u8,
        /// Program number
        number: u8,
    },
    /// Channel pressure
    ChannelAftertouch {
        /// 1-16
        channel: u8,
        /// Pressure amount
        value: u8,
    },
    /// Pitch bend.
    ///
    /// The first data byte holds the low 7 bits and the second the high 7
    /// bits, so `E0 00 40` is centered.
    PitchBend {
        /// 1-16
        channel: u8,
        /// 14-bit value where 0x2000 is centered
        value: u16,
    },
}

impl Event {
    /// Returns the channel if this is a channel message.
    pub const fn channel(&self) -> Option<u8> {
        use Event::*;
        match self {
            Note { channel, .. }
            | NoteAftertouch { channel, .. }
            | Controller { channel, .. }
            | ProgramChange { channel, .. }
            | ChannelAftertouch { channel, .. }
            | PitchBend { channel, .. } => Some(*channel),
            _ => None,
        }
    }

    /// True for every event that came from an `FF` meta event.
    pub const fn is_meta(&self) -> bool {
        self.channel().is_none()
    }

    /// True if this is a paired [`Event::Note`]
    pub const fn is_note(&self) -> bool {
        matches!(self, Event::Note { .. })
    }

    /// A short lowercase name for the kind of event
    pub const fn name(&self) -> &'static str {
        use Event::*;
        match self {
            SequenceNumber { .. } => "sequence number",
            Text { .. } => "text",
            Copyright { .. } => "copyright",
            SequenceName { .. } => "sequence name",
            InstrumentName { .. } => "instrument name",
            Lyrics { .. } => "lyrics",
            Marker { .. } => "marker",
            CuePoint { .. } => "cue point",
            ChannelPrefix { .. } => "channel prefix",
            EndOfTrack => "end of track",
            Tempo { .. } => "tempo",
            SmpteOffset { .. } => "smpte offset",
            TimeSignature { .. } => "time signature",
            KeySignature(_) => "key signature",
            SequencerSpecific { .. } => "sequencer specific",
            UnknownMeta { .. } => "unknown meta event",
            Note { .. } => "note",
            NoteAftertouch { .. } => "note aftertouch",
            Controller { .. } => "controller",
            ProgramChange { .. } => "program change",
            ChannelAftertouch { .. } => "channel aftertouch",
            PitchBend { .. } => "pitch bend",
        }
    }

    /// The text of any of the text-bearing meta events
    pub fn text(&self) -> Option<&str> {
        use Event::*;
        match self {
            Text { text }
            | Copyright { text }
            | SequenceName { text }
            | InstrumentName { text }
            | Lyrics { text }
            | Marker { text }
            | CuePoint { text } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Interpret an [`Event::SmpteOffset`] payload.
    ///
    /// Returns `None` for every other event.
    pub fn smpte_offset(&self) -> Option<Result<SmpteOffset, SmpteError>> {
        match self {
            Event::SmpteOffset { data } => Some(SmpteOffset::parse(data)),
            _ => None,
        }
    }
}

#[test]
fn channel_only_on_channel_messages() {
    use pretty_assertions::assert_eq;
    let bend = Event::PitchBend {
        channel: 10,
        value: 0x2000,
    };
    assert_eq!(bend.channel(), Some(10));
    assert!(!bend.is_meta());

    let tempo = Event::Tempo { bpm: 120. };
    assert_eq!(tempo.channel(), None);
    assert!(tempo.is_meta());
    assert_eq!(tempo.name(), "tempo");
}

#[test]
fn text_of_text_events() {
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;
    let marker = Event::Marker {
        text: "Verse".to_string(),
    };
    assert_eq!(marker.text(), Some("Verse"));
    assert_eq!(Event::EndOfTrack.text(), None);
}
