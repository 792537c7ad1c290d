use crate::event::SmpteError;
use core::fmt;

/// Advisory conditions found while decoding.
///
/// None of these stop the decode. The offending message is dropped and the
/// rest of the track is decoded normally. `track` is the 0-based index into
/// [`MidiFile::tracks`](crate::MidiFile::tracks) and `tick` is the absolute
/// tick in that track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Diagnostic {
    /// A note on arrived for a pitch that was already sounding. The earlier
    /// note keeps playing and this note on is ignored.
    DuplicateNoteOn {
        /// Track index
        track: usize,
        /// Absolute tick of the ignored note on
        tick: u64,
        /// The pitch
        pitch: u8,
    },
    /// A note off arrived for a pitch that was not sounding.
    UnmatchedNoteOff {
        /// Track index
        track: usize,
        /// Absolute tick of the ignored note off
        tick: u64,
        /// The pitch
        pitch: u8,
    },
    /// An `FF 54` payload does not describe a valid start time. The event is
    /// kept with its raw bytes.
    InvalidSmpteOffset {
        /// Track index
        track: usize,
        /// Absolute tick of the meta event
        tick: u64,
        /// What is wrong with the payload
        error: SmpteError,
    },
    /// A note was still sounding when its track ended and was dropped.
    ///
    /// Only reported with [`HeldNotes::Report`](crate::HeldNotes::Report).
    HeldNote {
        /// Track index
        track: usize,
        /// Absolute tick of the note on
        start_tick: u64,
        /// The pitch
        pitch: u8,
    },
}

impl Diagnostic {
    /// The track the condition was found in
    pub const fn track(&self) -> usize {
        match self {
            Self::DuplicateNoteOn { track, .. }
            | Self::UnmatchedNoteOff { track, .. }
            | Self::InvalidSmpteOffset { track, .. }
            | Self::HeldNote { track, .. } => *track,
        }
    }

    #[cfg(feature = "tracing")]
    pub(crate) fn trace(&self) {
        tracing::warn!(track = self.track(), "{self}");
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateNoteOn { track, tick, pitch } => write!(
                f,
                "ignoring overlapping note on track {track} for pitch {pitch} at tick {tick}"
            ),
            Self::UnmatchedNoteOff { track, tick, pitch } => write!(
                f,
                "ignoring unmatched note off on track {track} for pitch {pitch} at tick {tick}"
            ),
            Self::InvalidSmpteOffset { track, tick, error } => write!(
                f,
                "keeping raw smpte offset on track {track} at tick {tick}: {error}"
            ),
            Self::HeldNote {
                track,
                start_tick,
                pitch,
            } => write!(
                f,
                "dropping note held past the end of track {track} for pitch {pitch} from tick {start_tick}"
            ),
        }
    }
}
