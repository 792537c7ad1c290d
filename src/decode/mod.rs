#![doc = r#"
Decodes the chunks of a standard midi file into a [`MidiFile`].

# Overview

```text
[MThd][len][format][tracks][division]
[MTrk][len]([delta vlq][event])*
[MTrk][len]([delta vlq][event])*
...
```

The [`Decoder`] reads the header chunk, then exactly as many track chunks as
the header declares. Each track is decoded with its own [`TrackState`]: the
running tick count, the notes currently sounding, and the running status.
All of it is dropped when the track chunk ends.

Decoding never reads past the input and never resynchronizes: every malformed
structure fails the whole decode with a [`ReaderError`].
"#]

mod channel;
pub use channel::*;

mod meta;
pub use meta::*;

mod track;
pub use track::*;

mod varlen;
pub use varlen::*;

use crate::{
    diagnostic::Diagnostic,
    file::{Format, Header, MidiFile, Track},
    reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
};
use alloc::{borrow::Cow, vec::Vec};

/// "MThd"
pub const HEADER_CHUNK_ID: u32 = 0x4D54_6864;
/// "MTrk"
pub const TRACK_CHUNK_ID: u32 = 0x4D54_726B;

/// What to do with notes still sounding when their track ends.
///
/// No closing event is ever made up for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeldNotes {
    /// Drop them silently
    #[default]
    Discard,
    /// Drop them and record a [`Diagnostic::HeldNote`] for each
    Report,
}

/// Runtime configuration for a [`Decoder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    held_notes: HeldNotes,
}

impl DecodeOptions {
    /// Set the handling of notes still sounding at the end of a track
    pub const fn held_notes(mut self, held_notes: HeldNotes) -> Self {
        self.held_notes = held_notes;
        self
    }
    /// The handling of notes still sounding at the end of a track
    pub const fn held_notes_policy(&self) -> HeldNotes {
        self.held_notes
    }
}

/// The result of a successful decode
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// The decoded file
    pub file: MidiFile,
    /// Advisory conditions, in the order they were found
    pub diagnostics: Vec<Diagnostic>,
}

#[doc = r#"
Walks a byte buffer according to the standard midi file grammar.

# Example
```rust
# use smfread::prelude::*;
let bytes = [
    0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01, 0x00, 0x60,
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x08,
    0x00, 0x90, 0x3C, 0x64, // a note on that never ends
    0x00, 0xFF, 0x2F, 0x00,
];
let decoded = Decoder::new(&bytes[..])
    .with_options(DecodeOptions::default().held_notes(HeldNotes::Report))
    .decode()
    .unwrap();

assert_eq!(decoded.file.tracks()[0].len(), 1);
assert_eq!(
    decoded.diagnostics,
    [Diagnostic::HeldNote { track: 0, start_tick: 0, pitch: 60 }]
);
```
"#]
#[derive(Debug)]
pub struct Decoder<'a> {
    reader: Reader<'a>,
    options: DecodeOptions,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Decoder<'a> {
    /// Create a decoder over a complete file in memory
    pub fn new<B>(bytes: B) -> Self
    where
        B: Into<Cow<'a, [u8]>>,
    {
        Self {
            reader: Reader::from_bytes(bytes),
            options: DecodeOptions::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Replace the decode options
    pub const fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Decode the whole buffer.
    ///
    /// Bytes after the last declared track chunk are ignored.
    pub fn decode(mut self) -> ReadResult<Decoded> {
        let header = self.decode_header()?;

        let mut tracks = Vec::with_capacity(header.track_count() as usize);
        for index in 0..header.track_count() as usize {
            let track = self.decode_track(index, header.ticks_per_beat())?;
            tracks.push(track);
        }

        Ok(Decoded {
            file: MidiFile::new(header, tracks),
            diagnostics: self.diagnostics,
        })
    }

    /// Decode the `MThd` chunk.
    pub fn decode_header(&mut self) -> ReadResult<Header> {
        let position = self.reader.buffer_position();
        let id = self.reader.read_exact_size()?;
        if u32::from_be_bytes(id) != HEADER_CHUNK_ID {
            return Err(ReaderError::new(position, ReaderErrorKind::InvalidHeaderChunk(id)));
        }

        let length = self.reader.read_u32_be()?;
        if length < 6 {
            return Err(ReaderError::new(position, ReaderErrorKind::HeaderTooShort(length)));
        }

        let format = Format::from(self.reader.read_u16_be()?);
        let track_count = self.reader.read_u16_be()?;
        let division_position = self.reader.buffer_position();
        let division = self.reader.read_u16_be()?;

        // extended headers: anything after the first 6 bytes is skipped
        self.reader.skip((length - 6) as usize)?;

        if division & 0x8000 != 0 || division == 0 {
            return Err(ReaderError::new(
                division_position,
                ReaderErrorKind::UnsupportedTimeDivision(division),
            ));
        }

        Ok(Header::new(format, track_count, division))
    }

    /// Decode one `MTrk` chunk.
    ///
    /// `index` is only used to label diagnostics.
    pub fn decode_track(&mut self, index: usize, ticks_per_beat: u16) -> ReadResult<Track> {
        let position = self.reader.buffer_position();
        let id = self.reader.read_exact_size()?;
        if u32::from_be_bytes(id) != TRACK_CHUNK_ID {
            return Err(ReaderError::new(position, ReaderErrorKind::InvalidTrackChunk(id)));
        }

        let length = self.reader.read_u32_be()? as usize;
        let end = self.reader.buffer_position().saturating_add(length);

        let mut state = TrackState::new(index, ticks_per_beat);
        let mut track = Track::new(ticks_per_beat);

        while self.reader.bytes_remaining_before(end) > 0 {
            let delta = read_varlen(&mut self.reader)?;
            state.advance(delta);

            if let Some((tick, event)) = self.decode_event(&mut state)? {
                track.push(tick, event);
            }
        }

        let position = self.reader.buffer_position();
        if position != end {
            return Err(ReaderError::new(
                position,
                ReaderErrorKind::TrackLengthMismatch { end, position },
            ));
        }

        self.finish_track(state);

        Ok(track)
    }

    fn finish_track(&mut self, state: TrackState) {
        if self.options.held_notes == HeldNotes::Discard {
            return;
        }
        let track = state.index();
        for (pitch, note) in state.into_open_notes() {
            self.warn(Diagnostic::HeldNote {
                track,
                start_tick: note.start_tick(),
                pitch,
            });
        }
    }

    fn warn(&mut self, diagnostic: Diagnostic) {
        #[cfg(feature = "tracing")]
        diagnostic.trace();
        self.diagnostics.push(diagnostic);
    }
}
