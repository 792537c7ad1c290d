#![doc = r#"
Rusty representation of a decoded [`MidiFile`]
"#]

mod header;
pub use header::*;

mod track;
pub use track::*;

use crate::{decode::Decoder, reader::ReadResult};
use alloc::{borrow::Cow, vec::Vec};

#[doc = r#"
A fully decoded standard midi file: the header and one [`Track`] per track chunk.

Produced in one pass by [`MidiFile::parse`] or [`Decoder::decode`]. There is
no partially decoded file: any malformed input fails the whole decode.
"#]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFile {
    header: Header,
    tracks: Vec<Track>,
}

impl MidiFile {
    pub(crate) fn new(header: Header, tracks: Vec<Track>) -> Self {
        Self { header, tracks }
    }

    /// Parse a set of bytes into a file struct.
    ///
    /// Uses the default [`DecodeOptions`](crate::DecodeOptions) and discards
    /// any [`Diagnostic`](crate::Diagnostic)s. Use [`Decoder`] to keep them.
    pub fn parse<'a, B>(bytes: B) -> ReadResult<Self>
    where
        B: Into<Cow<'a, [u8]>>,
    {
        Decoder::new(bytes).decode().map(|decoded| decoded.file)
    }

    /// Returns header info
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Shorthand for the header's ticks per beat
    pub fn ticks_per_beat(&self) -> u16 {
        self.header.ticks_per_beat()
    }

    /// The tracks, in file order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Take ownership of the tracks
    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }
}
