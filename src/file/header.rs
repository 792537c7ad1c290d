use num_enum::FromPrimitive;

#[doc = r#"
Information from the `MThd` chunk of a MIDI file
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    format: Format,
    track_count: u16,
    ticks_per_beat: u16,
}

impl Header {
    /// Create a new header.
    ///
    /// `ticks_per_beat` must be in `1..=0x7FFF`.
    pub const fn new(format: Format, track_count: u16, ticks_per_beat: u16) -> Self {
        Self {
            format,
            track_count,
            ticks_per_beat,
        }
    }
    /// How the tracks relate to each other
    pub const fn format(&self) -> Format {
        self.format
    }
    /// The number of track chunks the header declares
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }
    /// The tick rate of every delta time in the file
    pub const fn ticks_per_beat(&self) -> u16 {
        self.ticks_per_beat
    }
}

#[doc = r#"
The format word of the header.

Format 0 holds a single multi-channel track, format 1 holds tracks that play
simultaneously, and format 2 holds independent single-track patterns. Any
other value is kept as [`Format::Other`]: tracks are decoded the same way
regardless.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum Format {
    /// Format 0
    SingleMultiChannel = 0,
    /// Format 1
    Simultaneous = 1,
    /// Format 2
    SequentiallyIndependent = 2,
    /// An undefined format number
    #[num_enum(catch_all)]
    Other(u16),
}

impl Format {
    /// The numeric value as stored in the file
    pub const fn as_u16(&self) -> u16 {
        match self {
            Format::SingleMultiChannel => 0,
            Format::Simultaneous => 1,
            Format::SequentiallyIndependent => 2,
            Format::Other(v) => *v,
        }
    }
}

#[test]
fn format_from_word() {
    use pretty_assertions::assert_eq;
    assert_eq!(Format::from(0), Format::SingleMultiChannel);
    assert_eq!(Format::from(1), Format::Simultaneous);
    assert_eq!(Format::from(2), Format::SequentiallyIndependent);
    assert_eq!(Format::from(7), Format::Other(7));
    assert_eq!(Format::from(7).as_u16(), 7);
}
