use thiserror::Error;

#[doc = r#"
A set of errors that can occur while decoding a standard midi file.

Every error carries the reader offset where it was detected.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Reading at Position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that decoding can produce
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReaderErrorKind {
    /// The buffer ran out in the middle of a read.
    #[error("Input ended unexpectedly")]
    TruncatedInput,
    /// The first chunk is not an `MThd` chunk.
    #[error("Invalid header chunk id {0:02X?}")]
    InvalidHeaderChunk([u8; 4]),
    /// The header chunk declares fewer than 6 bytes.
    #[error("Header chunk length {0} is shorter than 6 bytes")]
    HeaderTooShort(u32),
    /// A track chunk is not an `MTrk` chunk.
    #[error("Invalid track chunk id {0:02X?}")]
    InvalidTrackChunk([u8; 4]),
    /// SMPTE timing, or a division of zero ticks per beat.
    #[error("Unsupported time division {0:#06X}")]
    UnsupportedTimeDivision(u16),
    /// SysEx events are not decoded.
    #[error("Unsupported event type {0:#04X}")]
    UnsupportedEventType(u8),
    /// The status could not be resolved to a channel message.
    #[error("Unexpected message type {0:#04X}")]
    UnexpectedMessageType(u8),
    /// The events of a track did not end on the track chunk boundary.
    #[error("Track events ended at {position}, but the track chunk ends at {end}")]
    TrackLengthMismatch {
        /// Where the chunk says the track ends
        end: usize,
        /// Where the last event actually ended
        position: usize,
    },
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }
    /// True if the buffer was exhausted mid-read
    pub const fn is_truncated(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::TruncatedInput)
    }
    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }
    /// Returns the position where the read error occurred.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Create a new truncated input error
    pub const fn truncated(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::TruncatedInput,
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;

#[test]
fn display_includes_position() {
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;

    let err = ReaderError::new(14, ReaderErrorKind::UnsupportedTimeDivision(0xE728));
    assert_eq!(
        err.to_string(),
        "Reading at Position 14, Unsupported time division 0xE728"
    );

    let err = ReaderError::new(0, ReaderErrorKind::InvalidHeaderChunk(*b"RIFF"));
    assert_eq!(
        err.to_string(),
        "Reading at Position 0, Invalid header chunk id [52, 49, 46, 46]"
    );
}
