use super::Decoder;
use crate::{
    diagnostic::Diagnostic,
    event::Event,
    reader::{ReadResult, ReaderError, ReaderErrorKind},
};
use alloc::collections::BTreeMap;

/// Status byte of a meta event
pub const META_EVENT: u8 = 0xFF;
/// Status byte of a SysEx event
pub const SYSEX_EVENT: u8 = 0xF0;
/// Status byte of a SysEx continuation or escape
pub const SYSEX_ESCAPE: u8 = 0xF7;

/// A note on waiting for its note off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenNote {
    velocity: u8,
    start_tick: u64,
}

impl OpenNote {
    /// The note on velocity
    pub const fn velocity(&self) -> u8 {
        self.velocity
    }
    /// The absolute tick of the note on
    pub const fn start_tick(&self) -> u64 {
        self.start_tick
    }
}

/// The status a data byte resolves to when its own status byte is omitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningStatus {
    /// The message type, `status & 0xF0`
    pub status: u8,
    /// 1-16
    pub channel: u8,
}

impl RunningStatus {
    /// Split a status byte into its message type and 1-based channel
    pub const fn from_status_byte(byte: u8) -> Self {
        Self {
            status: byte & 0xF0,
            channel: (byte & 0x0F) + 1,
        }
    }
}

#[doc = r#"
Everything the decoder tracks while inside one track chunk.

Created fresh at the start of each `MTrk` chunk and dropped at its end, so
nothing leaks between tracks: ticks restart at 0, no notes are open, and there
is no running status.
"#]
#[derive(Debug, Clone)]
pub struct TrackState {
    index: usize,
    ticks_per_beat: u16,
    ticks_elapsed: u64,
    open_notes: BTreeMap<u8, OpenNote>,
    running_status: Option<RunningStatus>,
}

impl TrackState {
    /// State for the track at `index`
    pub const fn new(index: usize, ticks_per_beat: u16) -> Self {
        Self {
            index,
            ticks_per_beat,
            ticks_elapsed: 0,
            open_notes: BTreeMap::new(),
            running_status: None,
        }
    }

    /// The 0-based track index
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Absolute ticks since the start of the track
    pub const fn ticks_elapsed(&self) -> u64 {
        self.ticks_elapsed
    }

    /// Add a delta time
    pub const fn advance(&mut self, delta: u64) {
        self.ticks_elapsed = self.ticks_elapsed.saturating_add(delta);
    }

    /// The last explicit channel status seen in this track
    pub const fn running_status(&self) -> Option<RunningStatus> {
        self.running_status
    }

    pub(super) const fn set_running_status(&mut self, status: RunningStatus) {
        self.running_status = Some(status);
    }

    /// The note open at `pitch`, if any
    pub fn open_note(&self, pitch: u8) -> Option<&OpenNote> {
        self.open_notes.get(&pitch)
    }

    /// Start a note at the current tick.
    ///
    /// Returns false, leaving the existing note untouched, if `pitch` is
    /// already sounding.
    pub fn open(&mut self, pitch: u8, velocity: u8) -> bool {
        if self.open_notes.contains_key(&pitch) {
            return false;
        }
        self.open_notes.insert(
            pitch,
            OpenNote {
                velocity,
                start_tick: self.ticks_elapsed,
            },
        );
        true
    }

    /// End the note at `pitch`, producing the start tick and paired note event.
    ///
    /// Returns `None` if `pitch` is not sounding.
    pub fn close(
        &mut self,
        channel: u8,
        pitch: u8,
        release_velocity: Option<u8>,
    ) -> Option<(u64, Event)> {
        let open = self.open_notes.remove(&pitch)?;
        let ticks = self.ticks_elapsed - open.start_tick;
        let event = Event::Note {
            channel,
            pitch,
            velocity: open.velocity,
            duration: ticks as f64 / self.ticks_per_beat as f64,
            release_velocity,
        };
        Some((open.start_tick, event))
    }

    /// The notes that were never closed, by pitch
    pub fn into_open_notes(self) -> impl Iterator<Item = (u8, OpenNote)> {
        self.open_notes.into_iter()
    }
}

impl Decoder<'_> {
    /// Decode the event after a delta time.
    ///
    /// Returns the tick to file the event under, or `None` if the message only
    /// changed the state (a note on, or a dropped note off).
    pub(super) fn decode_event(
        &mut self,
        state: &mut TrackState,
    ) -> ReadResult<Option<(u64, Event)>> {
        let position = self.reader.buffer_position();
        let status = self.reader.read_u8()?;
        match status {
            META_EVENT => {
                let event = self.decode_meta()?;
                if let Some(Err(error)) = event.smpte_offset() {
                    self.warn(Diagnostic::InvalidSmpteOffset {
                        track: state.index(),
                        tick: state.ticks_elapsed(),
                        error,
                    });
                }
                Ok(Some((state.ticks_elapsed(), event)))
            }
            SYSEX_EVENT | SYSEX_ESCAPE => Err(ReaderError::new(
                position,
                ReaderErrorKind::UnsupportedEventType(status),
            )),
            _ => self.decode_message(state, status, position),
        }
    }
}

#[test]
fn note_pairs_at_start_tick() {
    use pretty_assertions::assert_eq;
    let mut state = TrackState::new(0, 96);
    state.advance(48);
    assert!(state.open(60, 100));
    state.advance(144);
    assert_eq!(
        state.close(3, 60, Some(64)),
        Some((
            48,
            Event::Note {
                channel: 3,
                pitch: 60,
                velocity: 100,
                duration: 1.5,
                release_velocity: Some(64),
            }
        ))
    );
    assert_eq!(state.close(3, 60, Some(64)), None);
}

#[test]
fn duplicate_open_keeps_first() {
    use pretty_assertions::assert_eq;
    let mut state = TrackState::new(0, 96);
    assert!(state.open(60, 100));
    state.advance(10);
    assert!(!state.open(60, 20));
    assert_eq!(state.open_note(60).map(|n| (n.velocity(), n.start_tick())), Some((100, 0)));
}

#[test]
fn running_status_from_byte() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        RunningStatus::from_status_byte(0x9F),
        RunningStatus {
            status: 0x90,
            channel: 16
        }
    );
}

#[test]
fn system_status_leaves_running_status_alone() {
    use pretty_assertions::assert_eq;
    let mut decoder = Decoder::new(&[0x90, 0xF1, 0x00][..]);
    let mut state = TrackState::new(0, 96);

    // as if a note on status had already been decoded
    decoder.reader.skip(1).unwrap();
    state.set_running_status(RunningStatus::from_status_byte(0x90));

    let err = decoder.decode_event(&mut state).unwrap_err();
    assert_eq!(*err.error_kind(), ReaderErrorKind::UnexpectedMessageType(0xF1));
    assert_eq!(
        state.running_status(),
        Some(RunningStatus {
            status: 0x90,
            channel: 1
        })
    );
}
