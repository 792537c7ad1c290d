#![doc = r#"
Channel voice messages and running status

```text
|status|data 1|data 2|      explicit status
       |data 1|data 2|      running status, reuses the last status byte
```

A byte with its top bit set is a status byte: the high nibble is the message
type and the low nibble the channel (0-15, reported as 1-16). A byte with its
top bit clear, where a status byte is expected, is already the first data
byte of a message of the same type and channel as the previous one.
"#]

use super::{Decoder, RunningStatus, TrackState};
use crate::{
    diagnostic::Diagnostic,
    event::Event,
    reader::{ReadResult, ReaderError, ReaderErrorKind},
};
use num_enum::TryFromPrimitive;

/// The channel voice message types, `status & 0xF0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum VoiceKind {
    /// `8n key velocity`
    NoteOff = 0x80,
    /// `9n key velocity`
    NoteOn = 0x90,
    /// `An key pressure`
    NoteAftertouch = 0xA0,
    /// `Bn controller value`
    Controller = 0xB0,
    /// `Cn program`
    ProgramChange = 0xC0,
    /// `Dn pressure`
    ChannelAftertouch = 0xD0,
    /// `En lsb msb`
    PitchBend = 0xE0,
}

impl Decoder<'_> {
    /// Decode a channel message whose first byte, `status`, has already been
    /// consumed from `position`.
    pub(super) fn decode_message(
        &mut self,
        state: &mut TrackState,
        status: u8,
        position: usize,
    ) -> ReadResult<Option<(u64, Event)>> {
        let unexpected =
            || ReaderError::new(position, ReaderErrorKind::UnexpectedMessageType(status));

        let (kind, channel) = if status & 0x80 != 0 {
            let running = RunningStatus::from_status_byte(status);
            let kind = VoiceKind::try_from(running.status).map_err(|_| unexpected())?;
            state.set_running_status(running);
            (kind, running.channel)
        } else {
            let running = state.running_status().ok_or_else(unexpected)?;
            let kind = VoiceKind::try_from(running.status).map_err(|_| unexpected())?;
            // that was the first data byte
            self.reader.push_back(status);
            (kind, running.channel)
        };

        let event = match kind {
            VoiceKind::NoteOn => {
                let pitch = self.reader.read_u8()?;
                let velocity = self.reader.read_u8()?;
                if velocity == 0 {
                    return Ok(self.note_off(state, channel, pitch, None));
                }
                self.note_on(state, pitch, velocity);
                return Ok(None);
            }
            VoiceKind::NoteOff => {
                let pitch = self.reader.read_u8()?;
                let release = self.reader.read_u8()?;
                return Ok(self.note_off(state, channel, pitch, Some(release)));
            }
            VoiceKind::NoteAftertouch => Event::NoteAftertouch {
                channel,
                pitch: self.reader.read_u8()?,
                value: self.reader.read_u8()?,
            },
            VoiceKind::Controller => Event::Controller {
                channel,
                number: self.reader.read_u8()?,
                value: self.reader.read_u8()?,
            },
            VoiceKind::ProgramChange => Event::ProgramChange {
                channel,
                number: self.reader.read_u8()?,
            },
            VoiceKind::ChannelAftertouch => Event::ChannelAftertouch {
                channel,
                value: self.reader.read_u8()?,
            },
            VoiceKind::PitchBend => {
                let lsb = self.reader.read_u8()?;
                let msb = self.reader.read_u8()?;
                Event::PitchBend {
                    channel,
                    value: (u16::from(msb & 0x7F) << 7) | u16::from(lsb & 0x7F),
                }
            }
        };

        Ok(Some((state.ticks_elapsed(), event)))
    }

    fn note_on(&mut self, state: &mut TrackState, pitch: u8, velocity: u8) {
        if !state.open(pitch, velocity) {
            self.warn(Diagnostic::DuplicateNoteOn {
                track: state.index(),
                tick: state.ticks_elapsed(),
                pitch,
            });
        }
    }

    fn note_off(
        &mut self,
        state: &mut TrackState,
        channel: u8,
        pitch: u8,
        release_velocity: Option<u8>,
    ) -> Option<(u64, Event)> {
        let note = state.close(channel, pitch, release_velocity);
        if note.is_none() {
            self.warn(Diagnostic::UnmatchedNoteOff {
                track: state.index(),
                tick: state.ticks_elapsed(),
                pitch,
            });
        }
        note
    }
}
