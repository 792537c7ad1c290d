#![warn(missing_docs)]
#![warn(clippy::all)]
#![no_std]
#![doc = r#"
A decoder for Standard MIDI Files that gives you musical time instead of raw bytes.

`smfread` walks the chunks of a standard midi file and produces a [`MidiFile`]:
a header plus one [`Track`] per track chunk. Each track maps a position in
*beats* to the events that happen there.

Note on and note off messages never reach you as separate events. They are
paired per pitch into a single [`Event::Note`] that sits at the beat the note
started and carries its duration.

# Example
```rust
# use smfread::prelude::*;
let bytes = [
    // MThd, length 6, format 0, 1 track, 96 ticks per beat
    0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01, 0x00, 0x60,
    // MTrk, 12 bytes
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x0C,
    0x00, 0x90, 0x3C, 0x64, // note on, C4
    0x60, 0x80, 0x3C, 0x40, // 96 ticks later, note off
    0x00, 0xFF, 0x2F, 0x00, // end of track
];

let file = MidiFile::parse(&bytes[..]).unwrap();
let track = &file.tracks()[0];

let (beat, events) = track.beats().next().unwrap();
assert_eq!(beat, 0.);
assert_eq!(
    events[0],
    Event::Note {
        channel: 1,
        pitch: 60,
        velocity: 100,
        duration: 1.,
        release_velocity: Some(64),
    }
);
```

# Warnings
Some malformed input is common enough in the wild that failing would be
unhelpful: a note on for a pitch that is already sounding, or a note off with
no matching note on. These are dropped and reported as [`Diagnostic`]s. Use
[`Decoder`] to receive them:

```rust
# use smfread::prelude::*;
# let bytes = [
#     0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01, 0x00, 0x60,
#     0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x08,
#     0x00, 0x80, 0x3C, 0x40,
#     0x00, 0xFF, 0x2F, 0x00,
# ];
let decoded = Decoder::new(&bytes[..]).decode().unwrap();
assert_eq!(
    decoded.diagnostics,
    [Diagnostic::UnmatchedNoteOff { track: 0, tick: 0, pitch: 60 }]
);
```

# Features
- `std` (default): `std` support for the error types.
- `serde`: `Serialize`/`Deserialize` for the decoded document.
- `tracing`: diagnostics are also emitted as `tracing` warnings.
"#]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod decode;
pub mod event;
pub mod file;
pub mod reader;

mod diagnostic;
pub use diagnostic::*;

pub use decode::{DecodeOptions, Decoded, Decoder, HeldNotes};
pub use event::*;
pub use file::*;
pub use reader::{ReadResult, ReaderError, ReaderErrorKind};

#[doc = r#"
Common re-exports when working with `smfread`
"#]
pub mod prelude {
    pub use crate::{
        decode::{DecodeOptions, Decoded, Decoder, HeldNotes},
        diagnostic::*,
        event::*,
        file::*,
        reader::{ReadResult, ReaderError, ReaderErrorKind},
    };
}
