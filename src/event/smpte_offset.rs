use thiserror::Error;

/// The frame rate stored in the top bits of an `FF 54` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// `00`: 24 fps
    Fps24,
    /// `01`: 25 fps
    Fps25,
    /// `10`: 30 fps drop-frame, really 30000/1001
    Fps30Drop,
    /// `11`: 30 fps
    Fps30,
}

impl SmpteFps {
    const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Fps24),
            1 => Some(Self::Fps25),
            2 => Some(Self::Fps30Drop),
            3 => Some(Self::Fps30),
            _ => None,
        }
    }

    /// Frames per wall-clock second
    pub const fn frames_per_second(&self) -> f64 {
        match self {
            Self::Fps24 => 24.,
            Self::Fps25 => 25.,
            Self::Fps30Drop => 30_000. / 1001.,
            Self::Fps30 => 30.,
        }
    }

    /// How many frame numbers a second is divided into.
    ///
    /// Drop-frame still numbers its frames 0-29.
    pub const fn frame_numbers(&self) -> u8 {
        match self {
            Self::Fps24 => 24,
            Self::Fps25 => 25,
            Self::Fps30Drop | Self::Fps30 => 30,
        }
    }
}

/// Why an `FF 54` payload does not describe a valid start time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteError {
    /// Anything but 5 bytes
    #[error("expected 5 bytes, got {0}")]
    Length(usize),
    /// The top bit of the first byte is set
    #[error("frame rate bits {0:#05b} do not name a frame rate")]
    FrameRate(u8),
    /// Above 23
    #[error("hour {0} is out of range")]
    Hour(u8),
    /// Above 59
    #[error("minute {0} is out of range")]
    Minute(u8),
    /// Above 59
    #[error("second {0} is out of range")]
    Second(u8),
    /// Not below the frame count of the frame rate
    #[error("frame {0} is out of range")]
    Frame(u8),
    /// Above 99
    #[error("subframe {0} is out of range")]
    Subframe(u8),
}

/// The time a track starts at, interpreted from the raw bytes of an
/// [`Event::SmpteOffset`](crate::Event::SmpteOffset).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteOffset {
    /// Frame rate of `frame` and `subframe`
    pub fps: SmpteFps,
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-59
    pub second: u8,
    /// Below [`SmpteFps::frame_numbers`]
    pub frame: u8,
    /// Hundredths of a frame
    pub subframe: u8,
}

impl SmpteOffset {
    /// Interpret `0rrhhhhh mm ss ff sf`.
    pub const fn parse(data: &[u8]) -> Result<Self, SmpteError> {
        let &[rate_hour, minute, second, frame, subframe] = data else {
            return Err(SmpteError::Length(data.len()));
        };
        let Some(fps) = SmpteFps::from_bits(rate_hour >> 5) else {
            return Err(SmpteError::FrameRate(rate_hour >> 5));
        };
        let hour = rate_hour & 0x1F;

        if hour > 23 {
            Err(SmpteError::Hour(hour))
        } else if minute > 59 {
            Err(SmpteError::Minute(minute))
        } else if second > 59 {
            Err(SmpteError::Second(second))
        } else if frame >= fps.frame_numbers() {
            Err(SmpteError::Frame(frame))
        } else if subframe > 99 {
            Err(SmpteError::Subframe(subframe))
        } else {
            Ok(Self {
                fps,
                hour,
                minute,
                second,
                frame,
                subframe,
            })
        }
    }

    /// Whole seconds since 00:00:00, ignoring frames
    pub const fn seconds(&self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32
    }

    /// The offset in microseconds, frames converted at the offset's own rate
    pub const fn as_micros(&self) -> f64 {
        let frames = self.frame as f64 + self.subframe as f64 / 100.;
        self.seconds() as f64 * 1_000_000. + frames * 1_000_000. / self.fps.frames_per_second()
    }
}

#[test]
fn fields_in_payload_order() {
    use pretty_assertions::assert_eq;
    let offset = SmpteOffset::parse(&[0x22, 0x0A, 0x14, 0x05, 0x32]).unwrap();
    assert_eq!(
        offset,
        SmpteOffset {
            fps: SmpteFps::Fps25,
            hour: 2,
            minute: 10,
            second: 20,
            frame: 5,
            subframe: 50,
        }
    );
    assert_eq!(offset.seconds(), 2 * 3600 + 10 * 60 + 20);
}

#[test]
fn frame_limit_follows_rate() {
    use pretty_assertions::assert_eq;
    // frame 24 only exists above 24 fps
    assert_eq!(
        SmpteOffset::parse(&[0x00, 0, 0, 24, 0]),
        Err(SmpteError::Frame(24))
    );
    assert!(SmpteOffset::parse(&[0x20, 0, 0, 24, 0]).is_ok());
    assert!(SmpteOffset::parse(&[0x40, 0, 0, 29, 0]).is_ok());
    assert_eq!(
        SmpteOffset::parse(&[0x60, 0, 0, 30, 0]),
        Err(SmpteError::Frame(30))
    );
}

#[test]
fn first_bad_field_is_reported() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        SmpteOffset::parse(&[0x98, 99, 99, 99, 200]),
        Err(SmpteError::FrameRate(0b100))
    );
    assert_eq!(
        SmpteOffset::parse(&[0x18, 99, 99, 99, 200]),
        Err(SmpteError::Hour(24))
    );
    assert_eq!(
        SmpteOffset::parse(&[0x17, 0, 0, 0, 100]),
        Err(SmpteError::Subframe(100))
    );
    assert_eq!(SmpteOffset::parse(&[]), Err(SmpteError::Length(0)));
}

#[test]
fn micros_at_each_rate() {
    use pretty_assertions::assert_eq;
    // 00:00:01, frame 12 at 24 fps is 1.5 s
    let offset = SmpteOffset::parse(&[0x00, 0, 1, 12, 0]).unwrap();
    assert_eq!(offset.as_micros(), 1_500_000.);

    // half a frame at 25 fps
    let offset = SmpteOffset::parse(&[0x20, 0, 0, 0, 50]).unwrap();
    assert_eq!(offset.as_micros(), 20_000.);

    // one drop-frame frame lasts 1001/30000 s
    let offset = SmpteOffset::parse(&[0x40, 0, 0, 1, 0]).unwrap();
    let error = offset.as_micros() - 1_001_000. / 30.;
    assert!(-1e-6 < error && error < 1e-6);
}
