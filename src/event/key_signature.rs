use core::fmt;

/// Key names indexed by `sharps + 7`, from 7 flats to 7 sharps.
const KEY_NAMES: [&str; 15] = [
    "Cb", "Gb", "Db", "Ab", "Eb", "Bb", "F", "C", "G", "D", "A", "E", "B", "F#", "C#",
];

#[doc = r#"
FF 59 02 sf mi Key Signature

`sf` is the number of sharps (positive) or flats (negative), `mi` is 0 for a
major key and 1 for a minor key.

# Example
```rust
# use smfread::prelude::*;
let sig = KeySignature::new(-3, 1);
assert_eq!(sig.key().to_string(), "Eb");
assert_eq!(sig.scale(), Scale::Minor);
```
"#]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeySignature {
    sharps: i8,
    scale: u8,
}

impl KeySignature {
    /// Create a key signature from its two raw data bytes
    pub const fn new(sharps: i8, scale: u8) -> Self {
        Self { sharps, scale }
    }

    /// Sharps if positive, flats if negative
    pub const fn sharps(&self) -> i8 {
        self.sharps
    }

    /// The name of the tonic for the major key with this many accidentals
    pub const fn key(&self) -> KeyName {
        match self.sharps {
            -7..=7 => KeyName::Known(KEY_NAMES[(self.sharps + 7) as usize]),
            v => KeyName::Unknown(v),
        }
    }

    /// Major, minor or something unrecognized
    pub const fn scale(&self) -> Scale {
        match self.scale {
            0 => Scale::Major,
            1 => Scale::Minor,
            v => Scale::Unknown(v),
        }
    }
}

/// The key name of a [`KeySignature`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyName {
    /// A count of -7 to 7 accidentals
    Known(&'static str),
    /// A count outside of -7 to 7
    Unknown(i8),
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyName::Known(name) => f.write_str(name),
            KeyName::Unknown(v) => write!(f, "unknown {v}"),
        }
    }
}

/// The scale of a [`KeySignature`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scale {
    /// `mi` = 0
    Major,
    /// `mi` = 1
    Minor,
    /// Anything else
    Unknown(u8),
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scale::Major => f.write_str("major"),
            Scale::Minor => f.write_str("minor"),
            Scale::Unknown(v) => write!(f, "unknown {v}"),
        }
    }
}

#[test]
fn every_key_in_table() {
    use alloc::{string::ToString, vec::Vec};
    use pretty_assertions::assert_eq;
    let names: Vec<_> = (-7..=7)
        .map(|sf| KeySignature::new(sf, 0).key().to_string())
        .collect();
    assert_eq!(
        names,
        [
            "Cb", "Gb", "Db", "Ab", "Eb", "Bb", "F", "C", "G", "D", "A", "E", "B", "F#", "C#"
        ]
    );
}

#[test]
fn out_of_range_values() {
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;
    let sig = KeySignature::new(9, 4);
    assert_eq!(sig.key(), KeyName::Unknown(9));
    assert_eq!(sig.key().to_string(), "unknown 9");
    assert_eq!(sig.scale().to_string(), "unknown 4");

    let sig = KeySignature::new(-8, 1);
    assert_eq!(sig.key().to_string(), "unknown -8");
    assert_eq!(sig.scale().to_string(), "minor");
}
