#![allow(dead_code)]

/// Build an `MThd` chunk with a 6 byte body
pub fn header(format: u16, tracks: u16, division: u16) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"MThd");
    bytes.extend_from_slice(&6u32.to_be_bytes());
    bytes.extend_from_slice(&format.to_be_bytes());
    bytes.extend_from_slice(&tracks.to_be_bytes());
    bytes.extend_from_slice(&division.to_be_bytes());
    bytes
}

/// Wrap raw `delta event` bytes in an `MTrk` chunk
pub fn track(events: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&(events.len() as u32).to_be_bytes());
    bytes.extend_from_slice(events);
    bytes
}

/// A complete file with one track chunk per entry in `tracks`
pub fn smf(division: u16, tracks: &[&[u8]]) -> Vec<u8> {
    let format = if tracks.len() == 1 { 0 } else { 1 };
    let mut bytes = header(format, tracks.len() as u16, division);
    for events in tracks {
        bytes.extend(track(events));
    }
    bytes
}

/// `00 FF 2F 00`
pub const END_OF_TRACK: [u8; 4] = [0x00, 0xFF, 0x2F, 0x00];
