use std::fmt;

pub const HEADER_OPTIONS_LENGTH: usize = 4;
const HALFWORD_COUNT: usize = HEADER_OPTIONS_LENGTH / 2;

/// The 4-byte "rest of header" word that follows the checksum.
///
/// Its meaning depends on the message type (identifier and sequence number for
/// echo messages, a gateway address for redirects, unused for most errors).
/// The value is big-endian on the wire: `byte(0)` is the most significant byte
/// and `uint16(0)` covers bytes 0 and 1. Both accessors work on the same
/// scalar, so writes through one are visible through the other.
///
/// Indices outside `[0, 4)` for bytes and `[0, 2)` for halfwords panic.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeaderOptions(u32);

impl HeaderOptions {
    pub const fn new(value: u32) -> Self {
        HeaderOptions(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub fn byte(self, index: usize) -> u8 {
        (self.0 >> Self::byte_shift(index)) as u8
    }

    pub fn set_byte(&mut self, index: usize, value: u8) {
        let shift = Self::byte_shift(index);
        self.0 = (self.0 & !(0xFF << shift)) | (u32::from(value) << shift);
    }

    pub fn uint16(self, index: usize) -> u16 {
        (self.0 >> Self::halfword_shift(index)) as u16
    }

    pub fn set_uint16(&mut self, index: usize, value: u16) {
        let shift = Self::halfword_shift(index);
        self.0 = (self.0 & !(0xFFFF << shift)) | (u32::from(value) << shift);
    }

    pub fn to_be_bytes(self) -> [u8; HEADER_OPTIONS_LENGTH] {
        self.0.to_be_bytes()
    }

    pub fn from_be_bytes(bytes: [u8; HEADER_OPTIONS_LENGTH]) -> Self {
        HeaderOptions(u32::from_be_bytes(bytes))
    }

    fn byte_shift(index: usize) -> u32 {
        if index >= HEADER_OPTIONS_LENGTH {
            panic!("Index out of bounds");
        }
        8 * (HEADER_OPTIONS_LENGTH - 1 - index) as u32
    }

    fn halfword_shift(index: usize) -> u32 {
        if index >= HALFWORD_COUNT {
            panic!("Index out of bounds");
        }
        16 * (HALFWORD_COUNT - 1 - index) as u32
    }
}

impl From<u32> for HeaderOptions {
    fn from(value: u32) -> Self {
        HeaderOptions(value)
    }
}

impl From<HeaderOptions> for u32 {
    fn from(options: HeaderOptions) -> Self {
        options.0
    }
}

impl fmt::Display for HeaderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
