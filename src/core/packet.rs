use thiserror::Error;

use crate::core::constants;
use crate::core::header_options::{HeaderOptions, HEADER_OPTIONS_LENGTH};
use crate::core::utils::calculate_internet_checksum;

/// Reasons a buffer is rejected as an ICMP packet.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPacketError {
    /// The buffer is shorter than the fixed 8-byte header.
    #[error("Malformed headers")]
    MalformedHeaders,
    /// The Internet checksum over the whole buffer is not zero.
    #[error("Invalid checksum")]
    InvalidChecksum,
}

impl InvalidPacketError {
    pub fn reason(&self) -> &'static str {
        match self {
            InvalidPacketError::MalformedHeaders => "Malformed headers",
            InvalidPacketError::InvalidChecksum => "Invalid checksum",
        }
    }
}

/// A decoded ICMP message.
///
/// ```text
///  0        8        16                31
/// +--------+--------+-------------------+
/// |  type  |  code  |     checksum      |
/// +--------+--------+-------------------+
/// |           header options            |
/// +-------------------------------------+
/// |               data ...              |
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Packet {
    pub icmp_type: u8,
    pub code: u8,
    /// Checksum as read from the wire, or as computed by the last `marshal`.
    pub checksum: u16,
    pub header_options: HeaderOptions,
    pub data: Vec<u8>,
}

impl Packet {
    pub fn new(icmp_type: u8, code: u8, header_options: impl Into<HeaderOptions>) -> Self {
        Packet {
            icmp_type,
            code,
            checksum: 0,
            header_options: header_options.into(),
            data: Vec::new(),
        }
    }

    pub fn with_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = data.into();
        self
    }

    /// Length of the encoded packet in bytes.
    pub fn encoded_len(&self) -> usize {
        constants::ICMP_HEADER_SIZE + self.data.len()
    }

    /// Decodes `buf` into a packet.
    ///
    /// Fails with `MalformedHeaders` when `buf` is shorter than the 8-byte header
    /// and with `InvalidChecksum` when the checksum over `buf` does not verify.
    /// The payload is copied out of `buf`.
    pub fn parse(buf: &[u8]) -> Result<Self, InvalidPacketError> {
        if buf.len() < constants::ICMP_HEADER_SIZE {
            return Err(InvalidPacketError::MalformedHeaders);
        }
        if calculate_internet_checksum(buf) != 0 {
            return Err(InvalidPacketError::InvalidChecksum);
        }

        let mut options = [0u8; HEADER_OPTIONS_LENGTH];
        options.copy_from_slice(
            &buf[constants::ICMP_HEADER_OPTIONS_OFFSET..constants::ICMP_HEADER_SIZE],
        );

        Ok(Packet {
            icmp_type: buf[constants::ICMP_TYPE_OFFSET],
            code: buf[constants::ICMP_CODE_OFFSET],
            checksum: u16::from_be_bytes([
                buf[constants::ICMP_CHECKSUM_OFFSET],
                buf[constants::ICMP_CHECKSUM_OFFSET + 1],
            ]),
            header_options: HeaderOptions::from_be_bytes(options),
            data: buf[constants::ICMP_HEADER_SIZE..].to_vec(),
        })
    }

    /// Encodes the packet, computing a fresh checksum and storing it in
    /// `self.checksum`.
    pub fn marshal(&mut self) -> Vec<u8> {
        let buf = self.to_bytes();
        self.checksum = u16::from_be_bytes([
            buf[constants::ICMP_CHECKSUM_OFFSET],
            buf[constants::ICMP_CHECKSUM_OFFSET + 1],
        ]);
        buf
    }

    /// Encodes the packet with a freshly computed checksum without touching
    /// `self`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.encoded_len()];
        buf[constants::ICMP_TYPE_OFFSET] = self.icmp_type;
        buf[constants::ICMP_CODE_OFFSET] = self.code;
        // Checksum field stays zero until the sum below is taken
        buf[constants::ICMP_HEADER_OPTIONS_OFFSET..constants::ICMP_HEADER_SIZE]
            .copy_from_slice(&self.header_options.to_be_bytes());
        buf[constants::ICMP_HEADER_SIZE..].copy_from_slice(&self.data);

        let checksum = calculate_internet_checksum(&buf);
        buf[constants::ICMP_CHECKSUM_OFFSET..constants::ICMP_CHECKSUM_OFFSET + 2]
            .copy_from_slice(&checksum.to_be_bytes());
        buf
    }
}
