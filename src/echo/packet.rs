use std::ops::Deref;

use crate::core::constants::{ICMP_ECHO_CODE, ICMP_ECHO_REPLY_TYPE, ICMP_ECHO_REQUEST_TYPE};
use crate::core::{HeaderOptions, Packet};

const IDENTIFIER_INDEX: usize = 0;
const SEQUENCE_INDEX: usize = 1;

/// An Echo Request or Echo Reply.
///
/// The identifier and sequence number are the two halfwords of the header
/// options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoPacket {
    packet: Packet,
}

impl EchoPacket {
    pub fn request(identifier: u16, sequence: u16) -> Self {
        Self::build(ICMP_ECHO_REQUEST_TYPE, identifier, sequence)
    }

    pub fn reply(identifier: u16, sequence: u16) -> Self {
        Self::build(ICMP_ECHO_REPLY_TYPE, identifier, sequence)
    }

    fn build(icmp_type: u8, identifier: u16, sequence: u16) -> Self {
        let mut options = HeaderOptions::default();
        options.set_uint16(IDENTIFIER_INDEX, identifier);
        options.set_uint16(SEQUENCE_INDEX, sequence);
        EchoPacket {
            packet: Packet::new(icmp_type, ICMP_ECHO_CODE, options),
        }
    }

    pub fn with_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.packet.data = data.into();
        self
    }

    /// Wraps `packet` if it is an Echo Request or Echo Reply.
    pub fn from_packet(packet: Packet) -> Option<Self> {
        let is_echo = packet.code == ICMP_ECHO_CODE
            && (packet.icmp_type == ICMP_ECHO_REPLY_TYPE
                || packet.icmp_type == ICMP_ECHO_REQUEST_TYPE);
        is_echo.then_some(EchoPacket { packet })
    }

    pub fn is_reply(&self) -> bool {
        self.packet.icmp_type == ICMP_ECHO_REPLY_TYPE
    }

    pub fn identifier(&self) -> u16 {
        self.packet.header_options.uint16(IDENTIFIER_INDEX)
    }

    pub fn set_identifier(&mut self, identifier: u16) {
        self.packet.header_options.set_uint16(IDENTIFIER_INDEX, identifier);
    }

    pub fn sequence(&self) -> u16 {
        self.packet.header_options.uint16(SEQUENCE_INDEX)
    }

    pub fn set_sequence(&mut self, sequence: u16) {
        self.packet.header_options.set_uint16(SEQUENCE_INDEX, sequence);
    }

    pub fn marshal(&mut self) -> Vec<u8> {
        self.packet.marshal()
    }

    pub fn into_packet(self) -> Packet {
        self.packet
    }
}

impl Deref for EchoPacket {
    type Target = Packet;

    fn deref(&self) -> &Packet {
        &self.packet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures;

    #[test]
    fn test_request_layout() {
        let mut request = EchoPacket::request(0x1C2B, 1);
        assert!(!request.is_reply());
        let bytes = request.marshal();
        assert_eq!(&bytes[..2], &[8, 0]);
        assert_eq!(&bytes[4..8], &[0x1C, 0x2B, 0x00, 0x01]);
        assert_eq!(request.checksum, u16::from_be_bytes([bytes[2], bytes[3]]));
    }

    #[test]
    fn test_reply_with_data_matches_capture() {
        let data = &fixtures::ECHO_REPLY_LINUX[8..];
        let mut reply = EchoPacket::reply(0x1C2B, 1).with_data(data);
        assert!(reply.is_reply());
        assert_eq!(reply.marshal(), fixtures::ECHO_REPLY_LINUX);
    }

    #[test]
    fn test_from_captured_request() {
        let packet = Packet::parse(fixtures::ECHO_REQUEST_WINDOWS).unwrap();
        let echo = EchoPacket::from_packet(packet).unwrap();
        assert_eq!(echo.identifier(), 1);
        assert_eq!(echo.sequence(), 0x21);
    }

    #[test]
    fn test_from_packet_rejects_other_types() {
        let packet = Packet::parse(fixtures::PORT_UNREACHABLE).unwrap();
        assert!(EchoPacket::from_packet(packet).is_none());
        assert!(EchoPacket::from_packet(Packet::new(0, 1, 0u32)).is_none());
    }

    #[test]
    fn test_setters() {
        let mut echo = EchoPacket::request(1, 1);
        echo.set_identifier(0xFFFF);
        echo.set_sequence(0x0102);
        assert_eq!(echo.header_options.value(), 0xFFFF_0102);
    }
}
