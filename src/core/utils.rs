use crate::core::constants;

/// Calculates the Internet checksum (RFC 1071) of `buf`.
///
/// The buffer is read as a sequence of big-endian 16-bit words. A trailing odd
/// byte is treated as the high byte of a final word padded with zero. Carries
/// above bit 15 are folded back into the low 16 bits until none remain, and
/// the one's complement of the result is returned.
///
/// Running this over a buffer whose checksum field already holds the correct
/// value yields `0`, which is how received packets are validated.
pub fn calculate_internet_checksum(buf: &[u8]) -> u16 {
    let mut sum = 0u32;
    let mut words = buf.chunks_exact(2);
    for word in &mut words {
        sum = fold_carry(sum + u32::from(u16::from_be_bytes([word[0], word[1]])));
    }
    if let [last] = words.remainder() {
        sum = fold_carry(sum + (u32::from(*last) << 8));
    }
    !(fold_carry(sum) as u16)
}

/// Folds everything above bit 15 back into the low 16 bits. Keeps the running
/// sum at or below 0x1FFFF, so adding one more word cannot overflow.
fn fold_carry(mut sum: u32) -> u32 {
    while sum >> 16 != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    sum
}

/// Returns the ICMP message carried by a raw IPv4 datagram.
///
/// Raw IPv4 sockets hand back the IP header in front of the payload. The header
/// length is taken from the IHL field. Anything that does not look like a
/// complete IPv4 header is returned unchanged and left to the packet codec to
/// reject.
pub fn strip_ipv4_header(datagram: &[u8]) -> &[u8] {
    let Some(&first) = datagram.first() else {
        return datagram;
    };
    if first >> 4 != constants::IPV4_VERSION {
        return datagram;
    }
    let header_len = usize::from(first & 0x0F) * 4;
    if header_len < constants::IPV4_MIN_HEADER_SIZE || header_len > datagram.len() {
        return datagram;
    }
    &datagram[header_len..]
}
