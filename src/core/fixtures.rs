// Captured-style ICMP messages, all with correct checksums.

pub const ECHO_REQUEST_LINUX: &[u8] = &[
    0x08, 0x00, 0xeb, 0x1e, 0x1c, 0x2b, 0x00, 0x01, 0x5e, 0x3a, 0x2b, 0x66, 0x00, 0x00, 0x00, 0x00,
    0x9d, 0x41, 0x0b, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17,
    0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f, 0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27,
    0x28, 0x29, 0x2a, 0x2b, 0x2c, 0x2d, 0x2e, 0x2f, 0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37,
];

pub const ECHO_REPLY_LINUX: &[u8] = &[
    0x00, 0x00, 0xf3, 0x1e, 0x1c, 0x2b, 0x00, 0x01, 0x5e, 0x3a, 0x2b, 0x66, 0x00, 0x00, 0x00, 0x00,
    0x9d, 0x41, 0x0b, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17,
    0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f, 0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27,
    0x28, 0x29, 0x2a, 0x2b, 0x2c, 0x2d, 0x2e, 0x2f, 0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37,
];

pub const ECHO_REQUEST_WINDOWS: &[u8] = &[
    0x08, 0x00, 0x4d, 0x3a, 0x00, 0x01, 0x00, 0x21, 0x61, 0x62, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68,
    0x69, 0x6a, 0x6b, 0x6c, 0x6d, 0x6e, 0x6f, 0x70, 0x71, 0x72, 0x73, 0x74, 0x75, 0x76, 0x77, 0x61,
    0x62, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69,
];

/// Destination unreachable (port) quoting an IPv4 + UDP header.
pub const PORT_UNREACHABLE: &[u8] = &[
    0x03, 0x03, 0x15, 0xc3, 0x00, 0x00, 0x00, 0x00, 0x45, 0x00, 0x00, 0x3c, 0x1c, 0x46, 0x40, 0x00,
    0x40, 0x11, 0x9a, 0xb4, 0xc0, 0xa8, 0x01, 0x65, 0xc0, 0xa8, 0x01, 0x01, 0xd4, 0x31, 0x00, 0x35,
    0x00, 0x28, 0x12, 0xab,
];

/// Time exceeded with an odd-length payload.
pub const TIME_EXCEEDED_ODD: &[u8] = &[
    0x0b, 0x00, 0x06, 0xc6, 0x00, 0x00, 0x00, 0x00, 0x45, 0x00, 0x00, 0x3c, 0x1c, 0x46, 0x40, 0x00,
    0x40, 0x11, 0x9a, 0xb4, 0xc0, 0xa8, 0x01, 0x65, 0xc0, 0xa8, 0x01, 0x01, 0xd4, 0x31, 0x00, 0x35,
    0x00, 0x28, 0x12, 0xab, 0x07,
];

pub const CAPTURED_PACKETS: &[&[u8]] = &[
    ECHO_REQUEST_LINUX,
    ECHO_REPLY_LINUX,
    ECHO_REQUEST_WINDOWS,
    PORT_UNREACHABLE,
    TIME_EXCEEDED_ODD,
];
