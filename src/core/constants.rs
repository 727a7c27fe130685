// ICMP header layout
pub const ICMP_HEADER_SIZE: usize = 8;
pub const ICMP_TYPE_OFFSET: usize = 0;
pub const ICMP_CODE_OFFSET: usize = 1;
pub const ICMP_CHECKSUM_OFFSET: usize = 2;
pub const ICMP_HEADER_OPTIONS_OFFSET: usize = 4;

// ICMP message types
pub const ICMP_ECHO_REPLY_TYPE: u8 = 0;
pub const ICMP_ECHO_REQUEST_TYPE: u8 = 8;
pub const ICMP_ECHO_CODE: u8 = 0;

// IPv4
pub const IPV4_VERSION: u8 = 4;
pub const IPV4_MIN_HEADER_SIZE: usize = 20;

// Listener defaults
pub const DEFAULT_READ_BUFFER_SIZE: usize = 65535; // Largest possible IPv4 datagram
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 200; // Poll tick for re-checking cancellation
pub const HANDOFF_CHANNEL_CAPACITY: usize = 1; // Reader -> coordinator
pub const ECHO_FILTER_CHANNEL_CAPACITY: usize = 16;
