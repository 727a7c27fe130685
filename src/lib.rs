//! ICMPv4 packet encoding/decoding and raw-socket listeners.
//!
//! - `core`: the Internet checksum, `HeaderOptions` and the `Packet` codec
//! - `net`: raw ICMP sockets, the single-socket `Listener` and the
//!   multi-interface `Dispatcher`
//! - `echo`: an Echo Request/Reply layer on top of `net`

pub mod core;
pub mod echo;
pub mod net;

pub use crate::core::{calculate_internet_checksum, HeaderOptions, InvalidPacketError, Packet};
pub use crate::net::{
    dial, done_channel, listen, listener, listener_all, send, Dispatcher, Done, DoneSender, Error,
    IcmpConn, IpPacket, Listener, ListenerConfig, ListenerGroup,
};
