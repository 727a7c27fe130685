//! ICMP Echo Request/Reply on top of the core listeners.

pub mod listener;
pub mod packet;

pub use listener::{listener, listener_all, send, EchoReply};
pub use packet::EchoPacket;
